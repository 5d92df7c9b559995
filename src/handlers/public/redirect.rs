use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};

use crate::database::models::LinkType;
use crate::error::ApiError;
use crate::server::AppState;

/// GET /navigation-redirect/:id - stable indirection for url and custom links.
///
/// The menu carries this endpoint instead of the raw link value, so an admin
/// can retarget an item without invalidating anything already rendered.
/// Route-linked items never point here; asking for one is a not-found.
pub async fn navigation_redirect(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Response, ApiError> {
    let item = state
        .store
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Navigation item {} not found", id)))?;

    match item.link_type() {
        Some(LinkType::Url) => {
            tracing::debug!(id, target = %item.link_value, "External navigation redirect");
            Ok(found(&item.link_value))
        }
        Some(LinkType::Custom) => {
            tracing::debug!(id, target = %item.link_value, "Internal navigation redirect");
            Ok(found(&item.link_value))
        }
        _ => Err(ApiError::not_found("Navigation item is not a redirect target")),
    }
}

fn found(location: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location.to_string())]).into_response()
}
