use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::json;

use crate::database::models::{Location, NewNavigationItem, UpdateNavigationItem};
use crate::error::ApiError;
use crate::server::AppState;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub location: Option<String>,
}

/// GET /api/navigation - list items for the admin table, enabled or not
pub async fn item_list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let location = match query.location.as_deref() {
        None => None,
        Some(s) => Some(
            Location::parse(s).ok_or_else(|| ApiError::bad_request(format!("Unknown location '{}'", s)))?,
        ),
    };

    let items = state.store.list_all(location).await?;
    Ok(Json(json!({ "success": true, "data": items })))
}

/// POST /api/navigation - create an item
pub async fn item_create(
    State(state): State<AppState>,
    Json(input): Json<NewNavigationItem>,
) -> Result<impl IntoResponse, ApiError> {
    let item = state.store.create(input).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "data": item })),
    ))
}

/// GET /api/navigation/:id - show a single item
pub async fn item_get(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let item = state
        .store
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Navigation item {} not found", id)))?;
    Ok(Json(json!({ "success": true, "data": item })))
}

/// PUT /api/navigation/:id - partial update of an item
pub async fn item_put(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(changes): Json<UpdateNavigationItem>,
) -> Result<impl IntoResponse, ApiError> {
    let item = state.store.update(id, changes).await?;
    Ok(Json(json!({ "success": true, "data": item })))
}

/// DELETE /api/navigation/:id - delete an item, cascading to its children
pub async fn item_delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let deleted = state.store.delete(id).await?;
    Ok(Json(json!({ "success": true, "data": { "deleted": deleted } })))
}
