use axum::{
    extract::Request,
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

use crate::error::ApiError;
use crate::menu::Viewer;
use crate::middleware::auth::{extract_jwt_from_headers, validate_jwt};

/// Derives the per-request viewer context for the menu endpoints.
///
/// No Authorization header means a guest; a present but invalid token is
/// rejected rather than silently downgraded to guest.
pub async fn viewer_context_middleware(
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let viewer = if headers.contains_key(axum::http::header::AUTHORIZATION) {
        let token = extract_jwt_from_headers(&headers).map_err(ApiError::unauthorized)?;
        let claims = validate_jwt(&token).map_err(ApiError::unauthorized)?;
        Viewer::logged_in(claims.role_id)
    } else {
        Viewer::guest()
    };

    request.extensions_mut().insert(viewer);
    Ok(next.run(request).await)
}
