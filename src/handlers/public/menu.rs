use axum::{extract::State, response::IntoResponse, Extension, Json};
use serde_json::json;

use crate::error::ApiError;
use crate::menu::Viewer;
use crate::server::AppState;

/// GET /menu/main - assembled main navigation for the current viewer
pub async fn menu_main(
    State(state): State<AppState>,
    Extension(viewer): Extension<Viewer>,
) -> Result<impl IntoResponse, ApiError> {
    let entries = state.provider.build_main_menu(&viewer).await?;
    Ok(Json(json!({ "success": true, "data": entries })))
}

/// GET /menu/account-dropdown - assembled account dropdown for the current viewer
pub async fn menu_account_dropdown(
    State(state): State<AppState>,
    Extension(viewer): Extension<Viewer>,
) -> Result<impl IntoResponse, ApiError> {
    let entries = state.provider.build_account_menu(&viewer).await?;
    Ok(Json(json!({ "success": true, "data": entries })))
}

/// GET /menu/dashboard - assembled dashboard navigation for the current viewer
pub async fn menu_dashboard(
    State(state): State<AppState>,
    Extension(viewer): Extension<Viewer>,
) -> Result<impl IntoResponse, ApiError> {
    let entries = state.provider.build_dashboard_menu(&viewer).await?;
    Ok(Json(json!({ "success": true, "data": entries })))
}
