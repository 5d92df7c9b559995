use std::sync::Arc;

use axum::{routing::get, Json, Router};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::database::manager::DatabaseManager;
use crate::database::store::NavigationStore;
use crate::handlers;
use crate::menu::{NavigationProvider, RouteTable};
use crate::middleware::{require_admin_middleware, viewer_context_middleware};

/// Shared application state: the store plus the menu hooks built over it.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn NavigationStore>,
    pub provider: NavigationProvider,
}

impl AppState {
    pub fn new(store: Arc<dyn NavigationStore>, routes: Arc<dyn RouteTable>) -> Self {
        Self {
            provider: NavigationProvider::new(store.clone(), routes),
            store,
        }
    }
}

pub fn app(state: AppState) -> Router {
    Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        .merge(menu_routes())
        .merge(redirect_routes())
        // Admin CRUD
        .merge(admin_routes())
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn menu_routes() -> Router<AppState> {
    use handlers::public::menu;

    Router::new()
        .route("/menu/main", get(menu::menu_main))
        .route("/menu/account-dropdown", get(menu::menu_account_dropdown))
        .route("/menu/dashboard", get(menu::menu_dashboard))
        .layer(axum::middleware::from_fn(viewer_context_middleware))
}

fn redirect_routes() -> Router<AppState> {
    use handlers::public::redirect;

    Router::new().route("/navigation-redirect/:id", get(redirect::navigation_redirect))
}

fn admin_routes() -> Router<AppState> {
    use handlers::protected::navigation;

    Router::new()
        .route(
            "/api/navigation",
            get(navigation::item_list).post(navigation::item_create),
        )
        .route(
            "/api/navigation/:id",
            get(navigation::item_get)
                .put(navigation::item_put)
                .delete(navigation::item_delete),
        )
        .layer(axum::middleware::from_fn(require_admin_middleware))
}

async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "success": true,
        "data": {
            "name": "Navigation API",
            "version": version,
            "description": "Navigation menu management API built with Rust (Axum)",
            "endpoints": {
                "home": "/ (public)",
                "menus": "/menu/main, /menu/account-dropdown, /menu/dashboard (public - optional bearer token)",
                "redirect": "/navigation-redirect/:id (public)",
                "admin": "/api/navigation[/:id] (admin token required)",
            }
        }
    }))
}

async fn health() -> impl axum::response::IntoResponse {
    let now = chrono::Utc::now();

    match DatabaseManager::health_check().await {
        Ok(_) => (
            axum::http::StatusCode::OK,
            Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "database": "ok"
                }
            })),
        ),
        Err(e) => (
            axum::http::StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "success": false,
                "error": "database unavailable",
                "data": {
                    "status": "degraded",
                    "timestamp": now,
                    "database_error": e.to_string()
                }
            })),
        ),
    }
}
