use std::sync::Arc;

use navigation_api::config;
use navigation_api::database::manager::DatabaseManager;
use navigation_api::database::PgNavigationStore;
use navigation_api::menu::StaticRouteTable;
use navigation_api::server::{app, AppState};

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up DATABASE_URL, NAV_JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    let config = config::config();
    tracing::info!("Starting Navigation API in {:?} mode", config.environment);

    DatabaseManager::migrate()
        .await
        .unwrap_or_else(|e| panic!("failed to run migrations: {}", e));

    let pool = DatabaseManager::pool()
        .await
        .unwrap_or_else(|e| panic!("failed to connect to database: {}", e));

    let store = Arc::new(PgNavigationStore::new(pool));
    let routes = Arc::new(StaticRouteTable::from_config());
    let app = app(AppState::new(store, routes));

    // Allow tests or deployments to override port via env
    let port = std::env::var("NAV_API_PORT")
        .ok()
        .or_else(|| std::env::var("PORT").ok())
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(3000);

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    println!("🚀 Navigation API server listening on http://{}", bind_addr);

    axum::serve(listener, app).await.expect("server");
}
