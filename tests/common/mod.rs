#![allow(dead_code)]

use std::sync::Arc;

use anyhow::Result;
use axum::body::Body;
use axum::http::{HeaderMap, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use navigation_api::auth::{generate_jwt, Claims, ACCESS_ADMIN};
use navigation_api::database::models::NavigationItem;
use navigation_api::menu::StaticRouteTable;
use navigation_api::server::{app, AppState};
use navigation_api::testing::MemoryNavigationStore;

/// Router over an in-memory store seeded with `items`, resolving against a
/// small fixed route table.
pub fn test_app(items: Vec<NavigationItem>) -> Router {
    let store = Arc::new(MemoryNavigationStore::with_items(items));
    let routes = Arc::new(StaticRouteTable::new(["home", "dashboard", "tickets"]));
    app(AppState::new(store, routes))
}

pub fn admin_token() -> String {
    generate_jwt(Claims::new("admin@example.org".to_string(), ACCESS_ADMIN.to_string(), None))
        .expect("token generation")
}

pub fn user_token(role_id: Option<i64>) -> String {
    generate_jwt(Claims::new("user@example.org".to_string(), "user".to_string(), role_id))
        .expect("token generation")
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

/// Drive one request through the router without binding a socket.
pub async fn request(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Result<TestResponse> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {}", token));
    }

    let request = match body {
        Some(json) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(serde_json::to_vec(&json)?))?,
        None => builder.body(Body::empty())?,
    };

    let response = app.oneshot(request).await?;
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = response.into_body().collect().await?.to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };

    Ok(TestResponse { status, headers, body })
}

pub async fn get(app: Router, uri: &str, token: Option<&str>) -> Result<TestResponse> {
    request(app, Method::GET, uri, token, None).await
}
