mod common;

use anyhow::Result;
use axum::http::{Method, StatusCode};
use serde_json::json;

// Admin CRUD surface: /api/navigation, gated by an admin JWT.

#[tokio::test]
async fn create_then_list_roundtrip() -> Result<()> {
    let app = common::test_app(vec![]);
    let token = common::admin_token();

    let res = common::request(
        app.clone(),
        Method::POST,
        "/api/navigation",
        Some(&token),
        Some(json!({
            "name": "Knowledgebase",
            "link_type": "url",
            "link_value": "https://kb.example.org",
            "location": "main",
            "sort_order": 2
        })),
    )
    .await?;
    assert_eq!(res.status, StatusCode::CREATED, "unexpected body: {}", res.body);
    let id = res.body["data"]["id"].as_i64().expect("created id");

    let res = common::get(app, "/api/navigation?location=main", Some(&token)).await?;
    assert_eq!(res.status, StatusCode::OK);
    let items = res.body["data"].as_array().expect("items");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["id"].as_i64(), Some(id));
    assert_eq!(items[0]["visibility"], "public");
    assert_eq!(items[0]["is_enabled"], true);
    Ok(())
}

#[tokio::test]
async fn create_rejects_invalid_fields_with_field_errors() -> Result<()> {
    let app = common::test_app(vec![]);
    let token = common::admin_token();

    let res = common::request(
        app,
        Method::POST,
        "/api/navigation",
        Some(&token),
        Some(json!({
            "name": "",
            "link_type": "teleport",
            "link_value": "x",
            "location": "sidebar"
        })),
    )
    .await?;

    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["code"], "VALIDATION_ERROR");
    let field_errors = res.body["field_errors"].as_object().expect("field errors");
    assert!(field_errors.contains_key("name"));
    assert!(field_errors.contains_key("link_type"));
    assert!(field_errors.contains_key("location"));
    Ok(())
}

#[tokio::test]
async fn update_toggles_enabled_flag() -> Result<()> {
    let app = common::test_app(vec![]);
    let token = common::admin_token();

    let res = common::request(
        app.clone(),
        Method::POST,
        "/api/navigation",
        Some(&token),
        Some(json!({
            "name": "Status",
            "link_type": "custom",
            "link_value": "/status",
            "location": "dashboard"
        })),
    )
    .await?;
    let id = res.body["data"]["id"].as_i64().unwrap();

    let res = common::request(
        app.clone(),
        Method::PUT,
        &format!("/api/navigation/{}", id),
        Some(&token),
        Some(json!({ "is_enabled": false })),
    )
    .await?;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["data"]["is_enabled"], false);

    // Disabled items vanish from the assembled menu but stay listable.
    let res = common::get(app.clone(), "/menu/dashboard", None).await?;
    assert!(res.body["data"].as_array().unwrap().is_empty());

    let res = common::get(app, "/api/navigation", Some(&token)).await?;
    assert_eq!(res.body["data"].as_array().unwrap().len(), 1);
    Ok(())
}

#[tokio::test]
async fn delete_cascades_to_children() -> Result<()> {
    let app = common::test_app(vec![]);
    let token = common::admin_token();

    let res = common::request(
        app.clone(),
        Method::POST,
        "/api/navigation",
        Some(&token),
        Some(json!({
            "name": "Resources",
            "link_type": "route",
            "link_value": "home",
            "location": "main"
        })),
    )
    .await?;
    let parent_id = res.body["data"]["id"].as_i64().unwrap();

    for name in ["Guides", "Tutorials"] {
        let res = common::request(
            app.clone(),
            Method::POST,
            "/api/navigation",
            Some(&token),
            Some(json!({
                "name": name,
                "link_type": "route",
                "link_value": "home",
                "location": "main",
                "parent_id": parent_id
            })),
        )
        .await?;
        assert_eq!(res.status, StatusCode::CREATED);
    }

    let res = common::request(
        app.clone(),
        Method::DELETE,
        &format!("/api/navigation/{}", parent_id),
        Some(&token),
        None,
    )
    .await?;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["data"]["deleted"], 3);

    let res = common::get(app, "/api/navigation", Some(&token)).await?;
    assert!(res.body["data"].as_array().unwrap().is_empty());
    Ok(())
}

#[tokio::test]
async fn create_rejects_child_of_a_child() -> Result<()> {
    let app = common::test_app(vec![]);
    let token = common::admin_token();

    let mut parent_id = None;
    for _ in 0..2 {
        let mut body = json!({
            "name": "Nested",
            "link_type": "route",
            "link_value": "home",
            "location": "main"
        });
        if let Some(id) = parent_id {
            body["parent_id"] = json!(id);
        }
        let res = common::request(app.clone(), Method::POST, "/api/navigation", Some(&token), Some(body)).await?;
        assert_eq!(res.status, StatusCode::CREATED);
        parent_id = res.body["data"]["id"].as_i64();
    }

    // Third level is rejected.
    let res = common::request(
        app,
        Method::POST,
        "/api/navigation",
        Some(&token),
        Some(json!({
            "name": "Grandchild",
            "link_type": "route",
            "link_value": "home",
            "location": "main",
            "parent_id": parent_id
        })),
    )
    .await?;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert!(res.body["field_errors"].as_object().unwrap().contains_key("parent_id"));
    Ok(())
}

#[tokio::test]
async fn admin_surface_requires_a_token() -> Result<()> {
    let app = common::test_app(vec![]);

    let res = common::get(app.clone(), "/api/navigation", None).await?;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);

    let user = common::user_token(Some(1));
    let res = common::get(app, "/api/navigation", Some(&user)).await?;
    assert_eq!(res.status, StatusCode::FORBIDDEN);
    Ok(())
}

#[tokio::test]
async fn missing_item_is_not_found() -> Result<()> {
    let app = common::test_app(vec![]);
    let token = common::admin_token();

    let res = common::get(app.clone(), "/api/navigation/999", Some(&token)).await?;
    assert_eq!(res.status, StatusCode::NOT_FOUND);

    let res = common::request(app, Method::DELETE, "/api/navigation/999", Some(&token), None).await?;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    Ok(())
}
