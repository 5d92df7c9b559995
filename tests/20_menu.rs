mod common;

use anyhow::Result;
use axum::http::StatusCode;
use navigation_api::database::models::Location;
use navigation_api::testing::ItemBuilder;

// Menu endpoint behavior: ordering, visibility filtering, link resolution,
// nesting. All three slots share the assembler; main gets the deep coverage.

fn names(data: &serde_json::Value) -> Vec<String> {
    data.as_array()
        .expect("data should be an array")
        .iter()
        .map(|e| e["name"].as_str().unwrap_or_default().to_string())
        .collect()
}

#[tokio::test]
async fn main_menu_orders_by_sort_key_then_id() -> Result<()> {
    let app = common::test_app(vec![
        ItemBuilder::new(1, "A").sort_order(5).build(),
        ItemBuilder::new(2, "B").sort_order(1).build(),
        ItemBuilder::new(3, "C").sort_order(5).build(),
    ]);

    let res = common::get(app, "/menu/main", None).await?;
    assert_eq!(res.status, StatusCode::OK);
    assert!(res.body["success"].as_bool().unwrap_or(false));
    assert_eq!(names(&res.body["data"]), ["B", "A", "C"]);
    Ok(())
}

#[tokio::test]
async fn disabled_items_are_invisible_everywhere() -> Result<()> {
    let app = common::test_app(vec![
        ItemBuilder::new(1, "On").build(),
        ItemBuilder::new(2, "Off").disabled().build(),
        ItemBuilder::new(3, "Off child").parent(1).disabled().build(),
    ]);

    let res = common::get(app, "/menu/main", None).await?;
    assert_eq!(names(&res.body["data"]), ["On"]);
    assert!(res.body["data"][0].get("children").is_none());
    Ok(())
}

#[tokio::test]
async fn guest_only_items_hide_from_authenticated_viewers() -> Result<()> {
    let app = common::test_app(vec![
        ItemBuilder::new(1, "Join").visibility("guest").build(),
        ItemBuilder::new(2, "Account").visibility("logged_in").build(),
    ]);

    let res = common::get(app.clone(), "/menu/main", None).await?;
    assert_eq!(names(&res.body["data"]), ["Join"]);

    let token = common::user_token(None);
    let res = common::get(app, "/menu/main", Some(&token)).await?;
    assert_eq!(names(&res.body["data"]), ["Account"]);
    Ok(())
}

#[tokio::test]
async fn role_gated_items_require_membership() -> Result<()> {
    let app = common::test_app(vec![
        ItemBuilder::new(1, "Staff")
            .visibility("role")
            .allowed_roles(vec![2, 5])
            .build(),
        ItemBuilder::new(2, "Staff child").parent(1).build(),
    ]);

    let outsider = common::user_token(Some(3));
    let res = common::get(app.clone(), "/menu/main", Some(&outsider)).await?;
    assert!(res.body["data"].as_array().unwrap().is_empty());

    let member = common::user_token(Some(5));
    let res = common::get(app, "/menu/main", Some(&member)).await?;
    assert_eq!(names(&res.body["data"]), ["Staff"]);
    Ok(())
}

#[tokio::test]
async fn unresolvable_route_yields_no_entry() -> Result<()> {
    let app = common::test_app(vec![
        ItemBuilder::new(1, "Archived").link("route", "archived_route").build(),
        ItemBuilder::new(2, "Home").link("route", "home").build(),
    ]);

    let res = common::get(app, "/menu/main", None).await?;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(names(&res.body["data"]), ["Home"]);
    Ok(())
}

#[tokio::test]
async fn url_items_carry_redirect_targets() -> Result<()> {
    let app = common::test_app(vec![ItemBuilder::new(42, "Docs")
        .link("url", "https://example.org")
        .icon("ri-book-line")
        .target_blank()
        .build()]);

    let res = common::get(app, "/menu/main", None).await?;
    let entry = &res.body["data"][0];
    assert_eq!(entry["target"]["kind"], "redirect");
    assert_eq!(entry["target"]["item_id"], 42);
    assert_eq!(entry["icon"], "ri-book-line");
    assert_eq!(entry["target_blank"], true);
    Ok(())
}

#[tokio::test]
async fn children_are_nested_filtered_and_ordered() -> Result<()> {
    let app = common::test_app(vec![
        ItemBuilder::new(1, "Parent").build(),
        ItemBuilder::new(2, "Second").parent(1).sort_order(2).build(),
        ItemBuilder::new(3, "First").parent(1).sort_order(1).build(),
        ItemBuilder::new(4, "Disabled").parent(1).disabled().build(),
    ]);

    let res = common::get(app, "/menu/main", None).await?;
    let children = res.body["data"][0]["children"].as_array().expect("children");
    let child_names: Vec<&str> = children.iter().map(|c| c["name"].as_str().unwrap()).collect();
    assert_eq!(child_names, ["First", "Second"]);
    Ok(())
}

#[tokio::test]
async fn each_slot_serves_only_its_own_items() -> Result<()> {
    let app = common::test_app(vec![
        ItemBuilder::new(1, "Main").build(),
        ItemBuilder::new(2, "Account").location(Location::AccountDropdown).build(),
        ItemBuilder::new(3, "Dashboard").location(Location::Dashboard).build(),
    ]);

    let res = common::get(app.clone(), "/menu/account-dropdown", None).await?;
    assert_eq!(names(&res.body["data"]), ["Account"]);

    let res = common::get(app.clone(), "/menu/dashboard", None).await?;
    assert_eq!(names(&res.body["data"]), ["Dashboard"]);

    let res = common::get(app, "/menu/main", None).await?;
    assert_eq!(names(&res.body["data"]), ["Main"]);
    Ok(())
}

#[tokio::test]
async fn invalid_bearer_token_is_rejected() -> Result<()> {
    let app = common::test_app(vec![ItemBuilder::new(1, "Home").build()]);

    let res = common::get(app, "/menu/main", Some("not-a-jwt")).await?;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
    Ok(())
}
