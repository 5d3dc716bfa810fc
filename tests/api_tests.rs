//! End-to-end tests for the web API: session auth, the pantry views, and
//! the batch lifecycle endpoints.

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use larder::config::Config;
use std::sync::Arc;
use tower::ServiceExt;

async fn spawn_app() -> (Arc<larder::api::AppState>, Router) {
    let db_path = std::env::temp_dir().join(format!("larder-api-test-{}.db", uuid::Uuid::new_v4()));

    let mut config = Config::default();
    config.general.database_path = format!("sqlite:{}", db_path.display());
    config.server.secure_cookies = false;
    config.observability.metrics_enabled = false;

    let state = larder::api::create_app_state_from_config(config, None)
        .await
        .expect("failed to create app state");

    let router = larder::api::router(state.clone()).await;
    (state, router)
}

fn json_request(method: &str, uri: &str, cookie: Option<&str>, body: serde_json::Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie.to_string());
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn get_request(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie.to_string());
    }
    builder.body(Body::empty()).unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Registers a fresh user and returns the session cookie.
async fn register_user(app: &Router, username: &str) -> String {
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/auth/register",
            None,
            serde_json::json!({
                "username": username,
                "email": format!("{username}@example.com"),
                "password": "correct-horse-battery",
                "first_name": "Nora",
                "last_name": "Tester",
                "utc_offset_hours": -8
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("register should set a session cookie")
        .to_str()
        .unwrap();
    cookie.split(';').next().unwrap().to_string()
}

async fn add_item(app: &Router, cookie: &str, body: serde_json::Value) -> i64 {
    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/items", Some(cookie), body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    json["data"]["id"].as_i64().unwrap()
}

#[tokio::test]
async fn protected_routes_require_a_session() {
    let (_, app) = spawn_app().await;

    for uri in ["/api/pantry", "/api/shopping-list", "/api/pantry/expiring"] {
        let response = app.clone().oneshot(get_request(uri, None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{uri}");
    }
}

#[tokio::test]
async fn register_seeds_default_locations_and_logs_in() {
    let (_, app) = spawn_app().await;
    let cookie = register_user(&app, "alma").await;

    let response = app
        .clone()
        .oneshot(get_request("/api/locations", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let names: Vec<&str> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["name"].as_str().unwrap())
        .collect();
    // Seeded defaults, served name-ascending.
    assert_eq!(names, vec!["Cupboard", "Freezer", "Fridge", "Spice Rack"]);

    let me = app
        .clone()
        .oneshot(get_request("/api/auth/me", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(me.status(), StatusCode::OK);
    let me_json = body_json(me).await;
    assert_eq!(me_json["data"]["username"], "alma");
    assert_eq!(me_json["data"]["utc_offset_hours"], -8);
}

#[tokio::test]
async fn duplicate_username_is_rejected() {
    let (_, app) = spawn_app().await;
    register_user(&app, "sam").await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/auth/register",
            None,
            serde_json::json!({
                "username": "sam",
                "email": "second@example.com",
                "password": "another-password",
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn login_round_trip() {
    let (_, app) = spawn_app().await;
    register_user(&app, "rey").await;

    let bad = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/auth/login",
            None,
            serde_json::json!({"username": "rey", "password": "wrong"}),
        ))
        .await
        .unwrap();
    assert_eq!(bad.status(), StatusCode::UNAUTHORIZED);

    let good = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/auth/login",
            None,
            serde_json::json!({"username": "rey", "password": "correct-horse-battery"}),
        ))
        .await
        .unwrap();
    assert_eq!(good.status(), StatusCode::OK);
    assert!(good.headers().get(header::SET_COOKIE).is_some());
}

#[tokio::test]
async fn pantry_view_groups_items_under_locations() {
    let (_, app) = spawn_app().await;
    let cookie = register_user(&app, "vera").await;

    let locations = app
        .clone()
        .oneshot(get_request("/api/locations", Some(&cookie)))
        .await
        .unwrap();
    let locations_json = body_json(locations).await;
    let fridge_id = locations_json["data"]
        .as_array()
        .unwrap()
        .iter()
        .find(|l| l["name"] == "Fridge")
        .unwrap()["id"]
        .as_i64()
        .unwrap();

    add_item(
        &app,
        &cookie,
        serde_json::json!({
            "name": "milk",
            "location_id": fridge_id,
            "in_pantry": true,
            "expires_after_days": 7
        }),
    )
    .await;

    let response = app
        .clone()
        .oneshot(get_request("/api/pantry", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let groups = json["data"].as_array().unwrap();
    assert_eq!(groups.len(), 4);

    let fridge_group = groups
        .iter()
        .find(|g| g["location"]["name"] == "Fridge")
        .unwrap();
    assert_eq!(fridge_group["items"][0]["name"], "milk");

    // Untouched locations still show up, empty.
    let freezer_group = groups
        .iter()
        .find(|g| g["location"]["name"] == "Freezer")
        .unwrap();
    assert_eq!(freezer_group["items"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn restock_flow_with_legacy_parallel_lists() {
    let (_, app) = spawn_app().await;
    let cookie = register_user(&app, "kit").await;

    let a = add_item(
        &app,
        &cookie,
        serde_json::json!({"name": "peppercorns", "on_shopping_list": true, "expires_after_days": 10}),
    )
    .await;
    let b = add_item(
        &app,
        &cookie,
        serde_json::json!({"name": "milk", "on_shopping_list": true, "expires_after_days": 2}),
    )
    .await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/items/restock",
            Some(&cookie),
            serde_json::json!({
                "refill_ids": [a],
                "all_ids": [a, b],
                "expirations": ["", "20"]
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["refilled"], serde_json::json!([a]));

    // A kept its stored shelf life and left the shopping list.
    let a_item = app
        .clone()
        .oneshot(get_request(&format!("/api/items/{a}"), Some(&cookie)))
        .await
        .unwrap();
    let a_json = body_json(a_item).await;
    assert_eq!(a_json["data"]["expires_after_days"], 10);
    assert_eq!(a_json["data"]["on_shopping_list"], false);
    assert_eq!(a_json["data"]["in_pantry"], true);

    // B was shown on the page but not checked off: untouched.
    let b_item = app
        .clone()
        .oneshot(get_request(&format!("/api/items/{b}"), Some(&cookie)))
        .await
        .unwrap();
    let b_json = body_json(b_item).await;
    assert_eq!(b_json["data"]["expires_after_days"], 2);
    assert_eq!(b_json["data"]["on_shopping_list"], true);
}

#[tokio::test]
async fn restock_with_misaligned_lists_writes_nothing() {
    let (_, app) = spawn_app().await;
    let cookie = register_user(&app, "iva").await;

    let a = add_item(
        &app,
        &cookie,
        serde_json::json!({"name": "eggs", "on_shopping_list": true, "expires_after_days": 21}),
    )
    .await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/items/restock",
            Some(&cookie),
            serde_json::json!({
                "refill_ids": [a],
                "all_ids": [a],
                "expirations": ["5", "9"]
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let item = app
        .clone()
        .oneshot(get_request(&format!("/api/items/{a}"), Some(&cookie)))
        .await
        .unwrap();
    let json = body_json(item).await;
    assert_eq!(json["data"]["expires_after_days"], 21);
    assert_eq!(json["data"]["on_shopping_list"], true);
}

#[tokio::test]
async fn out_of_stock_then_shopping_list_flow() {
    let (_, app) = spawn_app().await;
    let cookie = register_user(&app, "joss").await;

    let a = add_item(
        &app,
        &cookie,
        serde_json::json!({"name": "coffee", "in_pantry": true}),
    )
    .await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/items/out-of-stock",
            Some(&cookie),
            serde_json::json!({"ids": [a, 9999]}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["updated"], serde_json::json!([a]));
    assert_eq!(json["data"]["missing"], serde_json::json!([9999]));

    let shop = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/items/shopping-list",
            Some(&cookie),
            serde_json::json!({"ids": [a]}),
        ))
        .await
        .unwrap();
    assert_eq!(shop.status(), StatusCode::OK);

    let list = app
        .clone()
        .oneshot(get_request("/api/shopping-list", Some(&cookie)))
        .await
        .unwrap();
    let list_json = body_json(list).await;
    let names: Vec<&str> = list_json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["coffee"]);

    let history = app
        .clone()
        .oneshot(get_request("/api/history", Some(&cookie)))
        .await
        .unwrap();
    let history_json = body_json(history).await;
    assert_eq!(history_json["data"][0]["name"], "coffee");
}

#[tokio::test]
async fn expiring_endpoint_reports_negative_days_for_expired_items() {
    let (_, app) = spawn_app().await;
    let cookie = register_user(&app, "pam").await;

    let a = add_item(
        &app,
        &cookie,
        serde_json::json!({"name": "oysters", "in_pantry": true, "expires_after_days": 0}),
    )
    .await;

    // Shelf life 0 with the user's -8h offset puts the expiry 8 hours ago.
    let response = app
        .clone()
        .oneshot(get_request("/api/pantry/expiring", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"][0]["item_id"], a);
    assert_eq!(json["data"][0]["days_remaining"], -1);
}

#[tokio::test]
async fn duplicate_location_names_conflict_per_user_only() {
    let (_, app) = spawn_app().await;
    let cookie = register_user(&app, "ash").await;

    let dup = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/locations",
            Some(&cookie),
            serde_json::json!({"name": "Fridge"}),
        ))
        .await
        .unwrap();
    assert_eq!(dup.status(), StatusCode::CONFLICT);

    // Case-sensitive check: "fridge" is a different name.
    let lower = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/locations",
            Some(&cookie),
            serde_json::json!({"name": "fridge"}),
        ))
        .await
        .unwrap();
    assert_eq!(lower.status(), StatusCode::OK);

    // Another user can reuse the same name freely.
    let other_cookie = register_user(&app, "blake").await;
    let other = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/locations",
            Some(&other_cookie),
            serde_json::json!({"name": "Cellar"}),
        ))
        .await
        .unwrap();
    assert_eq!(other.status(), StatusCode::OK);
}

#[tokio::test]
async fn item_update_pins_purchase_date_to_noon() {
    let (_, app) = spawn_app().await;
    let cookie = register_user(&app, "mori").await;

    let a = add_item(
        &app,
        &cookie,
        serde_json::json!({"name": "jam", "in_pantry": true}),
    )
    .await;

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/api/items/{a}"),
            Some(&cookie),
            serde_json::json!({"purchase_date": "2026-02-14", "description": "strawberry"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["last_purchased"], "2026-02-14T12:00:00+00:00");
    // Rendered through the user's -8h offset, still Feb 14.
    assert_eq!(json["data"]["last_purchased_local"], "Feb 14, 2026");
    assert_eq!(json["data"]["description"], "strawberry");
}

#[tokio::test]
async fn logout_invalidates_the_session() {
    let (_, app) = spawn_app().await;
    let cookie = register_user(&app, "noor").await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/auth/logout",
            Some(&cookie),
            serde_json::json!({}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let after = app
        .clone()
        .oneshot(get_request("/api/pantry", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(after.status(), StatusCode::UNAUTHORIZED);
}
