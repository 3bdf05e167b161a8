//! HTTP-level integration tests for the `/api/contacts` endpoints.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app};
use serde_json::{json, Value};

#[tokio::test]
async fn test_current_contact_is_null_when_empty() {
    let app = build_test_app();
    let response = app.get("/api/contacts").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, Value::Null);
}

#[tokio::test]
async fn test_current_contact_is_newest() {
    let app = build_test_app();
    app.post_json("/api/contacts", json!({"phone": "111"})).await;
    let newest = body_json(app.post_json("/api/contacts", json!({"phone": "222"})).await).await;

    let current = body_json(app.get("/api/contacts").await).await;
    assert_eq!(current["id"], newest["id"]);
    assert_eq!(current["phone"], "222");
}

#[tokio::test]
async fn test_update_contact_keeps_unsent_fields() {
    let app = build_test_app();
    let created = body_json(
        app.post_json(
            "/api/contacts",
            json!({"address": "Almaty, Abay 1", "email": "hi@example.com"}),
        )
        .await,
    )
    .await;
    let id = created["id"].as_i64().unwrap();

    let response = app
        .put_json(&format!("/api/contacts/{id}"), json!({"email": "hello@example.com"}))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;

    assert_eq!(json["address"], "Almaty, Abay 1");
    assert_eq!(json["email"], "hello@example.com");
}

#[tokio::test]
async fn test_update_missing_contact_returns_404() {
    let app = build_test_app();
    let response = app.put_json("/api/contacts/3", json!({"phone": "1"})).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_get_and_delete_contact_by_id() {
    let app = build_test_app();
    let response = app.post_json("/api/contacts", json!({"vk": "vk.com/alazar"})).await;
    let created = body_json(response).await;
    let id = created["id"].as_i64().unwrap();

    let fetched = body_json(app.get(&format!("/api/contacts/{id}")).await).await;
    assert_eq!(fetched["vk"], "vk.com/alazar");

    let response = app.delete(&format!("/api/contacts/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(app.get("/api/contacts").await).await, Value::Null);
}
