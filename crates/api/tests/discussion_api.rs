//! HTTP-level integration tests for the `/api/discussions` endpoints.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app};
use serde_json::json;

#[tokio::test]
async fn test_create_discussion() {
    let app = build_test_app();
    let response = app
        .post_json(
            "/api/discussions",
            json!({
                "name": "Timur",
                "phone": "+7 700 000 00 00",
                "email": "t@example.com",
                "company": "Steppe LLC",
                "budget": "2500.50",
                "message": "We need a website",
            }),
        )
        .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["name"], "Timur");
    assert_eq!(json["company"], "Steppe LLC");
    assert_eq!(json["budget"], 2500.5);
    assert!(json["id"].is_number());
}

#[tokio::test]
async fn test_discussion_budget_must_be_numeric() {
    let app = build_test_app();
    let response = app
        .post_json("/api/discussions", json!({"name": "X", "budget": "a lot"}))
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_discussions_list_newest_first() {
    let app = build_test_app();
    for name in ["first", "second", "third"] {
        let response = app.post_json("/api/discussions", json!({"name": name})).await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let json = body_json(app.get("/api/discussions").await).await;
    let names: Vec<_> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["third", "second", "first"]);
}

#[tokio::test]
async fn test_discussions_cannot_be_edited() {
    let app = build_test_app();
    let created = body_json(app.post_json("/api/discussions", json!({"name": "Lead"})).await).await;
    let id = created["id"].as_i64().unwrap();

    let response = app
        .put_json(&format!("/api/discussions/{id}"), json!({"name": "Edited"}))
        .await;
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_delete_discussion() {
    let app = build_test_app();
    let created = body_json(app.post_json("/api/discussions", json!({"name": "Lead"})).await).await;
    let id = created["id"].as_i64().unwrap();

    let response = app.delete(&format!("/api/discussions/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({"success": true}));

    let response = app.delete(&format!("/api/discussions/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
