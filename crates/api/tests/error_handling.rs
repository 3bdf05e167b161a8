//! Error response shape and request plumbing shared by every route.

mod common;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use common::{body_json, build_test_app, build_test_app_with, MultipartForm};
use serde_json::json;

#[tokio::test]
async fn test_not_found_body_has_error_and_code() {
    let app = build_test_app();
    let json = body_json(app.get("/api/developers/77").await).await;

    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], "Developer with id 77 not found");
}

#[tokio::test]
async fn test_non_numeric_id_is_rejected() {
    let app = build_test_app();
    let response = app.get("/api/cases/abc").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let app = build_test_app();
    let response = app.get("/api/unknown").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unsupported_content_type_is_rejected() {
    let app = build_test_app();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/categories")
        .header(header::CONTENT_TYPE, "text/plain")
        .body(Body::from("name=Oops"))
        .unwrap();

    let response = app.send(request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_urlencoded_body_is_accepted() {
    let app = build_test_app();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/discussions")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from("name=Form+Lead&budget=100"))
        .unwrap();

    let response = app.send(request).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["name"], "Form Lead");
    assert_eq!(json["budget"], 100.0);
}

#[tokio::test]
async fn test_oversized_upload_is_rejected() {
    let app = build_test_app_with(|config| config.max_upload_bytes = 1024);
    let form = MultipartForm::new()
        .text("name", "Big")
        .image("image", "big.png", &[0u8; 4096]);

    let response = app.post_multipart("/api/categories", form).await;

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert!(app.uploaded_files().is_empty());
}

#[tokio::test]
async fn test_oversized_json_body_is_rejected() {
    let app = build_test_app_with(|config| config.max_upload_bytes = 1024);
    let message = "x".repeat(4096);

    let response = app
        .post_json("/api/discussions", json!({"name": "Big", "message": message}))
        .await;

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    let json = body_json(response).await;
    assert_eq!(json["code"], "PAYLOAD_TOO_LARGE");
    assert!(app.store_file("discussions").is_none());
}

#[tokio::test]
async fn test_oversized_urlencoded_body_is_rejected() {
    let app = build_test_app_with(|config| config.max_upload_bytes = 1024);
    let body = format!("name=Big&message={}", "x".repeat(4096));

    let response = app
        .send(
            Request::builder()
                .method(Method::POST)
                .uri("/api/discussions")
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(body))
                .unwrap(),
        )
        .await;

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn test_non_image_allowed_when_filter_disabled() {
    let app = build_test_app_with(|config| config.upload_images_only = false);
    let form = MultipartForm::new()
        .text("name", "Docs")
        .file("image", "brief.pdf", "application/pdf", b"%PDF");

    let response = app.post_multipart("/api/categories", form).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert!(body_json(response).await["image"]
        .as_str()
        .unwrap()
        .ends_with(".pdf"));
}

#[tokio::test]
async fn test_request_id_is_propagated() {
    let app = build_test_app();
    let request = Request::builder()
        .uri("/health")
        .header("x-request-id", "test-123")
        .body(Body::empty())
        .unwrap();

    let response = app.send(request).await;
    assert_eq!(response.headers()["x-request-id"], "test-123");
}

#[tokio::test]
async fn test_request_id_is_generated() {
    let app = build_test_app();
    let response = app.get("/health").await;
    assert!(response.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn test_cors_preflight_allows_configured_origin() {
    let app = build_test_app();
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/cases")
        .header(header::ORIGIN, "http://localhost:5173")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(Body::empty())
        .unwrap();

    let response = app.send(request).await;
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "http://localhost:5173"
    );
}

#[tokio::test]
async fn test_json_array_body_is_rejected() {
    let app = build_test_app();
    let response = app.post_json("/api/discussions", json!(["not", "an", "object"])).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
