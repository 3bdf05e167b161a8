#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Arc;

use alazar_api::config::ServerConfig;
use alazar_api::router::build_app_router;
use alazar_api::state::AppState;
use alazar_api::upload::UploadDir;
use alazar_db::store::Stores;
use axum::body::Body;
use axum::http::{header, Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tempfile::TempDir;
use tower::ServiceExt;

const BOUNDARY: &str = "alazar-test-boundary";

/// Build a test `ServerConfig` rooted in `dir`.
pub fn test_config(dir: &Path) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        database_url: None,
        data_dir: dir.join("data"),
        upload_dir: dir.join("uploads"),
        max_upload_bytes: 1024 * 1024,
        upload_images_only: true,
    }
}

/// The full application over a JSON-file store in a temporary directory.
///
/// Uses the same router and middleware stack as `main.rs`. The directory
/// lives as long as the `TestApp`.
pub struct TestApp {
    pub router: Router,
    dir: TempDir,
}

pub fn build_test_app() -> TestApp {
    build_test_app_with(|_| {})
}

/// Like [`build_test_app`], with a hook to adjust the configuration.
pub fn build_test_app_with(adjust: impl FnOnce(&mut ServerConfig)) -> TestApp {
    let dir = tempfile::tempdir().unwrap();
    let mut config = test_config(dir.path());
    adjust(&mut config);
    std::fs::create_dir_all(&config.data_dir).unwrap();

    let state = AppState {
        stores: Stores::json(&config.data_dir),
        uploads: Arc::new(UploadDir::new(&config.upload_dir)),
        config: Arc::new(config),
    };

    TestApp {
        router: build_app_router(state),
        dir,
    }
}

impl TestApp {
    pub fn upload_dir(&self) -> PathBuf {
        self.dir.path().join("uploads")
    }

    pub fn upload_exists(&self, name: &str) -> bool {
        self.upload_dir().join(name).is_file()
    }

    /// Names of every file currently in the upload directory, sorted.
    pub fn uploaded_files(&self) -> Vec<String> {
        let Ok(entries) = std::fs::read_dir(self.upload_dir()) else {
            return Vec::new();
        };
        let mut names: Vec<String> = entries
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    /// Raw contents of a JSON store file, if it exists.
    pub fn store_file(&self, collection: &str) -> Option<String> {
        std::fs::read_to_string(self.dir.path().join("data").join(format!("{collection}.json")))
            .ok()
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(request).await.unwrap()
    }

    pub async fn get(&self, uri: &str) -> Response<Body> {
        self.send(Request::get(uri).body(Body::empty()).unwrap()).await
    }

    pub async fn delete(&self, uri: &str) -> Response<Body> {
        self.send(
            Request::builder()
                .method(Method::DELETE)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }

    pub async fn post_json(&self, uri: &str, json: serde_json::Value) -> Response<Body> {
        self.send_json(Method::POST, uri, json).await
    }

    pub async fn put_json(&self, uri: &str, json: serde_json::Value) -> Response<Body> {
        self.send_json(Method::PUT, uri, json).await
    }

    async fn send_json(
        &self,
        method: Method,
        uri: &str,
        json: serde_json::Value,
    ) -> Response<Body> {
        self.send(
            Request::builder()
                .method(method)
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&json).unwrap()))
                .unwrap(),
        )
        .await
    }

    pub async fn post_multipart(&self, uri: &str, form: MultipartForm) -> Response<Body> {
        self.send_multipart(Method::POST, uri, form).await
    }

    pub async fn put_multipart(&self, uri: &str, form: MultipartForm) -> Response<Body> {
        self.send_multipart(Method::PUT, uri, form).await
    }

    async fn send_multipart(
        &self,
        method: Method,
        uri: &str,
        form: MultipartForm,
    ) -> Response<Body> {
        self.send(
            Request::builder()
                .method(method)
                .uri(uri)
                .header(
                    header::CONTENT_TYPE,
                    format!("multipart/form-data; boundary={BOUNDARY}"),
                )
                .body(Body::from(form.finish()))
                .unwrap(),
        )
        .await
    }
}

/// Builder for `multipart/form-data` request bodies.
#[derive(Default)]
pub struct MultipartForm {
    body: Vec<u8>,
}

impl MultipartForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
        self
    }

    pub fn file(mut self, name: &str, filename: &str, content_type: &str, bytes: &[u8]) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; \
                 filename=\"{filename}\"\r\nContent-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        self.body.extend_from_slice(bytes);
        self.body.extend_from_slice(b"\r\n");
        self
    }

    /// A PNG-typed file; the bytes only need to be distinguishable.
    pub fn image(self, name: &str, filename: &str, bytes: &[u8]) -> Self {
        self.file(name, filename, "image/png", bytes)
    }

    fn finish(mut self) -> Vec<u8> {
        self.body
            .extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        self.body
    }
}

/// Read the full response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Read the full response body as raw bytes.
pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}
