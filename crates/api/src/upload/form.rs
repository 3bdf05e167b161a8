use std::collections::HashMap;
use std::marker::PhantomData;

use alazar_core::upload::{is_image_content_type, UploadSlot};
use axum::body::Bytes;
use axum::extract::multipart::MultipartError;
use axum::extract::{FromRequest, Multipart, Request};
use axum::http::header::CONTENT_TYPE;
use axum::http::StatusCode;
use axum::{Form, Json};
use serde_json::Value;

use crate::error::AppError;
use crate::state::AppState;

/// The file fields a form accepts.
///
/// Implemented by a marker type per resource, e.g.
///
/// ```ignore
/// pub struct CaseUploads;
/// impl UploadSlots for CaseUploads {
///     const SLOTS: &'static [UploadSlot] = &[UploadSlot::single("preview")];
/// }
/// ```
pub trait UploadSlots: Send + Sync + 'static {
    const SLOTS: &'static [UploadSlot];
}

/// No file fields at all.
impl UploadSlots for () {
    const SLOTS: &'static [UploadSlot] = &[];
}

/// A file received in a multipart body, held in memory until staged.
#[derive(Debug, Clone)]
pub struct BufferedFile {
    pub field: String,
    pub original_name: String,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

/// Text fields and buffered files of a request body.
///
/// Accepts `multipart/form-data`, `application/json` objects and
/// `application/x-www-form-urlencoded` bodies; the latter two carry text
/// fields only. JSON values that are not strings are kept as JSON text, so
/// `{"price": 1500}` reads the same as the form field `price=1500`.
///
/// Rejections (all 400 unless noted):
/// - a file in a field not declared by `S`;
/// - more files in a field than its `max_count`;
/// - a non-image file while `UPLOAD_IMAGES_ONLY` is on;
/// - a body over the upload limit (413).
pub struct UploadForm<S> {
    fields: HashMap<String, String>,
    files: Vec<BufferedFile>,
    _slots: PhantomData<fn() -> S>,
}

impl<S: UploadSlots> UploadForm<S> {
    fn empty() -> Self {
        Self {
            fields: HashMap::new(),
            files: Vec::new(),
            _slots: PhantomData,
        }
    }

    /// Raw value of a text field.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// Number of files received for `field`.
    pub fn file_count(&self, field: &str) -> usize {
        self.files.iter().filter(|f| f.field == field).count()
    }

    pub fn into_files(self) -> Vec<BufferedFile> {
        self.files
    }

    async fn from_multipart(mut multipart: Multipart, images_only: bool) -> Result<Self, AppError> {
        let mut form = Self::empty();

        while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };

            let Some(original_name) = field.file_name().map(str::to_string) else {
                let value = field.text().await.map_err(multipart_error)?;
                form.fields.insert(name, value);
                continue;
            };

            let slot = S::SLOTS
                .iter()
                .find(|slot| slot.field == name)
                .ok_or_else(|| AppError::BadRequest(format!("Unexpected file field: {name}")))?;
            let content_type = field.content_type().map(str::to_string);
            let bytes = field.bytes().await.map_err(multipart_error)?;

            // An empty file input submits a nameless, empty part.
            if original_name.is_empty() && bytes.is_empty() {
                continue;
            }
            if images_only && !is_image_content_type(content_type.as_deref()) {
                return Err(AppError::BadRequest(format!(
                    "Only image uploads are allowed: {original_name}"
                )));
            }
            if form.file_count(&name) >= slot.max_count {
                return Err(AppError::BadRequest(format!(
                    "Too many files for {name}: at most {} allowed",
                    slot.max_count
                )));
            }

            form.files.push(BufferedFile {
                field: name,
                original_name,
                content_type,
                bytes,
            });
        }

        Ok(form)
    }

    fn from_json(object: serde_json::Map<String, Value>) -> Self {
        let mut form = Self::empty();
        for (name, value) in object {
            let text = match value {
                Value::Null => continue,
                Value::String(s) => s,
                other => other.to_string(),
            };
            form.fields.insert(name, text);
        }
        form
    }
}

impl<S: UploadSlots> FromRequest<AppState> for UploadForm<S> {
    type Rejection = AppError;

    async fn from_request(req: Request, state: &AppState) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.to_ascii_lowercase());

        match content_type.as_deref() {
            Some(ct) if ct.starts_with("multipart/form-data") => {
                let multipart = Multipart::from_request(req, state)
                    .await
                    .map_err(|e| AppError::BadRequest(e.body_text()))?;
                Self::from_multipart(multipart, state.config.upload_images_only).await
            }
            Some(ct) if ct.starts_with("application/json") => {
                let Json(object) = Json::<serde_json::Map<String, Value>>::from_request(req, state)
                    .await
                    .map_err(|e| rejection_error(e.status(), e.body_text()))?;
                Ok(Self::from_json(object))
            }
            Some(ct) if ct.starts_with("application/x-www-form-urlencoded") => {
                let Form(fields) = Form::<HashMap<String, String>>::from_request(req, state)
                    .await
                    .map_err(|e| rejection_error(e.status(), e.body_text()))?;
                Ok(Self {
                    fields,
                    ..Self::empty()
                })
            }
            None => Ok(Self::empty()),
            Some(other) => Err(AppError::BadRequest(format!(
                "Unsupported content type: {other}"
            ))),
        }
    }
}

fn multipart_error(err: MultipartError) -> AppError {
    rejection_error(err.status(), err.body_text())
}

/// Keep the 413 of a body that hit the limit; everything else is a 400.
fn rejection_error(status: StatusCode, message: String) -> AppError {
    if status == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(message)
    } else {
        AppError::BadRequest(message)
    }
}
