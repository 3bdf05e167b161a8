//! Handlers for the `/discussions` resource: leads from the site's contact
//! form. Leads are created, read and deleted, never edited.

use alazar_core::error::CoreError;
use alazar_core::form::{non_blank, parse_number};
use alazar_db::models::discussion::{Discussion, DiscussionFields};
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use crate::error::AppResult;
use crate::state::AppState;
use crate::upload::UploadForm;

/// POST /api/discussions
///
/// `name` is required; `budget` must be numeric when given.
pub async fn create(
    State(state): State<AppState>,
    form: UploadForm<()>,
) -> AppResult<(StatusCode, Json<Discussion>)> {
    let Some(name) = non_blank(form.text("name")) else {
        return Err(CoreError::Validation("name is required".into()).into());
    };
    let fields = DiscussionFields {
        name,
        phone: non_blank(form.text("phone")),
        email: non_blank(form.text("email")),
        company: non_blank(form.text("company")),
        budget: parse_number(form.text("budget"), "budget")?,
        message: non_blank(form.text("message")),
    };

    let discussion = state.stores.discussions.create(fields).await?;

    tracing::info!(id = discussion.id, "Received discussion request");
    Ok((StatusCode::CREATED, Json(discussion)))
}
