//! Handlers for the `/developers` resource.

use alazar_core::error::CoreError;
use alazar_core::form::non_blank;
use alazar_core::types::DbId;
use alazar_core::upload::UploadSlot;
use alazar_db::models::developer::{Developer, DeveloperFields};
use alazar_db::store::Resource;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use crate::error::{AppError, AppResult};
use crate::handlers::crud::released_files;
use crate::state::AppState;
use crate::upload::{UploadForm, UploadSlots};

/// The avatar arrives in the `image` field.
const AVATAR: &str = "image";

pub struct DeveloperUploads;

impl UploadSlots for DeveloperUploads {
    const SLOTS: &'static [UploadSlot] = &[UploadSlot::single(AVATAR)];
}

type DeveloperForm = UploadForm<DeveloperUploads>;

/// POST /api/developers
pub async fn create(
    State(state): State<AppState>,
    form: DeveloperForm,
) -> AppResult<(StatusCode, Json<Developer>)> {
    if non_blank(form.text("name")).is_none() {
        return Err(CoreError::Validation("name is required".into()).into());
    }
    let mut fields = merge_scalars(&form, &DeveloperFields::default());

    let staged = state.uploads.stage(form.into_files()).await?;
    fields.avatar = staged.single(AVATAR);
    let result = state.stores.developers.create(fields).await.map_err(AppError::from);
    let developer = state.uploads.or_discard(&staged, result).await?;

    tracing::info!(id = developer.id, name = %developer.fields.name, "Created developer");
    Ok((StatusCode::CREATED, Json(developer)))
}

/// PUT /api/developers/{id}
///
/// Absent or blank fields keep their stored values; a new `image` replaces
/// the avatar and deletes the old file.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    form: DeveloperForm,
) -> AppResult<Json<Developer>> {
    let existing = state
        .stores
        .developers
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found(Developer::ENTITY, id))?;
    let mut fields = merge_scalars(&form, &existing.fields);

    let staged = state.uploads.stage(form.into_files()).await?;
    if let Some(avatar) = staged.single(AVATAR) {
        fields.avatar = Some(avatar);
    }
    let result = match state.stores.developers.update(id, fields).await {
        Ok(Some(updated)) => Ok(updated),
        Ok(None) => Err(AppError::not_found(Developer::ENTITY, id)),
        Err(e) => Err(e.into()),
    };
    let updated = state.uploads.or_discard(&staged, result).await?;

    state
        .uploads
        .remove_all(released_files(&existing, &updated))
        .await;

    tracing::info!(id, "Updated developer");
    Ok(Json(updated))
}

fn merge_scalars(form: &DeveloperForm, base: &DeveloperFields) -> DeveloperFields {
    let text = |name: &str, stored: &Option<String>| {
        non_blank(form.text(name)).or_else(|| stored.clone())
    };

    DeveloperFields {
        name: non_blank(form.text("name")).unwrap_or_else(|| base.name.clone()),
        position: text("position", &base.position),
        email: text("email", &base.email),
        avatar: base.avatar.clone(),
        telegram: text("telegram", &base.telegram),
        instagram: text("instagram", &base.instagram),
        whatsapp: text("whatsapp", &base.whatsapp),
        vk: text("vk", &base.vk),
        tiktok: text("tiktok", &base.tiktok),
        behance: text("behance", &base.behance),
        pinterest: text("pinterest", &base.pinterest),
        artstation: text("artstation", &base.artstation),
    }
}
