//! Handlers for the `/categories` resource.

use alazar_core::error::CoreError;
use alazar_core::form::non_blank;
use alazar_core::types::DbId;
use alazar_core::upload::UploadSlot;
use alazar_db::models::category::{Category, CategoryFields};
use alazar_db::store::Resource;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use crate::error::{AppError, AppResult};
use crate::handlers::crud::released_files;
use crate::state::AppState;
use crate::upload::{UploadForm, UploadSlots};

const IMAGE: &str = "image";

pub struct CategoryUploads;

impl UploadSlots for CategoryUploads {
    const SLOTS: &'static [UploadSlot] = &[UploadSlot::single(IMAGE)];
}

type CategoryForm = UploadForm<CategoryUploads>;

/// POST /api/categories
pub async fn create(
    State(state): State<AppState>,
    form: CategoryForm,
) -> AppResult<(StatusCode, Json<Category>)> {
    let Some(name) = non_blank(form.text("name")) else {
        return Err(CoreError::Validation("name is required".into()).into());
    };
    let description = non_blank(form.text("description"));

    let staged = state.uploads.stage(form.into_files()).await?;
    let fields = CategoryFields {
        name,
        description,
        image: staged.single(IMAGE),
    };
    let result = state.stores.categories.create(fields).await.map_err(AppError::from);
    let category = state.uploads.or_discard(&staged, result).await?;

    tracing::info!(id = category.id, name = %category.fields.name, "Created category");
    Ok((StatusCode::CREATED, Json(category)))
}

/// PUT /api/categories/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    form: CategoryForm,
) -> AppResult<Json<Category>> {
    let existing = state
        .stores
        .categories
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found(Category::ENTITY, id))?;
    let name = non_blank(form.text("name")).unwrap_or_else(|| existing.fields.name.clone());
    let description =
        non_blank(form.text("description")).or_else(|| existing.fields.description.clone());

    let staged = state.uploads.stage(form.into_files()).await?;
    let fields = CategoryFields {
        name,
        description,
        image: staged.single(IMAGE).or_else(|| existing.fields.image.clone()),
    };
    let result = match state.stores.categories.update(id, fields).await {
        Ok(Some(updated)) => Ok(updated),
        Ok(None) => Err(AppError::not_found(Category::ENTITY, id)),
        Err(e) => Err(e.into()),
    };
    let updated = state.uploads.or_discard(&staged, result).await?;

    state
        .uploads
        .remove_all(released_files(&existing, &updated))
        .await;

    tracing::info!(id, "Updated category");
    Ok(Json(updated))
}
