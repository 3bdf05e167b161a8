//! Handlers for the `/cases` resource.
//!
//! Cases carry three kinds of uploads: a single `preview`, a gallery of
//! `images` and the `blockImages` that fill the image blocks of the rich
//! `blocks` body, matched by position.

use alazar_core::content::{self, ContentBlock};
use alazar_core::error::CoreError;
use alazar_core::form::{non_blank, parse_date, parse_flag, parse_id_list, parse_int};
use alazar_core::types::DbId;
use alazar_core::upload::UploadSlot;
use alazar_db::models::case::{Case, CaseFields};
use alazar_db::store::Resource;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use crate::error::{AppError, AppResult};
use crate::handlers::crud::released_files;
use crate::state::AppState;
use crate::upload::{UploadForm, UploadSlots};

const PREVIEW: &str = "preview";
const IMAGES: &str = "images";
const BLOCK_IMAGES: &str = "blockImages";

/// File fields accepted on case forms.
pub struct CaseUploads;

impl UploadSlots for CaseUploads {
    const SLOTS: &'static [UploadSlot] = &[
        UploadSlot::single(PREVIEW),
        UploadSlot::many(IMAGES, 30),
        UploadSlot::many(BLOCK_IMAGES, 50),
    ];
}

type CaseForm = UploadForm<CaseUploads>;

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/cases
///
/// `title` and `price` are required. Every image block in `blocks` must be
/// matched by an uploaded `blockImages` file.
pub async fn create(
    State(state): State<AppState>,
    form: CaseForm,
) -> AppResult<(StatusCode, Json<Case>)> {
    if non_blank(form.text("title")).is_none() {
        return Err(CoreError::Validation("title is required".into()).into());
    }
    if parse_int(form.text("price"), "price")?.is_none() {
        return Err(CoreError::Validation("price is required".into()).into());
    }
    let mut fields = merge_scalars(&form, &CaseFields::default())?;
    let blocks = block_descriptors(&form)?;

    let staged = state.uploads.stage(form.into_files()).await?;
    let result: AppResult<Case> = async {
        fields.preview = staged.single(PREVIEW);
        fields.images = staged.names(IMAGES).to_vec();
        fields.content_blocks =
            content::resolve_blocks(blocks.unwrap_or_default(), staged.names(BLOCK_IMAGES), &[])?;
        Ok(state.stores.cases.create(fields).await?)
    }
    .await;
    let case = state.uploads.or_discard(&staged, result).await?;

    tracing::info!(id = case.id, title = %case.fields.title, "Created case");
    Ok((StatusCode::CREATED, Json(case)))
}

/// PUT /api/cases/{id}
///
/// Absent or blank fields keep their stored values. A new `preview`
/// replaces the old one; any new `images` replace the whole gallery. When
/// `blocks` is sent, image blocks take the uploaded `blockImages` in order
/// and, once those run out, may keep a filename the case already uses.
/// Files the case stops referencing are deleted.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    form: CaseForm,
) -> AppResult<Json<Case>> {
    let existing = state
        .stores
        .cases
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found(Case::ENTITY, id))?;

    let mut fields = merge_scalars(&form, &existing.fields)?;
    let blocks = block_descriptors(&form)?;

    let staged = state.uploads.stage(form.into_files()).await?;
    let result: AppResult<Case> = async {
        if let Some(preview) = staged.single(PREVIEW) {
            fields.preview = Some(preview);
        }
        if !staged.names(IMAGES).is_empty() {
            fields.images = staged.names(IMAGES).to_vec();
        }
        if let Some(blocks) = blocks {
            let known: Vec<&str> = content::image_files(&existing.fields.content_blocks).collect();
            fields.content_blocks =
                content::resolve_blocks(blocks, staged.names(BLOCK_IMAGES), &known)?;
        }
        state
            .stores
            .cases
            .update(id, fields)
            .await?
            .ok_or_else(|| AppError::not_found(Case::ENTITY, id))
    }
    .await;
    let updated = state.uploads.or_discard(&staged, result).await?;

    state
        .uploads
        .remove_all(released_files(&existing, &updated))
        .await;

    tracing::info!(id, "Updated case");
    Ok(Json(updated))
}

// ---------------------------------------------------------------------------
// Form parsing
// ---------------------------------------------------------------------------

/// Scalar columns from the form, falling back to `base` for every absent or
/// blank field. File-backed columns are copied from `base` unchanged.
fn merge_scalars(form: &CaseForm, base: &CaseFields) -> Result<CaseFields, CoreError> {
    let text = |name: &str| non_blank(form.text(name));

    Ok(CaseFields {
        title: text("title").unwrap_or_else(|| base.title.clone()),
        price: parse_int(form.text("price"), "price")?.unwrap_or(base.price),
        link: text("link").or_else(|| base.link.clone()),
        date: parse_date(form.text("date"), "date")?.or(base.date),
        position_top: text("positionTop").or_else(|| base.position_top.clone()),
        task_description: text("taskDescription")
            .unwrap_or_else(|| base.task_description.clone()),
        client_description: text("clientDescription")
            .unwrap_or_else(|| base.client_description.clone()),
        service_description: text("serviceDescription")
            .unwrap_or_else(|| base.service_description.clone()),
        shop: parse_flag(form.text("shop")).unwrap_or(base.shop),
        developer_ids: parse_id_list(form.text("developerIds"), "developerIds")?
            .unwrap_or_else(|| base.developer_ids.clone()),
        category_ids: parse_id_list(form.text("categoryIds"), "categoryIds")?
            .unwrap_or_else(|| base.category_ids.clone()),
        preview: base.preview.clone(),
        images: base.images.clone(),
        content_blocks: base.content_blocks.clone(),
    })
}

/// The `blocks` descriptors, or `None` when the field is absent.
///
/// Block images without descriptors to place them in are rejected.
fn block_descriptors(form: &CaseForm) -> Result<Option<Vec<ContentBlock>>, CoreError> {
    match non_blank(form.text("blocks")) {
        Some(raw) => content::parse_blocks(&raw).map(Some),
        None if form.file_count(BLOCK_IMAGES) > 0 => Err(CoreError::Validation(
            "blockImages were uploaded without blocks".into(),
        )),
        None => Ok(None),
    }
}
