//! Handlers shared by every resource.
//!
//! Each is generic over the record type and pulls that resource's store
//! out of the application state, so routes mount them as
//! `get(crud::list::<Case>)`.

use std::sync::Arc;

use alazar_core::types::DbId;
use alazar_db::store::{DynStore, Resource};
use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::upload::UploadDir;

/// Body of a successful delete.
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub success: bool,
}

/// GET /api/{collection}
pub async fn list<R: Resource>(State(store): State<DynStore<R>>) -> AppResult<Json<Vec<R>>> {
    Ok(Json(store.list().await?))
}

/// GET /api/{collection}/{id}
pub async fn get_by_id<R: Resource>(
    State(store): State<DynStore<R>>,
    Path(id): Path<DbId>,
) -> AppResult<Json<R>> {
    let record = store
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found(R::ENTITY, id))?;
    Ok(Json(record))
}

/// DELETE /api/{collection}/{id}
///
/// Removes the record, then every file it referenced. A file that cannot be
/// removed is logged and does not fail the request.
pub async fn delete<R: Resource>(
    State(store): State<DynStore<R>>,
    State(uploads): State<Arc<UploadDir>>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DeleteResponse>> {
    let existing = store
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found(R::ENTITY, id))?;

    if !store.delete(id).await? {
        return Err(AppError::not_found(R::ENTITY, id));
    }
    uploads.remove_all(existing.attachments()).await;

    tracing::info!(entity = R::ENTITY, id, "Deleted record");
    Ok(Json(DeleteResponse { success: true }))
}

/// Filenames `before` referenced that `after` no longer does.
pub fn released_files<R: Resource>(before: &R, after: &R) -> Vec<String> {
    let kept = after.attachments();
    before
        .attachments()
        .into_iter()
        .filter(|name| !kept.contains(name))
        .collect()
}
