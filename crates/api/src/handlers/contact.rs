//! Handlers for the `/contacts` resource.
//!
//! The site shows one set of contact details: the newest row.

use alazar_core::form::non_blank;
use alazar_core::types::DbId;
use alazar_db::models::contact::{Contact, ContactFields};
use alazar_db::store::Resource;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use crate::error::{AppError, AppResult};
use crate::state::AppState;
use crate::upload::UploadForm;

type ContactForm = UploadForm<()>;

/// GET /api/contacts
///
/// The current contact details, or `null` when none were ever saved.
pub async fn current(State(state): State<AppState>) -> AppResult<Json<Option<Contact>>> {
    let newest = state.stores.contacts.list().await?.into_iter().next();
    Ok(Json(newest))
}

/// POST /api/contacts
pub async fn create(
    State(state): State<AppState>,
    form: ContactForm,
) -> AppResult<(StatusCode, Json<Contact>)> {
    let fields = merge_fields(&form, &ContactFields::default());
    let contact = state.stores.contacts.create(fields).await?;

    tracing::info!(id = contact.id, "Created contact details");
    Ok((StatusCode::CREATED, Json(contact)))
}

/// PUT /api/contacts/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    form: ContactForm,
) -> AppResult<Json<Contact>> {
    let existing = state
        .stores
        .contacts
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found(Contact::ENTITY, id))?;

    let fields = merge_fields(&form, &existing.fields);
    let updated = state
        .stores
        .contacts
        .update(id, fields)
        .await?
        .ok_or_else(|| AppError::not_found(Contact::ENTITY, id))?;

    tracing::info!(id, "Updated contact details");
    Ok(Json(updated))
}

fn merge_fields(form: &ContactForm, base: &ContactFields) -> ContactFields {
    let text = |name: &str, stored: &Option<String>| {
        non_blank(form.text(name)).or_else(|| stored.clone())
    };

    ContactFields {
        address: text("address", &base.address),
        phone: text("phone", &base.phone),
        telegram: text("telegram", &base.telegram),
        instagram: text("instagram", &base.instagram),
        vk: text("vk", &base.vk),
        email: text("email", &base.email),
        map: text("map", &base.map),
    }
}
