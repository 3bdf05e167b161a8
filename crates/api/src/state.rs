use std::sync::Arc;

use alazar_db::models::case::Case;
use alazar_db::models::category::Category;
use alazar_db::models::contact::Contact;
use alazar_db::models::developer::Developer;
use alazar_db::models::discussion::Discussion;
use alazar_db::store::{DynStore, Stores};
use axum::extract::FromRef;

use crate::config::ServerConfig;
use crate::upload::UploadDir;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: every member is behind an `Arc`. Handlers that only
/// need one resource's store can extract `State<DynStore<R>>` directly.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    /// Record stores, all on the backend chosen at startup.
    pub stores: Stores,
    /// Where uploaded files are staged and removed.
    pub uploads: Arc<UploadDir>,
}

impl FromRef<AppState> for Arc<UploadDir> {
    fn from_ref(state: &AppState) -> Self {
        Arc::clone(&state.uploads)
    }
}

impl FromRef<AppState> for DynStore<Case> {
    fn from_ref(state: &AppState) -> Self {
        Arc::clone(&state.stores.cases)
    }
}

impl FromRef<AppState> for DynStore<Developer> {
    fn from_ref(state: &AppState) -> Self {
        Arc::clone(&state.stores.developers)
    }
}

impl FromRef<AppState> for DynStore<Category> {
    fn from_ref(state: &AppState) -> Self {
        Arc::clone(&state.stores.categories)
    }
}

impl FromRef<AppState> for DynStore<Discussion> {
    fn from_ref(state: &AppState) -> Self {
        Arc::clone(&state.stores.discussions)
    }
}

impl FromRef<AppState> for DynStore<Contact> {
    fn from_ref(state: &AppState) -> Self {
        Arc::clone(&state.stores.contacts)
    }
}
