//! Route definitions for contacts.

use alazar_db::models::contact::Contact;
use axum::routing::get;
use axum::Router;

use crate::handlers::{contact, crud};
use crate::state::AppState;

/// Routes mounted at `/contacts`.
///
/// ```text
/// GET    /       -> current (newest, or null)
/// POST   /       -> create
/// GET    /{id}   -> get_by_id
/// PUT    /{id}   -> update
/// DELETE /{id}   -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(contact::current).post(contact::create))
        .route(
            "/{id}",
            get(crud::get_by_id::<Contact>)
                .put(contact::update)
                .delete(crud::delete::<Contact>),
        )
}
