//! Route definitions for discussions.

use alazar_db::models::discussion::Discussion;
use axum::routing::get;
use axum::Router;

use crate::handlers::{crud, discussion};
use crate::state::AppState;

/// Routes mounted at `/discussions`. Leads cannot be edited.
///
/// ```text
/// GET    /       -> list (newest first)
/// POST   /       -> create
/// GET    /{id}   -> get_by_id
/// DELETE /{id}   -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(crud::list::<Discussion>).post(discussion::create))
        .route(
            "/{id}",
            get(crud::get_by_id::<Discussion>).delete(crud::delete::<Discussion>),
        )
}
