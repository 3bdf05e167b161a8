//! Route definitions for cases.

use alazar_db::models::case::Case;
use axum::routing::get;
use axum::Router;

use crate::handlers::{case, crud};
use crate::state::AppState;

/// Routes mounted at `/cases`.
///
/// ```text
/// GET    /       -> list
/// POST   /       -> create
/// GET    /{id}   -> get_by_id
/// PUT    /{id}   -> update
/// DELETE /{id}   -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(crud::list::<Case>).post(case::create))
        .route(
            "/{id}",
            get(crud::get_by_id::<Case>)
                .put(case::update)
                .delete(crud::delete::<Case>),
        )
}
