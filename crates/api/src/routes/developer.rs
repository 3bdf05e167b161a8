//! Route definitions for developers.

use alazar_db::models::developer::Developer;
use axum::routing::get;
use axum::Router;

use crate::handlers::{crud, developer};
use crate::state::AppState;

/// Routes mounted at `/developers`. The avatar file field is `image`.
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
        .route("/", get(crud::list::<Developer>).post(developer::create))
        .route(
            "/{id}",
            get(crud::get_by_id::<Developer>)
                .put(developer::update)
                .delete(crud::delete::<Developer>),
        )
}
