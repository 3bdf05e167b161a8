//! Route definitions for categories.

use alazar_db::models::category::Category;
use axum::routing::get;
use axum::Router;

use crate::handlers::{category, crud};
use crate::state::AppState;

/// Routes mounted at `/categories`.
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
        .route("/", get(crud::list::<Category>).post(category::create))
        .route(
            "/{id}",
            get(crud::get_by_id::<Category>)
                .put(category::update)
                .delete(crud::delete::<Category>),
        )
}
