pub mod case;
pub mod category;
pub mod contact;
pub mod developer;
pub mod discussion;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// ```text
/// /cases                 list, create
/// /cases/{id}            get, update, delete
/// /developers            list, create
/// /developers/{id}       get, update, delete
/// /categories            list, create
/// /categories/{id}       get, update, delete
/// /discussions           list (newest first), create
/// /discussions/{id}      get, delete
/// /contacts              current (newest or null), create
/// /contacts/{id}         get, update, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/cases", case::router())
        .nest("/developers", developer::router())
        .nest("/categories", category::router())
        .nest("/discussions", discussion::router())
        .nest("/contacts", contact::router())
}
