//! Domain building blocks shared by the store and the HTTP layer.
//!
//! Everything here is pure: content-block resolution, form-field coercion
//! and upload naming rules. Disk and database I/O live in `alazar_db` and
//! `alazar_api`.

pub mod content;
pub mod error;
pub mod form;
pub mod types;
pub mod upload;
