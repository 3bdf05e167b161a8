//! Entity records and their writeable fields.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` record struct with `id` and timestamps
//! - A `*Fields` struct holding every writeable column, flattened into the
//!   record both for sqlx rows and for camelCase JSON

pub mod case;
pub mod category;
pub mod contact;
pub mod developer;
pub mod discussion;
