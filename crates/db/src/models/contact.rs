//! Studio contact details. Clients treat the newest row as current.

use alazar_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `contacts` table.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: DbId,
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub fields: ContactFields,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Default, PartialEq, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactFields {
    pub address: Option<String>,
    pub phone: Option<String>,
    pub telegram: Option<String>,
    pub instagram: Option<String>,
    pub vk: Option<String>,
    pub email: Option<String>,
    pub map: Option<String>,
}
