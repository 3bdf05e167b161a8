//! Developer (team member) entity model.

use alazar_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `developers` table.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Developer {
    pub id: DbId,
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub fields: DeveloperFields,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Writeable columns of a developer. Social fields hold handles or URLs as
/// entered.
#[derive(Debug, Clone, Default, PartialEq, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeveloperFields {
    pub name: String,
    pub position: Option<String>,
    pub email: Option<String>,
    pub avatar: Option<String>,
    pub telegram: Option<String>,
    pub instagram: Option<String>,
    pub whatsapp: Option<String>,
    pub vk: Option<String>,
    pub tiktok: Option<String>,
    pub behance: Option<String>,
    pub pinterest: Option<String>,
    pub artstation: Option<String>,
}
