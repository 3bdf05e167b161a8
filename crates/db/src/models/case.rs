//! Case (portfolio project) entity model.

use alazar_core::content::{self, ContentBlock};
use alazar_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `cases` table.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Case {
    pub id: DbId,
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub fields: CaseFields,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Writeable columns of a case.
#[derive(Debug, Clone, Default, PartialEq, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseFields {
    pub title: String,
    pub price: i32,
    pub link: Option<String>,
    pub date: Option<Timestamp>,
    pub position_top: Option<String>,
    #[serde(default)]
    pub task_description: String,
    #[serde(default)]
    pub client_description: String,
    #[serde(default)]
    pub service_description: String,
    #[serde(default)]
    pub shop: bool,
    /// Not checked against `developers`.
    #[serde(default)]
    pub developer_ids: Vec<DbId>,
    /// Not checked against `categories`.
    #[serde(default)]
    pub category_ids: Vec<DbId>,
    pub preview: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    #[sqlx(json)]
    pub content_blocks: Vec<ContentBlock>,
}

impl CaseFields {
    /// Every uploaded filename the case references: preview, gallery and
    /// block images.
    pub fn attachments(&self) -> Vec<String> {
        self.preview
            .iter()
            .cloned()
            .chain(self.images.iter().cloned())
            .chain(content::image_files(&self.content_blocks).map(str::to_string))
            .collect()
    }
}
