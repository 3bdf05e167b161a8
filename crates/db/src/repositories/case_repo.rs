//! Repository for the `cases` table.

use alazar_core::types::DbId;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::case::{Case, CaseFields};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, price, link, date, position_top, task_description, \
    client_description, service_description, shop, developer_ids, category_ids, \
    preview, images, content_blocks, created_at, updated_at";

/// Provides CRUD operations for cases.
pub struct CaseRepo;

impl CaseRepo {
    /// Insert a new case, returning the created row.
    pub async fn create(pool: &PgPool, input: &CaseFields) -> Result<Case, sqlx::Error> {
        let query = format!(
            "INSERT INTO cases (title, price, link, date, position_top, task_description, \
                client_description, service_description, shop, developer_ids, category_ids, \
                preview, images, content_blocks) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Case>(&query)
            .bind(&input.title)
            .bind(input.price)
            .bind(&input.link)
            .bind(input.date)
            .bind(&input.position_top)
            .bind(&input.task_description)
            .bind(&input.client_description)
            .bind(&input.service_description)
            .bind(input.shop)
            .bind(&input.developer_ids)
            .bind(&input.category_ids)
            .bind(&input.preview)
            .bind(&input.images)
            .bind(Json(&input.content_blocks))
            .fetch_one(pool)
            .await
    }

    /// Find a case by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Case>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM cases WHERE id = $1");
        sqlx::query_as::<_, Case>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all cases in creation order.
    pub async fn list(pool: &PgPool) -> Result<Vec<Case>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM cases ORDER BY id");
        sqlx::query_as::<_, Case>(&query).fetch_all(pool).await
    }

    /// Replace every writeable column of a case.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &CaseFields,
    ) -> Result<Option<Case>, sqlx::Error> {
        let query = format!(
            "UPDATE cases SET \
                title = $2, price = $3, link = $4, date = $5, position_top = $6, \
                task_description = $7, client_description = $8, service_description = $9, \
                shop = $10, developer_ids = $11, category_ids = $12, preview = $13, \
                images = $14, content_blocks = $15, updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Case>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(input.price)
            .bind(&input.link)
            .bind(input.date)
            .bind(&input.position_top)
            .bind(&input.task_description)
            .bind(&input.client_description)
            .bind(&input.service_description)
            .bind(input.shop)
            .bind(&input.developer_ids)
            .bind(&input.category_ids)
            .bind(&input.preview)
            .bind(&input.images)
            .bind(Json(&input.content_blocks))
            .fetch_optional(pool)
            .await
    }

    /// Delete a case by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM cases WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
