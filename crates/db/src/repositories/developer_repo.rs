//! Repository for the `developers` table.

use alazar_core::types::DbId;
use sqlx::PgPool;

use crate::models::developer::{Developer, DeveloperFields};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, position, email, avatar, telegram, instagram, whatsapp, \
    vk, tiktok, behance, pinterest, artstation, created_at, updated_at";

/// Provides CRUD operations for developers.
pub struct DeveloperRepo;

impl DeveloperRepo {
    /// Insert a new developer, returning the created row.
    pub async fn create(pool: &PgPool, input: &DeveloperFields) -> Result<Developer, sqlx::Error> {
        let query = format!(
            "INSERT INTO developers (name, position, email, avatar, telegram, instagram, \
                whatsapp, vk, tiktok, behance, pinterest, artstation) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Developer>(&query)
            .bind(&input.name)
            .bind(&input.position)
            .bind(&input.email)
            .bind(&input.avatar)
            .bind(&input.telegram)
            .bind(&input.instagram)
            .bind(&input.whatsapp)
            .bind(&input.vk)
            .bind(&input.tiktok)
            .bind(&input.behance)
            .bind(&input.pinterest)
            .bind(&input.artstation)
            .fetch_one(pool)
            .await
    }

    /// Find a developer by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Developer>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM developers WHERE id = $1");
        sqlx::query_as::<_, Developer>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<Developer>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM developers ORDER BY id");
        sqlx::query_as::<_, Developer>(&query).fetch_all(pool).await
    }

    /// Replace every writeable column of a developer.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &DeveloperFields,
    ) -> Result<Option<Developer>, sqlx::Error> {
        let query = format!(
            "UPDATE developers SET \
                name = $2, position = $3, email = $4, avatar = $5, telegram = $6, \
                instagram = $7, whatsapp = $8, vk = $9, tiktok = $10, behance = $11, \
                pinterest = $12, artstation = $13, updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Developer>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.position)
            .bind(&input.email)
            .bind(&input.avatar)
            .bind(&input.telegram)
            .bind(&input.instagram)
            .bind(&input.whatsapp)
            .bind(&input.vk)
            .bind(&input.tiktok)
            .bind(&input.behance)
            .bind(&input.pinterest)
            .bind(&input.artstation)
            .fetch_optional(pool)
            .await
    }

    /// Delete a developer by ID. Returns `true` if a row was removed.
    ///
    /// Cases keep referencing the id in `developer_ids`.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM developers WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
