//! Repository for the `discussions` table.

use alazar_core::types::DbId;
use sqlx::PgPool;

use crate::models::discussion::{Discussion, DiscussionFields};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, phone, email, company, budget, message, created_at, updated_at";

/// Provides CRUD operations for discussions.
pub struct DiscussionRepo;

impl DiscussionRepo {
    /// Insert a new discussion, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &DiscussionFields,
    ) -> Result<Discussion, sqlx::Error> {
        let query = format!(
            "INSERT INTO discussions (name, phone, email, company, budget, message) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Discussion>(&query)
            .bind(&input.name)
            .bind(&input.phone)
            .bind(&input.email)
            .bind(&input.company)
            .bind(input.budget)
            .bind(&input.message)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Discussion>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM discussions WHERE id = $1");
        sqlx::query_as::<_, Discussion>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all discussions, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Discussion>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM discussions ORDER BY created_at DESC, id DESC");
        sqlx::query_as::<_, Discussion>(&query).fetch_all(pool).await
    }

    /// Replace every writeable column of a discussion. The HTTP surface never
    /// edits leads; this exists so the store interface is total.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &DiscussionFields,
    ) -> Result<Option<Discussion>, sqlx::Error> {
        let query = format!(
            "UPDATE discussions SET \
                name = $2, phone = $3, email = $4, company = $5, budget = $6, \
                message = $7, updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Discussion>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.phone)
            .bind(&input.email)
            .bind(&input.company)
            .bind(input.budget)
            .bind(&input.message)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM discussions WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
