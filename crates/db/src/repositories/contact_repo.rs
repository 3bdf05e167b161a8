//! Repository for the `contacts` table.

use alazar_core::types::DbId;
use sqlx::PgPool;

use crate::models::contact::{Contact, ContactFields};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, address, phone, telegram, instagram, vk, email, map, created_at, updated_at";

/// Provides CRUD operations for contacts.
pub struct ContactRepo;

impl ContactRepo {
    /// Insert a new contact row, returning it.
    pub async fn create(pool: &PgPool, input: &ContactFields) -> Result<Contact, sqlx::Error> {
        let query = format!(
            "INSERT INTO contacts (address, phone, telegram, instagram, vk, email, map) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Contact>(&query)
            .bind(&input.address)
            .bind(&input.phone)
            .bind(&input.telegram)
            .bind(&input.instagram)
            .bind(&input.vk)
            .bind(&input.email)
            .bind(&input.map)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Contact>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM contacts WHERE id = $1");
        sqlx::query_as::<_, Contact>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all contact rows, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Contact>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM contacts ORDER BY created_at DESC, id DESC");
        sqlx::query_as::<_, Contact>(&query).fetch_all(pool).await
    }

    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &ContactFields,
    ) -> Result<Option<Contact>, sqlx::Error> {
        let query = format!(
            "UPDATE contacts SET \
                address = $2, phone = $3, telegram = $4, instagram = $5, vk = $6, \
                email = $7, map = $8, updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Contact>(&query)
            .bind(id)
            .bind(&input.address)
            .bind(&input.phone)
            .bind(&input.telegram)
            .bind(&input.instagram)
            .bind(&input.vk)
            .bind(&input.email)
            .bind(&input.map)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM contacts WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
