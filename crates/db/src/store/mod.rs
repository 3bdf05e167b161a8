//! The resource store interface and its two backends.
//!
//! Handlers never talk to a backend directly: they receive a
//! [`DynStore`] for their resource through the application state. The
//! concrete backend is chosen once at startup by [`Stores::json`] or
//! [`Stores::postgres`].

use std::path::PathBuf;
use std::sync::Arc;

use alazar_core::types::{DbId, Timestamp};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::models::case::{Case, CaseFields};
use crate::models::category::{Category, CategoryFields};
use crate::models::contact::{Contact, ContactFields};
use crate::models::developer::{Developer, DeveloperFields};
use crate::models::discussion::{Discussion, DiscussionFields};
use crate::DbPool;

pub mod json_file;
pub mod postgres;

pub use json_file::JsonFileStore;
pub use postgres::PgStore;

/// A persisted entity kind.
pub trait Resource: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Entity name used in error messages ("Case").
    const ENTITY: &'static str;
    /// Collection name: JSON file stem and URL segment ("cases").
    const COLLECTION: &'static str;
    /// Whether listings are ordered newest first instead of by creation.
    const NEWEST_FIRST: bool = false;

    /// Every writeable column.
    type Fields: Clone + Send + Sync + 'static;

    fn id(&self) -> DbId;
    fn created_at(&self) -> Timestamp;

    /// Build a record from its parts. Used by stores that assign ids and
    /// timestamps themselves.
    fn assemble(
        id: DbId,
        created_at: Timestamp,
        updated_at: Timestamp,
        fields: Self::Fields,
    ) -> Self;

    /// Uploaded filenames referenced by this record.
    fn attachments(&self) -> Vec<String> {
        Vec::new()
    }
}

/// Errors raised by a store backend.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// CRUD over one resource.
///
/// `update` replaces every writeable column with `fields`; merging with the
/// stored record is the caller's job.
#[async_trait]
pub trait Store<R: Resource>: Send + Sync {
    async fn list(&self) -> Result<Vec<R>, StoreError>;

    async fn find_by_id(&self, id: DbId) -> Result<Option<R>, StoreError>;

    /// Persist a new record; the store assigns its id and timestamps.
    async fn create(&self, fields: R::Fields) -> Result<R, StoreError>;

    /// Returns `None` if no record with `id` exists.
    async fn update(&self, id: DbId, fields: R::Fields) -> Result<Option<R>, StoreError>;

    /// Returns `true` if a record was removed.
    async fn delete(&self, id: DbId) -> Result<bool, StoreError>;
}

/// Shared, type-erased store handle.
pub type DynStore<R> = Arc<dyn Store<R>>;

/// Which backend the [`Stores`] were built on.
#[derive(Clone)]
enum Backend {
    Json(PathBuf),
    Postgres(DbPool),
}

/// One store per resource, all on the same backend.
#[derive(Clone)]
pub struct Stores {
    pub cases: DynStore<Case>,
    pub developers: DynStore<Developer>,
    pub categories: DynStore<Category>,
    pub discussions: DynStore<Discussion>,
    pub contacts: DynStore<Contact>,
    backend: Backend,
}

impl Stores {
    /// JSON-file stores, one `<collection>.json` per resource under `data_dir`.
    pub fn json(data_dir: impl Into<PathBuf>) -> Self {
        let data_dir = data_dir.into();
        Self {
            cases: Arc::new(JsonFileStore::<Case>::new(&data_dir)),
            developers: Arc::new(JsonFileStore::<Developer>::new(&data_dir)),
            categories: Arc::new(JsonFileStore::<Category>::new(&data_dir)),
            discussions: Arc::new(JsonFileStore::<Discussion>::new(&data_dir)),
            contacts: Arc::new(JsonFileStore::<Contact>::new(&data_dir)),
            backend: Backend::Json(data_dir),
        }
    }

    /// PostgreSQL stores sharing one pool.
    pub fn postgres(pool: DbPool) -> Self {
        let store = Arc::new(PgStore::new(pool.clone()));
        Self {
            cases: store.clone(),
            developers: store.clone(),
            categories: store.clone(),
            discussions: store.clone(),
            contacts: store,
            backend: Backend::Postgres(pool),
        }
    }

    /// Short backend name for logs and the health endpoint.
    pub fn backend_name(&self) -> &'static str {
        match self.backend {
            Backend::Json(_) => "json",
            Backend::Postgres(_) => "postgres",
        }
    }

    /// Create the JSON data directory. A no-op for PostgreSQL.
    pub async fn prepare(&self) -> Result<(), StoreError> {
        if let Backend::Json(dir) = &self.backend {
            tokio::fs::create_dir_all(dir).await?;
        }
        Ok(())
    }

    /// Verify the backend is reachable without writing anything: the data
    /// directory exists, or the database answers a trivial query.
    pub async fn health_check(&self) -> Result<(), StoreError> {
        match &self.backend {
            Backend::Json(dir) => {
                if tokio::fs::metadata(dir).await?.is_dir() {
                    Ok(())
                } else {
                    Err(std::io::Error::other(format!(
                        "{} is not a directory",
                        dir.display()
                    ))
                    .into())
                }
            }
            Backend::Postgres(pool) => Ok(crate::health_check(pool).await?),
        }
    }
}

impl Resource for Case {
    const ENTITY: &'static str = "Case";
    const COLLECTION: &'static str = "cases";

    type Fields = CaseFields;

    fn id(&self) -> DbId {
        self.id
    }

    fn created_at(&self) -> Timestamp {
        self.created_at
    }

    fn assemble(
        id: DbId,
        created_at: Timestamp,
        updated_at: Timestamp,
        fields: CaseFields,
    ) -> Self {
        Self {
            id,
            fields,
            created_at,
            updated_at,
        }
    }

    fn attachments(&self) -> Vec<String> {
        self.fields.attachments()
    }
}

impl Resource for Developer {
    const ENTITY: &'static str = "Developer";
    const COLLECTION: &'static str = "developers";

    type Fields = DeveloperFields;

    fn id(&self) -> DbId {
        self.id
    }

    fn created_at(&self) -> Timestamp {
        self.created_at
    }

    fn assemble(
        id: DbId,
        created_at: Timestamp,
        updated_at: Timestamp,
        fields: DeveloperFields,
    ) -> Self {
        Self {
            id,
            fields,
            created_at,
            updated_at,
        }
    }

    fn attachments(&self) -> Vec<String> {
        self.fields.avatar.iter().cloned().collect()
    }
}

impl Resource for Category {
    const ENTITY: &'static str = "Category";
    const COLLECTION: &'static str = "categories";

    type Fields = CategoryFields;

    fn id(&self) -> DbId {
        self.id
    }

    fn created_at(&self) -> Timestamp {
        self.created_at
    }

    fn assemble(
        id: DbId,
        created_at: Timestamp,
        updated_at: Timestamp,
        fields: CategoryFields,
    ) -> Self {
        Self {
            id,
            fields,
            created_at,
            updated_at,
        }
    }

    fn attachments(&self) -> Vec<String> {
        self.fields.image.iter().cloned().collect()
    }
}

impl Resource for Discussion {
    const ENTITY: &'static str = "Discussion";
    const COLLECTION: &'static str = "discussions";
    const NEWEST_FIRST: bool = true;

    type Fields = DiscussionFields;

    fn id(&self) -> DbId {
        self.id
    }

    fn created_at(&self) -> Timestamp {
        self.created_at
    }

    fn assemble(
        id: DbId,
        created_at: Timestamp,
        updated_at: Timestamp,
        fields: DiscussionFields,
    ) -> Self {
        Self {
            id,
            fields,
            created_at,
            updated_at,
        }
    }
}

impl Resource for Contact {
    const ENTITY: &'static str = "Contact";
    const COLLECTION: &'static str = "contacts";
    const NEWEST_FIRST: bool = true;

    type Fields = ContactFields;

    fn id(&self) -> DbId {
        self.id
    }

    fn created_at(&self) -> Timestamp {
        self.created_at
    }

    fn assemble(
        id: DbId,
        created_at: Timestamp,
        updated_at: Timestamp,
        fields: ContactFields,
    ) -> Self {
        Self {
            id,
            fields,
            created_at,
            updated_at,
        }
    }
}
