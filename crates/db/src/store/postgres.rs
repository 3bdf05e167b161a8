//! Store backend delegating to the PostgreSQL repositories.

use alazar_core::types::DbId;
use async_trait::async_trait;

use super::{Store, StoreError};
use crate::models::case::{Case, CaseFields};
use crate::models::category::{Category, CategoryFields};
use crate::models::contact::{Contact, ContactFields};
use crate::models::developer::{Developer, DeveloperFields};
use crate::models::discussion::{Discussion, DiscussionFields};
use crate::repositories::{CaseRepo, CategoryRepo, ContactRepo, DeveloperRepo, DiscussionRepo};
use crate::DbPool;

/// One pool serving every resource.
#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Implement [`Store`] for a record type by forwarding to its repository.
macro_rules! delegate_to_repo {
    ($record:ty, $fields:ty, $repo:ty) => {
        #[async_trait]
        impl Store<$record> for PgStore {
            async fn list(&self) -> Result<Vec<$record>, StoreError> {
                Ok(<$repo>::list(&self.pool).await?)
            }

            async fn find_by_id(&self, id: DbId) -> Result<Option<$record>, StoreError> {
                Ok(<$repo>::find_by_id(&self.pool, id).await?)
            }

            async fn create(&self, fields: $fields) -> Result<$record, StoreError> {
                Ok(<$repo>::create(&self.pool, &fields).await?)
            }

            async fn update(
                &self,
                id: DbId,
                fields: $fields,
            ) -> Result<Option<$record>, StoreError> {
                Ok(<$repo>::update(&self.pool, id, &fields).await?)
            }

            async fn delete(&self, id: DbId) -> Result<bool, StoreError> {
                Ok(<$repo>::delete(&self.pool, id).await?)
            }
        }
    };
}

delegate_to_repo!(Case, CaseFields, CaseRepo);
delegate_to_repo!(Developer, DeveloperFields, DeveloperRepo);
delegate_to_repo!(Category, CategoryFields, CategoryRepo);
delegate_to_repo!(Discussion, DiscussionFields, DiscussionRepo);
delegate_to_repo!(Contact, ContactFields, ContactRepo);
