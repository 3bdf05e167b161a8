//! Store backend keeping each collection in one JSON array file.
//!
//! Every write reads the whole collection, mutates it and writes it back
//! through a temporary file and a rename, so readers never observe a
//! half-written file. Writers inside this process are serialized by a
//! mutex; separate processes sharing the directory are not coordinated
//! and the last writer wins.

use std::io::ErrorKind;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use alazar_core::types::DbId;
use async_trait::async_trait;
use tokio::sync::Mutex;

use super::{Resource, Store, StoreError};

pub struct JsonFileStore<R> {
    path: PathBuf,
    write_lock: Mutex<()>,
    _resource: PhantomData<fn() -> R>,
}

impl<R: Resource> JsonFileStore<R> {
    /// Store for `R` at `<data_dir>/<collection>.json`. Nothing is touched on
    /// disk until the first write.
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join(format!("{}.json", R::COLLECTION)),
            write_lock: Mutex::new(()),
            _resource: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the collection in file order.
    ///
    /// A missing file is an empty collection. So is a file that does not
    /// parse, which is logged and will be overwritten by the next write.
    async fn read_all(&self) -> Result<Vec<R>, StoreError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }
        match serde_json::from_slice(&bytes) {
            Ok(records) => Ok(records),
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Malformed store file, treating collection as empty",
                );
                Ok(Vec::new())
            }
        }
    }

    async fn write_all(&self, records: &[R]) -> Result<(), StoreError> {
        if let Some(dir) = self.path.parent() {
            tokio::fs::create_dir_all(dir).await?;
        }
        let body = serde_json::to_vec_pretty(records)?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, body).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl<R: Resource> Store<R> for JsonFileStore<R> {
    async fn list(&self) -> Result<Vec<R>, StoreError> {
        let mut records = self.read_all().await?;
        if R::NEWEST_FIRST {
            records.sort_by(|a, b| {
                b.created_at()
                    .cmp(&a.created_at())
                    .then_with(|| b.id().cmp(&a.id()))
            });
        }
        Ok(records)
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<R>, StoreError> {
        Ok(self.read_all().await?.into_iter().find(|r| r.id() == id))
    }

    async fn create(&self, fields: R::Fields) -> Result<R, StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut records = self.read_all().await?;
        let id = records.iter().map(Resource::id).max().unwrap_or(0) + 1;
        let now = chrono::Utc::now();
        let record = R::assemble(id, now, now, fields);
        records.push(record.clone());
        self.write_all(&records).await?;
        Ok(record)
    }

    async fn update(&self, id: DbId, fields: R::Fields) -> Result<Option<R>, StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut records = self.read_all().await?;
        let Some(slot) = records.iter_mut().find(|r| r.id() == id) else {
            return Ok(None);
        };
        let updated = R::assemble(id, slot.created_at(), chrono::Utc::now(), fields);
        *slot = updated.clone();
        self.write_all(&records).await?;
        Ok(Some(updated))
    }

    async fn delete(&self, id: DbId) -> Result<bool, StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut records = self.read_all().await?;
        let before = records.len();
        records.retain(|r| r.id() != id);
        if records.len() == before {
            return Ok(false);
        }
        self.write_all(&records).await?;
        Ok(true)
    }
}
