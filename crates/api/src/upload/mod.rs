//! Multipart upload handling: extraction of form fields and files, and the
//! on-disk upload directory.
//!
//! Files are buffered by [`UploadForm`] and written only when a handler
//! calls [`UploadDir::stage`], after it has validated the request and
//! loaded any record it is about to change.

mod form;

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use alazar_core::upload::{is_plain_filename, FilenameGenerator};
use tokio::io::AsyncWriteExt;

pub use form::{BufferedFile, UploadForm, UploadSlots};

/// Attempts at finding an unused name before giving up on a file.
const MAX_NAME_ATTEMPTS: usize = 3;

/// Filenames written by one [`UploadDir::stage`] call, grouped by form field
/// in upload order.
#[derive(Debug, Default, Clone)]
pub struct StagedFiles {
    by_field: HashMap<String, Vec<String>>,
}

impl StagedFiles {
    /// Names staged for `field`, in the order the files were received.
    pub fn names(&self, field: &str) -> &[String] {
        self.by_field.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The first name staged for a single-file `field`.
    pub fn single(&self, field: &str) -> Option<String> {
        self.names(field).first().cloned()
    }

    pub fn is_empty(&self) -> bool {
        self.by_field.values().all(Vec::is_empty)
    }

    fn all(&self) -> impl Iterator<Item = &str> {
        self.by_field.values().flatten().map(String::as_str)
    }
}

/// The directory uploaded files live in.
#[derive(Debug)]
pub struct UploadDir {
    root: PathBuf,
    names: FilenameGenerator,
}

impl UploadDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            names: FilenameGenerator::new(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the directory if it does not exist yet.
    pub async fn ensure_exists(&self) -> std::io::Result<()> {
        tokio::fs::create_dir_all(&self.root).await
    }

    /// Write every buffered file under a freshly generated name.
    ///
    /// Existing files are never overwritten. If any write fails, the files
    /// already written by this call are removed before the error is returned.
    pub async fn stage(&self, files: Vec<BufferedFile>) -> std::io::Result<StagedFiles> {
        let mut staged = StagedFiles::default();
        if files.is_empty() {
            return Ok(staged);
        }
        self.ensure_exists().await?;

        for file in files {
            match self.write_new(&file).await {
                Ok(name) => staged.by_field.entry(file.field).or_default().push(name),
                Err(e) => {
                    self.discard(&staged).await;
                    return Err(e);
                }
            }
        }

        tracing::debug!(
            count = staged.all().count(),
            dir = %self.root.display(),
            "Staged uploaded files",
        );
        Ok(staged)
    }

    async fn write_new(&self, file: &BufferedFile) -> std::io::Result<String> {
        let mut attempt = 0;
        loop {
            attempt += 1;
            let name = self.names.generate(&file.original_name);
            let opened = tokio::fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(self.root.join(&name))
                .await;
            let mut handle = match opened {
                Ok(handle) => handle,
                Err(e) if e.kind() == ErrorKind::AlreadyExists && attempt < MAX_NAME_ATTEMPTS => {
                    continue
                }
                Err(e) => return Err(e),
            };
            let written = async {
                handle.write_all(&file.bytes).await?;
                handle.flush().await
            }
            .await;
            if let Err(e) = written {
                self.remove(&name).await;
                return Err(e);
            }
            return Ok(name);
        }
    }

    /// Remove everything a failed request staged.
    pub async fn discard(&self, staged: &StagedFiles) {
        if staged.is_empty() {
            return;
        }
        tracing::info!(count = staged.all().count(), "Discarding staged uploads");
        self.remove_all(staged.all()).await;
    }

    /// Pass `result` through, discarding `staged` first if it is an error.
    ///
    /// Runs only while the handler future is polled: a request cancelled by
    /// the timeout layer after staging leaves its files on disk.
    pub async fn or_discard<T, E>(
        &self,
        staged: &StagedFiles,
        result: Result<T, E>,
    ) -> Result<T, E> {
        if result.is_err() {
            self.discard(staged).await;
        }
        result
    }

    /// Delete one file. A missing file is not an error; names that are not
    /// plain filenames are refused. Failures are logged, never returned.
    pub async fn remove(&self, name: &str) {
        if !is_plain_filename(name) {
            tracing::warn!(name, "Refusing to remove a path outside the upload directory");
            return;
        }
        match tokio::fs::remove_file(self.root.join(name)).await {
            Ok(()) => tracing::debug!(name, "Removed uploaded file"),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(name, "Uploaded file already gone");
            }
            Err(e) => tracing::warn!(name, error = %e, "Failed to remove uploaded file"),
        }
    }

    pub async fn remove_all<I>(&self, names: I)
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        for name in names {
            self.remove(name.as_ref()).await;
        }
    }
}
