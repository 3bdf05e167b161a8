//! Upload slots and stored-filename rules.

use std::path::Path;
use std::sync::atomic::{AtomicI64, Ordering};

use rand::Rng;

/// Longest extension (without the dot) carried over from the original name.
const MAX_EXTENSION_LEN: usize = 10;

/// Upper bound (exclusive) of the random filename suffix.
const SUFFIX_RANGE: u32 = 1_000_000_000;

/// A named multipart file field and how many files it accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadSlot {
    pub field: &'static str,
    pub max_count: usize,
}

impl UploadSlot {
    /// A field accepting exactly one file.
    pub const fn single(field: &'static str) -> Self {
        Self {
            field,
            max_count: 1,
        }
    }

    /// A field accepting up to `max_count` files.
    pub const fn many(field: &'static str, max_count: usize) -> Self {
        Self { field, max_count }
    }
}

/// Generates collision-free stored filenames.
///
/// Names look like `1747398563123-004812345.png`: a millisecond time
/// component, a random 9-digit suffix and the original extension. The time
/// component is strictly increasing across calls on the same generator, so
/// two files uploaded within the same millisecond still get distinct names.
#[derive(Debug, Default)]
pub struct FilenameGenerator {
    last_millis: AtomicI64,
}

impl FilenameGenerator {
    pub const fn new() -> Self {
        Self {
            last_millis: AtomicI64::new(0),
        }
    }

    /// Produce a fresh filename for an upload named `original_name`.
    pub fn generate(&self, original_name: &str) -> String {
        let millis = self.next_millis(chrono::Utc::now().timestamp_millis());
        let suffix = rand::rng().random_range(0..SUFFIX_RANGE);
        format!("{millis}-{suffix:09}{}", extension_of(original_name))
    }

    fn next_millis(&self, now: i64) -> i64 {
        let previous = self
            .last_millis
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |last| {
                Some(now.max(last + 1))
            })
            .unwrap_or(now);
        now.max(previous + 1)
    }
}

/// Lowercased extension of `original_name` including the dot, or an empty
/// string when there is none or it is not a short alphanumeric token.
pub fn extension_of(original_name: &str) -> String {
    Path::new(original_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| {
            !ext.is_empty()
                && ext.len() <= MAX_EXTENSION_LEN
                && ext.chars().all(|c| c.is_ascii_alphanumeric())
        })
        .map(|ext| format!(".{}", ext.to_ascii_lowercase()))
        .unwrap_or_default()
}

/// Whether a declared content type is an image (`image/*`).
pub fn is_image_content_type(content_type: Option<&str>) -> bool {
    content_type
        .map(|ct| ct.trim().to_ascii_lowercase().starts_with("image/"))
        .unwrap_or(false)
}

/// Whether `name` is a bare filename that cannot escape the upload directory.
pub fn is_plain_filename(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\', '\0'])
}
