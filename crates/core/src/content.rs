//! Rich content blocks of a case body.
//!
//! A case body is an ordered list of text and image blocks. Callers submit
//! the list as JSON descriptors together with an ordered array of image
//! files; [`resolve_blocks`] pairs image descriptors with those files by
//! position.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::CoreError;

/// One element of a case body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContentBlock {
    /// Inline text. Any extra keys supplied by the caller are kept verbatim.
    Text {
        #[serde(default)]
        value: String,
        #[serde(flatten)]
        extra: Map<String, Value>,
    },
    /// An image stored in the upload directory; `value` is its filename.
    Image {
        #[serde(default)]
        value: String,
    },
}

impl ContentBlock {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text {
            value: value.into(),
            extra: Map::new(),
        }
    }

    pub fn image(value: impl Into<String>) -> Self {
        Self::Image {
            value: value.into(),
        }
    }
}

/// Parse the `blocks` form field into descriptors.
///
/// Malformed JSON and unknown block types are validation errors.
pub fn parse_blocks(raw: &str) -> Result<Vec<ContentBlock>, CoreError> {
    serde_json::from_str(raw)
        .map_err(|e| CoreError::Validation(format!("Malformed blocks: {e}")))
}

/// Resolve image descriptors against the files uploaded with the request.
///
/// Walks `descriptors` once with a cursor into `uploaded`:
///
/// - text blocks pass through unchanged;
/// - each image block takes the next uploaded filename;
/// - once the uploads are exhausted, an image block keeps its own `value`,
///   but only if that filename is in `known` (the images the record already
///   owns). On create `known` is empty, so every image needs a file.
///
/// Leftover uploads and images with neither a file nor a known filename are
/// rejected rather than producing empty filenames.
pub fn resolve_blocks(
    descriptors: Vec<ContentBlock>,
    uploaded: &[String],
    known: &[&str],
) -> Result<Vec<ContentBlock>, CoreError> {
    let mut cursor = uploaded.iter();
    let mut resolved = Vec::with_capacity(descriptors.len());

    for (position, block) in descriptors.into_iter().enumerate() {
        let block = match block {
            text @ ContentBlock::Text { .. } => text,
            ContentBlock::Image { value } => match cursor.next() {
                Some(filename) => ContentBlock::image(filename.clone()),
                None if known.contains(&value.as_str()) => ContentBlock::Image { value },
                None => {
                    return Err(CoreError::Validation(format!(
                        "Image block at position {position} has no uploaded file"
                    )))
                }
            },
        };
        resolved.push(block);
    }

    let leftover = cursor.count();
    if leftover > 0 {
        return Err(CoreError::Validation(format!(
            "{leftover} block image(s) uploaded without a matching image block"
        )));
    }

    Ok(resolved)
}

/// Filenames referenced by the image blocks, in order.
pub fn image_files(blocks: &[ContentBlock]) -> impl Iterator<Item = &str> {
    blocks.iter().filter_map(|block| match block {
        ContentBlock::Image { value } if !value.is_empty() => Some(value.as_str()),
        _ => None,
    })
}
