use std::io;

use thiserror::Error;

use crate::types::FileId;

/// Error type for dataset configuration, indexing, and extraction failures.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("catalog '{path}' is unavailable: {reason}")]
    CatalogUnavailable { path: String, reason: String },
    #[error("position {value} outside valid range [0, {limit})")]
    OutOfRange { value: i64, limit: u64 },
    #[error("data integrity violation in file #{file_index}: {details}")]
    DataIntegrity { file_index: usize, details: String },
    #[error("extraction failed for '{file_id}': {reason}")]
    Extraction { file_id: FileId, reason: String },
    #[error(transparent)]
    Io(#[from] io::Error),
}
