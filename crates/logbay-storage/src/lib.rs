//! Filesystem primitives for the ingestion pipeline.
//!
//! Deterministic artifact placement ([`StorageLayout`]), content-integrity
//! verification ([`checksum`]), multi-part reassembly ([`merge`]), and the
//! artifact landing writer ([`stage`]). All I/O is `tokio::fs`; every
//! failure maps to [`StorageError`].

pub mod checksum;
pub mod layout;
pub mod merge;
pub mod stage;

use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Directory creation failed: {0}")]
    CreateDirFailed(String),

    #[error("Write failed: {0}")]
    WriteFailed(String),

    #[error("Read failed: {0}")]
    ReadFailed(String),

    #[error("Merge failed: {0}")]
    MergeFailed(String),

    #[error("Invalid path component: {0}")]
    InvalidPathComponent(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

impl From<StorageError> for logbay_core::AppError {
    fn from(err: StorageError) -> Self {
        match err {
            // A path-breaking identity field is the client's fault, not the disk's.
            StorageError::InvalidPathComponent(msg) => {
                logbay_core::AppError::InvalidInput(format!("Invalid path component: {}", msg))
            }
            other => logbay_core::AppError::Storage(other.to_string()),
        }
    }
}

pub use layout::{StagedLog, StorageLayout};
