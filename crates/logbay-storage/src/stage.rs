//! Artifact landing: write an inbound byte stream to its derived path.

use std::path::Path;

use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::{StorageError, StorageResult};

/// Land an uploaded payload at `path`, replacing any existing file.
/// The destination directory must already exist (see `StorageLayout`).
pub async fn land(path: &Path, data: &[u8]) -> StorageResult<()> {
    let start = std::time::Instant::now();

    let mut file = fs::File::create(path).await.map_err(|e| {
        StorageError::WriteFailed(format!("Failed to create file {}: {}", path.display(), e))
    })?;

    file.write_all(data).await.map_err(|e| {
        StorageError::WriteFailed(format!("Failed to write file {}: {}", path.display(), e))
    })?;

    file.sync_all().await.map_err(|e| {
        StorageError::WriteFailed(format!("Failed to sync file {}: {}", path.display(), e))
    })?;

    tracing::info!(
        path = %path.display(),
        size_bytes = data.len(),
        duration_ms = start.elapsed().as_secs_f64() * 1000.0,
        "Artifact landed"
    );

    Ok(())
}
