//! Multi-part reassembly: append an ordered list of part files into one
//! output file.
//!
//! Inputs that do not exist as regular files are skipped silently; partial
//! chunk sets are expected when a client gave up mid-upload. The merge does
//! no integrity checking; the caller verifies the result.

use std::path::{Path, PathBuf};

use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::{StorageError, StorageResult};

/// Append each existing input file's bytes to `output` in order.
///
/// Creates the output file and its parent directories when absent. Fails on
/// an empty output path or on any I/O error while creating or appending.
pub async fn merge(output: &Path, inputs: &[PathBuf]) -> StorageResult<()> {
    if output.as_os_str().is_empty() {
        return Err(StorageError::MergeFailed(
            "output path is empty".to_string(),
        ));
    }

    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).await.map_err(|e| {
                StorageError::CreateDirFailed(format!("{}: {}", parent.display(), e))
            })?;
        }
    }

    let mut out = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(output)
        .await
        .map_err(|e| {
            StorageError::MergeFailed(format!(
                "Failed to open output {}: {}",
                output.display(),
                e
            ))
        })?;

    let mut appended = 0usize;
    for input in inputs {
        let is_file = fs::metadata(input)
            .await
            .map(|m| m.is_file())
            .unwrap_or(false);
        if !is_file {
            tracing::debug!(path = %input.display(), "Skipping missing merge input");
            continue;
        }

        let bytes = fs::read(input).await.map_err(|e| {
            StorageError::ReadFailed(format!("Failed to read input {}: {}", input.display(), e))
        })?;
        out.write_all(&bytes).await.map_err(|e| {
            StorageError::MergeFailed(format!(
                "Failed to append to output {}: {}",
                output.display(),
                e
            ))
        })?;
        appended += 1;
    }

    out.sync_all().await.map_err(|e| {
        StorageError::MergeFailed(format!("Failed to sync output {}: {}", output.display(), e))
    })?;

    tracing::debug!(
        output = %output.display(),
        inputs = inputs.len(),
        appended = appended,
        "Merged part files"
    );

    Ok(())
}

/// Best-effort deletion of a set of paths. Returns whether every path was
/// removed (missing files count as removed).
pub async fn remove_files(paths: &[PathBuf]) -> bool {
    let mut all_removed = true;
    for path in paths {
        match fs::remove_file(path).await {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Failed to remove file");
                all_removed = false;
            }
        }
    }
    all_removed
}
