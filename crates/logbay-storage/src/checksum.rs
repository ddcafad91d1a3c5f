//! Content-integrity verification for landed artifacts.
//!
//! Clients declare an MD5 hex sum alongside every upload; the server
//! recomputes it from the bytes that actually reached disk. MD5 is the wire
//! contract here, not a security boundary: the sum guards against transfer
//! corruption, and the comparison is case-insensitive.

use std::path::Path;

use md5::{Digest, Md5};
use tokio::fs;
use tokio::io::AsyncReadExt;

use crate::{StorageError, StorageResult};

const READ_BUF_SIZE: usize = 64 * 1024;

/// Stream a file through MD5 and return the lowercase hex digest.
pub async fn file_md5(path: &Path) -> StorageResult<String> {
    let mut file = fs::File::open(path).await.map_err(|e| {
        StorageError::ReadFailed(format!("Failed to open file {}: {}", path.display(), e))
    })?;

    let mut hasher = Md5::new();
    let mut buf = vec![0u8; READ_BUF_SIZE];
    loop {
        let n = file.read(&mut buf).await.map_err(|e| {
            StorageError::ReadFailed(format!("Failed to read file {}: {}", path.display(), e))
        })?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }

    Ok(hex::encode(hasher.finalize()))
}

/// Compare the landed file's digest against the client-declared sum.
///
/// `Ok(false)` and `Err(_)` are the same outcome for callers: the upload
/// cannot be trusted and the request must fail.
pub async fn verify(path: &Path, declared_sum: &str) -> StorageResult<bool> {
    let computed = file_md5(path).await?;
    Ok(computed.eq_ignore_ascii_case(declared_sum.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn computes_known_digest() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("hello.log");
        std::fs::write(&path, b"hello").unwrap();

        let sum = file_md5(&path).await.unwrap();
        assert_eq!(sum, "5d41402abc4b2a76b9719d911017c592");
    }

    #[tokio::test]
    async fn verify_is_case_insensitive() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("hello.log");
        std::fs::write(&path, b"hello").unwrap();

        assert!(verify(&path, "5D41402ABC4B2A76B9719D911017C592")
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn verify_rejects_mismatch() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("hello.log");
        std::fs::write(&path, b"hello world").unwrap();

        assert!(!verify(&path, "5d41402abc4b2a76b9719d911017c592")
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn missing_file_is_a_read_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("absent");

        let result = verify(&path, "5d41402abc4b2a76b9719d911017c592").await;
        assert!(matches!(result, Err(StorageError::ReadFailed(_))));
    }
}
