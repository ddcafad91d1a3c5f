//! Deterministic path derivation for uploaded artifacts.
//!
//! Three artifact families, three naming rules:
//! - log files land under the temp dir with an opaque random name; the
//!   client filename is metadata only, so untrusted names never reach disk
//! - crash reports land at `{crash_root}/{platform}/{app_id}/{uid}/{name}`
//!   and overwrite a prior report with the same name from the same user
//! - attachments land at `{attachment_dir}/{platform}_{uid}_{app_id}_{id}.jpg`
//!
//! Directory creation is idempotent; a creation failure is fatal for the
//! request that needed it.

use std::path::{Path, PathBuf};

use logbay_core::models::Platform;
use logbay_core::Config;
use tokio::fs;
use uuid::Uuid;

use crate::{StorageError, StorageResult};

/// A freshly staged log destination: opaque on-disk name plus full path.
#[derive(Debug, Clone)]
pub struct StagedLog {
    pub filename: String,
    pub path: PathBuf,
}

/// Path derivation and directory creation for all artifact families.
#[derive(Clone)]
pub struct StorageLayout {
    temp_dir: PathBuf,
    crash_report_android: PathBuf,
    crash_report_ios: PathBuf,
    attachment_dir: PathBuf,
}

impl StorageLayout {
    pub fn new(config: &Config) -> Self {
        StorageLayout {
            temp_dir: config.temp_dir().to_path_buf(),
            crash_report_android: config.crash_report_dir(Platform::Android),
            crash_report_ios: config.crash_report_dir(Platform::Ios),
            attachment_dir: config.attachment_dir().to_path_buf(),
        }
    }

    /// Staging directory for log files awaiting parse.
    pub fn temp_dir(&self) -> &Path {
        &self.temp_dir
    }

    /// Reserve a temp destination for a log file: ensures the temp dir and
    /// returns a collision-resistant opaque filename under it. No two
    /// concurrent uploads receive the same name.
    pub async fn stage_log_file(&self) -> StorageResult<StagedLog> {
        ensure_dir(&self.temp_dir).await?;
        let filename = Uuid::new_v4().simple().to_string();
        let path = self.temp_dir.join(&filename);
        Ok(StagedLog { filename, path })
    }

    /// Destination for a crash report: per-user directory, original filename.
    /// Re-uploading the same filename from the same user overwrites.
    pub async fn crash_report_path(
        &self,
        platform: Platform,
        app_id: &str,
        uid: &str,
        original_filename: &str,
    ) -> StorageResult<PathBuf> {
        let app_id = validate_component(app_id)?;
        let uid = validate_component(uid)?;
        let filename = sanitize_filename(original_filename)?;

        let root = match platform {
            Platform::Android => &self.crash_report_android,
            Platform::Ios => &self.crash_report_ios,
        };
        let dir = root.join(app_id).join(uid);
        ensure_dir(&dir).await?;
        Ok(dir.join(filename))
    }

    /// Deterministic attachment filename, or `None` when derivation fails
    /// (an empty or path-breaking component). The exact separator and
    /// extension are part of the wire contract.
    pub fn attachment_name(
        platform: Platform,
        uid: &str,
        app_id: &str,
        attachment_id: &str,
    ) -> Option<String> {
        for part in [uid, app_id, attachment_id] {
            if part.is_empty() || part.contains(['/', '\\']) || part.contains("..") {
                return None;
            }
        }
        Some(format!(
            "{}_{}_{}_{}.jpg",
            platform.as_str(),
            uid,
            app_id,
            attachment_id
        ))
    }

    /// Destination for an attachment with an already-derived name.
    pub async fn attachment_path(&self, name: &str) -> StorageResult<PathBuf> {
        ensure_dir(&self.attachment_dir).await?;
        Ok(self.attachment_dir.join(name))
    }
}

/// Idempotent directory creation; "already exists" is success.
async fn ensure_dir(dir: &Path) -> StorageResult<()> {
    fs::create_dir_all(dir).await.map_err(|e| {
        StorageError::CreateDirFailed(format!("{}: {}", dir.display(), e))
    })
}

/// Reject identity fields that would break out of their path segment.
fn validate_component(component: &str) -> StorageResult<&str> {
    if component.is_empty() || component.contains(['/', '\\']) || component.contains("..") {
        return Err(StorageError::InvalidPathComponent(component.to_string()));
    }
    Ok(component)
}

/// Reduce a client-supplied filename to its final path component and reject
/// anything that still looks like traversal.
fn sanitize_filename(filename: &str) -> StorageResult<String> {
    let name = Path::new(filename)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("");
    if name.is_empty() || name.contains("..") {
        return Err(StorageError::InvalidPathComponent(filename.to_string()));
    }
    Ok(name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn layout(dir: &Path) -> StorageLayout {
        StorageLayout::new(&Config::with_data_dir(dir))
    }

    #[tokio::test]
    async fn staged_log_names_are_unique() {
        let dir = tempdir().unwrap();
        let layout = layout(dir.path());

        let a = layout.stage_log_file().await.unwrap();
        let b = layout.stage_log_file().await.unwrap();
        assert_ne!(a.filename, b.filename);
        assert!(a.path.starts_with(layout.temp_dir()));
        assert!(layout.temp_dir().is_dir());
    }

    #[tokio::test]
    async fn crash_report_path_is_deterministic_per_user() {
        let dir = tempdir().unwrap();
        let layout = layout(dir.path());

        let first = layout
            .crash_report_path(Platform::Android, "app-1", "uid-1", "crash.dmp")
            .await
            .unwrap();
        let second = layout
            .crash_report_path(Platform::Android, "app-1", "uid-1", "crash.dmp")
            .await
            .unwrap();
        assert_eq!(first, second);
        assert!(first.ends_with("android/app-1/uid-1/crash.dmp"));
    }

    #[tokio::test]
    async fn crash_report_rejects_traversal() {
        let dir = tempdir().unwrap();
        let layout = layout(dir.path());

        let result = layout
            .crash_report_path(Platform::Ios, "app-1", "../uid", "crash.dmp")
            .await;
        assert!(matches!(result, Err(StorageError::InvalidPathComponent(_))));

        let result = layout
            .crash_report_path(Platform::Ios, "app-1", "uid-1", "..")
            .await;
        assert!(matches!(result, Err(StorageError::InvalidPathComponent(_))));
    }

    #[tokio::test]
    async fn crash_filename_is_reduced_to_basename() {
        let dir = tempdir().unwrap();
        let layout = layout(dir.path());

        let path = layout
            .crash_report_path(Platform::Ios, "app-1", "uid-1", "nested/dir/crash.dmp")
            .await
            .unwrap();
        assert!(path.ends_with("ios/app-1/uid-1/crash.dmp"));
    }

    #[test]
    fn attachment_name_uses_fixed_convention() {
        let name =
            StorageLayout::attachment_name(Platform::Android, "uid-1", "app-1", "att-7").unwrap();
        assert_eq!(name, "android_uid-1_app-1_att-7.jpg");
    }

    #[test]
    fn attachment_name_derivation_fails_on_bad_components() {
        assert!(StorageLayout::attachment_name(Platform::Android, "", "app", "att").is_none());
        assert!(StorageLayout::attachment_name(Platform::Android, "uid", "app", "a/b").is_none());
        assert!(StorageLayout::attachment_name(Platform::Android, "uid", "..", "att").is_none());
    }

    #[test]
    fn distinct_attachment_ids_never_collide() {
        let a = StorageLayout::attachment_name(Platform::Ios, "uid", "app", "1").unwrap();
        let b = StorageLayout::attachment_name(Platform::Ios, "uid", "app", "2").unwrap();
        assert_ne!(a, b);
    }
}
