//! Store abstraction traits
//!
//! All backends (in-memory, or a real persistence engine supplied by the
//! deployment) must implement these traits. The ingestion endpoints work
//! against `Arc<dyn ...>` handles and never see implementation details.

use async_trait::async_trait;
use thiserror::Error;

use logbay_core::models::{ConfigEntry, DecryptError, Platform, UserInfo};

/// Store operation errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Lookup failed: {0}")]
    LookupFailed(String),

    #[error("Save failed: {0}")]
    SaveFailed(String),

    #[error("Store backend error: {0}")]
    BackendError(String),
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

impl From<StoreError> for logbay_core::AppError {
    fn from(err: StoreError) -> Self {
        logbay_core::AppError::Store(err.to_string())
    }
}

/// Per-device system-info records, keyed by (platform, uid, app_id).
#[async_trait]
pub trait UserInfoStore: Send + Sync {
    /// Fetch the stored snapshot for a device, if any.
    async fn find_by_uid_and_app_id(
        &self,
        platform: Platform,
        uid: &str,
        app_id: &str,
    ) -> StoreResult<Option<UserInfo>>;

    /// Insert or overwrite a snapshot. A record carrying an existing `id`
    /// replaces the stored record with that identity.
    async fn save(&self, info: UserInfo) -> StoreResult<UserInfo>;
}

/// Process-wide upload threshold, read per system-info request.
#[async_trait]
pub trait ConfigStore: Send + Sync {
    async fn read(&self) -> StoreResult<ConfigEntry>;
}

/// Write-only channel for parse-time decrypt failures. Consumed by the
/// (external) parser component; the ingestion core only ever records.
#[async_trait]
pub trait DecryptErrorSink: Send + Sync {
    async fn record(&self, error: DecryptError) -> StoreResult<()>;
}
