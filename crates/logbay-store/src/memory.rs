//! In-memory store backends.
//!
//! Reference implementations used by the default server wiring and the
//! integration tests. Writes are counted so tests can assert the upsert
//! idempotency contract (an unchanged snapshot must not produce a write).

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use logbay_core::models::{ConfigEntry, DecryptError, Platform, UserInfo};

use crate::traits::{ConfigStore, DecryptErrorSink, StoreResult, UserInfoStore};

type UserKey = (Platform, String, String);

/// In-memory `UserInfoStore` backed by a `RwLock<HashMap>`.
#[derive(Default)]
pub struct MemoryUserInfoStore {
    records: RwLock<HashMap<UserKey, UserInfo>>,
    save_count: AtomicUsize,
}

impl MemoryUserInfoStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Number of `save` calls observed. Test hook for the idempotency
    /// contract.
    pub fn save_count(&self) -> usize {
        self.save_count.load(Ordering::SeqCst)
    }

    /// Number of stored records.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl UserInfoStore for MemoryUserInfoStore {
    async fn find_by_uid_and_app_id(
        &self,
        platform: Platform,
        uid: &str,
        app_id: &str,
    ) -> StoreResult<Option<UserInfo>> {
        let records = self.records.read().await;
        Ok(records
            .get(&(platform, uid.to_string(), app_id.to_string()))
            .cloned())
    }

    async fn save(&self, mut info: UserInfo) -> StoreResult<UserInfo> {
        self.save_count.fetch_add(1, Ordering::SeqCst);
        if info.id.is_none() {
            info.id = Some(Uuid::new_v4());
        }
        let key = (info.platform, info.uid.clone(), info.app_id.clone());
        self.records.write().await.insert(key, info.clone());
        Ok(info)
    }
}

/// In-memory `ConfigStore` holding a single threshold entry.
pub struct MemoryConfigStore {
    entry: RwLock<ConfigEntry>,
}

impl MemoryConfigStore {
    pub fn new(entry: ConfigEntry) -> Arc<Self> {
        Arc::new(MemoryConfigStore {
            entry: RwLock::new(entry),
        })
    }

    /// Replace the stored threshold. Operational hook; the ingestion core
    /// itself only reads.
    pub async fn set(&self, entry: ConfigEntry) {
        *self.entry.write().await = entry;
    }
}

impl Default for MemoryConfigStore {
    fn default() -> Self {
        MemoryConfigStore {
            entry: RwLock::new(ConfigEntry::default()),
        }
    }
}

#[async_trait]
impl ConfigStore for MemoryConfigStore {
    async fn read(&self) -> StoreResult<ConfigEntry> {
        Ok(*self.entry.read().await)
    }
}

/// In-memory `DecryptErrorSink` retaining recorded failures for inspection.
#[derive(Default)]
pub struct MemoryDecryptErrorSink {
    errors: RwLock<Vec<DecryptError>>,
}

impl MemoryDecryptErrorSink {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub async fn recorded(&self) -> Vec<DecryptError> {
        self.errors.read().await.clone()
    }
}

#[async_trait]
impl DecryptErrorSink for MemoryDecryptErrorSink {
    async fn record(&self, error: DecryptError) -> StoreResult<()> {
        tracing::warn!(
            platform = %error.platform,
            uid = %error.uid,
            app_id = %error.app_id,
            filename = %error.filename,
            reason = %error.reason,
            "Recorded decrypt error"
        );
        self.errors.write().await.push(error);
        Ok(())
    }
}
