//! Application state and sub-state extractors.
//!
//! AppState aggregates the configuration, the storage layout, the external
//! store handles, and the version dispatch table. Handlers that only need
//! the stores can extract `StoreState` via Axum's `FromRef`.

use std::sync::Arc;

use logbay_core::Config;
use logbay_storage::StorageLayout;
use logbay_store::{ConfigStore, DecryptErrorSink, UserInfoStore};

use crate::ingest::IngestRouter;

/// Handles to the external collaborators behind the ingestion core.
#[derive(Clone)]
pub struct StoreState {
    pub user_info: Arc<dyn UserInfoStore>,
    pub config: Arc<dyn ConfigStore>,
    pub decrypt_errors: Arc<dyn DecryptErrorSink>,
}

/// Main application state: aggregates sub-states for dependency injection.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub layout: StorageLayout,
    pub stores: StoreState,
    pub ingest: IngestRouter,
}

impl axum::extract::FromRef<Arc<AppState>> for StoreState {
    fn from_ref(state: &Arc<AppState>) -> Self {
        state.stores.clone()
    }
}

fn _assert_app_state_send_sync() {
    fn assert_send<T: Send>() {}
    fn assert_sync<T: Sync>() {}
    assert_send::<AppState>();
    assert_sync::<AppState>();
}
