//! State construction: stores, parse queue, version handlers.

use std::sync::Arc;

use logbay_core::models::ConfigEntry;
use logbay_core::Config;
use logbay_storage::StorageLayout;
use logbay_store::{MemoryConfigStore, MemoryDecryptErrorSink, MemoryUserInfoStore};
use logbay_worker::{LogParser, ParseContext, ParseJobQueue, ParseQueueConfig, PassthroughParser};

use crate::ingest::{IngestRouter, V1Ingest};
use crate::state::{AppState, StoreState};

/// Wire up the application state from explicit collaborators. Tests use
/// this to substitute recording stores and parsers.
pub fn build_state(config: Config, stores: StoreState, parser: Arc<dyn LogParser>) -> Arc<AppState> {
    let layout = StorageLayout::new(&config);

    let context = ParseContext::new(parser, stores.decrypt_errors.clone());
    let parse_queue = ParseJobQueue::new(
        context,
        ParseQueueConfig {
            max_concurrent: config.parse_workers(),
            queue_size: config.parse_queue_size(),
        },
    );

    let v1 = V1Ingest::new(layout.clone(), stores.clone(), parse_queue);

    Arc::new(AppState {
        config,
        layout,
        stores,
        ingest: IngestRouter::new(v1),
    })
}

/// Default wiring: in-memory stores and the passthrough parser. A real
/// deployment swaps these for its persistence repositories and parser.
pub fn build_default_state(config: Config) -> Arc<AppState> {
    let stores = StoreState {
        user_info: MemoryUserInfoStore::new(),
        config: MemoryConfigStore::new(ConfigEntry::default()),
        decrypt_errors: MemoryDecryptErrorSink::new(),
    };
    build_state(config, stores, Arc::new(PassthroughParser))
}
