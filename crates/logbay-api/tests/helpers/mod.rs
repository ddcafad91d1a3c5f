//! Test helpers: build the ingestion router over in-memory stores and a
//! recording parser.
//!
//! Run from the workspace root: `cargo test -p logbay-api` or
//! `cargo test -p logbay-api --test log_upload_test`.

// Not every test binary touches every helper.
#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use axum_test::TestServer;
use md5::{Digest, Md5};
use tempfile::TempDir;

use logbay_api::setup::{routes, services};
use logbay_api::state::StoreState;
use logbay_core::models::{ConfigEntry, LogFileProperties};
use logbay_core::Config;
use logbay_store::{
    DecryptErrorSink, MemoryConfigStore, MemoryDecryptErrorSink, MemoryUserInfoStore,
};
use logbay_worker::LogParser;

/// Parser that records every job it sees, then behaves like the
/// passthrough parser.
#[derive(Default)]
pub struct RecordingParser {
    jobs: Mutex<Vec<LogFileProperties>>,
}

impl RecordingParser {
    pub fn jobs(&self) -> Vec<LogFileProperties> {
        self.jobs.lock().unwrap().clone()
    }
}

#[async_trait]
impl LogParser for RecordingParser {
    async fn parse(
        &self,
        properties: &LogFileProperties,
        _decrypt_errors: &dyn DecryptErrorSink,
    ) -> Result<Vec<PathBuf>> {
        self.jobs.lock().unwrap().push(properties.clone());
        Ok(vec![properties.work_file()])
    }
}

/// Test application: server plus handles on every collaborator.
pub struct TestApp {
    pub server: TestServer,
    pub user_info: Arc<MemoryUserInfoStore>,
    pub config_store: Arc<MemoryConfigStore>,
    pub decrypt_errors: Arc<MemoryDecryptErrorSink>,
    pub parser: Arc<RecordingParser>,
    pub data_dir: TempDir,
}

impl TestApp {
    /// Absolute path under the test data root.
    pub fn data_path(&self, rel: &str) -> PathBuf {
        self.data_dir.path().join(rel)
    }

    /// True when no artifact directory has been created yet. Rejected
    /// requests must leave the filesystem untouched.
    pub fn no_files_written(&self) -> bool {
        std::fs::read_dir(self.data_dir.path())
            .map(|mut entries| entries.next().is_none())
            .unwrap_or(true)
    }

    /// Wait until the parse pool has executed `count` jobs.
    pub async fn wait_for_jobs(&self, count: usize) -> Vec<LogFileProperties> {
        for _ in 0..200 {
            let jobs = self.parser.jobs();
            if jobs.len() >= count {
                return jobs;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("parse pool never executed {} job(s)", count);
    }

    /// Give in-flight work a moment, then assert nothing was parsed.
    pub async fn assert_no_jobs(&self) {
        tokio::time::sleep(Duration::from_millis(150)).await;
        assert!(self.parser.jobs().is_empty(), "unexpected parse job");
    }
}

/// Setup a test app with isolated directories and in-memory stores.
pub fn setup_test_app() -> TestApp {
    setup_test_app_with_config_level(0)
}

/// Same, with a chosen upload threshold in the config store.
pub fn setup_test_app_with_config_level(level: i32) -> TestApp {
    let data_dir = tempfile::tempdir().expect("Failed to create temp directory");
    let config = Config::with_data_dir(data_dir.path());

    let user_info = MemoryUserInfoStore::new();
    let config_store = MemoryConfigStore::new(ConfigEntry { level });
    let decrypt_errors = MemoryDecryptErrorSink::new();
    let parser = Arc::new(RecordingParser::default());

    let stores = StoreState {
        user_info: user_info.clone(),
        config: config_store.clone(),
        decrypt_errors: decrypt_errors.clone(),
    };
    let state = services::build_state(config.clone(), stores, parser.clone());
    let router = routes::setup_routes(&config, state).expect("Failed to build routes");
    let server = TestServer::new(router).expect("Failed to start test server");

    TestApp {
        server,
        user_info,
        config_store,
        decrypt_errors,
        parser,
        data_dir,
    }
}

/// Hex MD5 of a payload, as a client would declare it.
pub fn md5_hex(data: &[u8]) -> String {
    let mut hasher = Md5::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

/// A multipart file part the way client SDKs send them.
pub fn file_part(content: &[u8], filename: &str) -> axum_test::multipart::Part {
    axum_test::multipart::Part::bytes(content.to_vec())
        .file_name(filename)
        .mime_type("application/octet-stream")
}
