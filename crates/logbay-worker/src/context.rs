//! Parse job context and the parser seam.
//!
//! The context is captured once at queue construction and shared by every
//! job; nothing about a job's dependencies lives in process-wide state.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;

use logbay_core::models::LogFileProperties;
use logbay_store::DecryptErrorSink;

/// Turns a staged log file into ordered parsed part files.
///
/// The real parsing algorithm (decode, decrypt, split into records) is an
/// external component. Implementations report decrypt failures through the
/// sink they are handed; a returned error is terminal for the job.
#[async_trait]
pub trait LogParser: Send + Sync {
    /// Parse the staged file described by `properties` and return the part
    /// files to merge, in order.
    async fn parse(
        &self,
        properties: &LogFileProperties,
        decrypt_errors: &dyn DecryptErrorSink,
    ) -> Result<Vec<PathBuf>>;
}

/// Parser that emits the staged file as its single part, unmodified.
/// Placeholder wiring for deployments that plug in a real parser.
pub struct PassthroughParser;

#[async_trait]
impl LogParser for PassthroughParser {
    async fn parse(
        &self,
        properties: &LogFileProperties,
        _decrypt_errors: &dyn DecryptErrorSink,
    ) -> Result<Vec<PathBuf>> {
        Ok(vec![properties.work_file()])
    }
}

/// Everything a parse job needs, passed explicitly at queue construction.
#[derive(Clone)]
pub struct ParseContext {
    pub parser: Arc<dyn LogParser>,
    pub decrypt_errors: Arc<dyn DecryptErrorSink>,
}

impl ParseContext {
    pub fn new(parser: Arc<dyn LogParser>, decrypt_errors: Arc<dyn DecryptErrorSink>) -> Self {
        ParseContext {
            parser,
            decrypt_errors,
        }
    }
}
