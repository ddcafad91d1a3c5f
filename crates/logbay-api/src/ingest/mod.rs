//! Version-aware ingestion dispatch.
//!
//! The client's `sdkVersion` string resolves to a closed [`SdkVersion`]
//! enumeration; each known version maps to a handler implementing the full
//! upload capability set. Adding a protocol version means adding an enum
//! variant and a handler; shared validation never changes. An unknown
//! version resolves to no handler and the request fails before any side
//! effect.

mod v1;

use std::sync::Arc;

use async_trait::async_trait;

use logbay_core::models::{Platform, UserInfo};
use logbay_core::AppError;

use crate::extract::FilePart;
use crate::handlers::{InfoResponse, UploadResponse};

pub use v1::V1Ingest;

/// Client-declared protocol version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SdkVersion {
    V1,
    Unknown,
}

impl SdkVersion {
    /// Resolve a version string by its numeric major component: `"1"`,
    /// `"1.0"`, `"1.2.3"` all select V1. Anything else is unknown.
    pub fn parse(version: &str) -> Self {
        let major = version.trim().split('.').next().unwrap_or("");
        match major {
            "1" => SdkVersion::V1,
            _ => SdkVersion::Unknown,
        }
    }
}

/// A validated log-file upload, ready for the staging pipeline.
#[derive(Debug)]
pub struct LogUploadRequest {
    pub platform: Platform,
    pub uid: String,
    pub app_id: String,
    pub logger_name: String,
    pub layouts: String,
    pub level: i32,
    pub alias: String,
    pub file_sum: String,
    pub file: FilePart,
}

/// A validated crash-report upload.
#[derive(Debug)]
pub struct CrashUploadRequest {
    pub platform: Platform,
    pub uid: String,
    pub app_id: String,
    pub file_sum: String,
    pub file: FilePart,
}

/// A validated attachment upload.
#[derive(Debug)]
pub struct AttachmentUploadRequest {
    pub platform: Platform,
    pub uid: String,
    pub app_id: String,
    pub file_sum: String,
    pub attachment_id: String,
    pub file: FilePart,
}

/// The capability set every protocol version must implement.
#[async_trait]
pub trait VersionedIngest: Send + Sync {
    async fn upload_log_file(&self, request: LogUploadRequest) -> Result<UploadResponse, AppError>;

    async fn upload_system_info(&self, info: UserInfo) -> Result<InfoResponse, AppError>;

    async fn upload_crash_report(
        &self,
        request: CrashUploadRequest,
    ) -> Result<UploadResponse, AppError>;

    async fn upload_attachment(
        &self,
        request: AttachmentUploadRequest,
    ) -> Result<UploadResponse, AppError>;
}

/// Maps a resolved version to its handler.
#[derive(Clone)]
pub struct IngestRouter {
    v1: Arc<V1Ingest>,
}

impl IngestRouter {
    pub fn new(v1: V1Ingest) -> Self {
        IngestRouter { v1: Arc::new(v1) }
    }

    /// Handler for a resolved version; `Unknown` is a client error raised
    /// before any file I/O or persistence.
    pub fn resolve(&self, version: SdkVersion) -> Result<Arc<dyn VersionedIngest>, AppError> {
        match version {
            SdkVersion::V1 => Ok(self.v1.clone()),
            SdkVersion::Unknown => Err(AppError::BadRequest("Unknown version!".to_string())),
        }
    }

    /// The V1 handler, for legacy routes that predate version negotiation.
    pub fn v1(&self) -> Arc<dyn VersionedIngest> {
        self.v1.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn major_version_one_resolves_to_v1() {
        assert_eq!(SdkVersion::parse("1"), SdkVersion::V1);
        assert_eq!(SdkVersion::parse("1.0"), SdkVersion::V1);
        assert_eq!(SdkVersion::parse(" 1.2.3 "), SdkVersion::V1);
    }

    #[test]
    fn everything_else_is_unknown() {
        assert_eq!(SdkVersion::parse("2.0"), SdkVersion::Unknown);
        assert_eq!(SdkVersion::parse("v1"), SdkVersion::Unknown);
        assert_eq!(SdkVersion::parse(""), SdkVersion::Unknown);
        assert_eq!(SdkVersion::parse("latest"), SdkVersion::Unknown);
    }
}
