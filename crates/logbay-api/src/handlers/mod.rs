//! HTTP handlers for the ingestion endpoints.

pub mod attachment_upload;
pub mod crash_upload;
pub mod legacy;
pub mod log_upload;
pub mod system_info;

use serde::Serialize;
use utoipa::ToSchema;

/// Response body shared by the file-upload endpoints.
#[derive(Debug, Serialize, ToSchema)]
pub struct UploadResponse {
    /// 0 on success.
    pub result: i32,
    pub description: String,
}

impl UploadResponse {
    pub fn ok() -> Self {
        UploadResponse {
            result: 0,
            description: String::new(),
        }
    }
}

/// Response body for the system-info endpoint.
#[derive(Debug, Serialize, ToSchema)]
pub struct InfoResponse {
    /// "ok" on success.
    pub result: String,
    /// Whether the client should start uploading log files. A
    /// recommendation, not an enforcement mechanism.
    pub upload: bool,
    pub description: String,
}

impl InfoResponse {
    pub fn new(upload: bool) -> Self {
        InfoResponse {
            result: "ok".to_string(),
            upload,
            description: String::new(),
        }
    }
}
