//! OpenAPI document aggregation.

use utoipa::OpenApi;

use crate::error::ErrorResponse;
use crate::handlers::{InfoResponse, UploadResponse};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::log_upload::upload_log_file,
        crate::handlers::system_info::upload_system_info,
        crate::handlers::crash_upload::upload_crash_report,
        crate::handlers::attachment_upload::upload_attachment,
        crate::handlers::legacy::upload_log_file,
        crate::handlers::legacy::upload_system_info,
        crate::handlers::legacy::upload_crash_report,
    ),
    components(schemas(UploadResponse, InfoResponse, ErrorResponse)),
    tags(
        (name = "ingestion", description = "Versioned diagnostics ingestion endpoints"),
        (name = "legacy", description = "Pre-versioning endpoints kept for wire compatibility")
    ),
    info(
        title = "Logbay Ingestion API",
        description = "Ingestion front door for client-emitted diagnostics: log files, crash reports, attachments, and system-info snapshots."
    )
)]
pub struct ApiDoc;
