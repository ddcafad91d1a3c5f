//! Legacy routes from before version negotiation. Kept for wire
//! compatibility: no sdkVersion parameter, requests go straight to the V1
//! handler. The system-info variant is a stub that stores nothing.

use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    Json,
};

use crate::error::{ErrorResponse, HttpAppError};
use crate::extract::UploadForm;
use crate::state::AppState;
use crate::validation::parse_platform;

use super::crash_upload::crash_request_from_form;
use super::log_upload::log_request_from_form;
use super::UploadResponse;

#[utoipa::path(
    post,
    path = "/log/uploadLogFile",
    tag = "legacy",
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Log file accepted and queued for parsing", body = UploadResponse),
        (status = 400, description = "Bad platform or malformed field", body = ErrorResponse),
        (status = 417, description = "Staging or checksum verification failed", body = ErrorResponse),
        (status = 503, description = "Parse queue saturated", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, multipart), fields(operation = "legacy_upload_log_file"))]
pub async fn upload_log_file(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Json<UploadResponse>, HttpAppError> {
    let form = UploadForm::collect(multipart, "logFile").await?;

    let platform = parse_platform(form.required("platform")?)?;
    let request = log_request_from_form(platform, form)?;
    Ok(Json(state.ingest.v1().upload_log_file(request).await?))
}

#[utoipa::path(
    post,
    path = "/log/uploadSystemInfo",
    tag = "legacy",
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Accepted and ignored (compatibility stub)")
    )
)]
#[tracing::instrument(skip(_multipart), fields(operation = "legacy_upload_system_info"))]
pub async fn upload_system_info(_multipart: Multipart) -> Json<serde_json::Value> {
    // Preserved wire behavior: the old endpoint acknowledged the upload and
    // did nothing with it.
    Json(serde_json::json!({}))
}

#[utoipa::path(
    post,
    path = "/log/uploadCrashReport",
    tag = "legacy",
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Crash report stored", body = UploadResponse),
        (status = 400, description = "Bad platform or malformed field", body = ErrorResponse),
        (status = 417, description = "Staging or checksum verification failed", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, multipart), fields(operation = "legacy_upload_crash_report"))]
pub async fn upload_crash_report(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Json<UploadResponse>, HttpAppError> {
    let form = UploadForm::collect(multipart, "reportFile").await?;

    let platform = parse_platform(form.required("platform")?)?;
    let request = crash_request_from_form(platform, form)?;
    Ok(Json(state.ingest.v1().upload_crash_report(request).await?))
}
