//! Crash report upload: land directly at the deterministic per-user path
//! and verify. Same filename from the same user overwrites.

use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    Json,
};
use logbay_core::models::Platform;
use logbay_core::AppError;

use crate::error::{ErrorResponse, HttpAppError};
use crate::extract::UploadForm;
use crate::ingest::{CrashUploadRequest, SdkVersion};
use crate::state::AppState;
use crate::validation::parse_platform;

use super::UploadResponse;

pub(crate) fn crash_request_from_form(
    platform: Platform,
    form: UploadForm,
) -> Result<CrashUploadRequest, AppError> {
    let uid = form.required("uid")?.to_string();
    let app_id = form.required("appId")?.to_string();
    let file_sum = form.required("fileSum")?.to_string();
    let file = form.into_file()?;

    Ok(CrashUploadRequest {
        platform,
        uid,
        app_id,
        file_sum,
        file,
    })
}

#[utoipa::path(
    post,
    path = "/log/crash/upload",
    tag = "ingestion",
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Crash report stored", body = UploadResponse),
        (status = 400, description = "Bad platform, unknown version, or malformed field", body = ErrorResponse),
        (status = 417, description = "Staging or checksum verification failed", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, multipart), fields(operation = "upload_crash_report"))]
pub async fn upload_crash_report(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Json<UploadResponse>, HttpAppError> {
    let form = UploadForm::collect(multipart, "reportFile").await?;

    let platform = parse_platform(form.required("platform")?)?;
    let version = SdkVersion::parse(form.required("sdkVersion")?);
    let handler = state.ingest.resolve(version)?;

    let request = crash_request_from_form(platform, form)?;
    Ok(Json(handler.upload_crash_report(request).await?))
}
