//! Log file upload: stage under an opaque temp name, verify, hand off to
//! the parse pool, respond without waiting.

use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    Json,
};
use logbay_core::models::Platform;
use logbay_core::AppError;

use crate::error::{ErrorResponse, HttpAppError};
use crate::extract::UploadForm;
use crate::ingest::{LogUploadRequest, SdkVersion};
use crate::state::AppState;
use crate::validation::{parse_level, parse_platform};

use super::UploadResponse;

/// Build the pipeline request from the collected form. Field validation
/// happens here, before any staging.
pub(crate) fn log_request_from_form(
    platform: Platform,
    form: UploadForm,
) -> Result<LogUploadRequest, AppError> {
    let level = parse_level(form.required("level")?)?;
    let uid = form.required("uid")?.to_string();
    let app_id = form.required("appId")?.to_string();
    let logger_name = form.required("loggerName")?.to_string();
    let layouts = form.required("layouts")?.to_string();
    let alias = form.required("alias")?.to_string();
    let file_sum = form.required("fileSum")?.to_string();
    let file = form.into_file()?;

    Ok(LogUploadRequest {
        platform,
        uid,
        app_id,
        logger_name,
        layouts,
        level,
        alias,
        file_sum,
        file,
    })
}

#[utoipa::path(
    post,
    path = "/log/file/upload",
    tag = "ingestion",
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Log file accepted and queued for parsing", body = UploadResponse),
        (status = 400, description = "Bad platform, unknown version, or malformed field", body = ErrorResponse),
        (status = 417, description = "Staging or checksum verification failed", body = ErrorResponse),
        (status = 503, description = "Parse queue saturated", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, multipart), fields(operation = "upload_log_file"))]
pub async fn upload_log_file(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Json<UploadResponse>, HttpAppError> {
    let form = UploadForm::collect(multipart, "logFile").await?;

    // Fail-fast ordering: platform, then version, then fields. Nothing is
    // written anywhere until all three pass.
    let platform = parse_platform(form.required("platform")?)?;
    let version = SdkVersion::parse(form.required("sdkVersion")?);
    let handler = state.ingest.resolve(version)?;

    let request = log_request_from_form(platform, form)?;
    Ok(Json(handler.upload_log_file(request).await?))
}
