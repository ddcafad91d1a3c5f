//! Attachment upload: deterministic name per (platform, uid, appId,
//! attachmentId); re-uploading the same id replaces the prior artifact.

use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    Json,
};

use crate::error::{ErrorResponse, HttpAppError};
use crate::extract::UploadForm;
use crate::ingest::{AttachmentUploadRequest, SdkVersion};
use crate::state::AppState;
use crate::validation::parse_platform;

use super::UploadResponse;

#[utoipa::path(
    post,
    path = "/log/attachment/upload",
    tag = "ingestion",
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Attachment stored (or acknowledged when the name does not derive)", body = UploadResponse),
        (status = 400, description = "Bad platform, unknown version, or malformed field", body = ErrorResponse),
        (status = 417, description = "Staging or checksum verification failed", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, multipart), fields(operation = "upload_attachment"))]
pub async fn upload_attachment(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Json<UploadResponse>, HttpAppError> {
    let form = UploadForm::collect(multipart, "attachmentFile").await?;

    let platform = parse_platform(form.required("platform")?)?;
    let version = SdkVersion::parse(form.required("sdkVersion")?);
    let handler = state.ingest.resolve(version)?;

    let uid = form.required("uid")?.to_string();
    let app_id = form.required("appId")?.to_string();
    let file_sum = form.required("fileSum")?.to_string();
    let attachment_id = form.required("attachmentId")?.to_string();
    let file = form.into_file()?;

    let request = AttachmentUploadRequest {
        platform,
        uid,
        app_id,
        file_sum,
        attachment_id,
        file,
    };
    Ok(Json(handler.upload_attachment(request).await?))
}
