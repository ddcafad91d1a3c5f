//! V1 protocol handler: the staging → verify → act pipeline behind every
//! upload operation.

use std::path::Path;

use async_trait::async_trait;

use logbay_core::models::{LogFileProperties, UserInfo};
use logbay_core::AppError;
use logbay_storage::{checksum, stage, StorageLayout};
use logbay_worker::{ParseJob, ParseJobQueue};

use crate::handlers::{InfoResponse, UploadResponse};
use crate::state::StoreState;

use super::{AttachmentUploadRequest, CrashUploadRequest, LogUploadRequest, VersionedIngest};

pub struct V1Ingest {
    layout: StorageLayout,
    stores: StoreState,
    parse_queue: ParseJobQueue,
}

impl V1Ingest {
    pub fn new(layout: StorageLayout, stores: StoreState, parse_queue: ParseJobQueue) -> Self {
        V1Ingest {
            layout,
            stores,
            parse_queue,
        }
    }
}

/// A landed artifact either matches its declared sum or the request dies.
/// Read failures and mismatches are the same outcome for the caller.
async fn ensure_checksum(path: &Path, declared_sum: &str) -> Result<(), AppError> {
    match checksum::verify(path, declared_sum).await {
        Ok(true) => Ok(()),
        Ok(false) => Err(AppError::ChecksumMismatch(format!(
            "{} does not match declared sum",
            path.display()
        ))),
        Err(e) => Err(AppError::ChecksumMismatch(e.to_string())),
    }
}

#[async_trait]
impl VersionedIngest for V1Ingest {
    #[tracing::instrument(
        skip(self, request),
        fields(platform = %request.platform, uid = %request.uid, app_id = %request.app_id)
    )]
    async fn upload_log_file(&self, request: LogUploadRequest) -> Result<UploadResponse, AppError> {
        let staged = self.layout.stage_log_file().await?;
        stage::land(&staged.path, &request.file.bytes).await?;
        ensure_checksum(&staged.path, &request.file_sum).await?;

        let properties = LogFileProperties {
            platform: request.platform,
            uid: request.uid,
            app_id: request.app_id,
            level: request.level,
            logger_name: request.logger_name,
            alias: request.alias,
            layouts: request.layouts,
            filename: staged.filename,
            original_filename: request.file.original_filename,
            work_path: self.layout.temp_dir().to_path_buf(),
        };

        self.parse_queue
            .submit(ParseJob { properties })
            .map_err(|e| AppError::SchedulingFull(e.to_string()))?;

        Ok(UploadResponse::ok())
    }

    #[tracing::instrument(
        skip(self, info),
        fields(platform = %info.platform, uid = %info.uid, app_id = %info.app_id)
    )]
    async fn upload_system_info(&self, info: UserInfo) -> Result<InfoResponse, AppError> {
        let existing = self
            .stores
            .user_info
            .find_by_uid_and_app_id(info.platform, &info.uid, &info.app_id)
            .await?;

        match existing {
            Some(stored) => {
                if !stored.same_attributes(&info) {
                    let mut updated = info.clone();
                    updated.id = stored.id;
                    self.stores.user_info.save(updated).await?;
                    tracing::debug!("System info snapshot changed, record overwritten");
                }
            }
            None => {
                self.stores.user_info.save(info.clone()).await?;
                tracing::debug!("System info snapshot stored");
            }
        }

        let config = self.stores.config.read().await?;
        Ok(InfoResponse::new(config.should_upload(info.level)))
    }

    #[tracing::instrument(
        skip(self, request),
        fields(platform = %request.platform, uid = %request.uid, app_id = %request.app_id)
    )]
    async fn upload_crash_report(
        &self,
        request: CrashUploadRequest,
    ) -> Result<UploadResponse, AppError> {
        let path = self
            .layout
            .crash_report_path(
                request.platform,
                &request.app_id,
                &request.uid,
                &request.file.original_filename,
            )
            .await?;
        stage::land(&path, &request.file.bytes).await?;
        ensure_checksum(&path, &request.file_sum).await?;

        Ok(UploadResponse::ok())
    }

    #[tracing::instrument(
        skip(self, request),
        fields(
            platform = %request.platform,
            uid = %request.uid,
            app_id = %request.app_id,
            attachment_id = %request.attachment_id
        )
    )]
    async fn upload_attachment(
        &self,
        request: AttachmentUploadRequest,
    ) -> Result<UploadResponse, AppError> {
        let name = StorageLayout::attachment_name(
            request.platform,
            &request.uid,
            &request.app_id,
            &request.attachment_id,
        );

        match name {
            Some(name) => {
                let path = self.layout.attachment_path(&name).await?;
                stage::land(&path, &request.file.bytes).await?;
                ensure_checksum(&path, &request.file_sum).await?;
            }
            None => {
                // Wire compatibility: a name that fails to derive is an
                // acknowledged no-op, not an error.
                tracing::warn!("Attachment name derivation failed; skipping upload");
            }
        }

        Ok(UploadResponse::ok())
    }
}
