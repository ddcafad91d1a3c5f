//! System-info upload: upsert the device snapshot and tell the client
//! whether it should start uploading logs.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use logbay_core::models::UserInfo;
use logbay_core::AppError;

use crate::error::{ErrorResponse, HttpAppError};
use crate::ingest::SdkVersion;
use crate::state::AppState;
use crate::validation::{parse_level, parse_platform};

use super::InfoResponse;

/// Raw request parameters; validated field by field so the fail-fast order
/// (platform, version, fields) stays explicit.
#[derive(Debug, Deserialize, IntoParams)]
pub struct SystemInfoParams {
    platform: Option<String>,
    #[serde(rename = "sdkVersion")]
    sdk_version: Option<String>,
    uid: Option<String>,
    #[serde(rename = "appId")]
    app_id: Option<String>,
    level: Option<String>,
    alias: Option<String>,
    model: Option<String>,
    brand: Option<String>,
    #[serde(rename = "systemVersion")]
    system_version: Option<String>,
}

#[utoipa::path(
    post,
    path = "/log/info/upload",
    tag = "ingestion",
    params(SystemInfoParams),
    responses(
        (status = 200, description = "Snapshot upserted; upload flag computed", body = InfoResponse),
        (status = 400, description = "Bad platform, unknown version, or malformed field", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, params), fields(operation = "upload_system_info"))]
pub async fn upload_system_info(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SystemInfoParams>,
) -> Result<Json<InfoResponse>, HttpAppError> {
    let platform = parse_platform(params.platform.as_deref().unwrap_or(""))?;

    let sdk_version = params.sdk_version.as_deref().unwrap_or("");
    if sdk_version.is_empty() {
        return Err(AppError::BadRequest("No version specify!".to_string()).into());
    }
    let handler = state.ingest.resolve(SdkVersion::parse(sdk_version))?;

    let level = parse_level(params.level.as_deref().unwrap_or(""))?;
    let info = UserInfo {
        id: None,
        platform,
        uid: params.uid.unwrap_or_default(),
        app_id: params.app_id.unwrap_or_default(),
        level,
        alias: params.alias.filter(|s| !s.is_empty()),
        model: params.model.filter(|s| !s.is_empty()),
        brand: params.brand.filter(|s| !s.is_empty()),
        system_version: params.system_version.filter(|s| !s.is_empty()),
        sdk_version: Some(sdk_version.to_string()),
    };

    Ok(Json(handler.upload_system_info(info).await?))
}
