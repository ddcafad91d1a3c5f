//! Validation utilities for API handlers
//!
//! Every upload endpoint runs the same fail-fast sequence: platform first,
//! then protocol version, then operation-specific fields. Nothing below
//! touches the filesystem or the stores.

use std::str::FromStr;

use logbay_core::models::Platform;
use logbay_core::AppError;

/// Parse and validate the client platform. Unknown platforms are rejected
/// before any side effect occurs.
pub fn parse_platform(platform: &str) -> Result<Platform, AppError> {
    Platform::from_str(platform)
        .map_err(|_| AppError::InvalidInput(format!("Invalid platform: {}", platform)))
}

/// The declared log level must be an integer.
pub fn parse_level(level: &str) -> Result<i32, AppError> {
    level
        .trim()
        .parse::<i32>()
        .map_err(|_| AppError::InvalidInput(format!("Invalid level: {}", level)))
}
