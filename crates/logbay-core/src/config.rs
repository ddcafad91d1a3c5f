//! Configuration module
//!
//! Process-wide configuration for the ingestion server: HTTP settings,
//! artifact directory roots, and parse worker pool sizing. Values come from
//! environment variables with defaults suitable for local development.

use std::env;
use std::path::{Path, PathBuf};

use crate::models::Platform;

// Common constants
const SERVER_PORT: u16 = 4000;
const MAX_UPLOAD_SIZE_MB: usize = 64;
const PARSE_WORKERS: usize = 4;
const PARSE_QUEUE_SIZE: usize = 1000;

/// Application configuration for the ingestion server.
#[derive(Clone, Debug)]
pub struct Config {
    server_port: u16,
    cors_origins: Vec<String>,
    environment: String,
    temp_dir: PathBuf,
    crash_report_root: PathBuf,
    attachment_dir: PathBuf,
    max_upload_size_bytes: usize,
    parse_workers: usize,
    parse_queue_size: usize,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let cors_origins = env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .collect();

        let data_dir = env::var("LOGBAY_DATA_DIR").unwrap_or_else(|_| "./data".to_string());
        let data_dir = PathBuf::from(data_dir);

        let max_upload_size_mb = env::var("MAX_UPLOAD_SIZE_MB")
            .unwrap_or_else(|_| MAX_UPLOAD_SIZE_MB.to_string())
            .parse::<usize>()
            .unwrap_or(MAX_UPLOAD_SIZE_MB);

        Ok(Config {
            server_port: env::var("PORT")
                .unwrap_or_else(|_| SERVER_PORT.to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            cors_origins,
            environment,
            temp_dir: env::var("LOG_TEMP_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| data_dir.join("tmp")),
            crash_report_root: env::var("CRASH_REPORT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| data_dir.join("crash")),
            attachment_dir: env::var("ATTACHMENT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| data_dir.join("attachment")),
            max_upload_size_bytes: max_upload_size_mb * 1024 * 1024,
            parse_workers: env::var("PARSE_WORKERS")
                .unwrap_or_else(|_| PARSE_WORKERS.to_string())
                .parse()
                .unwrap_or(PARSE_WORKERS),
            parse_queue_size: env::var("PARSE_QUEUE_SIZE")
                .unwrap_or_else(|_| PARSE_QUEUE_SIZE.to_string())
                .parse()
                .unwrap_or(PARSE_QUEUE_SIZE)
                .max(1),
        })
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.parse_workers == 0 {
            return Err(anyhow::anyhow!("PARSE_WORKERS must be at least 1"));
        }
        if self.max_upload_size_bytes == 0 {
            return Err(anyhow::anyhow!("MAX_UPLOAD_SIZE_MB must be at least 1"));
        }
        Ok(())
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    pub fn server_port(&self) -> u16 {
        self.server_port
    }

    pub fn cors_origins(&self) -> &[String] {
        &self.cors_origins
    }

    pub fn environment(&self) -> &str {
        &self.environment
    }

    /// Staging directory for log files awaiting parse.
    pub fn temp_dir(&self) -> &Path {
        &self.temp_dir
    }

    /// Per-platform crash report directory root.
    pub fn crash_report_dir(&self, platform: Platform) -> PathBuf {
        self.crash_report_root.join(platform.as_str())
    }

    pub fn attachment_dir(&self) -> &Path {
        &self.attachment_dir
    }

    pub fn max_upload_size_bytes(&self) -> usize {
        self.max_upload_size_bytes
    }

    pub fn parse_workers(&self) -> usize {
        self.parse_workers
    }

    pub fn parse_queue_size(&self) -> usize {
        self.parse_queue_size
    }

    /// Configuration with all roots placed under the given directory.
    /// Used by tests and local tooling.
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        let data_dir = data_dir.into();
        Config {
            server_port: SERVER_PORT,
            cors_origins: vec!["*".to_string()],
            environment: "development".to_string(),
            temp_dir: data_dir.join("tmp"),
            crash_report_root: data_dir.join("crash"),
            attachment_dir: data_dir.join("attachment"),
            max_upload_size_bytes: MAX_UPLOAD_SIZE_MB * 1024 * 1024,
            parse_workers: PARSE_WORKERS,
            parse_queue_size: PARSE_QUEUE_SIZE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crash_report_dir_is_platform_scoped() {
        let config = Config::with_data_dir("/var/lib/logbay");
        assert_eq!(
            config.crash_report_dir(Platform::Android),
            PathBuf::from("/var/lib/logbay/crash/android")
        );
        assert_eq!(
            config.crash_report_dir(Platform::Ios),
            PathBuf::from("/var/lib/logbay/crash/ios")
        );
    }

    #[test]
    fn validate_accepts_defaults() {
        let config = Config::with_data_dir("./data");
        assert!(config.validate().is_ok());
    }
}
