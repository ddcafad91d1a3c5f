use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::Platform;

/// Everything the background parser needs to know about a staged log file.
///
/// Built by the log upload endpoint after the artifact has landed and its
/// checksum verified; owned exclusively by the parse job once submitted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LogFileProperties {
    pub platform: Platform,
    pub uid: String,
    #[serde(rename = "appId")]
    pub app_id: String,
    /// Integer severity threshold declared by the client.
    pub level: i32,
    #[serde(rename = "loggerName")]
    pub logger_name: String,
    pub alias: String,
    /// Message layout template used to decode log lines.
    pub layouts: String,
    /// Opaque on-disk name under `work_path`.
    pub filename: String,
    /// Client-visible name, kept as metadata only.
    #[serde(rename = "originalFilename")]
    pub original_filename: String,
    #[serde(rename = "workPath")]
    pub work_path: PathBuf,
}

impl LogFileProperties {
    /// Absolute path of the staged input file.
    pub fn work_file(&self) -> PathBuf {
        self.work_path.join(&self.filename)
    }

    /// Absolute path the merged parse output is written to.
    pub fn parsed_file(&self) -> PathBuf {
        self.work_path.join(format!("{}.parsed", self.filename))
    }
}
