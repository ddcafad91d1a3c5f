//! Multipart form extraction for upload handlers.
//!
//! The upload wire format carries identity and metadata as text fields next
//! to exactly one named file part. Everything is collected up front so the
//! endpoint can run its validation sequence before any filesystem work.

use std::collections::HashMap;

use axum::extract::Multipart;
use logbay_core::AppError;

/// One uploaded file part.
#[derive(Debug, Clone)]
pub struct FilePart {
    /// Client-supplied name; metadata only, never trusted as a path.
    pub original_filename: String,
    pub bytes: Vec<u8>,
}

/// Collected multipart body: text fields plus the expected file part.
#[derive(Debug)]
pub struct UploadForm {
    fields: HashMap<String, String>,
    file: Option<FilePart>,
    file_field: &'static str,
}

impl UploadForm {
    /// Read all parts of `multipart`, treating `file_field` as the single
    /// allowed file part and every other part as a text field. A repeated
    /// file part is rejected.
    pub async fn collect(
        mut multipart: Multipart,
        file_field: &'static str,
    ) -> Result<Self, AppError> {
        let mut fields = HashMap::new();
        let mut file: Option<FilePart> = None;

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::InvalidInput(format!("Failed to read multipart: {}", e)))?
        {
            let name = field.name().map(|s| s.to_string()).unwrap_or_default();

            if name == file_field {
                if file.is_some() {
                    return Err(AppError::InvalidInput(format!(
                        "Multiple '{}' parts are not allowed; send exactly one",
                        file_field
                    )));
                }
                let original_filename = field
                    .file_name()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "unknown".to_string());
                let bytes = field.bytes().await.map_err(|e| {
                    AppError::InvalidInput(format!("Failed to read file data: {}", e))
                })?;
                file = Some(FilePart {
                    original_filename,
                    bytes: bytes.to_vec(),
                });
            } else {
                let value = field.text().await.map_err(|e| {
                    AppError::InvalidInput(format!("Failed to read field '{}': {}", name, e))
                })?;
                fields.insert(name, value);
            }
        }

        Ok(UploadForm {
            fields,
            file,
            file_field,
        })
    }

    /// A required text field. Presence is what's required; empty values are
    /// passed through and judged by the consumer (an empty fileSum simply
    /// never matches, an empty platform never parses).
    pub fn required(&self, name: &str) -> Result<&str, AppError> {
        self.fields
            .get(name)
            .map(String::as_str)
            .ok_or_else(|| AppError::InvalidInput(format!("Missing field: {}", name)))
    }

    /// An optional text field; empty values collapse to `None`.
    pub fn optional(&self, name: &str) -> Option<&str> {
        self.fields
            .get(name)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    /// The file part this form was collected for.
    pub fn file(&self) -> Result<&FilePart, AppError> {
        self.file
            .as_ref()
            .ok_or_else(|| AppError::InvalidInput(format!("Missing field: {}", self.file_field)))
    }

    /// Consume the form, yielding the file part.
    pub fn into_file(self) -> Result<FilePart, AppError> {
        self.file
            .ok_or_else(|| AppError::InvalidInput(format!("Missing field: {}", self.file_field)))
    }
}
