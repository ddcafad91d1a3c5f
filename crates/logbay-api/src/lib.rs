//! Logbay API Library
//!
//! This crate provides the HTTP ingestion surface, version dispatch, and
//! application setup.

// Module declarations
mod api_doc;
mod handlers;
mod validation;

// Public modules
pub mod error;
pub mod extract;
pub mod ingest;
pub mod setup;
pub mod state;
pub mod telemetry;

// Re-exports
pub use error::ErrorResponse;
pub use handlers::{InfoResponse, UploadResponse};
pub use ingest::{IngestRouter, SdkVersion};
pub use logbay_worker::{ParseJobQueue, ParseQueueConfig};
