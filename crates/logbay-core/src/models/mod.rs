//! Data models for the application
//!
//! Domain types shared between the HTTP surface, the storage primitives,
//! and the background parse pipeline.

mod config_entry;
mod decrypt_error;
mod log_file;
mod platform;
mod user_info;

// Re-export all models for convenient imports
pub use config_entry::*;
pub use decrypt_error::*;
pub use log_file::*;
pub use platform::*;
pub use user_info::*;
