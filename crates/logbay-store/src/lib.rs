//! Store interfaces for the ingestion core's external collaborators.
//!
//! The core never talks to a concrete persistence engine: user-info upserts,
//! threshold reads, and decrypt-error records all go through the traits in
//! [`traits`]. The [`memory`] backends are the reference implementations the
//! server and tests run against; a real deployment plugs its own
//! repositories into the same seams.

pub mod memory;
pub mod traits;

pub use memory::{MemoryConfigStore, MemoryDecryptErrorSink, MemoryUserInfoStore};
pub use traits::{ConfigStore, DecryptErrorSink, StoreError, StoreResult, UserInfoStore};
