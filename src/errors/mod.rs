//! Error handling for the sync pipeline

pub mod types;

pub use types::{SyncError, SyncResult};
