//! Error type definitions for the DomeWatch sync service
//!
//! The important distinction in this taxonomy is `QuotaExceeded` versus
//! everything else: batch loops catch-log-continue on generic failures but
//! must abort the remaining iterations when the upstream quota is exhausted,
//! so that classification lives in the type rather than a string match.

use thiserror::Error;

/// Top-level error type for the synchronization pipeline
#[derive(Error, Debug)]
pub enum SyncError {
    /// The video metadata API rejected the request for quota/rate reasons
    /// (HTTP 403). Fatal for the enclosing batch.
    #[error("Youtube quota exceeded")]
    QuotaExceeded,

    /// Any other non-success response from the video metadata API, with the
    /// upstream detail preserved
    #[error("Youtube API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// A channel feed could not be fetched or parsed
    #[error("Feed error for channel {channel_id}: {message}")]
    Feed { channel_id: String, message: String },

    /// HTTP client errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Database-related errors
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Serialization failures (JSON columns, API payloads)
    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Convenience result alias used throughout the pipeline
pub type SyncResult<T> = Result<T, SyncError>;

impl SyncError {
    /// Create an API error preserving the upstream status and body
    pub fn api<M: Into<String>>(status: u16, message: M) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Create a feed error for a specific channel
    pub fn feed<C: Into<String>, M: Into<String>>(channel_id: C, message: M) -> Self {
        Self::Feed {
            channel_id: channel_id.into(),
            message: message.into(),
        }
    }

    /// Whether this error must abort the remaining items of the current batch
    pub fn is_fatal_for_batch(&self) -> bool {
        matches!(self, Self::QuotaExceeded)
    }
}
