//! External collaborators behind trait seams
//!
//! The video metadata API and the per-channel feed API are the two upstream
//! services the pipeline depends on. Both are modeled as traits so the
//! pipeline is testable without network access.

pub mod feed;
pub mod youtube_api;

pub use feed::{FeedApi, YoutubeFeedApi};
pub use youtube_api::{VideoApi, VideoLookup, YoutubeVideoApi};
