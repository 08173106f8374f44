//! Video metadata resolver
//!
//! Issues a single metadata request per video id and classifies the response.
//! Stale and invalid ids are indistinguishable from deleted ones upstream, so
//! zero items and client-error statuses both surface as `NotFound`.

use crate::config::YoutubeConfig;
use crate::errors::{SyncError, SyncResult};
use crate::models::{VideoListResponse, YoutubeVideo};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};

/// Outcome of a metadata lookup that did not fail outright
#[derive(Debug)]
pub enum VideoLookup {
    /// The video exists and carries live-streaming details
    Found(Box<YoutubeVideo>),
    /// The video exists but never was a livestream; nothing to persist
    NotLivestream,
    /// Upstream no longer returns the video (or the id is invalid)
    NotFound,
}

#[async_trait]
pub trait VideoApi: Send + Sync {
    async fn fetch_video(&self, video_id: &str) -> SyncResult<VideoLookup>;
}

pub struct YoutubeVideoApi {
    client: Client,
    api_key: String,
    base_url: String,
}

impl YoutubeVideoApi {
    pub fn new(config: &YoutubeConfig) -> Self {
        Self {
            client: Client::new(),
            api_key: config.api_key.clone(),
            base_url: config.api_base_url.clone(),
        }
    }
}

#[async_trait]
impl VideoApi for YoutubeVideoApi {
    async fn fetch_video(&self, video_id: &str) -> SyncResult<VideoLookup> {
        let response = self
            .client
            .get(format!("{}/videos", self.base_url))
            .query(&[
                ("key", self.api_key.as_str()),
                ("part", "snippet,liveStreamingDetails"),
                ("id", video_id),
            ])
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::FORBIDDEN {
            return Err(SyncError::QuotaExceeded);
        }
        if status.is_client_error() {
            return Ok(VideoLookup::NotFound);
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(SyncError::api(status.as_u16(), message));
        }

        let listing: VideoListResponse = response.json().await?;
        let Some(video) = listing.items.into_iter().next() else {
            return Ok(VideoLookup::NotFound);
        };
        if video.live_streaming_details.is_none() {
            return Ok(VideoLookup::NotLivestream);
        }

        Ok(VideoLookup::Found(Box::new(video)))
    }
}
