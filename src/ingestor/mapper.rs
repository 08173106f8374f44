//! Domain mapper: raw API payload + owning office -> canonical record

use crate::database::StreamStore;
use crate::errors::SyncResult;
use crate::models::{Office, OfficeSnapshot, VideoStream, YoutubeVideo};
use std::sync::Arc;
use tracing::error;

#[derive(Clone)]
pub struct StreamMapper {
    store: Arc<dyn StreamStore>,
}

impl StreamMapper {
    pub fn new(store: Arc<dyn StreamStore>) -> Self {
        Self { store }
    }

    /// Map a raw video into a full `VideoStream`, resolving the owning office
    /// through the store when none is supplied.
    ///
    /// `Ok(None)` means no office claims the video's channel: the caller must
    /// log and skip without persisting anything. That soft skip is distinct
    /// from upstream/store errors, which propagate.
    pub async fn map(
        &self,
        video: &YoutubeVideo,
        office: Option<Office>,
    ) -> SyncResult<Option<VideoStream>> {
        let office = match office {
            Some(office) => office,
            None => match self.store.office_by_channel(&video.snippet.channel_id).await? {
                Some(office) => office,
                None => {
                    error!(
                        "Office not found for Youtube channel {}",
                        video.snippet.channel_id
                    );
                    return Ok(None);
                }
            },
        };

        Ok(Some(build_stream(video, &office)))
    }
}

/// Construct the canonical record from a raw video and its resolved office
pub fn build_stream(video: &YoutubeVideo, office: &Office) -> VideoStream {
    let details = video.live_streaming_details.as_ref();
    let id = video.id.as_str().to_string();

    // publishedAt is resolved by layered overwrite: starting from the
    // upstream publish timestamp, each of these fields overwrites it in turn
    // when present, so the last applicable one wins. The order (actual start
    // before scheduled start before actual end) is a contract; keep it as an
    // ordered list, not a conditional chain.
    let mut published_at = video.snippet.published_at;
    let overwrites = [
        details.and_then(|d| d.actual_start_time),
        details.and_then(|d| d.scheduled_start_time),
        details.and_then(|d| d.actual_end_time),
    ];
    for timestamp in overwrites.into_iter().flatten() {
        published_at = timestamp;
    }

    VideoStream {
        video_id: id.clone(),
        id,
        etag: video.etag.clone(),
        channel_id: video.snippet.channel_id.clone(),
        channel_title: video.snippet.channel_title.clone(),
        channel_party: office.party.clone().unwrap_or_default(),
        title: video.snippet.title.clone(),
        description: video.snippet.description.clone(),
        thumbnails: video.snippet.thumbnails.clone(),
        live_broadcast: video.snippet.live_broadcast_content.clone(),
        concurrent_viewers: details.and_then(|d| d.concurrent_viewers).unwrap_or(0),
        office_id: office.id.clone(),
        office: OfficeSnapshot {
            id: office.id.clone(),
            title: office.title.clone(),
            thumbnail_url: office.thumbnail_url.clone().unwrap_or_default(),
        },
        published_at,
        scheduled_start_time: details.and_then(|d| d.scheduled_start_time),
        actual_start_time: details.and_then(|d| d.actual_start_time),
        scheduled_end_time: details.and_then(|d| d.scheduled_end_time),
        actual_end_time: details.and_then(|d| d.actual_end_time),
    }
}
