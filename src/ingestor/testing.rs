//! In-memory fakes and builders shared by the pipeline tests

use crate::database::StreamStore;
use crate::errors::{SyncError, SyncResult};
use crate::models::{
    FeedEntry, LiveStreamingDetails, Office, OfficeIdentifiers, OfficeSnapshot, Thumbnails,
    VideoIdField, VideoStream, YoutubeSnippet, YoutubeVideo,
};
use crate::sources::{FeedApi, VideoApi, VideoLookup};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};

/// In-memory stand-in for the document store
pub struct MemoryStore {
    offices: Vec<Office>,
    streams: Mutex<BTreeMap<String, VideoStream>>,
    floor: Mutex<Option<String>>,
}

impl MemoryStore {
    pub fn with_offices(offices: Vec<Office>) -> Self {
        Self {
            offices,
            streams: Mutex::new(BTreeMap::new()),
            floor: Mutex::new(None),
        }
    }

    pub fn insert_stream(&self, stream: VideoStream) {
        self.streams.lock().unwrap().insert(stream.id.clone(), stream);
    }

    pub fn stream(&self, video_id: &str) -> Option<VideoStream> {
        self.streams.lock().unwrap().get(video_id).cloned()
    }

    pub fn floor_video(&self) -> Option<String> {
        self.floor.lock().unwrap().clone()
    }
}

#[async_trait]
impl StreamStore for MemoryStore {
    async fn offices_with_channel(&self) -> SyncResult<Vec<Office>> {
        Ok(self
            .offices
            .iter()
            .filter(|office| office.identifiers.youtube_channel.is_some())
            .cloned()
            .collect())
    }

    async fn office_by_channel(&self, channel_id: &str) -> SyncResult<Option<Office>> {
        Ok(self
            .offices
            .iter()
            .find(|office| office.identifiers.youtube_channel.as_deref() == Some(channel_id))
            .cloned())
    }

    async fn live_streams(&self) -> SyncResult<Vec<VideoStream>> {
        Ok(self
            .streams
            .lock()
            .unwrap()
            .values()
            .filter(|stream| stream.live_broadcast == "live")
            .cloned()
            .collect())
    }

    async fn upcoming_streams_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> SyncResult<Vec<VideoStream>> {
        Ok(self
            .streams
            .lock()
            .unwrap()
            .values()
            .filter(|stream| {
                stream.live_broadcast == "upcoming"
                    && stream
                        .scheduled_start_time
                        .is_some_and(|at| at > start && at < end)
            })
            .cloned()
            .collect())
    }

    async fn replace_stream(&self, stream: &VideoStream) -> SyncResult<()> {
        self.insert_stream(stream.clone());
        Ok(())
    }

    async fn delete_stream(&self, video_id: &str) -> SyncResult<()> {
        self.streams.lock().unwrap().remove(video_id);
        Ok(())
    }

    async fn set_floor_video(&self, video_id: &str) -> SyncResult<()> {
        *self.floor.lock().unwrap() = Some(video_id.to_string());
        Ok(())
    }
}

/// Scripted response for one video id
#[derive(Clone)]
pub enum FakeLookup {
    Found(YoutubeVideo),
    NotFound,
    NotLivestream,
    QuotaExceeded,
    Failure,
}

/// Scripted video metadata API recording the ids it was asked for
pub struct FakeVideoApi {
    lookups: HashMap<String, FakeLookup>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl FakeVideoApi {
    pub fn scripted<const N: usize>(lookups: [(&str, FakeLookup); N]) -> Self {
        Self {
            lookups: lookups
                .into_iter()
                .map(|(id, lookup)| (id.to_string(), lookup))
                .collect(),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Handle to the recorded call order, usable after the API is moved into
    /// an engine
    pub fn calls(&self) -> Arc<Mutex<Vec<String>>> {
        self.calls.clone()
    }
}

#[async_trait]
impl VideoApi for FakeVideoApi {
    async fn fetch_video(&self, video_id: &str) -> SyncResult<VideoLookup> {
        self.calls.lock().unwrap().push(video_id.to_string());
        match self.lookups.get(video_id) {
            Some(FakeLookup::Found(video)) => Ok(VideoLookup::Found(Box::new(video.clone()))),
            Some(FakeLookup::NotFound) => Ok(VideoLookup::NotFound),
            Some(FakeLookup::NotLivestream) => Ok(VideoLookup::NotLivestream),
            Some(FakeLookup::QuotaExceeded) => Err(SyncError::QuotaExceeded),
            Some(FakeLookup::Failure) => Err(SyncError::api(500, "scripted failure")),
            None => Err(SyncError::api(500, format!("unscripted video id {video_id}"))),
        }
    }
}

/// Scripted feed API; channels without a scripted feed fail to fetch
pub struct FakeFeedApi {
    feeds: HashMap<String, Vec<FeedEntry>>,
}

impl FakeFeedApi {
    pub fn with_feed(channel_id: &str, entries: Vec<FeedEntry>) -> Self {
        let mut api = Self {
            feeds: HashMap::new(),
        };
        api.add_feed(channel_id, entries);
        api
    }

    pub fn add_feed(&mut self, channel_id: &str, entries: Vec<FeedEntry>) {
        self.feeds.insert(channel_id.to_string(), entries);
    }
}

#[async_trait]
impl FeedApi for FakeFeedApi {
    async fn channel_entries(&self, channel_id: &str) -> SyncResult<Vec<FeedEntry>> {
        self.feeds
            .get(channel_id)
            .cloned()
            .ok_or_else(|| SyncError::feed(channel_id, "no scripted feed"))
    }
}

pub fn office_with_channel(id: &str, channel_id: &str) -> Office {
    Office {
        id: id.to_string(),
        title: format!("Office {id}"),
        party: Some("X".to_string()),
        thumbnail_url: None,
        identifiers: OfficeIdentifiers {
            youtube_channel: Some(channel_id.to_string()),
        },
    }
}

pub fn raw_video(
    id: &str,
    channel_id: &str,
    status: &str,
    details: Option<LiveStreamingDetails>,
) -> YoutubeVideo {
    YoutubeVideo {
        id: VideoIdField::Plain(id.to_string()),
        etag: format!("etag-{id}"),
        snippet: YoutubeSnippet {
            published_at: "2024-01-01T00:00:00Z".parse().unwrap(),
            channel_id: channel_id.to_string(),
            title: format!("Video {id}"),
            description: String::new(),
            thumbnails: Thumbnails::default(),
            channel_title: format!("Channel {channel_id}"),
            live_broadcast_content: status.to_string(),
        },
        live_streaming_details: details,
    }
}

pub fn sample_stream(id: &str, status: &str, office_id: &str) -> VideoStream {
    VideoStream {
        id: id.to_string(),
        video_id: id.to_string(),
        etag: format!("etag-{id}"),
        channel_id: "UCxyz".to_string(),
        channel_title: "Channel".to_string(),
        channel_party: "X".to_string(),
        title: format!("Video {id}"),
        description: String::new(),
        thumbnails: Thumbnails::default(),
        live_broadcast: status.to_string(),
        concurrent_viewers: 0,
        office_id: office_id.to_string(),
        office: OfficeSnapshot {
            id: office_id.to_string(),
            title: format!("Office {office_id}"),
            thumbnail_url: String::new(),
        },
        published_at: "2024-01-01T00:00:00Z".parse().unwrap(),
        scheduled_start_time: None,
        actual_start_time: None,
        scheduled_end_time: None,
        actual_end_time: None,
    }
}

pub fn entry(video_id: &str, updated: DateTime<Utc>) -> FeedEntry {
    FeedEntry {
        video_id: Some(video_id.to_string()),
        updated: Some(updated),
    }
}
