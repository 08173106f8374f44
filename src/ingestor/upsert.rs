//! Upsert engine: resolve -> map -> persist for a single video id
//!
//! Each call classifies into an explicit `UpsertOutcome`, so batch loops can
//! distinguish writes, deletions and soft skips on the type level. Fatal
//! conditions (quota, upstream/store failures) propagate as errors instead.

use crate::database::StreamStore;
use crate::errors::SyncResult;
use crate::ingestor::mapper::StreamMapper;
use crate::models::VideoStream;
use crate::sources::{VideoApi, VideoLookup};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info};

/// What a single upsert call did
#[derive(Debug)]
pub enum UpsertOutcome {
    /// The record was written wholesale
    Replaced(Box<VideoStream>),
    /// Upstream no longer returns the video; any existing record was deleted
    Deleted,
    /// Nothing was persisted
    Skipped(SkipReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The video exists upstream but never was a livestream
    NotLivestream,
    /// No office claims the video's channel
    OfficeUnresolved,
}

#[derive(Clone)]
pub struct UpsertEngine {
    store: Arc<dyn StreamStore>,
    video_api: Arc<dyn VideoApi>,
    mapper: StreamMapper,
    featured_office_ids: HashSet<String>,
}

impl UpsertEngine {
    pub fn new<I>(
        store: Arc<dyn StreamStore>,
        video_api: Arc<dyn VideoApi>,
        featured_office_ids: I,
    ) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        Self {
            mapper: StreamMapper::new(store.clone()),
            store,
            video_api,
            featured_office_ids: featured_office_ids.into_iter().collect(),
        }
    }

    pub async fn upsert_from_video_id(&self, video_id: &str) -> SyncResult<UpsertOutcome> {
        let video = match self.video_api.fetch_video(video_id).await? {
            VideoLookup::NotFound => {
                self.store.delete_stream(video_id).await?;
                debug!("Deleted video stream {video_id}: no longer returned upstream");
                return Ok(UpsertOutcome::Deleted);
            }
            VideoLookup::NotLivestream => {
                return Ok(UpsertOutcome::Skipped(SkipReason::NotLivestream));
            }
            VideoLookup::Found(video) => video,
        };

        let Some(stream) = self.mapper.map(&video, None).await? else {
            // office miss already logged by the mapper
            return Ok(UpsertOutcome::Skipped(SkipReason::OfficeUnresolved));
        };

        self.store.replace_stream(&stream).await?;

        if stream.live_broadcast == "live" && self.featured_office_ids.contains(&stream.office_id)
        {
            self.store.set_floor_video(&stream.id).await?;
            info!("Updated Dome Watch default video to \"{}\"", stream.id);
        }

        Ok(UpsertOutcome::Replaced(Box::new(stream)))
    }
}
