//! Feed discovery: poll each office's channel feed and upsert recent entries
//!
//! Offices are processed independently; a failure in one must not abort the
//! others. The one exception is quota exhaustion, which aborts the remaining
//! batch because further calls would fail identically.

use crate::database::StreamStore;
use crate::errors::SyncResult;
use crate::ingestor::upsert::UpsertEngine;
use crate::models::{DiscoverySummary, Office};
use crate::sources::FeedApi;
use crate::utils::time::discovery_cutoff;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{error, info, warn};

pub struct FeedDiscovery {
    store: Arc<dyn StreamStore>,
    feed_api: Arc<dyn FeedApi>,
    upsert: UpsertEngine,
}

impl FeedDiscovery {
    pub fn new(
        store: Arc<dyn StreamStore>,
        feed_api: Arc<dyn FeedApi>,
        upsert: UpsertEngine,
    ) -> Self {
        Self {
            store,
            feed_api,
            upsert,
        }
    }

    /// Discover and upsert videos from every office's channel feed, optionally
    /// narrowed to one channel id
    pub async fn sync_from_feeds(
        &self,
        channel_filter: Option<&str>,
    ) -> SyncResult<DiscoverySummary> {
        let mut offices = self.store.offices_with_channel().await?;
        if let Some(channel_id) = channel_filter {
            offices.retain(|office| {
                office.identifiers.youtube_channel.as_deref() == Some(channel_id)
            });
        }

        info!("Upserting videos from {} channels", offices.len());

        let now = Utc::now();
        for office in &offices {
            match self.sync_office(office, now).await {
                Ok(()) => info!("Finished upserting videos from {}", office.title),
                Err(e) if e.is_fatal_for_batch() => return Err(e),
                Err(e) => error!("Failed to sync channel for {}: {}", office.title, e),
            }
        }

        Ok(DiscoverySummary {
            processed_office_count: offices.len(),
        })
    }

    async fn sync_office(&self, office: &Office, now: DateTime<Utc>) -> SyncResult<()> {
        let Some(channel_id) = office.identifiers.youtube_channel.as_deref() else {
            // offices_with_channel should never hand us one of these
            return Ok(());
        };

        let entries = self.feed_api.channel_entries(channel_id).await?;
        if entries.is_empty() {
            warn!("No videos found for {}", office.title);
            return Ok(());
        }

        let cutoff = discovery_cutoff(now);
        let recent: Vec<_> = entries
            .into_iter()
            .filter(|entry| entry.updated.is_some_and(|updated| updated >= cutoff))
            .collect();
        if recent.is_empty() {
            warn!("No new videos found for {}", office.title);
            return Ok(());
        }

        for entry in recent {
            let Some(video_id) = entry.video_id else {
                warn!("No videoId found for {}", office.title);
                continue;
            };
            match self.upsert.upsert_from_video_id(&video_id).await {
                Ok(_) => {}
                Err(e) if e.is_fatal_for_batch() => return Err(e),
                Err(e) => error!("Trouble upserting Youtube video {video_id}: {e}"),
            }
        }

        Ok(())
    }
}
