//! Active-set refresher: keep live and upcoming-today records current
//!
//! Re-resolves every record flagged live plus every upcoming record scheduled
//! inside today's day window, without rediscovering from feeds. Per-item
//! failures are logged and skipped; quota exhaustion aborts the rest.

use crate::database::StreamStore;
use crate::errors::SyncResult;
use crate::ingestor::upsert::UpsertEngine;
use crate::models::RefreshSummary;
use crate::utils::time::day_bounds;
use chrono::Utc;
use std::sync::Arc;
use tracing::{error, info};

pub struct ActiveSetRefresher {
    store: Arc<dyn StreamStore>,
    upsert: UpsertEngine,
}

impl ActiveSetRefresher {
    pub fn new(store: Arc<dyn StreamStore>, upsert: UpsertEngine) -> Self {
        Self { store, upsert }
    }

    /// Refresh the active set; the returned count is the number of records
    /// considered, not necessarily successfully updated
    pub async fn refresh(&self) -> SyncResult<RefreshSummary> {
        let (start_of_day, end_of_day) = day_bounds(Utc::now());

        let live = self.store.live_streams().await?;
        let upcoming = self
            .store
            .upcoming_streams_between(start_of_day, end_of_day)
            .await?;

        let items: Vec<_> = live.into_iter().chain(upcoming).collect();

        for item in &items {
            match self.upsert.upsert_from_video_id(&item.id).await {
                Ok(_) => {}
                Err(e) if e.is_fatal_for_batch() => return Err(e),
                Err(e) => error!("Failed to refresh video stream {}: {}", item.id, e),
            }
        }

        info!("Finished polling {} live and upcoming videos", items.len());

        Ok(RefreshSummary {
            refreshed_count: items.len(),
        })
    }
}
