use axum::{
    extract::{Query, State},
    response::Json,
};
use serde::Deserialize;
use serde_json::json;
use tracing::error;

use super::AppState;
use crate::ingestor::{ActiveSetRefresher, FeedDiscovery, UpsertEngine};

#[derive(Debug, Deserialize)]
pub struct SyncAllParams {
    pub youtube_channel: Option<String>,
}

fn upsert_engine(state: &AppState) -> UpsertEngine {
    UpsertEngine::new(
        state.store.clone(),
        state.video_api.clone(),
        state.featured_office_ids.iter().cloned(),
    )
}

/// PUT /api/v1/videos/all - discover and upsert videos from every channel feed
pub async fn sync_all_videos(
    State(state): State<AppState>,
    Query(params): Query<SyncAllParams>,
) -> Json<serde_json::Value> {
    let discovery = FeedDiscovery::new(
        state.store.clone(),
        state.feed_api.clone(),
        upsert_engine(&state),
    );

    match discovery
        .sync_from_feeds(params.youtube_channel.as_deref())
        .await
    {
        Ok(summary) => Json(json!({
            "message": "Upsert from all channels completed successfully",
            "processedOfficeCount": summary.processed_office_count,
        })),
        Err(e) => {
            error!("Error in sync_all_videos: {e}");
            Json(json!({
                "error": "An error occurred while processing the request",
            }))
        }
    }
}

/// PUT /api/v1/videos/live-upcoming - re-resolve the active set
pub async fn refresh_live_upcoming(State(state): State<AppState>) -> Json<serde_json::Value> {
    let refresher = ActiveSetRefresher::new(state.store.clone(), upsert_engine(&state));

    match refresher.refresh().await {
        Ok(summary) => Json(json!({
            "message": format!("Updated {} live and upcoming videos", summary.refreshed_count),
            "refreshedCount": summary.refreshed_count,
        })),
        Err(e) => {
            error!("Error in refresh_live_upcoming: {e}");
            Json(json!({
                "error": "An error occurred while processing the request",
            }))
        }
    }
}

pub async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "status": "healthy",
        "service": "domewatch-sync",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
