//! Web layer
//!
//! The invocation surface for the pipeline: one operation triggers feed
//! discovery (optionally narrowed to a channel), the other triggers the
//! active-set refresher. Both return a summary object and never raise past
//! their own boundary; any escaping error is reported as a structured error
//! payload rather than a failed response.

use anyhow::Result;
use axum::{
    routing::{get, put},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::{
    config::Config,
    database::{Database, StreamStore},
    sources::{FeedApi, VideoApi, YoutubeFeedApi, YoutubeVideoApi},
};

pub mod api;

/// Shared handler state; trait objects so tests build the router over fakes
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn StreamStore>,
    pub video_api: Arc<dyn VideoApi>,
    pub feed_api: Arc<dyn FeedApi>,
    pub featured_office_ids: Vec<String>,
}

pub struct WebServer {
    app: Router,
    addr: SocketAddr,
}

impl WebServer {
    pub fn new(config: &Config, database: Database) -> Result<Self> {
        let state = AppState {
            store: Arc::new(database),
            video_api: Arc::new(YoutubeVideoApi::new(&config.youtube)),
            feed_api: Arc::new(YoutubeFeedApi::new(&config.youtube.feed_base_url)),
            featured_office_ids: config.featured.office_ids.clone(),
        };

        let app = Self::create_router(state);
        let addr: SocketAddr = format!("{}:{}", config.web.host, config.web.port).parse()?;

        Ok(Self { app, addr })
    }

    /// Create the router with all routes and middleware
    pub fn create_router(state: AppState) -> Router {
        Router::new()
            .route("/health", get(api::health_check))
            .nest("/api/v1", Self::api_v1_routes())
            .layer(CorsLayer::permissive())
            .with_state(state)
    }

    fn api_v1_routes() -> Router<AppState> {
        Router::new()
            .route("/videos/all", put(api::sync_all_videos))
            .route("/videos/live-upcoming", put(api::refresh_live_upcoming))
    }

    pub async fn serve(self) -> Result<()> {
        let listener = tokio::net::TcpListener::bind(self.addr).await?;
        info!("Listening on {}", self.addr);
        axum::serve(listener, self.app).await?;
        Ok(())
    }
}
