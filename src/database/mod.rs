//! SQLite-backed document store
//!
//! The pipeline never touches the pool directly: every component receives a
//! `dyn StreamStore`, which `Database` implements. Tests substitute an
//! in-memory fake behind the same trait.

use crate::config::DatabaseConfig;
use crate::errors::SyncResult;
use crate::models::{Office, VideoStream};
use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{migrate::MigrateDatabase, Pool, Sqlite};

pub mod offices;
pub mod variables;
pub mod video_streams;

/// Name of the singleton variable holding the featured video pointer
pub const FLOOR_VARIABLE: &str = "floor";

/// Store access surface consumed by the sync pipeline
///
/// Offices are read-only to the pipeline; video streams are replaced or
/// deleted wholesale; the floor variable only ever has its `video_id`
/// overwritten.
#[async_trait]
pub trait StreamStore: Send + Sync {
    /// All offices carrying a non-null channel identifier
    async fn offices_with_channel(&self) -> SyncResult<Vec<Office>>;

    /// The office claiming the given channel identifier, if any. Duplicate
    /// claims are a data-quality hazard; the first match wins.
    async fn office_by_channel(&self, channel_id: &str) -> SyncResult<Option<Office>>;

    /// All records currently flagged live
    async fn live_streams(&self) -> SyncResult<Vec<VideoStream>>;

    /// Upcoming records whose scheduled start falls strictly inside
    /// `(start, end)`
    async fn upcoming_streams_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> SyncResult<Vec<VideoStream>>;

    /// Full-document replace of the record keyed by `stream.id`
    async fn replace_stream(&self, stream: &VideoStream) -> SyncResult<()>;

    /// Delete the record with the given id; deleting an absent record is a
    /// no-op
    async fn delete_stream(&self, video_id: &str) -> SyncResult<()>;

    /// Overwrite the floor pointer's video id (last write wins)
    async fn set_floor_video(&self, video_id: &str) -> SyncResult<()>;
}

#[derive(Clone)]
pub struct Database {
    pool: Pool<Sqlite>,
}

const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS offices (
        id TEXT PRIMARY KEY,
        title TEXT NOT NULL,
        party TEXT,
        thumbnail_url TEXT,
        youtube_channel TEXT
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS video_streams (
        id TEXT PRIMARY KEY,
        video_id TEXT NOT NULL,
        etag TEXT NOT NULL,
        channel_id TEXT NOT NULL,
        channel_title TEXT NOT NULL,
        channel_party TEXT NOT NULL,
        title TEXT NOT NULL,
        description TEXT NOT NULL,
        thumbnails TEXT NOT NULL,
        live_broadcast TEXT NOT NULL,
        concurrent_viewers INTEGER NOT NULL DEFAULT 0,
        office_id TEXT NOT NULL,
        office TEXT NOT NULL,
        published_at TIMESTAMP NOT NULL,
        scheduled_start_time TIMESTAMP,
        actual_start_time TIMESTAMP,
        scheduled_end_time TIMESTAMP,
        actual_end_time TIMESTAMP
    )
    "#,
    r#"
    CREATE INDEX IF NOT EXISTS idx_video_streams_live_broadcast
        ON video_streams (live_broadcast)
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS variables (
        name TEXT PRIMARY KEY,
        video_id TEXT
    )
    "#,
];

impl Database {
    pub fn pool(&self) -> Pool<Sqlite> {
        self.pool.clone()
    }

    pub async fn new(config: &DatabaseConfig) -> Result<Self> {
        // Create database if it doesn't exist (for SQLite)
        if !Sqlite::database_exists(&config.url).await? {
            Sqlite::create_database(&config.url).await?;
        }

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections.unwrap_or(10))
            .connect(&config.url)
            .await?;

        Ok(Self { pool })
    }

    pub async fn migrate(&self) -> Result<()> {
        for statement in SCHEMA {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl StreamStore for Database {
    async fn offices_with_channel(&self) -> SyncResult<Vec<Office>> {
        self.list_offices_with_channel().await
    }

    async fn office_by_channel(&self, channel_id: &str) -> SyncResult<Option<Office>> {
        self.find_office_by_channel(channel_id).await
    }

    async fn live_streams(&self) -> SyncResult<Vec<VideoStream>> {
        self.list_live_streams().await
    }

    async fn upcoming_streams_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> SyncResult<Vec<VideoStream>> {
        self.list_upcoming_streams_between(start, end).await
    }

    async fn replace_stream(&self, stream: &VideoStream) -> SyncResult<()> {
        self.replace_video_stream(stream).await
    }

    async fn delete_stream(&self, video_id: &str) -> SyncResult<()> {
        self.delete_video_stream(video_id).await
    }

    async fn set_floor_video(&self, video_id: &str) -> SyncResult<()> {
        self.set_variable_video(FLOOR_VARIABLE, video_id).await
    }
}
