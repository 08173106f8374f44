//! Video stream reads and writes
//!
//! Nested values (thumbnail variants, the office snapshot) are stored as JSON
//! text columns; everything queried on is a plain column.

use super::Database;
use crate::errors::SyncResult;
use crate::models::VideoStream;
use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

fn stream_from_row(row: &SqliteRow) -> SyncResult<VideoStream> {
    let thumbnails: String = row.try_get("thumbnails")?;
    let office: String = row.try_get("office")?;
    let concurrent_viewers: i64 = row.try_get("concurrent_viewers")?;

    Ok(VideoStream {
        id: row.try_get("id")?,
        video_id: row.try_get("video_id")?,
        etag: row.try_get("etag")?,
        channel_id: row.try_get("channel_id")?,
        channel_title: row.try_get("channel_title")?,
        channel_party: row.try_get("channel_party")?,
        title: row.try_get("title")?,
        description: row.try_get("description")?,
        thumbnails: serde_json::from_str(&thumbnails)?,
        live_broadcast: row.try_get("live_broadcast")?,
        concurrent_viewers: concurrent_viewers.max(0) as u64,
        office_id: row.try_get("office_id")?,
        office: serde_json::from_str(&office)?,
        published_at: row.try_get("published_at")?,
        scheduled_start_time: row.try_get("scheduled_start_time")?,
        actual_start_time: row.try_get("actual_start_time")?,
        scheduled_end_time: row.try_get("scheduled_end_time")?,
        actual_end_time: row.try_get("actual_end_time")?,
    })
}

const STREAM_COLUMNS: &str = "id, video_id, etag, channel_id, channel_title, channel_party, \
     title, description, thumbnails, live_broadcast, concurrent_viewers, \
     office_id, office, published_at, scheduled_start_time, actual_start_time, \
     scheduled_end_time, actual_end_time";

impl Database {
    pub(crate) async fn list_live_streams(&self) -> SyncResult<Vec<VideoStream>> {
        let rows = sqlx::query(&format!(
            "SELECT {STREAM_COLUMNS} FROM video_streams WHERE live_broadcast = 'live' ORDER BY id"
        ))
        .fetch_all(&self.pool())
        .await?;

        rows.iter().map(stream_from_row).collect()
    }

    pub(crate) async fn list_upcoming_streams_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> SyncResult<Vec<VideoStream>> {
        let rows = sqlx::query(&format!(
            "SELECT {STREAM_COLUMNS} FROM video_streams
             WHERE live_broadcast = 'upcoming'
               AND scheduled_start_time > ? AND scheduled_start_time < ?
             ORDER BY id"
        ))
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool())
        .await?;

        rows.iter().map(stream_from_row).collect()
    }

    pub async fn get_video_stream(&self, video_id: &str) -> SyncResult<Option<VideoStream>> {
        let row = sqlx::query(&format!(
            "SELECT {STREAM_COLUMNS} FROM video_streams WHERE id = ?"
        ))
        .bind(video_id)
        .fetch_optional(&self.pool())
        .await?;

        row.as_ref().map(stream_from_row).transpose()
    }

    pub(crate) async fn replace_video_stream(&self, stream: &VideoStream) -> SyncResult<()> {
        sqlx::query(
            "INSERT OR REPLACE INTO video_streams (
                id, video_id, etag, channel_id, channel_title, channel_party,
                title, description, thumbnails, live_broadcast, concurrent_viewers,
                office_id, office, published_at, scheduled_start_time, actual_start_time,
                scheduled_end_time, actual_end_time
             ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&stream.id)
        .bind(&stream.video_id)
        .bind(&stream.etag)
        .bind(&stream.channel_id)
        .bind(&stream.channel_title)
        .bind(&stream.channel_party)
        .bind(&stream.title)
        .bind(&stream.description)
        .bind(serde_json::to_string(&stream.thumbnails)?)
        .bind(&stream.live_broadcast)
        .bind(stream.concurrent_viewers as i64)
        .bind(&stream.office_id)
        .bind(serde_json::to_string(&stream.office)?)
        .bind(stream.published_at)
        .bind(stream.scheduled_start_time)
        .bind(stream.actual_start_time)
        .bind(stream.scheduled_end_time)
        .bind(stream.actual_end_time)
        .execute(&self.pool())
        .await?;

        Ok(())
    }

    pub(crate) async fn delete_video_stream(&self, video_id: &str) -> SyncResult<()> {
        // idempotent: zero rows affected is fine
        sqlx::query("DELETE FROM video_streams WHERE id = ?")
            .bind(video_id)
            .execute(&self.pool())
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::super::{Database, StreamStore};
    use crate::config::DatabaseConfig;
    use crate::models::{OfficeSnapshot, Thumbnails, VideoStream};
    use chrono::{DateTime, Utc};

    async fn test_database() -> Database {
        let database = Database::new(&DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: Some(1),
        })
        .await
        .unwrap();
        database.migrate().await.unwrap();
        database
    }

    fn ts(s: &str) -> DateTime<Utc> {
        s.parse().unwrap()
    }

    fn stream(id: &str, status: &str, scheduled: Option<&str>) -> VideoStream {
        VideoStream {
            id: id.to_string(),
            video_id: id.to_string(),
            etag: "etag".to_string(),
            channel_id: "UCxyz".to_string(),
            channel_title: "Channel".to_string(),
            channel_party: "X".to_string(),
            title: "Title".to_string(),
            description: "Desc".to_string(),
            thumbnails: Thumbnails::default(),
            live_broadcast: status.to_string(),
            concurrent_viewers: 7,
            office_id: "27".to_string(),
            office: OfficeSnapshot {
                id: "27".to_string(),
                title: "Office".to_string(),
                thumbnail_url: String::new(),
            },
            published_at: ts("2024-01-01T00:00:00Z"),
            scheduled_start_time: scheduled.map(ts),
            actual_start_time: None,
            scheduled_end_time: None,
            actual_end_time: None,
        }
    }

    #[tokio::test]
    async fn test_replace_is_a_full_document_overwrite() {
        let database = test_database().await;

        let mut original = stream("vid1", "upcoming", Some("2024-01-02T10:00:00Z"));
        database.replace_stream(&original).await.unwrap();

        original.live_broadcast = "live".to_string();
        original.scheduled_start_time = None;
        database.replace_stream(&original).await.unwrap();

        let stored = database.get_video_stream("vid1").await.unwrap().unwrap();
        assert_eq!(stored, original);
        assert_eq!(stored.scheduled_start_time, None);
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let database = test_database().await;

        database.replace_stream(&stream("vid1", "live", None)).await.unwrap();
        database.delete_stream("vid1").await.unwrap();
        assert!(database.get_video_stream("vid1").await.unwrap().is_none());

        // deleting again (or deleting something never written) is not an error
        database.delete_stream("vid1").await.unwrap();
        database.delete_stream("never-existed").await.unwrap();
    }

    #[tokio::test]
    async fn test_upcoming_window_is_exclusive() {
        let database = test_database().await;
        let start = ts("2024-03-15T00:00:00Z");
        let end = ts("2024-03-16T00:00:00Z");

        database
            .replace_stream(&stream("at-start", "upcoming", Some("2024-03-15T00:00:00Z")))
            .await
            .unwrap();
        database
            .replace_stream(&stream("inside", "upcoming", Some("2024-03-15T12:00:00Z")))
            .await
            .unwrap();
        database
            .replace_stream(&stream("tomorrow", "upcoming", Some("2024-03-16T09:00:00Z")))
            .await
            .unwrap();
        database
            .replace_stream(&stream("live-now", "live", None))
            .await
            .unwrap();

        let upcoming = database.upcoming_streams_between(start, end).await.unwrap();
        assert_eq!(upcoming.len(), 1);
        assert_eq!(upcoming[0].id, "inside");

        let live = database.live_streams().await.unwrap();
        assert_eq!(live.len(), 1);
        assert_eq!(live[0].id, "live-now");
    }
}
