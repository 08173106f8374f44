//! Singleton variable writes
//!
//! The only variable the pipeline touches is the floor pointer. It is written
//! with an upsert so a fresh database does not fail the side effect, and it
//! is never deleted here.

use super::Database;
use crate::errors::SyncResult;
use sqlx::Row;

impl Database {
    pub(crate) async fn set_variable_video(&self, name: &str, video_id: &str) -> SyncResult<()> {
        sqlx::query(
            "INSERT INTO variables (name, video_id) VALUES (?, ?)
             ON CONFLICT (name) DO UPDATE SET video_id = excluded.video_id",
        )
        .bind(name)
        .bind(video_id)
        .execute(&self.pool())
        .await?;

        Ok(())
    }

    pub async fn get_variable_video(&self, name: &str) -> SyncResult<Option<String>> {
        let row = sqlx::query("SELECT video_id FROM variables WHERE name = ?")
            .bind(name)
            .fetch_optional(&self.pool())
            .await?;

        Ok(match row {
            Some(row) => row.try_get("video_id")?,
            None => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::super::{Database, StreamStore, FLOOR_VARIABLE};
    use crate::config::DatabaseConfig;

    #[tokio::test]
    async fn test_floor_pointer_is_last_write_wins() {
        let database = Database::new(&DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: Some(1),
        })
        .await
        .unwrap();
        database.migrate().await.unwrap();

        assert_eq!(database.get_variable_video(FLOOR_VARIABLE).await.unwrap(), None);

        database.set_floor_video("vid1").await.unwrap();
        database.set_floor_video("vid2").await.unwrap();

        assert_eq!(
            database.get_variable_video(FLOOR_VARIABLE).await.unwrap(),
            Some("vid2".to_string())
        );
    }
}
