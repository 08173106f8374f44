//! Office reads. Offices are created and maintained outside the pipeline;
//! this module only looks them up (plus an upsert used for seeding).

use super::Database;
use crate::errors::SyncResult;
use crate::models::{Office, OfficeIdentifiers};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

fn office_from_row(row: &SqliteRow) -> Result<Office, sqlx::Error> {
    Ok(Office {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        party: row.try_get("party")?,
        thumbnail_url: row.try_get("thumbnail_url")?,
        identifiers: OfficeIdentifiers {
            youtube_channel: row.try_get("youtube_channel")?,
        },
    })
}

impl Database {
    pub(crate) async fn list_offices_with_channel(&self) -> SyncResult<Vec<Office>> {
        let rows = sqlx::query(
            "SELECT id, title, party, thumbnail_url, youtube_channel
             FROM offices WHERE youtube_channel IS NOT NULL ORDER BY id",
        )
        .fetch_all(&self.pool())
        .await?;

        rows.iter()
            .map(|row| office_from_row(row).map_err(Into::into))
            .collect()
    }

    pub(crate) async fn find_office_by_channel(
        &self,
        channel_id: &str,
    ) -> SyncResult<Option<Office>> {
        let row = sqlx::query(
            "SELECT id, title, party, thumbnail_url, youtube_channel
             FROM offices WHERE youtube_channel = ? ORDER BY id LIMIT 1",
        )
        .bind(channel_id)
        .fetch_optional(&self.pool())
        .await?;

        row.as_ref().map(office_from_row).transpose().map_err(Into::into)
    }

    /// Insert or replace an office row. Not part of the pipeline's store
    /// surface; used by seeding tooling and tests.
    pub async fn upsert_office(&self, office: &Office) -> SyncResult<()> {
        sqlx::query(
            "INSERT OR REPLACE INTO offices (id, title, party, thumbnail_url, youtube_channel)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&office.id)
        .bind(&office.title)
        .bind(&office.party)
        .bind(&office.thumbnail_url)
        .bind(&office.identifiers.youtube_channel)
        .execute(&self.pool())
        .await?;

        Ok(())
    }
}
