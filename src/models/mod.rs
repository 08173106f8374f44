//! Domain and wire types for the DomeWatch sync service
//!
//! `VideoStream` is the canonical record; the `Youtube*` types mirror the
//! video metadata API payload and are normalized into a `VideoStream` by the
//! mapper. Serialized field names follow the upstream camelCase convention.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Organizational entity owning at most one YouTube channel
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Office {
    pub id: String,
    pub title: String,
    pub party: Option<String>,
    #[serde(rename = "thumbnailUrl")]
    pub thumbnail_url: Option<String>,
    pub identifiers: OfficeIdentifiers,
}

/// External account identifiers attached to an office
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct OfficeIdentifiers {
    #[serde(rename = "youtubeChannel")]
    pub youtube_channel: Option<String>,
}

/// Denormalized office snapshot carried on every video stream record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OfficeSnapshot {
    pub id: String,
    pub title: String,
    pub thumbnail_url: String,
}

/// A single thumbnail variant
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Thumbnail {
    pub url: String,
    pub width: u32,
    pub height: u32,
}

/// The five fixed thumbnail sizes; upstream omits variants it never rendered
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Thumbnails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Thumbnail>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub high: Option<Thumbnail>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maxres: Option<Thumbnail>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub medium: Option<Thumbnail>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub standard: Option<Thumbnail>,
}

/// The canonical video stream record, keyed by the YouTube video id
///
/// Records are always written wholesale (full-document replace); there is no
/// partial-field merge anywhere in the pipeline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VideoStream {
    pub id: String,
    /// Always equal to `id`; kept as a separate field for consumers that
    /// expect the upstream name
    pub video_id: String,
    pub etag: String,
    pub channel_id: String,
    pub channel_title: String,
    pub channel_party: String,
    pub title: String,
    pub description: String,
    pub thumbnails: Thumbnails,
    /// Upstream broadcast lifecycle status as a literal string:
    /// `none`, `upcoming`, `live` or `completed`
    pub live_broadcast: String,
    pub concurrent_viewers: u64,
    pub office_id: String,
    pub office: OfficeSnapshot,
    pub published_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_start_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual_start_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_end_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual_end_time: Option<DateTime<Utc>>,
}

/// A raw video item as returned by the metadata API
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YoutubeVideo {
    pub id: VideoIdField,
    #[serde(default)]
    pub etag: String,
    pub snippet: YoutubeSnippet,
    pub live_streaming_details: Option<LiveStreamingDetails>,
}

/// The video id arrives either as a bare string or wrapped in an object,
/// depending on which upstream endpoint produced the item
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum VideoIdField {
    Plain(String),
    Keyed {
        #[serde(rename = "videoId")]
        video_id: String,
    },
}

impl VideoIdField {
    /// Normalized string identity, resolved at the ingestion boundary
    pub fn as_str(&self) -> &str {
        match self {
            Self::Plain(id) => id,
            Self::Keyed { video_id } => video_id,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YoutubeSnippet {
    pub published_at: DateTime<Utc>,
    pub channel_id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub thumbnails: Thumbnails,
    pub channel_title: String,
    pub live_broadcast_content: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveStreamingDetails {
    pub actual_start_time: Option<DateTime<Utc>>,
    pub actual_end_time: Option<DateTime<Utc>>,
    pub scheduled_start_time: Option<DateTime<Utc>>,
    pub scheduled_end_time: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "deserialize_concurrent_viewers")]
    pub concurrent_viewers: Option<u64>,
}

/// The live API reports viewer counts as decimal strings; older payloads use
/// plain numbers. Unparseable values count as absent.
fn deserialize_concurrent_viewers<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(u64),
        Text(String),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        None => None,
        Some(Raw::Number(n)) => Some(n),
        Some(Raw::Text(s)) => s.parse().ok(),
    })
}

/// Response envelope of the video metadata API
#[derive(Debug, Clone, Deserialize)]
pub struct VideoListResponse {
    #[serde(default)]
    pub items: Vec<YoutubeVideo>,
}

/// One entry of a channel feed, reduced to the fields the pipeline uses
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedEntry {
    pub video_id: Option<String>,
    pub updated: Option<DateTime<Utc>>,
}

/// Summary returned by a feed discovery pass
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscoverySummary {
    pub processed_office_count: usize,
}

/// Summary returned by an active-set refresh pass
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshSummary {
    /// Records considered, not necessarily successfully updated
    pub refreshed_count: usize,
}
