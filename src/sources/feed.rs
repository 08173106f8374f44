//! Channel feed collaborator
//!
//! Fetches the per-channel Atom feed and reduces each `<entry>` to the two
//! fields discovery uses: the video id and the update timestamp. Parsing is
//! a streaming quick-xml reader; entries are collected as they close, so a
//! feed with exactly one entry is a sequence of one by construction.

use crate::errors::{SyncError, SyncResult};
use crate::models::FeedEntry;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use quick_xml::events::Event;
use quick_xml::Reader;
use reqwest::Client;

#[async_trait]
pub trait FeedApi: Send + Sync {
    /// All entries of the channel's feed, in document order
    async fn channel_entries(&self, channel_id: &str) -> SyncResult<Vec<FeedEntry>>;
}

pub struct YoutubeFeedApi {
    client: Client,
    base_url: String,
}

impl YoutubeFeedApi {
    pub fn new(feed_base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: feed_base_url.to_string(),
        }
    }
}

#[async_trait]
impl FeedApi for YoutubeFeedApi {
    async fn channel_entries(&self, channel_id: &str) -> SyncResult<Vec<FeedEntry>> {
        let response = self
            .client
            .get(format!("{}/feeds/videos.xml", self.base_url))
            .query(&[("channel_id", channel_id)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SyncError::feed(channel_id, format!("HTTP {status}")));
        }

        let body = response.text().await?;
        parse_feed_entries(&body).map_err(|e| SyncError::feed(channel_id, e.to_string()))
    }
}

/// Parse feed XML into entries using a streaming reader
pub fn parse_feed_entries(content: &str) -> Result<Vec<FeedEntry>, quick_xml::Error> {
    let mut reader = Reader::from_str(content);
    reader.config_mut().trim_text(true);

    let mut entries = Vec::new();
    let mut current_entry: Option<FeedEntry> = None;
    let mut element_stack: Vec<String> = Vec::new();

    loop {
        match reader.read_event()? {
            Event::Start(ref e) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                if name == "entry" {
                    current_entry = Some(FeedEntry::default());
                }
                element_stack.push(name);
            }
            Event::Text(e) => {
                if let (Some(entry), Some(element)) =
                    (current_entry.as_mut(), element_stack.last())
                {
                    match element.as_str() {
                        "yt:videoId" => {
                            entry.video_id = Some(e.unescape()?.trim().to_string());
                        }
                        // the feed-level <updated> sits outside any entry and
                        // is never reached here
                        "updated" => {
                            entry.updated = parse_feed_timestamp(e.unescape()?.trim());
                        }
                        _ => {}
                    }
                }
            }
            Event::End(ref e) => {
                element_stack.pop();
                if e.name().as_ref() == b"entry" {
                    if let Some(entry) = current_entry.take() {
                        entries.push(entry);
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(entries)
}

fn parse_feed_timestamp(text: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(text)
        .ok()
        .map(|ts| ts.with_timezone(&Utc))
}
