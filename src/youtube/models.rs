//! Response shapes of the YouTube Data API v3 endpoints used for ingestion.
//!
//! Only the fields the service reads are modelled. Conversions into the domain
//! records fail with a parse error when a required field is absent or malformed.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::domain::{ChannelDetails, LatestVideo, VideoStatsRecord};
use crate::errors::with_parse_context;

/// Response of `channels.list`.
///
/// See: <https://developers.google.com/youtube/v3/docs/channels/list>
#[derive(Debug, Deserialize)]
pub struct ChannelListResponse {
    #[serde(default)]
    pub items: Vec<ChannelResource>,
}

#[derive(Debug, Deserialize)]
pub struct ChannelResource {
    pub id: String,
    pub snippet: Option<ChannelSnippet>,
    pub statistics: Option<ChannelStatistics>,
}

#[derive(Debug, Deserialize)]
pub struct ChannelSnippet {
    pub title: String,
}

/// Counts are serialised by the API as decimal strings
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelStatistics {
    pub video_count: Option<String>,
    pub subscriber_count: Option<String>,
}

/// Response of `search.list`.
///
/// See: <https://developers.google.com/youtube/v3/docs/search/list>
#[derive(Debug, Deserialize)]
pub struct SearchListResponse {
    #[serde(default)]
    pub items: Vec<SearchResult>,
}

#[derive(Debug, Deserialize)]
pub struct SearchResult {
    pub id: SearchResultId,
    pub snippet: Option<SearchSnippet>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResultId {
    pub kind: String,
    pub video_id: Option<String>,
    pub channel_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchSnippet {
    pub title: String,
    pub published_at: String,
    pub channel_id: Option<String>,
}

/// Response of `videos.list`.
///
/// See: <https://developers.google.com/youtube/v3/docs/videos/list>
#[derive(Debug, Deserialize)]
pub struct VideoListResponse {
    #[serde(default)]
    pub items: Vec<VideoResource>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoResource {
    pub id: String,
    #[serde(default)]
    pub statistics: VideoStatistics,
    pub content_details: Option<ContentDetails>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoStatistics {
    pub view_count: Option<String>,
    pub like_count: Option<String>,
    pub comment_count: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ContentDetails {
    pub duration: String,
}

impl ChannelResource {
    pub fn into_details(self) -> Result<ChannelDetails> {
        let title = self
            .snippet
            .map(|s| s.title)
            .with_context(|| format!("Channel {} is missing its snippet", self.id))?;
        let statistics = self.statistics.unwrap_or_default();

        Ok(ChannelDetails {
            video_count: parse_count_or_zero(statistics.video_count.as_deref(), "videoCount")?,
            subscriber_count: parse_count_or_zero(
                statistics.subscriber_count.as_deref(),
                "subscriberCount",
            )?,
            channel_id: self.id,
            title,
        })
    }
}

impl SearchResult {
    /// Channel id of a channel-scoped search hit
    pub fn channel_id(&self) -> Option<&str> {
        self.id
            .channel_id
            .as_deref()
            .or_else(|| self.snippet.as_ref().and_then(|s| s.channel_id.as_deref()))
    }

    pub fn into_latest_video(self) -> Result<LatestVideo> {
        let video_id = self
            .id
            .video_id
            .with_context(|| format!("Search result of kind {} has no videoId", self.id.kind))?;
        let snippet = self
            .snippet
            .with_context(|| format!("Search result {} is missing its snippet", video_id))?;

        Ok(LatestVideo {
            published_at: parse_timestamp(&snippet.published_at)?,
            title: snippet.title,
            video_id,
        })
    }
}

impl VideoResource {
    pub fn into_stats_record(self) -> Result<VideoStatsRecord> {
        let duration = self
            .content_details
            .map(|c| c.duration)
            .with_context(|| format!("Video {} is missing contentDetails", self.id))?;

        Ok(VideoStatsRecord {
            view_count: parse_count(self.statistics.view_count.as_deref(), "viewCount")?,
            like_count: parse_count_or_zero(self.statistics.like_count.as_deref(), "likeCount")?,
            comment_count: parse_count_or_zero(
                self.statistics.comment_count.as_deref(),
                "commentCount",
            )?,
            video_id: self.id,
            duration,
        })
    }
}

fn parse_count(raw: Option<&str>, field: &str) -> Result<Option<i64>> {
    raw.map(|value| with_parse_context(value.trim().parse::<i64>(), field))
        .transpose()
}

fn parse_count_or_zero(raw: Option<&str>, field: &str) -> Result<i64> {
    Ok(parse_count(raw, field)?.unwrap_or(0))
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .with_context(|| format!("Failed to parse publishedAt: {}", raw))
}
