use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::duration::parse_iso8601_duration;

/// Length of a platform-assigned channel identifier (e.g. `UC` + 22 chars)
pub const CHANNEL_ID_LEN: usize = 24;

/// Videos at or below this many seconds are shorts
pub const SHORT_VIDEO_MAX_SECS: i64 = 60;

const HANDLE_SENTINEL: char = '@';

/// How a user-supplied channel name has to be looked up on the platform
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelLookup {
    /// `@handle`, resolved through a channel-scoped search
    Handle(String),
    /// Legacy username, resolved through a direct lookup
    Username(String),
}

impl ChannelLookup {
    pub fn parse(input: &str) -> Self {
        let trimmed = input.trim();
        if trimmed.starts_with(HANDLE_SENTINEL) {
            ChannelLookup::Handle(trimmed.to_string())
        } else {
            ChannelLookup::Username(trimmed.to_string())
        }
    }
}

/// True when the identifier already looks like a raw channel id and needs no resolution
pub fn is_raw_channel_id(identifier: &str) -> bool {
    identifier.len() == CHANNEL_ID_LEN && !identifier.starts_with(HANDLE_SENTINEL)
}

/// Channel statistics and snippet as fetched from the platform
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelDetails {
    pub channel_id: String,
    pub title: String,
    pub video_count: i64,
    pub subscriber_count: i64,
}

/// One entry of the latest-videos listing
#[derive(Debug, Clone, PartialEq)]
pub struct LatestVideo {
    pub video_id: String,
    pub title: String,
    pub published_at: DateTime<Utc>,
}

/// Statistics and content details of a single video
#[derive(Debug, Clone, PartialEq)]
pub struct VideoStatsRecord {
    pub video_id: String,
    pub duration: String,
    pub view_count: Option<i64>,
    pub like_count: i64,
    pub comment_count: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VideoCategory {
    Short,
    Long,
}

impl VideoCategory {
    pub fn from_duration_secs(seconds: i64) -> Self {
        if seconds <= SHORT_VIDEO_MAX_SECS {
            VideoCategory::Short
        } else {
            VideoCategory::Long
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            VideoCategory::Short => "Short",
            VideoCategory::Long => "Long",
        }
    }
}

/// A video joined from the listing (title, publish time) and its statistics
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedVideo {
    pub video_id: String,
    pub title: String,
    pub published_at: DateTime<Utc>,
    pub duration_seconds: i64,
    pub view_count: Option<i64>,
    pub like_count: i64,
    pub comment_count: i64,
}

impl NormalizedVideo {
    pub fn new(listing: &LatestVideo, stats: VideoStatsRecord) -> Result<Self> {
        let duration_seconds = parse_iso8601_duration(&stats.duration)?;

        Ok(Self {
            video_id: stats.video_id,
            title: listing.title.clone(),
            published_at: listing.published_at,
            duration_seconds,
            view_count: stats.view_count,
            like_count: stats.like_count,
            comment_count: stats.comment_count,
        })
    }

    /// Derived from the duration, never stored independently
    pub fn category(&self) -> VideoCategory {
        VideoCategory::from_duration_secs(self.duration_seconds)
    }
}

/// Point-in-time summary over one ingested batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ChannelMetrics {
    pub median_viewership: i64,
    /// Number of videos in the batch, not a rate
    pub upload_frequency: i64,
    pub short_videos_count: i64,
    pub long_videos_count: i64,
}
