use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::database::{ChannelSummaryRow, MetricsSnapshot, PerformancePointRow, PopularVideoRow};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddChannelRequest {
    pub channel_name: Option<String>,
}

#[derive(Deserialize)]
pub struct PopularParams {
    pub min_views: Option<i64>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelCreated {
    pub name: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelSummary {
    pub channel_id: String,
    pub channel_name: String,
    pub total_videos: i64,
    pub total_views: i64,
    pub total_likes: i64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelStats {
    pub channel_id: String,
    pub median_viewership: i64,
    pub upload_frequency: i64,
    pub short_videos_count: i64,
    pub long_videos_count: i64,
    pub recorded_at: DateTime<Utc>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PopularVideo {
    pub video_id: String,
    pub title: String,
    pub channel_name: String,
    pub view_count: i64,
    pub likes: i64,
    pub comments: i64,
    pub published_at: DateTime<Utc>,
    pub duration: i64,
    #[serde(rename = "type")]
    pub video_type: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformancePoint {
    pub video_id: String,
    pub title: String,
    pub checked_at: DateTime<Utc>,
    pub view_count: i64,
    pub likes: i64,
    pub comments: i64,
}

impl From<ChannelSummaryRow> for ChannelSummary {
    fn from(row: ChannelSummaryRow) -> Self {
        Self {
            channel_id: row.channel_id,
            channel_name: row.channel_name,
            total_videos: row.total_videos,
            total_views: row.total_views,
            total_likes: row.total_likes,
        }
    }
}

impl From<MetricsSnapshot> for ChannelStats {
    fn from(row: MetricsSnapshot) -> Self {
        Self {
            channel_id: row.channel_id,
            median_viewership: row.median_viewership,
            upload_frequency: row.upload_frequency,
            short_videos_count: row.short_videos_count,
            long_videos_count: row.long_videos_count,
            recorded_at: row.recorded_at,
        }
    }
}

impl From<PopularVideoRow> for PopularVideo {
    fn from(row: PopularVideoRow) -> Self {
        Self {
            video_id: row.video_id,
            title: row.title,
            channel_name: row.channel_name,
            view_count: row.view_count,
            likes: row.likes,
            comments: row.comments,
            published_at: row.published_at,
            duration: row.duration,
            video_type: row.video_type,
        }
    }
}

impl From<PerformancePointRow> for PerformancePoint {
    fn from(row: PerformancePointRow) -> Self {
        Self {
            video_id: row.video_id,
            title: row.title,
            checked_at: row.checked_at,
            view_count: row.view_count,
            likes: row.likes,
            comments: row.comments,
        }
    }
}
