use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq)]
pub struct Channel {
    pub channel_id: String,
    pub channel_name: String,
    pub total_videos: i64,
    pub subscribers: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MetricsSnapshot {
    pub id: i64,
    pub channel_id: String,
    pub median_viewership: i64,
    pub upload_frequency: i64,
    pub short_videos_count: i64,
    pub long_videos_count: i64,
    pub recorded_at: DateTime<Utc>,
}

// DTOs for joined queries
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelSummaryRow {
    pub channel_id: String,
    pub channel_name: String,
    pub total_videos: i64,
    pub total_views: i64,
    pub total_likes: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PopularVideoRow {
    pub video_id: String,
    pub title: String,
    pub channel_name: String,
    pub view_count: i64,
    pub likes: i64,
    pub comments: i64,
    pub published_at: DateTime<Utc>,
    pub duration: i64,
    pub video_type: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PerformancePointRow {
    pub video_id: String,
    pub title: String,
    pub checked_at: DateTime<Utc>,
    pub view_count: i64,
    pub likes: i64,
    pub comments: i64,
}
