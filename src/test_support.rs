//! In-memory platform and throwaway database shared by unit tests.

use anyhow::{Result, anyhow};
use chrono::{DateTime, TimeZone, Utc};
use std::collections::HashMap;
use std::sync::Mutex;
use tempfile::TempDir;

use crate::config::DatabaseSettings;
use crate::database::{self, DbPool};
use crate::domain::{ChannelDetails, LatestVideo, VideoStatsRecord};
use crate::youtube::VideoPlatform;

#[derive(Default)]
pub struct FakePlatform {
    usernames: HashMap<String, String>,
    handles: HashMap<String, String>,
    channels: HashMap<String, ChannelDetails>,
    listings: HashMap<String, Vec<LatestVideo>>,
    stats: HashMap<String, VideoStatsRecord>,
    unlisted_stats: Vec<VideoStatsRecord>,
    fail_all: bool,
    fail_statistics: bool,
    calls: Mutex<Vec<String>>,
}

impl FakePlatform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_username(mut self, username: &str, channel_id: &str) -> Self {
        self.usernames.insert(username.to_string(), channel_id.to_string());
        self
    }

    pub fn with_handle(mut self, handle: &str, channel_id: &str) -> Self {
        self.handles.insert(handle.to_string(), channel_id.to_string());
        self
    }

    pub fn with_channel(mut self, details: ChannelDetails) -> Self {
        self.listings.entry(details.channel_id.clone()).or_default();
        self.channels.insert(details.channel_id.clone(), details);
        self
    }

    /// Adds a video to the channel's listing together with its statistics
    pub fn with_video(mut self, channel_id: &str, listing: LatestVideo, stats: VideoStatsRecord) -> Self {
        self.stats.insert(stats.video_id.clone(), stats);
        self.listings.entry(channel_id.to_string()).or_default().push(listing);
        self
    }

    /// Statistics returned for every batch even though no listing mentions the video
    pub fn with_unlisted_stats(mut self, stats: VideoStatsRecord) -> Self {
        self.unlisted_stats.push(stats);
        self
    }

    /// Replaces the statistics served for an already listed video
    pub fn with_stats(mut self, stats: VideoStatsRecord) -> Self {
        self.stats.insert(stats.video_id.clone(), stats);
        self
    }

    pub fn failing(mut self) -> Self {
        self.fail_all = true;
        self
    }

    pub fn failing_statistics(mut self) -> Self {
        self.fail_statistics = true;
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    fn record(&self, call: String) -> Result<()> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
        if self.fail_all {
            return Err(anyhow!("connection refused"));
        }
        Ok(())
    }
}

impl VideoPlatform for FakePlatform {
    async fn find_channel_by_username(&self, username: &str) -> Result<Option<String>> {
        self.record(format!("username:{username}"))?;
        Ok(self.usernames.get(username).cloned())
    }

    async fn search_channel_by_handle(&self, handle: &str) -> Result<Option<String>> {
        self.record(format!("search:{handle}"))?;
        Ok(self.handles.get(handle).cloned())
    }

    async fn fetch_channel(&self, channel_id: &str) -> Result<Option<ChannelDetails>> {
        self.record(format!("channel:{channel_id}"))?;
        Ok(self.channels.get(channel_id).cloned())
    }

    async fn fetch_latest_videos(&self, channel_id: &str) -> Result<Vec<LatestVideo>> {
        self.record(format!("latest:{channel_id}"))?;
        Ok(self.listings.get(channel_id).cloned().unwrap_or_default())
    }

    async fn fetch_video_statistics(&self, video_ids: &[String]) -> Result<Vec<VideoStatsRecord>> {
        self.record(format!("stats:{}", video_ids.join(",")))?;
        if self.fail_statistics {
            return Err(anyhow!("videos.list returned 503 Service Unavailable"));
        }

        // Reverse order, so callers cannot rely on positional correspondence
        let mut records: Vec<VideoStatsRecord> = video_ids
            .iter()
            .rev()
            .filter_map(|id| self.stats.get(id).cloned())
            .collect();
        records.extend(self.unlisted_stats.iter().cloned());
        Ok(records)
    }
}

pub fn channel(channel_id: &str, title: &str) -> ChannelDetails {
    ChannelDetails {
        channel_id: channel_id.to_string(),
        title: title.to_string(),
        video_count: 120,
        subscriber_count: 45_000,
    }
}

pub fn published(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, day, 9, 0, 0).unwrap()
}

pub fn listing(video_id: &str, day: u32) -> LatestVideo {
    LatestVideo {
        video_id: video_id.to_string(),
        title: format!("Title of {video_id}"),
        published_at: published(day),
    }
}

pub fn stats(video_id: &str, duration: &str, views: i64) -> VideoStatsRecord {
    VideoStatsRecord {
        video_id: video_id.to_string(),
        duration: duration.to_string(),
        view_count: Some(views),
        like_count: views / 10,
        comment_count: views / 100,
    }
}

/// A bootstrapped database in a temporary directory; keep the `TempDir` alive
pub fn temp_pool() -> (TempDir, DbPool) {
    let dir = TempDir::new().unwrap();
    let settings = DatabaseSettings {
        path: dir.path().join("test.db").to_string_lossy().into_owned(),
        ..DatabaseSettings::default()
    };
    let pool = database::create_pool(&settings).unwrap();
    database::setup::ensure_pool_schema(&pool).unwrap();
    (dir, pool)
}

pub fn count_rows(pool: &DbPool, table: &str) -> i64 {
    let conn = database::get_connection(pool).unwrap();
    conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))
        .unwrap()
}
