pub mod client;
pub mod models;
pub mod resolver;

use anyhow::Result;
use std::future::Future;

use crate::domain::{ChannelDetails, LatestVideo, VideoStatsRecord};

pub use client::YouTubeClient;
pub use resolver::resolve_channel_id;

/// Read operations the service needs from the video platform.
///
/// Each call is a single request/response mapping with no local state.
pub trait VideoPlatform: Send + Sync {
    /// Legacy username lookup; first match wins
    fn find_channel_by_username(
        &self,
        username: &str,
    ) -> impl Future<Output = Result<Option<String>>> + Send;

    /// Channel-scoped search for an `@handle`; first match wins
    fn search_channel_by_handle(
        &self,
        handle: &str,
    ) -> impl Future<Output = Result<Option<String>>> + Send;

    fn fetch_channel(
        &self,
        channel_id: &str,
    ) -> impl Future<Output = Result<Option<ChannelDetails>>> + Send;

    /// Newest videos first, first page only
    fn fetch_latest_videos(
        &self,
        channel_id: &str,
    ) -> impl Future<Output = Result<Vec<LatestVideo>>> + Send;

    /// One batched call; the result order is unrelated to `video_ids`
    fn fetch_video_statistics(
        &self,
        video_ids: &[String],
    ) -> impl Future<Output = Result<Vec<VideoStatsRecord>>> + Send;
}
