use anyhow::{Context, Result};
use log::info;
use urlencoding::encode;

use super::VideoPlatform;
use super::models::{ChannelListResponse, SearchListResponse, VideoListResponse};
use crate::config::YouTubeSettings;
use crate::domain::{ChannelDetails, LatestVideo, VideoStatsRecord};
use crate::http::JsonClient;

/// YouTube Data API v3 client
#[derive(Clone)]
pub struct YouTubeClient {
    client: JsonClient,
    base_url: String,
    api_key: String,
    latest_videos_limit: u32,
}

impl YouTubeClient {
    pub fn new(settings: &YouTubeSettings) -> Result<Self> {
        let api_key = settings.require_api_key()?.to_string();
        let client = JsonClient::new(settings.user_agent, settings.timeout_secs)?;

        Ok(Self {
            client,
            base_url: settings.base_url.clone(),
            api_key,
            latest_videos_limit: settings.latest_videos_limit,
        })
    }

    // --- URL builders ---

    fn build_url(&self, resource: &str, query: &[(&str, &str)]) -> String {
        let params: Vec<String> = query
            .iter()
            .chain(std::iter::once(&("key", self.api_key.as_str())))
            .map(|(name, value)| format!("{}={}", name, encode(value)))
            .collect();
        format!("{}/{}?{}", self.base_url, resource, params.join("&"))
    }

    fn build_username_url(&self, username: &str) -> String {
        self.build_url("channels", &[("part", "id"), ("forUsername", username)])
    }

    fn build_handle_search_url(&self, handle: &str) -> String {
        self.build_url(
            "search",
            &[("part", "snippet"), ("type", "channel"), ("maxResults", "1"), ("q", handle)],
        )
    }

    fn build_channel_url(&self, channel_id: &str) -> String {
        self.build_url("channels", &[("part", "statistics,snippet"), ("id", channel_id)])
    }

    fn build_latest_videos_url(&self, channel_id: &str) -> String {
        let limit = self.latest_videos_limit.to_string();
        self.build_url(
            "search",
            &[
                ("part", "snippet"),
                ("channelId", channel_id),
                ("maxResults", &limit),
                ("order", "date"),
                ("type", "video"),
            ],
        )
    }

    fn build_video_statistics_url(&self, video_ids: &[String]) -> String {
        let ids = video_ids.join(",");
        self.build_url("videos", &[("part", "statistics,contentDetails"), ("id", &ids)])
    }
}

impl VideoPlatform for YouTubeClient {
    async fn find_channel_by_username(&self, username: &str) -> Result<Option<String>> {
        let url = self.build_username_url(username);
        let response: ChannelListResponse = self.client.get_json(&url, "channels.list").await?;
        Ok(response.items.into_iter().next().map(|c| c.id))
    }

    async fn search_channel_by_handle(&self, handle: &str) -> Result<Option<String>> {
        let url = self.build_handle_search_url(handle);
        let response: SearchListResponse = self.client.get_json(&url, "search.list").await?;
        Ok(response
            .items
            .first()
            .and_then(|hit| hit.channel_id())
            .map(str::to_string))
    }

    async fn fetch_channel(&self, channel_id: &str) -> Result<Option<ChannelDetails>> {
        let url = self.build_channel_url(channel_id);
        let response: ChannelListResponse = self.client.get_json(&url, "channels.list").await?;

        response
            .items
            .into_iter()
            .next()
            .map(|resource| resource.into_details())
            .transpose()
            .with_context(|| format!("Unexpected channel record for {}", channel_id))
    }

    async fn fetch_latest_videos(&self, channel_id: &str) -> Result<Vec<LatestVideo>> {
        let url = self.build_latest_videos_url(channel_id);
        let response: SearchListResponse = self.client.get_json(&url, "search.list").await?;

        let videos = response
            .items
            .into_iter()
            .filter(|hit| hit.id.kind == "youtube#video")
            .map(|hit| hit.into_latest_video())
            .collect::<Result<Vec<_>>>()
            .with_context(|| format!("Unexpected video listing for {}", channel_id))?;

        info!("Fetched {} latest videos for channel {}", videos.len(), channel_id);
        Ok(videos)
    }

    async fn fetch_video_statistics(&self, video_ids: &[String]) -> Result<Vec<VideoStatsRecord>> {
        if video_ids.is_empty() {
            return Ok(Vec::new());
        }

        let url = self.build_video_statistics_url(video_ids);
        let response: VideoListResponse = self.client.get_json(&url, "videos.list").await?;

        response
            .items
            .into_iter()
            .map(|resource| resource.into_stats_record())
            .collect::<Result<Vec<_>>>()
            .context("Unexpected video statistics record")
    }
}
