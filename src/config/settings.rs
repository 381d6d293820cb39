use anyhow::{Context, Result};
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct DatabaseSettings {
    pub path: String,
    pub busy_timeout_secs: u64,
    pub pool_timeout_secs: u64,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            path: "channel_insights.db".to_string(),
            busy_timeout_secs: 5,
            pool_timeout_secs: 10,
        }
    }
}

impl DatabaseSettings {
    pub fn busy_timeout(&self) -> Duration {
        Duration::from_secs(self.busy_timeout_secs)
    }

    pub fn pool_timeout(&self) -> Duration {
        Duration::from_secs(self.pool_timeout_secs)
    }
}

#[derive(Debug, Clone)]
pub struct YouTubeSettings {
    pub api_key: Option<String>,
    pub base_url: String,
    pub user_agent: &'static str,
    pub timeout_secs: u64,
    pub latest_videos_limit: u32,
}

impl Default for YouTubeSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://www.googleapis.com/youtube/v3".to_string(),
            user_agent: "ChannelInsights/0.1",
            timeout_secs: 30,
            latest_videos_limit: 10,
        }
    }
}

impl YouTubeSettings {
    pub fn require_api_key(&self) -> Result<&str> {
        self.api_key
            .as_deref()
            .context("GAPI_KEY is not set; the platform API cannot be reached without it")
    }
}

#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub database: DatabaseSettings,
    pub youtube: YouTubeSettings,
}

impl AppConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults overlaid with the process environment (and `.env`, if loaded).
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::new();

        if let Some(path) = lookup("DATABASE_PATH") {
            config.database.path = path;
        }
        if let Some(secs) = parse_var(&lookup, "DB_BUSY_TIMEOUT_SECS")? {
            config.database.busy_timeout_secs = secs;
        }
        if let Some(secs) = parse_var(&lookup, "DB_POOL_TIMEOUT_SECS")? {
            config.database.pool_timeout_secs = secs;
        }

        config.youtube.api_key = lookup("GAPI_KEY").filter(|key| !key.trim().is_empty());
        if let Some(url) = lookup("YOUTUBE_API_BASE_URL") {
            config.youtube.base_url = url.trim_end_matches('/').to_string();
        }
        if let Some(secs) = parse_var(&lookup, "YOUTUBE_TIMEOUT_SECS")? {
            config.youtube.timeout_secs = secs;
        }

        Ok(config)
    }
}

fn parse_var<F, T>(lookup: &F, key: &str) -> Result<Option<T>>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    lookup(key)
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .with_context(|| format!("Invalid value for {}: {:?}", key, raw))
        })
        .transpose()
}
