use log::info;

use crate::database::{
    self, ChannelSummaryRow, DbPool, MetricsSnapshot, PerformancePointRow, PopularVideoRow,
    channels, video_stats, videos,
};
use crate::domain::is_raw_channel_id;
use crate::errors::AppError;
use crate::youtube::{VideoPlatform, resolve_channel_id};

pub const DEFAULT_MIN_VIEWS: i64 = 10_000;

/// Read-only views over the stored data
pub struct QueryService<'a, P> {
    platform: &'a P,
    pool: &'a DbPool,
}

impl<'a, P: VideoPlatform> QueryService<'a, P> {
    pub fn new(platform: &'a P, pool: &'a DbPool) -> Self {
        Self { platform, pool }
    }

    pub async fn channel_summary(&self, identifier: &str) -> Result<ChannelSummaryRow, AppError> {
        let channel_id = self.resolve_identifier(identifier).await?;
        let conn = database::get_connection(self.pool)?;

        channels::summary(&conn, &channel_id)?.ok_or_else(AppError::channel_not_found)
    }

    pub async fn latest_metrics(&self, identifier: &str) -> Result<MetricsSnapshot, AppError> {
        let channel_id = self.resolve_identifier(identifier).await?;
        let conn = database::get_connection(self.pool)?;

        database::metrics::latest_for_channel(&conn, &channel_id)?
            .ok_or_else(|| AppError::NotFound("No metrics recorded for channel".to_string()))
    }

    pub async fn delete_channel(&self, identifier: &str) -> Result<(), AppError> {
        let channel_id = self.resolve_identifier(identifier).await?;
        let conn = database::get_connection(self.pool)?;

        if !channels::delete(&conn, &channel_id)? {
            return Err(AppError::channel_not_found());
        }
        info!("Deleted channel {} and its data", channel_id);
        Ok(())
    }

    pub fn popular_videos(&self, min_views: i64) -> Result<Vec<PopularVideoRow>, AppError> {
        let conn = database::get_connection(self.pool)?;
        Ok(videos::list_popular(&conn, min_views)?)
    }

    pub fn video_performance(&self, video_id: &str) -> Result<Vec<PerformancePointRow>, AppError> {
        let conn = database::get_connection(self.pool)?;
        let series = video_stats::list_for_video(&conn, video_id)?;

        if series.is_empty() {
            return Err(AppError::NotFound("Video not found".to_string()));
        }
        Ok(series)
    }

    /// Raw channel ids are used as-is; anything else goes through the resolver
    async fn resolve_identifier(&self, identifier: &str) -> Result<String, AppError> {
        if is_raw_channel_id(identifier) {
            return Ok(identifier.to_string());
        }

        resolve_channel_id(self.platform, identifier)
            .await
            .map_err(AppError::Upstream)?
            .ok_or_else(AppError::channel_not_found)
    }
}
