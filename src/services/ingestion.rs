use anyhow::{Context, Result};
use chrono::Utc;
use log::{info, warn};
use std::collections::{HashMap, HashSet};

use crate::database::{self, DbPool, channels, videos};
use crate::domain::{ChannelDetails, ChannelMetrics, LatestVideo, NormalizedVideo, VideoStatsRecord};
use crate::errors::AppError;
use crate::metrics::calculate_metrics;
use crate::youtube::{VideoPlatform, resolve_channel_id};

/// Result of one ingestion run
#[derive(Debug, Clone, PartialEq)]
pub struct IngestionOutcome {
    pub channel_id: String,
    pub channel_name: String,
    pub channel_created: bool,
    pub videos_written: usize,
    pub metrics: ChannelMetrics,
}

/// Resolve → fetch → compute → persist for a single channel.
///
/// Every platform call happens before the first write, and all writes share one
/// transaction, so a failed run leaves the database as it was.
pub struct IngestionService<'a, P> {
    platform: &'a P,
    pool: &'a DbPool,
}

impl<'a, P: VideoPlatform> IngestionService<'a, P> {
    pub fn new(platform: &'a P, pool: &'a DbPool) -> Self {
        Self { platform, pool }
    }

    pub async fn ingest(&self, channel_name: &str) -> Result<IngestionOutcome, AppError> {
        if channel_name.trim().is_empty() {
            return Err(AppError::Validation("channelName is required".to_string()));
        }
        info!("=== Starting ingestion for {:?} ===", channel_name);

        // Step 1: Resolve the channel id
        let channel_id = self.resolve(channel_name).await?;

        // Step 2: Fetch channel details
        let details = self.fetch_channel(&channel_id).await?;
        info!("  → {} ({} videos, {} subscribers)", details.title, details.video_count, details.subscriber_count);

        // Step 3: Fetch the latest videos and their statistics
        let (listing, stats) = self.fetch_videos(&channel_id).await?;

        // Step 4: Join statistics with the listing
        let batch = reconcile(&listing, stats)?;

        // Step 5: Compute metrics
        let metrics = calculate_metrics(&batch);
        info!(
            "  → median {} views, {} short / {} long",
            metrics.median_viewership, metrics.short_videos_count, metrics.long_videos_count
        );

        // Step 6: Persist everything atomically
        let channel_created = self.persist(&details, &batch, &metrics)?;

        info!("=== Ingestion complete for {} ===", details.title);
        Ok(IngestionOutcome {
            channel_id: details.channel_id,
            channel_name: details.title,
            channel_created,
            videos_written: batch.len(),
            metrics,
        })
    }

    async fn resolve(&self, channel_name: &str) -> Result<String, AppError> {
        resolve_channel_id(self.platform, channel_name)
            .await
            .map_err(AppError::Upstream)?
            .ok_or_else(AppError::channel_not_found)
    }

    async fn fetch_channel(&self, channel_id: &str) -> Result<ChannelDetails, AppError> {
        // Resolution and detail fetch are separate calls and may disagree
        self.platform
            .fetch_channel(channel_id)
            .await
            .map_err(AppError::Upstream)?
            .ok_or_else(AppError::channel_not_found)
    }

    async fn fetch_videos(&self, channel_id: &str) -> Result<(Vec<LatestVideo>, Vec<VideoStatsRecord>), AppError> {
        let listing = self
            .platform
            .fetch_latest_videos(channel_id)
            .await
            .map_err(AppError::Upstream)?;

        if listing.is_empty() {
            info!("  → Channel {} has no videos; recording an empty snapshot", channel_id);
            return Ok((listing, Vec::new()));
        }

        let ids: Vec<String> = listing.iter().map(|v| v.video_id.clone()).collect();
        let stats = self
            .platform
            .fetch_video_statistics(&ids)
            .await
            .map_err(AppError::Upstream)?;

        if stats.len() != listing.len() {
            warn!(
                "  Statistics returned for {} of {} listed videos",
                stats.len(),
                listing.len()
            );
        }
        Ok((listing, stats))
    }

    fn persist(
        &self,
        details: &ChannelDetails,
        batch: &[NormalizedVideo],
        metrics: &ChannelMetrics,
    ) -> Result<bool> {
        let mut conn = database::get_connection(self.pool)?;
        let tx = conn.transaction().context("Failed to start ingestion transaction")?;

        let created = channels::insert_if_absent(&tx, details)?;
        if !created {
            info!("  Channel {} already stored, keeping existing row", details.channel_id);
        }

        for video in batch {
            videos::upsert_video(&tx, &details.channel_id, video)?;
        }

        database::metrics::insert_metrics(&tx, &details.channel_id, metrics, Utc::now())?;

        tx.commit().context("Failed to commit ingestion")?;
        info!("  → Saved {} videos and a metrics snapshot", batch.len());
        Ok(created)
    }
}

/// Join every statistics record with exactly one listing entry by video id.
/// A record without a listing entry, or an id seen twice on either side, fails the whole run.
pub fn reconcile(
    listing: &[LatestVideo],
    stats: Vec<VideoStatsRecord>,
) -> Result<Vec<NormalizedVideo>, AppError> {
    let mut by_id: HashMap<&str, &LatestVideo> = HashMap::with_capacity(listing.len());
    for video in listing {
        if by_id.insert(video.video_id.as_str(), video).is_some() {
            return Err(AppError::Reconciliation {
                video_id: video.video_id.clone(),
                reason: "listed more than once",
            });
        }
    }

    let mut seen: HashSet<String> = HashSet::with_capacity(stats.len());
    stats
        .into_iter()
        .map(|record| {
            if !seen.insert(record.video_id.clone()) {
                return Err(AppError::Reconciliation {
                    video_id: record.video_id,
                    reason: "statistics returned more than once",
                });
            }
            let entry = by_id
                .get(record.video_id.as_str())
                .copied()
                .ok_or_else(|| AppError::Reconciliation {
                    video_id: record.video_id.clone(),
                    reason: "statistics returned for a video missing from the listing",
                })?;
            NormalizedVideo::new(entry, record).map_err(AppError::Upstream)
        })
        .collect()
}
