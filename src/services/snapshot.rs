use anyhow::{Context, Result};
use chrono::Utc;
use log::{info, warn};
use std::collections::HashSet;

use crate::database::{self, DbPool, video_stats, videos};
use crate::domain::VideoStatsRecord;
use crate::youtube::VideoPlatform;

/// The platform accepts at most this many ids per `videos.list` call
const MAX_IDS_PER_CALL: usize = 50;

/// Appends a fresh statistics row for every stored video
pub struct SnapshotService<'a, P> {
    platform: &'a P,
    pool: &'a DbPool,
}

impl<'a, P: VideoPlatform> SnapshotService<'a, P> {
    pub fn new(platform: &'a P, pool: &'a DbPool) -> Self {
        Self { platform, pool }
    }

    /// Returns the number of rows written
    pub async fn run(&self) -> Result<usize> {
        info!("=== Starting statistics snapshot ===");

        let ids = self.stored_video_ids()?;
        info!("  → {} stored videos", ids.len());
        if ids.is_empty() {
            return Ok(0);
        }

        let records = self.fetch_statistics(&ids).await?;
        let written = self.save(&records)?;

        info!("=== Snapshot complete: {} rows ===", written);
        Ok(written)
    }

    fn stored_video_ids(&self) -> Result<Vec<String>> {
        let conn = database::get_connection(self.pool)?;
        videos::list_ids(&conn)
    }

    async fn fetch_statistics(&self, ids: &[String]) -> Result<Vec<VideoStatsRecord>> {
        let mut records = Vec::with_capacity(ids.len());

        for (idx, chunk) in ids.chunks(MAX_IDS_PER_CALL).enumerate() {
            info!("  Fetching batch {} ({} videos)", idx + 1, chunk.len());
            let batch = self
                .platform
                .fetch_video_statistics(chunk)
                .await
                .with_context(|| format!("Failed to fetch statistics batch {}", idx + 1))?;
            records.extend(batch);
        }

        let requested: HashSet<&str> = ids.iter().map(String::as_str).collect();
        records.retain(|r| requested.contains(r.video_id.as_str()));
        if records.len() < ids.len() {
            warn!("  {} videos are no longer returned by the platform", ids.len() - records.len());
        }
        Ok(records)
    }

    fn save(&self, records: &[VideoStatsRecord]) -> Result<usize> {
        let checked_at = Utc::now();
        let mut conn = database::get_connection(self.pool)?;
        let tx = conn.transaction().context("Failed to start snapshot transaction")?;

        for record in records {
            video_stats::insert_stat(&tx, record, checked_at)?;
        }

        tx.commit().context("Failed to commit snapshot")?;
        Ok(records.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NormalizedVideo;
    use crate::database::channels;
    use crate::test_support::{FakePlatform, channel, count_rows, listing, stats, temp_pool};

    #[tokio::test]
    async fn test_snapshot_appends_one_row_per_stored_video() {
        let (_dir, pool) = temp_pool();
        {
            let conn = database::get_connection(&pool).unwrap();
            channels::insert_if_absent(&conn, &channel("UC1", "Chan")).unwrap();
            for id in ["a", "b", "gone"] {
                let video = NormalizedVideo::new(&listing(id, 1), stats(id, "PT3M", 10)).unwrap();
                videos::upsert_video(&conn, "UC1", &video).unwrap();
            }
        }
        let platform = FakePlatform::new()
            .with_video("UC1", listing("a", 1), stats("a", "PT3M", 11))
            .with_video("UC1", listing("b", 1), stats("b", "PT3M", 12));
        let service = SnapshotService::new(&platform, &pool);

        assert_eq!(service.run().await.unwrap(), 2);
        assert_eq!(service.run().await.unwrap(), 2);

        assert_eq!(count_rows(&pool, "video_stats"), 4);
        let conn = database::get_connection(&pool).unwrap();
        let series = video_stats::list_for_video(&conn, "b").unwrap();
        assert_eq!(series[0].view_count, 12);
    }

    #[tokio::test]
    async fn test_snapshot_with_empty_database_makes_no_calls() {
        let (_dir, pool) = temp_pool();
        let platform = FakePlatform::new();

        assert_eq!(SnapshotService::new(&platform, &pool).run().await.unwrap(), 0);
        assert!(platform.calls().is_empty());
    }

    #[tokio::test]
    async fn test_fetch_failure_writes_nothing() {
        let (_dir, pool) = temp_pool();
        {
            let conn = database::get_connection(&pool).unwrap();
            channels::insert_if_absent(&conn, &channel("UC1", "Chan")).unwrap();
            let video = NormalizedVideo::new(&listing("a", 1), stats("a", "PT3M", 10)).unwrap();
            videos::upsert_video(&conn, "UC1", &video).unwrap();
        }
        let platform = FakePlatform::new().failing_statistics();

        assert!(SnapshotService::new(&platform, &pool).run().await.is_err());
        assert_eq!(count_rows(&pool, "video_stats"), 0);
    }
}
