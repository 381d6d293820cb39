use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};

use super::models::MetricsSnapshot;
use crate::domain::ChannelMetrics;

/// Append one snapshot; metrics rows are never updated
pub fn insert_metrics(
    conn: &Connection,
    channel_id: &str,
    metrics: &ChannelMetrics,
    recorded_at: DateTime<Utc>,
) -> Result<MetricsSnapshot> {
    let sql = "INSERT INTO metrics (channel_id, median_viewership, upload_frequency, short_videos_count, long_videos_count, recorded_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6) RETURNING id, channel_id, median_viewership, upload_frequency, short_videos_count, long_videos_count, recorded_at";

    conn.query_row(
        sql,
        params![
            channel_id,
            metrics.median_viewership,
            metrics.upload_frequency,
            metrics.short_videos_count,
            metrics.long_videos_count,
            recorded_at
        ],
        parse_metrics_row,
    )
    .context("Failed to insert metrics")
}

fn parse_metrics_row(row: &rusqlite::Row) -> rusqlite::Result<MetricsSnapshot> {
    Ok(MetricsSnapshot {
        id: row.get(0)?,
        channel_id: row.get(1)?,
        median_viewership: row.get(2)?,
        upload_frequency: row.get(3)?,
        short_videos_count: row.get(4)?,
        long_videos_count: row.get(5)?,
        recorded_at: row.get(6)?,
    })
}

pub fn latest_for_channel(conn: &Connection, channel_id: &str) -> Result<Option<MetricsSnapshot>> {
    let sql = "SELECT id, channel_id, median_viewership, upload_frequency, short_videos_count, long_videos_count, recorded_at FROM metrics WHERE channel_id = ?1 ORDER BY recorded_at DESC, id DESC LIMIT 1";

    conn.query_row(sql, params![channel_id], parse_metrics_row)
        .optional()
        .context("Failed to get latest metrics for channel")
}
