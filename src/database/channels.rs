use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};

use super::models::{Channel, ChannelSummaryRow};
use crate::domain::ChannelDetails;

/// Insert the channel unless its id is already stored. Existing rows are never updated.
/// Returns whether a row was written.
pub fn insert_if_absent(conn: &Connection, details: &ChannelDetails) -> Result<bool> {
    let sql = "INSERT INTO channel (channel_id, channel_name, total_videos, subscribers) VALUES (?1, ?2, ?3, ?4) ON CONFLICT (channel_id) DO NOTHING";

    let inserted = conn
        .execute(
            sql,
            params![
                details.channel_id,
                details.title,
                details.video_count,
                details.subscriber_count
            ],
        )
        .context("Failed to insert channel")?;

    Ok(inserted > 0)
}

fn parse_channel_row(row: &rusqlite::Row) -> rusqlite::Result<Channel> {
    Ok(Channel {
        channel_id: row.get(0)?,
        channel_name: row.get(1)?,
        total_videos: row.get(2)?,
        subscribers: row.get(3)?,
    })
}

pub fn find_by_id(conn: &Connection, channel_id: &str) -> Result<Option<Channel>> {
    let sql = "SELECT channel_id, channel_name, total_videos, subscribers FROM channel WHERE channel_id = ?1";

    conn.query_row(sql, params![channel_id], parse_channel_row)
        .optional()
        .context("Failed to query channel by id")
}

/// Remove the channel; videos, metrics and stats go with it through the cascading keys
pub fn delete(conn: &Connection, channel_id: &str) -> Result<bool> {
    let deleted = conn
        .execute("DELETE FROM channel WHERE channel_id = ?1", params![channel_id])
        .context("Failed to delete channel")?;
    Ok(deleted > 0)
}

/// Totals over the stored videos of a channel. `None` when the channel is
/// unknown or has no videos.
pub fn summary(conn: &Connection, channel_id: &str) -> Result<Option<ChannelSummaryRow>> {
    let sql = "
        SELECT
            c.channel_id,
            c.channel_name,
            COUNT(v.video_id) AS total_videos,
            COALESCE(SUM(v.view_count), 0) AS total_views,
            COALESCE(SUM(v.likes), 0) AS total_likes
        FROM channel c
        JOIN videos v ON v.channel_id = c.channel_id
        WHERE c.channel_id = ?1
        GROUP BY c.channel_id, c.channel_name
    ";

    conn.query_row(sql, params![channel_id], |row| {
        Ok(ChannelSummaryRow {
            channel_id: row.get(0)?,
            channel_name: row.get(1)?,
            total_videos: row.get(2)?,
            total_views: row.get(3)?,
            total_likes: row.get(4)?,
        })
    })
    .optional()
    .context("Failed to summarise channel")
}
