use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};

use super::models::PerformancePointRow;
use crate::domain::VideoStatsRecord;

pub fn insert_stat(
    conn: &Connection,
    record: &VideoStatsRecord,
    checked_at: DateTime<Utc>,
) -> Result<()> {
    let sql = "INSERT INTO video_stats (video_id, view_count, likes, comments, checked_at) VALUES (?1, ?2, ?3, ?4, ?5)";

    conn.execute(
        sql,
        params![
            record.video_id,
            record.view_count.unwrap_or(0),
            record.like_count,
            record.comment_count,
            checked_at
        ],
    )
    .with_context(|| format!("Failed to insert stats for video {}", record.video_id))?;

    Ok(())
}

/// Full time series of one video, oldest check first
pub fn list_for_video(conn: &Connection, video_id: &str) -> Result<Vec<PerformancePointRow>> {
    let sql = "
        SELECT s.video_id, v.title, s.checked_at, s.view_count, s.likes, s.comments
        FROM video_stats s
        JOIN videos v ON v.video_id = s.video_id
        WHERE s.video_id = ?1
        ORDER BY s.checked_at ASC, s.id ASC
    ";

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map(params![video_id], |row| {
            Ok(PerformancePointRow {
                video_id: row.get(0)?,
                title: row.get(1)?,
                checked_at: row.get(2)?,
                view_count: row.get(3)?,
                likes: row.get(4)?,
                comments: row.get(5)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()
        .context("Failed to list video performance")?;

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::{channels, get_connection, videos};
    use crate::domain::NormalizedVideo;
    use crate::test_support::{channel, listing, published, stats, temp_pool};

    #[test]
    fn test_series_is_ordered_by_check_date() {
        let (_dir, pool) = temp_pool();
        let conn = get_connection(&pool).unwrap();
        channels::insert_if_absent(&conn, &channel("UC1", "Chan")).unwrap();
        let video = NormalizedVideo::new(&listing("a", 1), stats("a", "PT4M", 10)).unwrap();
        videos::upsert_video(&conn, "UC1", &video).unwrap();

        insert_stat(&conn, &stats("a", "PT4M", 300), published(20)).unwrap();
        insert_stat(&conn, &stats("a", "PT4M", 100), published(5)).unwrap();
        insert_stat(&conn, &stats("a", "PT4M", 200), published(10)).unwrap();

        let series = list_for_video(&conn, "a").unwrap();

        let views: Vec<i64> = series.iter().map(|p| p.view_count).collect();
        assert_eq!(views, vec![100, 200, 300]);
        assert_eq!(series[0].title, "Title of a");
        assert_eq!(series[0].checked_at, published(5));
    }

    #[test]
    fn test_unknown_video_has_empty_series() {
        let (_dir, pool) = temp_pool();
        let conn = get_connection(&pool).unwrap();

        assert!(list_for_video(&conn, "missing").unwrap().is_empty());
    }
}
