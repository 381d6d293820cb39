use anyhow::{Context, Result};
use rusqlite::{params, Connection};

use super::models::PopularVideoRow;
use crate::domain::NormalizedVideo;

/// Insert a video, or refresh the stored copy when the id is already known.
/// Re-ingesting a channel never duplicates its videos.
pub fn upsert_video(conn: &Connection, channel_id: &str, video: &NormalizedVideo) -> Result<()> {
    let sql = "
        INSERT INTO videos (video_id, channel_id, title, published_at, duration, view_count, likes, comments, type)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
        ON CONFLICT (video_id) DO UPDATE SET
            title = excluded.title,
            duration = excluded.duration,
            view_count = excluded.view_count,
            likes = excluded.likes,
            comments = excluded.comments,
            type = excluded.type
    ";

    conn.execute(
        sql,
        params![
            video.video_id,
            channel_id,
            video.title,
            video.published_at,
            video.duration_seconds,
            video.view_count.unwrap_or(0),
            video.like_count,
            video.comment_count,
            video.category().as_str(),
        ],
    )
    .with_context(|| format!("Failed to insert video {}", video.video_id))?;

    Ok(())
}

/// Videos with strictly more than `min_views` views, most viewed first
pub fn list_popular(conn: &Connection, min_views: i64) -> Result<Vec<PopularVideoRow>> {
    let sql = "
        SELECT v.video_id, v.title, c.channel_name, v.view_count, v.likes, v.comments, v.published_at, v.duration, v.type
        FROM videos v
        JOIN channel c ON c.channel_id = v.channel_id
        WHERE v.view_count > ?1
        ORDER BY v.view_count DESC, v.video_id
    ";

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map(params![min_views], |row| {
            Ok(PopularVideoRow {
                video_id: row.get(0)?,
                title: row.get(1)?,
                channel_name: row.get(2)?,
                view_count: row.get(3)?,
                likes: row.get(4)?,
                comments: row.get(5)?,
                published_at: row.get(6)?,
                duration: row.get(7)?,
                video_type: row.get(8)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()
        .context("Failed to list popular videos")?;

    Ok(rows)
}

pub fn list_ids(conn: &Connection) -> Result<Vec<String>> {
    let mut stmt = conn.prepare("SELECT video_id FROM videos ORDER BY video_id")?;
    let rows = stmt
        .query_map([], |row| row.get(0))?
        .collect::<rusqlite::Result<Vec<String>>>()
        .context("Failed to list video ids")?;

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::{channels, get_connection};
    use crate::test_support::{channel, count_rows, listing, stats, temp_pool};

    fn video(id: &str, duration: &str, views: i64) -> NormalizedVideo {
        NormalizedVideo::new(&listing(id, 3), stats(id, duration, views)).unwrap()
    }

    #[test]
    fn test_upsert_refreshes_instead_of_duplicating() {
        let (_dir, pool) = temp_pool();
        let conn = get_connection(&pool).unwrap();
        channels::insert_if_absent(&conn, &channel("UC1", "Chan")).unwrap();

        upsert_video(&conn, "UC1", &video("a", "PT5M", 100)).unwrap();
        upsert_video(&conn, "UC1", &video("a", "PT5M", 180)).unwrap();

        assert_eq!(count_rows(&pool, "videos"), 1);
        let views: i64 = conn
            .query_row("SELECT view_count FROM videos WHERE video_id = 'a'", [], |r| r.get(0))
            .unwrap();
        assert_eq!(views, 180);
    }

    #[test]
    fn test_stored_type_matches_duration() {
        let (_dir, pool) = temp_pool();
        let conn = get_connection(&pool).unwrap();
        channels::insert_if_absent(&conn, &channel("UC1", "Chan")).unwrap();

        upsert_video(&conn, "UC1", &video("short", "PT60S", 1)).unwrap();
        upsert_video(&conn, "UC1", &video("long", "PT61S", 1)).unwrap();

        let kind = |id: &str| -> String {
            conn.query_row("SELECT type FROM videos WHERE video_id = ?1", [id], |r| r.get(0))
                .unwrap()
        };
        assert_eq!(kind("short"), "Short");
        assert_eq!(kind("long"), "Long");
    }

    #[test]
    fn test_schema_rejects_inconsistent_type() {
        let (_dir, pool) = temp_pool();
        let conn = get_connection(&pool).unwrap();
        channels::insert_if_absent(&conn, &channel("UC1", "Chan")).unwrap();

        let result = conn.execute(
            "INSERT INTO videos (video_id, channel_id, title, published_at, duration, type) VALUES ('x', 'UC1', 't', '2024-01-01T00:00:00Z', 30, 'Long')",
            [],
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_video_requires_existing_channel() {
        let (_dir, pool) = temp_pool();
        let conn = get_connection(&pool).unwrap();

        assert!(upsert_video(&conn, "UC-unknown", &video("a", "PT1M", 1)).is_err());
    }

    #[test]
    fn test_popular_filters_strictly_and_sorts_descending() {
        let (_dir, pool) = temp_pool();
        let conn = get_connection(&pool).unwrap();
        channels::insert_if_absent(&conn, &channel("UC1", "Chan")).unwrap();
        for (id, views) in [("low", 5_000), ("mid", 15_000), ("high", 20_000), ("edge", 10_000)] {
            upsert_video(&conn, "UC1", &video(id, "PT3M", views)).unwrap();
        }

        let popular = list_popular(&conn, 10_000).unwrap();

        let ids: Vec<&str> = popular.iter().map(|v| v.video_id.as_str()).collect();
        assert_eq!(ids, vec!["high", "mid"]);
        assert_eq!(popular[0].channel_name, "Chan");
        assert_eq!(popular[0].view_count, 20_000);
        assert_eq!(popular[0].video_type, "Long");
    }
}
