use anyhow::{Context, Result};
use rusqlite::Connection;

use super::connection::{DbPool, get_connection};

const BOOTSTRAP_TABLE: &str = "channel";

/// Run the bundled schema script unless the database already has its tables.
/// Returns whether the script was applied.
pub fn ensure_schema(conn: &Connection) -> Result<bool> {
    if table_exists(conn, BOOTSTRAP_TABLE)? {
        log::debug!("Schema already present, skipping bootstrap");
        return Ok(false);
    }

    apply_schema(conn)?;
    log::info!("Database schema created");
    Ok(true)
}

/// Bootstrap through a pooled connection, returned to the pool before this returns
pub fn ensure_pool_schema(pool: &DbPool) -> Result<bool> {
    let conn = get_connection(pool)?;
    ensure_schema(&conn)
}

fn table_exists(conn: &Connection, name: &str) -> Result<bool> {
    let sql = "SELECT EXISTS (SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1)";
    conn.query_row(sql, [name], |row| row.get(0))
        .context("Failed to check for existing schema")
}

fn apply_schema(conn: &Connection) -> Result<()> {
    let schema_sql = include_str!("schema.sql");
    let statements = split_sql_statements(schema_sql);
    let tx = conn.unchecked_transaction()?;

    for (idx, statement) in statements.iter().enumerate() {
        execute_sql(&tx, statement)
            .with_context(|| format!("Failed to execute statement {}", idx + 1))?;
    }

    tx.commit().context("Failed to commit schema bootstrap")
}

fn split_sql_statements(sql: &str) -> Vec<String> {
    sql.split(';')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn execute_sql(conn: &Connection, sql: &str) -> Result<()> {
    conn.execute(sql, [])
        .context("Failed to execute SQL statement")
        .map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bootstrap_runs_once() {
        let conn = Connection::open_in_memory().unwrap();

        assert!(ensure_schema(&conn).unwrap());
        assert!(!ensure_schema(&conn).unwrap());

        for table in ["channel", "videos", "metrics", "video_stats"] {
            assert!(table_exists(&conn, table).unwrap(), "{table} should exist");
        }
    }

    #[test]
    fn test_existing_database_is_left_untouched() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("CREATE TABLE channel (channel_id TEXT PRIMARY KEY);")
            .unwrap();

        assert!(!ensure_schema(&conn).unwrap());
        assert!(!table_exists(&conn, "videos").unwrap());
    }

    #[test]
    fn test_pool_bootstrap_creates_schema_once() {
        let dir = tempfile::TempDir::new().unwrap();
        let settings = crate::config::DatabaseSettings {
            path: dir.path().join("pool.db").to_string_lossy().into_owned(),
            ..crate::config::DatabaseSettings::default()
        };
        let pool = crate::database::create_pool(&settings).unwrap();

        assert!(ensure_pool_schema(&pool).unwrap());
        assert!(!ensure_pool_schema(&pool).unwrap());

        let conn = get_connection(&pool).unwrap();
        assert!(table_exists(&conn, "video_stats").unwrap());
    }

    #[test]
    fn test_split_skips_blank_statements() {
        let statements = split_sql_statements("CREATE TABLE a (x);\n\n;CREATE TABLE b (y);\n");
        assert_eq!(statements, vec!["CREATE TABLE a (x)", "CREATE TABLE b (y)"]);
    }
}
