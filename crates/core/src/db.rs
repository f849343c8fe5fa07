//! Connection pool setup
//!
//! The pool is the only handle shared between requests. Each query checks a
//! connection out of it and returns it when dropped.

use std::path::Path;
use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};

use crate::Result;

/// Open a pool for the given `sqlite://` URL and apply pending migrations
pub async fn connect(url: &str, max_connections: u32) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(url)?;
    open(options, max_connections).await
}

/// Open a pool for a database file on disk and apply pending migrations
pub async fn connect_path(path: &Path, max_connections: u32) -> Result<SqlitePool> {
    open(SqliteConnectOptions::new().filename(path), max_connections).await
}

async fn open(options: SqliteConnectOptions, max_connections: u32) -> Result<SqlitePool> {
    let options = options
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal);

    // Ensure parent directory exists
    if let Some(parent) = options.get_filename().parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections.max(1))
        .connect_with(options)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;
    tracing::debug!("Database migrations applied");

    Ok(pool)
}

/// Round-trip a trivial query to confirm the database answers
pub async fn ping(pool: &SqlitePool) -> Result<()> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}
