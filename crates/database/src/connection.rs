//! Database connection management.

use anyhow::{Context, Result};
use sqlx::any::{install_default_drivers, AnyPoolOptions};
use sqlx::AnyPool;
use std::path::Path;
use std::time::Duration;
use tokio::fs;
use tracing::info;

use groundwork_config::DatabaseConfig;

/// Prepare and establish the shared connection pool.
///
/// Speaks Postgres in deployment and SQLite locally and in tests; the URL
/// scheme decides which driver handles the connection.
pub async fn prepare_database(config: &DatabaseConfig) -> Result<AnyPool> {
    // Make sure sqlx Any can talk to SQLite/Postgres before we connect.
    install_default_drivers();

    let url = config.url();
    ensure_sqlite_path(&url).await?;

    let pool = AnyPoolOptions::new()
        .max_connections(config.max_open_conns)
        .min_connections(config.min_idle_conns)
        .max_lifetime(Duration::from_secs(config.conn_lifetime_seconds))
        .idle_timeout(Duration::from_secs(config.conn_lifetime_seconds))
        .connect(&url)
        .await
        .with_context(|| format!("failed to connect to database {}", config.masked_url()))?;

    if url.starts_with("sqlite:") {
        // Foreign keys are off by default in SQLite.
        sqlx::query("PRAGMA foreign_keys = ON")
            .execute(&pool)
            .await
            .context("failed to enable foreign keys for sqlite")?;
    }

    sqlx::query("SELECT 1")
        .fetch_one(&pool)
        .await
        .context("failed to ping database")?;

    info!(url = %config.masked_url(), "database connection established");
    Ok(pool)
}

/// Ensure the SQLite database file and its directory exist.
async fn ensure_sqlite_path(url: &str) -> Result<()> {
    let Some(sqlite_path) = url
        .strip_prefix("sqlite://")
        .or_else(|| url.strip_prefix("sqlite:"))
    else {
        return Ok(());
    };

    if sqlite_path == ":memory:" {
        return Ok(());
    }

    let path = Path::new(sqlite_path);
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).await.with_context(|| {
                format!("failed to create sqlite directory {}", parent.display())
            })?;
        }
    }

    if fs::metadata(path).await.is_err() {
        fs::OpenOptions::new()
            .create(true)
            .write(true)
            .open(path)
            .await
            .with_context(|| format!("failed to create sqlite database file {}", path.display()))?;
    }

    Ok(())
}
