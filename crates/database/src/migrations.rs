//! Database migrations.

use anyhow::{Context, Result};
use sqlx::migrate::MigrationType;
use sqlx::AnyPool;
use tracing::info;

/// Embedded migrations from the crate's `migrations/` directory.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

/// Apply all pending migrations.
pub async fn run_migrations(pool: &AnyPool) -> Result<()> {
    MIGRATOR
        .run(pool)
        .await
        .context("database migrations failed")?;
    info!("database migrations applied");
    Ok(())
}

/// Revert the most recent migration, one step at a time.
pub async fn revert_last_migration(pool: &AnyPool) -> Result<()> {
    let mut versions: Vec<i64> = MIGRATOR
        .iter()
        .filter(|m| !matches!(m.migration_type, MigrationType::ReversibleDown))
        .map(|m| m.version)
        .collect();
    versions.sort_unstable();
    versions.pop();
    let target = versions.last().copied().unwrap_or(0);

    MIGRATOR
        .undo(pool, target)
        .await
        .context("migration revert failed")?;
    info!(target, "database migration reverted");
    Ok(())
}
