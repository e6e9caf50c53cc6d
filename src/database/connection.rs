use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use std::str::FromStr;
use std::time::Duration;

use super::migrations::run_migrations;
use crate::config::DatabaseConfig;

/// Inisialisasi database SQLite dengan connection pooling.
///
/// Features:
/// - WAL mode untuk concurrent reads/writes
/// - Foreign keys enforcement
/// - Busy timeout: checkout yang berjalan bersamaan antre di write lock SQLite
pub async fn init_db(config: &DatabaseConfig) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(&config.url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .synchronous(SqliteSynchronous::Normal)
        .foreign_keys(true)
        .busy_timeout(Duration::from_secs(config.busy_timeout_secs));

    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.connect_timeout_secs))
        .idle_timeout(Duration::from_secs(config.idle_timeout_secs))
        .connect_with(options)
        .await?;

    run_migrations(&pool).await?;

    tracing::info!(
        target: "database",
        min = config.min_connections,
        max = config.max_connections,
        url = %config.url,
        "Connection pool initialized"
    );

    Ok(pool)
}

/// Health check untuk database connection
pub async fn health_check(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").fetch_one(pool).await?;
    Ok(())
}
