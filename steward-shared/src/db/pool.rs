//! Connection pool management.
//!
//! Both engines sit behind a single `sqlx::AnyPool`; every query in the
//! models layer uses `?` placeholders, which SQLite and MySQL share. The
//! engine only matters for DDL and the settings upsert (see `schema.rs` and
//! `models::settings`).

use std::time::Duration;

use sqlx::any::AnyPoolOptions;
use sqlx::AnyPool;
use tracing::{debug, info};

use super::engine::{DbConfig, Engine};

/// Creates the connection pool for the configured engine.
///
/// For SQLite this also creates the data directory if needed and switches
/// the journal to WAL mode. A health check runs before the pool is returned.
pub async fn create_pool(config: &DbConfig) -> Result<AnyPool, sqlx::Error> {
    sqlx::any::install_default_drivers();

    if config.engine == Engine::Sqlite {
        if let Some(parent) = config.sqlite_path.parent() {
            std::fs::create_dir_all(parent).map_err(sqlx::Error::Io)?;
        }
    }

    info!(
        engine = config.engine.label(),
        max_connections = config.max_connections,
        "Creating database connection pool"
    );

    let pool = AnyPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_seconds))
        .connect(&config.url)
        .await?;

    if config.engine == Engine::Sqlite {
        sqlx::query("PRAGMA journal_mode = WAL").execute(&pool).await?;
        debug!("Enabled WAL journal mode");
    }

    health_check(&pool).await?;

    info!("Database connection pool ready");
    Ok(pool)
}

/// Verifies the database is reachable with a trivial query.
pub async fn health_check(pool: &AnyPool) -> Result<(), sqlx::Error> {
    let row: (i64,) = sqlx::query_as("SELECT 1").fetch_one(pool).await?;
    if row.0 == 1 {
        Ok(())
    } else {
        Err(sqlx::Error::Protocol(
            "health check returned unexpected value".into(),
        ))
    }
}
