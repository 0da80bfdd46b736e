//! # Steward Backup Daemon
//!
//! Standalone binary that schedules the daily database backup from the
//! stored settings. Runs alongside the API server; manual backups go through
//! the API, which calls the same backup routine directly.
//!
//! ```bash
//! cargo run -p steward-backup
//! ```

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use steward_backup::backup::BackupConfig;
use steward_backup::scheduler::run_scheduler;
use steward_shared::db::{self, engine::DbConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "steward_backup=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Steward backup daemon v{} starting", env!("CARGO_PKG_VERSION"));

    let db_config = DbConfig::from_env()?;
    let pool = db::create_pool(&db_config).await?;
    db::schema::ensure_schema(&pool, db_config.engine).await?;

    let backup_config = BackupConfig::from_env(&db_config);
    backup_config.log("Backup daemon started");

    tokio::select! {
        result = run_scheduler(&pool, &backup_config) => result?,
        _ = tokio::signal::ctrl_c() => {
            backup_config.log("Backup daemon stopped");
            tracing::info!("Shutdown signal received, exiting");
        }
    }

    Ok(())
}
