//! Database layer: engine selection, pool construction, schema bootstrap.

pub mod engine;
pub mod pool;
pub mod schema;

pub use engine::{DbConfig, Engine};
pub use pool::{create_pool, health_check};

use sqlx::AnyPool;

/// Clears all transactional tables (expenses, donations, events, members)
/// inside a single transaction. User accounts and settings are preserved.
///
/// The deletes roll back as a unit if any statement fails.
pub async fn reset_system_data(pool: &AnyPool) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM expenses").execute(&mut *tx).await?;
    sqlx::query("DELETE FROM donations").execute(&mut *tx).await?;
    sqlx::query("DELETE FROM events").execute(&mut *tx).await?;
    sqlx::query("DELETE FROM members").execute(&mut *tx).await?;

    tx.commit().await?;
    Ok(())
}
