//! Dropdown lookup tables.
//!
//! Five tables share one shape (id, unique label, created_at); they differ
//! only in table name and, for service times, the label column. One enum
//! carries those two facts so the CRUD functions are written once. Table and
//! column names come from the enum, never from request input.

use serde::{Deserialize, Serialize};
use sqlx::AnyPool;
use uuid::Uuid;

/// The lookup table a request addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupTable {
    DonationCategories,
    ExpenseCategories,
    ServiceTimes,
    GivingTypes,
    Networks,
}

impl LookupTable {
    pub fn table(&self) -> &'static str {
        match self {
            LookupTable::DonationCategories => "donation_categories",
            LookupTable::ExpenseCategories => "expense_categories",
            LookupTable::ServiceTimes => "service_times",
            LookupTable::GivingTypes => "giving_types",
            LookupTable::Networks => "networks",
        }
    }

    /// Service times label their rows `time`; everything else uses `name`.
    pub fn label_column(&self) -> &'static str {
        match self {
            LookupTable::ServiceTimes => "time",
            _ => "name",
        }
    }
}

/// A row from any lookup table, label normalized to one field name.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct LookupEntry {
    pub id: String,
    pub label: String,
    pub created_at: String,
}

impl LookupEntry {
    pub async fn list(pool: &AnyPool, table: LookupTable) -> Result<Vec<Self>, sqlx::Error> {
        let sql = format!(
            "SELECT id, {col} AS label, created_at FROM {table} ORDER BY {col}",
            col = table.label_column(),
            table = table.table(),
        );
        sqlx::query_as::<_, LookupEntry>(&sql).fetch_all(pool).await
    }

    pub async fn create(
        pool: &AnyPool,
        table: LookupTable,
        label: String,
    ) -> Result<Self, sqlx::Error> {
        let id = Uuid::new_v4().to_string();
        let created_at = chrono::Utc::now().to_rfc3339();

        let sql = format!(
            "INSERT INTO {table} (id, {col}, created_at) VALUES (?, ?, ?)",
            col = table.label_column(),
            table = table.table(),
        );
        sqlx::query(&sql)
            .bind(&id)
            .bind(&label)
            .bind(&created_at)
            .execute(pool)
            .await?;

        Ok(LookupEntry { id, label, created_at })
    }

    pub async fn update(
        pool: &AnyPool,
        table: LookupTable,
        id: &str,
        label: &str,
    ) -> Result<(), sqlx::Error> {
        let sql = format!(
            "UPDATE {table} SET {col} = ? WHERE id = ?",
            col = table.label_column(),
            table = table.table(),
        );
        sqlx::query(&sql).bind(label).bind(id).execute(pool).await?;
        Ok(())
    }

    pub async fn delete(pool: &AnyPool, table: LookupTable, id: &str) -> Result<(), sqlx::Error> {
        let sql = format!("DELETE FROM {table} WHERE id = ?", table = table.table());
        sqlx::query(&sql).bind(id).execute(pool).await?;
        Ok(())
    }
}
