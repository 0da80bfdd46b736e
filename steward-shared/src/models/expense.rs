//! Expense records.

use serde::{Deserialize, Serialize};
use sqlx::AnyPool;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Expense {
    pub id: String,
    pub description: String,
    pub amount: f64,
    pub date: String,
    pub category: String,
    pub recorded_by_id: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ExpenseInput {
    pub description: String,
    pub amount: f64,
    pub date: String,
    pub category: String,
    pub recorded_by_id: Option<String>,
}

impl Expense {
    pub async fn list(pool: &AnyPool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Expense>(
            "SELECT id, description, amount, date, category, recorded_by_id \
             FROM expenses ORDER BY date DESC",
        )
        .fetch_all(pool)
        .await
    }

    /// Date-ranged listing for reports; inclusive ISO string bounds.
    pub async fn list_between(
        pool: &AnyPool,
        start_date: Option<&str>,
        end_date: Option<&str>,
    ) -> Result<Vec<Self>, sqlx::Error> {
        let mut sql = String::from(
            "SELECT id, description, amount, date, category, recorded_by_id \
             FROM expenses WHERE 1=1",
        );
        if start_date.is_some() {
            sql.push_str(" AND date >= ?");
        }
        if end_date.is_some() {
            sql.push_str(" AND date <= ?");
        }
        sql.push_str(" ORDER BY date DESC");

        let mut query = sqlx::query_as::<_, Expense>(&sql);
        if let Some(start) = start_date {
            query = query.bind(start.to_string());
        }
        if let Some(end) = end_date {
            query = query.bind(end.to_string());
        }
        query.fetch_all(pool).await
    }

    pub async fn create(pool: &AnyPool, data: ExpenseInput) -> Result<Self, sqlx::Error> {
        let id = Uuid::new_v4().to_string();

        sqlx::query(
            "INSERT INTO expenses (id, description, amount, date, category, recorded_by_id) \
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(&data.description)
        .bind(data.amount)
        .bind(&data.date)
        .bind(&data.category)
        .bind(&data.recorded_by_id)
        .execute(pool)
        .await?;

        Ok(Expense {
            id,
            description: data.description,
            amount: data.amount,
            date: data.date,
            category: data.category,
            recorded_by_id: data.recorded_by_id,
        })
    }

    pub async fn update(pool: &AnyPool, id: &str, data: ExpenseInput) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE expenses SET description = ?, amount = ?, date = ?, category = ?, \
             recorded_by_id = ? WHERE id = ?",
        )
        .bind(&data.description)
        .bind(data.amount)
        .bind(&data.date)
        .bind(&data.category)
        .bind(&data.recorded_by_id)
        .bind(id)
        .execute(pool)
        .await?;

        Ok(())
    }

    pub async fn delete(pool: &AnyPool, id: &str) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM expenses WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }
}
