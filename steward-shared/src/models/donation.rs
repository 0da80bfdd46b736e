//! Donation records.
//!
//! `donor_name` is a denormalized copy of the member name at recording time.
//! `service_time` is free text rather than a key into the `service_times`
//! lookup; recorded values can drift from the dropdown list, and the reports
//! layer buckets blanks under "Unknown Service Time". Kept as-is from the
//! inherited data model.

use serde::{Deserialize, Serialize};
use sqlx::AnyPool;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Donation {
    pub id: String,
    pub donor_name: String,
    pub member_id: Option<String>,
    pub amount: f64,
    pub date: String,
    pub category: String,
    pub giving_type_id: Option<String>,
    pub service_time: Option<String>,
    pub recorded_by_id: Option<String>,
    pub reference: Option<String>,
}

#[derive(Debug, Clone)]
pub struct DonationInput {
    pub donor_name: String,
    pub member_id: Option<String>,
    pub amount: f64,
    pub date: String,
    pub category: String,
    pub giving_type_id: Option<String>,
    pub service_time: Option<String>,
    pub recorded_by_id: Option<String>,
    pub reference: Option<String>,
}

const COLUMNS: &str = "id, donor_name, member_id, amount, date, category, \
                       giving_type_id, service_time, recorded_by_id, reference";

impl Donation {
    pub async fn list(pool: &AnyPool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Donation>(&format!(
            "SELECT {COLUMNS} FROM donations ORDER BY date DESC"
        ))
        .fetch_all(pool)
        .await
    }

    /// Date-ranged listing for reports. Bounds are inclusive ISO strings;
    /// either side may be absent.
    pub async fn list_between(
        pool: &AnyPool,
        start_date: Option<&str>,
        end_date: Option<&str>,
    ) -> Result<Vec<Self>, sqlx::Error> {
        let mut sql = format!("SELECT {COLUMNS} FROM donations WHERE 1=1");
        if start_date.is_some() {
            sql.push_str(" AND date >= ?");
        }
        if end_date.is_some() {
            sql.push_str(" AND date <= ?");
        }
        sql.push_str(" ORDER BY date DESC");

        let mut query = sqlx::query_as::<_, Donation>(&sql);
        if let Some(start) = start_date {
            query = query.bind(start.to_string());
        }
        if let Some(end) = end_date {
            query = query.bind(end.to_string());
        }
        query.fetch_all(pool).await
    }

    /// Distinct non-blank service time labels actually recorded on donations,
    /// used to populate the reports filter. NULL and empty values are both
    /// excluded; the aggregation buckets those as "Unknown Service Time".
    pub async fn distinct_service_times(pool: &AnyPool) -> Result<Vec<String>, sqlx::Error> {
        let rows: Vec<(String,)> = sqlx::query_as(
            "SELECT DISTINCT service_time FROM donations \
             WHERE service_time IS NOT NULL AND service_time != ''",
        )
        .fetch_all(pool)
        .await?;
        Ok(rows.into_iter().map(|(s,)| s).collect())
    }

    pub async fn create(pool: &AnyPool, data: DonationInput) -> Result<Self, sqlx::Error> {
        let id = Uuid::new_v4().to_string();

        sqlx::query(&format!(
            "INSERT INTO donations ({COLUMNS}) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"
        ))
        .bind(&id)
        .bind(&data.donor_name)
        .bind(&data.member_id)
        .bind(data.amount)
        .bind(&data.date)
        .bind(&data.category)
        .bind(&data.giving_type_id)
        .bind(&data.service_time)
        .bind(&data.recorded_by_id)
        .bind(&data.reference)
        .execute(pool)
        .await?;

        Ok(Donation {
            id,
            donor_name: data.donor_name,
            member_id: data.member_id,
            amount: data.amount,
            date: data.date,
            category: data.category,
            giving_type_id: data.giving_type_id,
            service_time: data.service_time,
            recorded_by_id: data.recorded_by_id,
            reference: data.reference,
        })
    }

    pub async fn update(pool: &AnyPool, id: &str, data: DonationInput) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE donations SET donor_name = ?, member_id = ?, amount = ?, date = ?, \
             category = ?, giving_type_id = ?, service_time = ?, recorded_by_id = ?, \
             reference = ? WHERE id = ?",
        )
        .bind(&data.donor_name)
        .bind(&data.member_id)
        .bind(data.amount)
        .bind(&data.date)
        .bind(&data.category)
        .bind(&data.giving_type_id)
        .bind(&data.service_time)
        .bind(&data.recorded_by_id)
        .bind(&data.reference)
        .bind(id)
        .execute(pool)
        .await?;

        Ok(())
    }

    pub async fn delete(pool: &AnyPool, id: &str) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM donations WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }
}
