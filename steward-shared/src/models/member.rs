//! Church members.
//!
//! `network` is a free-form sub-group label (Youth, Main Campus, ...) chosen
//! from the `networks` lookup table but stored by value.

use serde::{Deserialize, Serialize};
use sqlx::AnyPool;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Member {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    /// ISO-8601 date the member joined.
    pub join_date: String,
    pub avatar_url: Option<String>,
    pub address: Option<String>,
    pub network: String,
}

/// Field set for create and full-row update.
#[derive(Debug, Clone)]
pub struct MemberInput {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub join_date: String,
    pub avatar_url: Option<String>,
    pub address: Option<String>,
    pub network: String,
}

impl Member {
    pub async fn list(pool: &AnyPool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Member>(
            "SELECT id, name, email, phone, join_date, avatar_url, address, network \
             FROM members ORDER BY name",
        )
        .fetch_all(pool)
        .await
    }

    pub async fn create(pool: &AnyPool, data: MemberInput) -> Result<Self, sqlx::Error> {
        let id = Uuid::new_v4().to_string();

        sqlx::query(
            "INSERT INTO members (id, name, email, phone, join_date, avatar_url, address, network) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(&data.name)
        .bind(&data.email)
        .bind(&data.phone)
        .bind(&data.join_date)
        .bind(&data.avatar_url)
        .bind(&data.address)
        .bind(&data.network)
        .execute(pool)
        .await?;

        Ok(Member {
            id,
            name: data.name,
            email: data.email,
            phone: data.phone,
            join_date: data.join_date,
            avatar_url: data.avatar_url,
            address: data.address,
            network: data.network,
        })
    }

    pub async fn update(pool: &AnyPool, id: &str, data: MemberInput) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE members SET name = ?, email = ?, phone = ?, join_date = ?, \
             avatar_url = ?, address = ?, network = ? WHERE id = ?",
        )
        .bind(&data.name)
        .bind(&data.email)
        .bind(&data.phone)
        .bind(&data.join_date)
        .bind(&data.avatar_url)
        .bind(&data.address)
        .bind(&data.network)
        .bind(id)
        .execute(pool)
        .await?;

        Ok(())
    }

    pub async fn delete(pool: &AnyPool, id: &str) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM members WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }
}
