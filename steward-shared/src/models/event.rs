//! Calendar events.
//!
//! `resource` stores the venue *name*, not the resource id. That mirrors the
//! historical data this system inherits; renaming a resource does not rewrite
//! past events.

use serde::{Deserialize, Serialize};
use sqlx::AnyPool;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Event {
    pub id: String,
    pub title: String,
    pub date: String,
    pub description: String,
    pub resource: String,
}

#[derive(Debug, Clone)]
pub struct EventInput {
    pub title: String,
    pub date: String,
    pub description: String,
    pub resource: String,
}

impl Event {
    pub async fn list(pool: &AnyPool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Event>(
            "SELECT id, title, date, description, resource FROM events ORDER BY date DESC",
        )
        .fetch_all(pool)
        .await
    }

    pub async fn create(pool: &AnyPool, data: EventInput) -> Result<Self, sqlx::Error> {
        let id = Uuid::new_v4().to_string();

        sqlx::query(
            "INSERT INTO events (id, title, date, description, resource) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(&data.title)
        .bind(&data.date)
        .bind(&data.description)
        .bind(&data.resource)
        .execute(pool)
        .await?;

        Ok(Event {
            id,
            title: data.title,
            date: data.date,
            description: data.description,
            resource: data.resource,
        })
    }

    pub async fn update(pool: &AnyPool, id: &str, data: EventInput) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE events SET title = ?, date = ?, description = ?, resource = ? WHERE id = ?",
        )
        .bind(&data.title)
        .bind(&data.date)
        .bind(&data.description)
        .bind(&data.resource)
        .bind(id)
        .execute(pool)
        .await?;

        Ok(())
    }

    pub async fn delete(pool: &AnyPool, id: &str) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM events WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }
}
