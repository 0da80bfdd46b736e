//! Bookable venues (the dropdown behind event locations).

use serde::{Deserialize, Serialize};
use sqlx::AnyPool;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Resource {
    pub id: String,
    pub name: String,
}

impl Resource {
    pub async fn list(pool: &AnyPool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Resource>("SELECT id, name FROM resources ORDER BY name")
            .fetch_all(pool)
            .await
    }

    pub async fn create(pool: &AnyPool, name: String) -> Result<Self, sqlx::Error> {
        let id = Uuid::new_v4().to_string();
        sqlx::query("INSERT INTO resources (id, name) VALUES (?, ?)")
            .bind(&id)
            .bind(&name)
            .execute(pool)
            .await?;
        Ok(Resource { id, name })
    }

    pub async fn delete(pool: &AnyPool, id: &str) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM resources WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }
}
