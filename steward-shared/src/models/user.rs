//! User accounts.
//!
//! # Schema
//!
//! ```sql
//! CREATE TABLE users (
//!     id TEXT PRIMARY KEY,
//!     name TEXT NOT NULL,
//!     username TEXT UNIQUE NOT NULL,
//!     role TEXT NOT NULL CHECK (role IN ('Admin', 'Staff')),
//!     password TEXT,
//!     permissions TEXT NOT NULL
//! );
//! ```
//!
//! `permissions` is a serialized JSON map of feature-flag booleans; gating is
//! application convention, not a relational structure. `password` holds a
//! bcrypt hash, or plaintext for legacy demo rows (see `auth::password`).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use sqlx::AnyPool;
use uuid::Uuid;

/// Feature-flag map attached to each user.
pub type Permissions = BTreeMap<String, bool>;

/// A user account row.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: String,
    pub name: String,
    pub username: String,
    /// `Admin` or `Staff`.
    pub role: String,
    /// Stored credential: bcrypt hash, legacy plaintext, or absent.
    pub password: Option<String>,
    /// JSON-serialized [`Permissions`].
    pub permissions: String,
}

/// Input for creating a user. `password` must already be in storable form
/// (the API layer hashes before calling in).
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub name: String,
    pub username: String,
    pub role: String,
    pub password: Option<String>,
    pub permissions: Permissions,
}

/// Input for updating a user. A `None` password keeps the stored one.
#[derive(Debug, Clone)]
pub struct UpdateUser {
    pub name: String,
    pub username: String,
    pub role: String,
    pub password: Option<String>,
    pub permissions: Permissions,
}

impl User {
    /// Deserializes the permissions column; malformed JSON yields an empty
    /// map rather than failing the read.
    pub fn permissions_map(&self) -> Permissions {
        serde_json::from_str(&self.permissions).unwrap_or_default()
    }

    /// True when the stored role grants administrative actions.
    pub fn is_admin(&self) -> bool {
        self.role == "Admin"
    }

    pub async fn list(pool: &AnyPool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            "SELECT id, name, username, role, password, permissions FROM users ORDER BY name",
        )
        .fetch_all(pool)
        .await
    }

    pub async fn find_by_id(pool: &AnyPool, id: &str) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            "SELECT id, name, username, role, password, permissions FROM users WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    pub async fn find_by_username(
        pool: &AnyPool,
        username: &str,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            "SELECT id, name, username, role, password, permissions FROM users WHERE username = ?",
        )
        .bind(username)
        .fetch_optional(pool)
        .await
    }

    pub async fn create(pool: &AnyPool, data: CreateUser) -> Result<Self, sqlx::Error> {
        let id = Uuid::new_v4().to_string();
        let permissions =
            serde_json::to_string(&data.permissions).unwrap_or_else(|_| "{}".to_string());

        sqlx::query(
            "INSERT INTO users (id, name, username, role, password, permissions) \
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(&data.name)
        .bind(&data.username)
        .bind(&data.role)
        .bind(&data.password)
        .bind(&permissions)
        .execute(pool)
        .await?;

        Ok(User {
            id,
            name: data.name,
            username: data.username,
            role: data.role,
            password: data.password,
            permissions,
        })
    }

    /// Full-row update. `COALESCE` keeps the stored password when the input
    /// carries none, so edits from the admin UI never blank a credential.
    pub async fn update(pool: &AnyPool, id: &str, data: UpdateUser) -> Result<(), sqlx::Error> {
        let permissions =
            serde_json::to_string(&data.permissions).unwrap_or_else(|_| "{}".to_string());

        sqlx::query(
            "UPDATE users SET name = ?, username = ?, role = ?, \
             password = COALESCE(?, password), permissions = ? WHERE id = ?",
        )
        .bind(&data.name)
        .bind(&data.username)
        .bind(&data.role)
        .bind(&data.password)
        .bind(&permissions)
        .bind(id)
        .execute(pool)
        .await?;

        Ok(())
    }

    pub async fn delete(pool: &AnyPool, id: &str) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }
}
