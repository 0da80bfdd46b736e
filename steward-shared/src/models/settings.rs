//! Application settings: a single row keyed `'global'`.
//!
//! Read at startup (backup scheduler) and through the settings endpoint.
//! Saving is an upsert, which is the one place besides DDL where the two
//! engines need different SQL.

use serde::{Deserialize, Serialize};
use sqlx::AnyPool;

use crate::db::engine::Engine;

#[derive(Debug, Clone, sqlx::FromRow)]
struct SettingsRow {
    app_name: String,
    logo_url: String,
    theme: String,
    backup_time: String,
    backup_enabled: i64,
}

/// The settings record as the application and the wire see it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub app_name: String,
    pub logo_url: String,
    /// `light` or `dark`.
    pub theme: String,
    /// Daily backup trigger, `HH:MM` local time.
    pub backup_time: String,
    pub backup_enabled: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            app_name: "Steward".to_string(),
            logo_url: "/logo.png".to_string(),
            theme: "dark".to_string(),
            backup_time: "02:00".to_string(),
            backup_enabled: true,
        }
    }
}

impl Settings {
    /// Loads the global settings row, falling back to defaults when the row
    /// is missing (fresh database before bootstrap).
    pub async fn load(pool: &AnyPool) -> Result<Self, sqlx::Error> {
        let row = sqlx::query_as::<_, SettingsRow>(
            "SELECT app_name, logo_url, theme, backup_time, backup_enabled \
             FROM settings WHERE id = ?",
        )
        .bind("global")
        .fetch_optional(pool)
        .await?;

        Ok(match row {
            Some(row) => Settings {
                app_name: row.app_name,
                logo_url: row.logo_url,
                theme: row.theme,
                backup_time: row.backup_time,
                backup_enabled: row.backup_enabled != 0,
            },
            None => Settings::default(),
        })
    }

    /// Upserts the global settings row and bumps `updated_at`.
    pub async fn save(&self, pool: &AnyPool, engine: Engine) -> Result<(), sqlx::Error> {
        let updated_at = chrono::Utc::now().to_rfc3339();
        let enabled: i64 = if self.backup_enabled { 1 } else { 0 };

        let sql = match engine {
            Engine::Sqlite => {
                "INSERT OR REPLACE INTO settings \
                 (id, app_name, logo_url, theme, backup_time, backup_enabled, updated_at) \
                 VALUES ('global', ?, ?, ?, ?, ?, ?)"
            }
            Engine::MySql => {
                "INSERT INTO settings \
                 (id, app_name, logo_url, theme, backup_time, backup_enabled, updated_at) \
                 VALUES ('global', ?, ?, ?, ?, ?, ?) \
                 ON DUPLICATE KEY UPDATE app_name = VALUES(app_name), \
                 logo_url = VALUES(logo_url), theme = VALUES(theme), \
                 backup_time = VALUES(backup_time), backup_enabled = VALUES(backup_enabled), \
                 updated_at = VALUES(updated_at)"
            }
        };

        sqlx::query(sql)
            .bind(&self.app_name)
            .bind(&self.logo_url)
            .bind(&self.theme)
            .bind(&self.backup_time)
            .bind(enabled)
            .bind(&updated_at)
            .execute(pool)
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.backup_time, "02:00");
        assert!(settings.backup_enabled);
        assert_eq!(settings.theme, "dark");
    }

    #[test]
    fn test_wire_shape_is_camel_case() {
        let json = serde_json::to_value(Settings::default()).unwrap();
        assert!(json.get("appName").is_some());
        assert!(json.get("backupEnabled").is_some());
        assert!(json.get("app_name").is_none());
    }
}
