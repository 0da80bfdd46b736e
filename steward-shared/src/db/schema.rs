//! Schema bootstrap and first-run seeding.
//!
//! Tables are created with `CREATE TABLE IF NOT EXISTS` at every startup, so
//! bootstrap is idempotent. Dates and timestamps are stored as ISO-8601 TEXT
//! in both engines. No foreign-key constraints are declared: deletes are
//! uniformly permissive across backends and historical donation/expense rows
//! keep their recorded ids even after the referenced user or member is gone.

use sqlx::AnyPool;
use tracing::info;

use super::engine::Engine;

/// Per-table DDL for the given engine.
///
/// SQLite and MySQL differ only in column types (TEXT ids vs VARCHAR keys,
/// REAL vs DOUBLE amounts) and the role/theme constraints.
fn table_ddl(engine: Engine) -> Vec<&'static str> {
    match engine {
        Engine::Sqlite => vec![
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                username TEXT UNIQUE NOT NULL,
                role TEXT NOT NULL CHECK (role IN ('Admin', 'Staff')),
                password TEXT,
                permissions TEXT NOT NULL
            )
            "#,
            r#"
            CREATE TABLE IF NOT EXISTS members (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                email TEXT UNIQUE NOT NULL,
                phone TEXT,
                join_date TEXT NOT NULL,
                avatar_url TEXT,
                address TEXT,
                network TEXT NOT NULL
            )
            "#,
            r#"
            CREATE TABLE IF NOT EXISTS events (
                id TEXT PRIMARY KEY,
                title TEXT NOT NULL,
                date TEXT NOT NULL,
                description TEXT NOT NULL,
                resource TEXT NOT NULL
            )
            "#,
            r#"
            CREATE TABLE IF NOT EXISTS resources (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL UNIQUE
            )
            "#,
            r#"
            CREATE TABLE IF NOT EXISTS donations (
                id TEXT PRIMARY KEY,
                donor_name TEXT NOT NULL,
                member_id TEXT,
                amount REAL NOT NULL,
                date TEXT NOT NULL,
                category TEXT NOT NULL,
                giving_type_id TEXT,
                service_time TEXT,
                recorded_by_id TEXT,
                reference TEXT
            )
            "#,
            r#"
            CREATE TABLE IF NOT EXISTS expenses (
                id TEXT PRIMARY KEY,
                description TEXT NOT NULL,
                amount REAL NOT NULL,
                date TEXT NOT NULL,
                category TEXT NOT NULL,
                recorded_by_id TEXT
            )
            "#,
            r#"
            CREATE TABLE IF NOT EXISTS donation_categories (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL UNIQUE,
                created_at TEXT NOT NULL
            )
            "#,
            r#"
            CREATE TABLE IF NOT EXISTS expense_categories (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL UNIQUE,
                created_at TEXT NOT NULL
            )
            "#,
            r#"
            CREATE TABLE IF NOT EXISTS service_times (
                id TEXT PRIMARY KEY,
                time TEXT NOT NULL UNIQUE,
                created_at TEXT NOT NULL
            )
            "#,
            r#"
            CREATE TABLE IF NOT EXISTS giving_types (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL UNIQUE,
                created_at TEXT NOT NULL
            )
            "#,
            r#"
            CREATE TABLE IF NOT EXISTS networks (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL UNIQUE,
                created_at TEXT NOT NULL
            )
            "#,
            r#"
            CREATE TABLE IF NOT EXISTS settings (
                id TEXT PRIMARY KEY,
                app_name TEXT NOT NULL,
                logo_url TEXT NOT NULL,
                theme TEXT NOT NULL CHECK (theme IN ('light', 'dark')),
                backup_time TEXT NOT NULL,
                backup_enabled INTEGER NOT NULL,
                updated_at TEXT NOT NULL
            )
            "#,
        ],
        Engine::MySql => vec![
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id VARCHAR(64) PRIMARY KEY,
                name VARCHAR(255) NOT NULL,
                username VARCHAR(255) UNIQUE NOT NULL,
                role ENUM('Admin', 'Staff') NOT NULL,
                password TEXT,
                permissions TEXT NOT NULL
            )
            "#,
            r#"
            CREATE TABLE IF NOT EXISTS members (
                id VARCHAR(64) PRIMARY KEY,
                name VARCHAR(255) NOT NULL,
                email VARCHAR(255) UNIQUE NOT NULL,
                phone VARCHAR(255),
                join_date VARCHAR(64) NOT NULL,
                avatar_url TEXT,
                address TEXT,
                network VARCHAR(255) NOT NULL
            )
            "#,
            r#"
            CREATE TABLE IF NOT EXISTS events (
                id VARCHAR(64) PRIMARY KEY,
                title VARCHAR(255) NOT NULL,
                date VARCHAR(64) NOT NULL,
                description TEXT NOT NULL,
                resource VARCHAR(255) NOT NULL
            )
            "#,
            r#"
            CREATE TABLE IF NOT EXISTS resources (
                id VARCHAR(64) PRIMARY KEY,
                name VARCHAR(255) NOT NULL UNIQUE
            )
            "#,
            r#"
            CREATE TABLE IF NOT EXISTS donations (
                id VARCHAR(64) PRIMARY KEY,
                donor_name VARCHAR(255) NOT NULL,
                member_id VARCHAR(64),
                amount DOUBLE NOT NULL,
                date VARCHAR(64) NOT NULL,
                category VARCHAR(255) NOT NULL,
                giving_type_id VARCHAR(64),
                service_time VARCHAR(255),
                recorded_by_id VARCHAR(64),
                reference VARCHAR(255)
            )
            "#,
            r#"
            CREATE TABLE IF NOT EXISTS expenses (
                id VARCHAR(64) PRIMARY KEY,
                description TEXT NOT NULL,
                amount DOUBLE NOT NULL,
                date VARCHAR(64) NOT NULL,
                category VARCHAR(255) NOT NULL,
                recorded_by_id VARCHAR(64)
            )
            "#,
            r#"
            CREATE TABLE IF NOT EXISTS donation_categories (
                id VARCHAR(64) PRIMARY KEY,
                name VARCHAR(255) NOT NULL UNIQUE,
                created_at VARCHAR(64) NOT NULL
            )
            "#,
            r#"
            CREATE TABLE IF NOT EXISTS expense_categories (
                id VARCHAR(64) PRIMARY KEY,
                name VARCHAR(255) NOT NULL UNIQUE,
                created_at VARCHAR(64) NOT NULL
            )
            "#,
            r#"
            CREATE TABLE IF NOT EXISTS service_times (
                id VARCHAR(64) PRIMARY KEY,
                time VARCHAR(255) NOT NULL UNIQUE,
                created_at VARCHAR(64) NOT NULL
            )
            "#,
            r#"
            CREATE TABLE IF NOT EXISTS giving_types (
                id VARCHAR(64) PRIMARY KEY,
                name VARCHAR(255) NOT NULL UNIQUE,
                created_at VARCHAR(64) NOT NULL
            )
            "#,
            r#"
            CREATE TABLE IF NOT EXISTS networks (
                id VARCHAR(64) PRIMARY KEY,
                name VARCHAR(255) NOT NULL UNIQUE,
                created_at VARCHAR(64) NOT NULL
            )
            "#,
            r#"
            CREATE TABLE IF NOT EXISTS settings (
                id VARCHAR(64) PRIMARY KEY,
                app_name VARCHAR(255) NOT NULL,
                logo_url VARCHAR(500) NOT NULL,
                theme ENUM('light', 'dark') NOT NULL,
                backup_time VARCHAR(10) NOT NULL,
                backup_enabled BIGINT NOT NULL,
                updated_at VARCHAR(64) NOT NULL
            )
            "#,
        ],
    }
}

/// Creates all tables if they do not exist and inserts the default settings
/// row. Safe to call at every startup.
pub async fn ensure_schema(pool: &AnyPool, engine: Engine) -> Result<(), sqlx::Error> {
    for ddl in table_ddl(engine) {
        sqlx::query(ddl).execute(pool).await?;
    }

    let insert_ignore = match engine {
        Engine::Sqlite => {
            "INSERT OR IGNORE INTO settings \
             (id, app_name, logo_url, theme, backup_time, backup_enabled, updated_at) \
             VALUES ('global', 'Steward', '/logo.png', 'dark', '02:00', 1, ?)"
        }
        Engine::MySql => {
            "INSERT IGNORE INTO settings \
             (id, app_name, logo_url, theme, backup_time, backup_enabled, updated_at) \
             VALUES ('global', 'Steward', '/logo.png', 'dark', '02:00', 1, ?)"
        }
    };
    sqlx::query(insert_ignore)
        .bind(chrono::Utc::now().to_rfc3339())
        .execute(pool)
        .await?;

    Ok(())
}

/// Seeds the demo admin account and the dropdown reference data, but only
/// when the users table is empty (first run against a fresh database).
///
/// The admin password is stored in plaintext on purpose: pre-seeded demo
/// accounts exercise the legacy credential path in
/// [`crate::auth::password::verify_password`].
pub async fn seed_if_empty(pool: &AnyPool) -> Result<(), sqlx::Error> {
    let (user_count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await?;
    if user_count > 0 {
        return Ok(());
    }

    info!("Empty database detected, seeding demo data");

    let default_permissions = r#"{"dashboard":true,"members":true,"donations":true,"expenses":true,"events":true,"reports":true,"users":true,"settings":true}"#;
    sqlx::query(
        "INSERT INTO users (id, name, username, role, password, permissions) \
         VALUES ('admin-1', 'Administrator', 'admin', 'Admin', ?, ?)",
    )
    .bind("admin123")
    .bind(default_permissions)
    .execute(pool)
    .await?;

    let now = chrono::Utc::now().to_rfc3339();
    let lookups: &[(&str, &str, &[(&str, &str)])] = &[
        (
            "donation_categories",
            "name",
            &[
                ("tithe", "Tithe"),
                ("offering", "Offering"),
                ("special", "Special Offering"),
            ],
        ),
        (
            "expense_categories",
            "name",
            &[
                ("utilities", "Utilities"),
                ("maintenance", "Maintenance"),
                ("supplies", "Office Supplies"),
                ("events", "Events"),
            ],
        ),
        (
            "giving_types",
            "name",
            &[
                ("cash", "Cash"),
                ("check", "Check"),
                ("online", "Online"),
                ("transfer", "Bank Transfer"),
            ],
        ),
        (
            "networks",
            "name",
            &[
                ("main", "Main Campus"),
                ("north", "North District"),
                ("south", "South District"),
            ],
        ),
    ];

    for (table, column, rows) in lookups {
        for (id, label) in rows.iter() {
            let sql = format!(
                "INSERT INTO {table} (id, {column}, created_at) VALUES (?, ?, ?)"
            );
            sqlx::query(&sql)
                .bind(*id)
                .bind(*label)
                .bind(&now)
                .execute(pool)
                .await?;
        }
    }

    for (id, name) in [("res1", "Main Hall"), ("res2", "Community Room"), ("res3", "Chapel")] {
        sqlx::query("INSERT INTO resources (id, name) VALUES (?, ?)")
            .bind(id)
            .bind(name)
            .execute(pool)
            .await?;
    }

    info!("Seed data inserted");
    Ok(())
}
