/// Common test utilities for integration tests
///
/// Builds the real router against a fresh in-memory SQLite database with the
/// schema bootstrapped and demo data seeded, plus helpers for driving it
/// with JSON requests.
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt as _;

use steward_api::app::{build_router, AppState};
use steward_api::config::{ApiConfig, Config};
use steward_shared::db::engine::{DbConfig, Engine};
use steward_shared::db::schema;

/// Test context: a seeded in-memory database and the router over it.
pub struct TestContext {
    pub db: sqlx::AnyPool,
    pub app: axum::Router,
    // Holds the upload directory alive for the lifetime of the test.
    _upload_dir: tempfile::TempDir,
}

impl TestContext {
    /// Fresh database, schema, seed data, router.
    ///
    /// The pool is capped at one connection: an in-memory SQLite database
    /// exists per connection, so a second connection would see empty tables.
    pub async fn new() -> anyhow::Result<Self> {
        sqlx::any::install_default_drivers();
        let db = sqlx::any::AnyPoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await?;

        schema::ensure_schema(&db, Engine::Sqlite).await?;
        schema::seed_if_empty(&db).await?;

        let upload_dir = tempfile::tempdir()?;
        let config = Config {
            api: ApiConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
            },
            database: DbConfig {
                engine: Engine::Sqlite,
                url: "sqlite::memory:".to_string(),
                sqlite_path: upload_dir.path().join("absent.sqlite"),
                max_connections: 1,
                acquire_timeout_seconds: 5,
            },
            upload_dir: upload_dir.path().to_path_buf(),
        };

        let state = AppState::new(db.clone(), config);
        let app = build_router(state);

        Ok(TestContext {
            db,
            app,
            _upload_dir: upload_dir,
        })
    }

    /// Sends a request and returns status plus parsed JSON body (Null for an
    /// empty body).
    pub async fn send(
        &self,
        method: &str,
        uri: &str,
        body: Option<Value>,
        headers: &[(&str, &str)],
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }

        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, json)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send("GET", uri, None, &[]).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send("POST", uri, Some(body), &[]).await
    }

    pub async fn put(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send("PUT", uri, Some(body), &[]).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.send("DELETE", uri, None, &[]).await
    }
}
