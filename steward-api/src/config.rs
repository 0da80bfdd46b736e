/// Configuration management for the API server
///
/// Loads configuration from environment variables into a type-safe struct.
///
/// # Environment Variables
///
/// - `API_HOST`: host to bind to (default: 0.0.0.0)
/// - `API_PORT`: port to bind to (default: 3000)
/// - `UPLOAD_DIR`: directory for uploaded avatar images (default: public/uploads)
/// - plus the database variables read by [`DbConfig`](steward_shared::db::engine::DbConfig):
///   `DATABASE_URL`, `FORCE_MYSQL`, `FORCE_SQLITE`, `DESKTOP_MODE`, `DATA_DIR`,
///   `DATABASE_MAX_CONNECTIONS`
use std::env;
use std::path::PathBuf;

use steward_shared::db::engine::DbConfig;

/// Complete application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// API server configuration
    pub api: ApiConfig,

    /// Database configuration
    pub database: DbConfig,

    /// Directory where uploaded images are written and served from
    pub upload_dir: PathBuf,
}

/// API server configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host to bind to
    pub host: String,

    /// Port to bind to
    pub port: u16,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is present but unparseable
    /// (e.g. a non-numeric `API_PORT`).
    pub fn from_env() -> anyhow::Result<Self> {
        // Load .env file if present (for development)
        dotenvy::dotenv().ok();

        let api_host = env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let api_port = env::var("API_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()?;

        let upload_dir =
            PathBuf::from(env::var("UPLOAD_DIR").unwrap_or_else(|_| "public/uploads".to_string()));

        Ok(Self {
            api: ApiConfig {
                host: api_host,
                port: api_port,
            },
            database: DbConfig::from_env()?,
            upload_dir,
        })
    }

    /// Returns the server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.api.host, self.api.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use steward_shared::db::engine::Engine;

    #[test]
    fn test_bind_address() {
        let config = Config {
            api: ApiConfig {
                host: "127.0.0.1".to_string(),
                port: 3000,
            },
            database: DbConfig {
                engine: Engine::Sqlite,
                url: "sqlite://data/steward.sqlite?mode=rwc".to_string(),
                sqlite_path: PathBuf::from("data/steward.sqlite"),
                max_connections: 20,
                acquire_timeout_seconds: 5,
            },
            upload_dir: PathBuf::from("public/uploads"),
        };

        assert_eq!(config.bind_address(), "127.0.0.1:3000");
    }
}
