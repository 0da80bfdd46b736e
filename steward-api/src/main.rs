//! # Steward API Server
//!
//! REST backend for church membership and finance management. Binds the
//! configured address, bootstraps the schema and seed data on whichever
//! engine is selected, and serves the `/api` surface.
//!
//! ```bash
//! cargo run -p steward-api
//! ```

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use steward_api::app::{build_router, AppState};
use steward_api::config::Config;
use steward_shared::db;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "steward_api=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    tracing::info!(
        "Steward API v{} starting ({} engine)",
        env!("CARGO_PKG_VERSION"),
        config.database.engine.label()
    );

    let pool = db::create_pool(&config.database).await?;
    db::schema::ensure_schema(&pool, config.database.engine).await?;
    db::schema::seed_if_empty(&pool).await?;

    let addr = config.bind_address();
    let state = AppState::new(pool, config);
    let router = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on {addr}");
    axum::serve(listener, router).await?;

    Ok(())
}
