/// Application state and router builder
///
/// # Example
///
/// ```no_run
/// use steward_api::{app::{self, AppState}, config::Config};
/// use steward_shared::db;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = db::create_pool(&config.database).await?;
/// let state = AppState::new(pool, config);
/// let router = app::build_router(state);
/// # Ok(())
/// # }
/// ```
use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Extension, Router,
};
use sqlx::AnyPool;
use tower_http::{
    cors::CorsLayer,
    services::ServeDir,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use steward_shared::db::engine::Engine;
use steward_shared::models::lookup::LookupTable;

use crate::config::Config;
use crate::routes;

/// Shared application state
///
/// Cloned into each request handler via Axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: AnyPool,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates new application state
    pub fn new(db: AnyPool, config: Config) -> Self {
        Self {
            db,
            config: Arc::new(config),
        }
    }

    /// The engine the pool was opened against
    pub fn engine(&self) -> Engine {
        self.config.database.engine
    }
}

/// One router per lookup table; the table identity travels as an extension
/// so the five groups share a single set of handlers.
fn lookup_routes(table: LookupTable) -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(routes::lookups::list)
                .post(routes::lookups::create)
                .put(routes::lookups::update)
                .delete(routes::lookups::remove),
        )
        .layer(Extension(table))
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Architecture
///
/// ```text
/// /
/// ├── /uploads/*                      # static uploaded images
/// └── /api/
///     ├── GET  /health
///     ├── POST /auth                  # login
///     ├── GET/POST/PUT/DELETE /members, /events, /donations, /expenses, /users
///     ├── GET/POST/DELETE /resources
///     ├── GET/POST/PUT/DELETE /donation-categories, /expense-categories,
///     │                        /service-times, /giving-types, /networks
///     ├── GET/POST /settings
///     ├── GET  /reports
///     ├── POST /reset
///     ├── GET/POST /backup
///     ├── GET  /backup/download/:filename
///     └── POST /upload                # multipart image upload
/// ```
///
/// DELETE on the collection routes takes `?id=` rather than a path segment,
/// matching the client the API was built for.
pub fn build_router(state: AppState) -> Router {
    let upload_dir = state.config.upload_dir.clone();

    let api = Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/auth", post(routes::auth::login))
        .route(
            "/members",
            get(routes::members::list)
                .post(routes::members::create)
                .put(routes::members::update)
                .delete(routes::members::remove),
        )
        .route(
            "/events",
            get(routes::events::list)
                .post(routes::events::create)
                .put(routes::events::update)
                .delete(routes::events::remove),
        )
        .route(
            "/donations",
            get(routes::donations::list)
                .post(routes::donations::create)
                .put(routes::donations::update)
                .delete(routes::donations::remove),
        )
        .route(
            "/expenses",
            get(routes::expenses::list)
                .post(routes::expenses::create)
                .put(routes::expenses::update)
                .delete(routes::expenses::remove),
        )
        .route(
            "/users",
            get(routes::users::list)
                .post(routes::users::create)
                .put(routes::users::update)
                .delete(routes::users::remove),
        )
        .route(
            "/resources",
            get(routes::resources::list)
                .post(routes::resources::create)
                .delete(routes::resources::remove),
        )
        .nest(
            "/donation-categories",
            lookup_routes(LookupTable::DonationCategories),
        )
        .nest(
            "/expense-categories",
            lookup_routes(LookupTable::ExpenseCategories),
        )
        .nest("/service-times", lookup_routes(LookupTable::ServiceTimes))
        .nest("/giving-types", lookup_routes(LookupTable::GivingTypes))
        .nest("/networks", lookup_routes(LookupTable::Networks))
        .route(
            "/settings",
            get(routes::settings::read).post(routes::settings::save),
        )
        .route("/reports", get(routes::reports::generate))
        .route("/reset", post(routes::reset::reset))
        .route(
            "/backup",
            get(routes::backup::status).post(routes::backup::run),
        )
        .route("/backup/download/:filename", get(routes::backup::download))
        .route(
            "/upload",
            post(routes::upload::upload)
                // multipart overhead on top of the 5 MB image cap
                .layer(DefaultBodyLimit::max(6 * 1024 * 1024)),
        );

    Router::new()
        .nest("/api", api)
        .nest_service("/uploads", ServeDir::new(upload_dir))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}
