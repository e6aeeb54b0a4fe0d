//! MineSafe Cloud Backend Server
//!
//! Mine-safety backend: loads the trained rockfall risk model once at
//! startup, serves risk assessments, synthesizes live sensor telemetry, and
//! persists assessments, sensor ingests and worker records.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                      MINESAFE CLOUD                          │
//! ├──────────────────────────────────────────────────────────────┤
//! │  ┌───────────┐  ┌──────────────┐  ┌───────────────────────┐ │
//! │  │  API      │  │  Assessment  │  │  Telemetry            │ │
//! │  │  Gateway  │  │  Pipeline    │  │  Synthesizer          │ │
//! │  │  (Axum)   │  │  (Model Ctx) │  │  (tiered sampling)    │ │
//! │  └─────┬─────┘  └──────┬───────┘  └───────────────────────┘ │
//! │        └───────────────┼                                     │
//! │                        ▼                                     │
//! │                 ┌─────────────┐                              │
//! │                 │ PostgreSQL  │                              │
//! │                 └─────────────┘                              │
//! └──────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod db;
mod error;
mod handlers;
mod logic;
mod models;

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use logic::model::ModelContext;

pub use error::{AppError, AppResult};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "minesafe_cloud=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::from_env();

    tracing::info!("MineSafe Cloud Server starting...");
    tracing::info!(
        "Database: {}",
        config.database_url.split('@').last().unwrap_or("***")
    );

    // Load the risk model once; shared immutably for the process lifetime
    let model = Arc::new(ModelContext::load(Path::new(&config.model_path))?);

    // Initialize database pool
    let pool = db::create_pool(&config.database_url).await?;

    // Run migrations
    tracing::info!("Running database migrations...");
    db::run_migrations(&pool).await?;

    // Build application state
    let state = AppState {
        pool,
        config: config.clone(),
        model,
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("🚀 Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub pool: sqlx::PgPool,
    pub config: config::Config,
    pub model: Arc<ModelContext>,
}

/// Create the main router with all routes
fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::check))
        .route("/health/db", get(handlers::health::db))
        // Risk assessment
        .route("/api/v1/predict", post(handlers::predict::predict))
        // Sensors
        .route("/api/v1/sensors/live", get(handlers::sensors::live))
        .route("/api/v1/sensors/data", post(handlers::sensors::ingest))
        // Assessment history
        .route("/api/v1/assessments/history", get(handlers::assessments::history))
        .route("/api/v1/assessments/clear", delete(handlers::assessments::clear))
        .route("/api/v1/assessments/:id", delete(handlers::assessments::delete))
        // Workers
        .route("/api/v1/mines/:mine_name/workers", get(handlers::workers::list))
        .route("/api/v1/workers", post(handlers::workers::create))
        .route("/api/v1/workers/:id", delete(handlers::workers::delete))
        // Dashboard
        .route("/api/v1/dashboard/stats", get(handlers::dashboard::stats))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
        .with_state(state)
}
