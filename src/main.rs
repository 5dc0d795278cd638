use sqlx::sqlite::SqlitePool;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod db;
mod error;
mod models;
mod routes;
mod scoring;
mod state;
mod stats;

use config::AppConfig;
use state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing/logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting scorebook server...");

    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let pool = SqlitePool::connect(&config.database_url).await?;
    db::init_schema(&pool).await?;

    tracing::info!("Database connection established.");

    // The scorer UI may be served from anywhere on the local network
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = routes::router(AppState::new(pool))
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(config.addr).await?;

    tracing::info!("Server listening on {}", config.addr);

    axum::serve(listener, app).await?;
    Ok(())
}
