use std::sync::Arc;

use anyhow::Context;
use dotenvy::dotenv;
use tracing::info;
use tracing_subscriber::EnvFilter;

use movie_catalog::app;
use movie_catalog::config::settings::AppConfig;
use movie_catalog::infrastructure::db::pool::{connect_to_db, run_migrations};
use movie_catalog::infrastructure::storage::s3::S3Storage;
use movie_catalog::state::{AppState, Repositories};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Starting server...");

    let config = AppConfig::new().context("Missing required environment variable")?;

    let pool = connect_to_db(&config.database_url, config.db_max_connections)
        .await
        .context("Failed to connect to PostgreSQL")?;
    run_migrations(&pool).await.context("Failed to apply migrations")?;

    let storage = S3Storage::new(
        &config.s3_endpoint,
        &config.s3_bucket,
        &config.s3_access_key,
        &config.s3_secret_key,
        &config.files_public_url,
    )?;

    let addr = format!("0.0.0.0:{}", config.server_port);
    let state = AppState::new(config, Repositories::postgres(pool), Arc::new(storage));
    let app = app::create_app(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server running on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
