//! Upkeep Server - maintenance tracker
//!
//! REST API server for equipment and maintenance request tracking.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use upkeep_server::{
    config::AppConfig,
    create_router,
    repository::{open_pool, schema::ensure_schema, Repository},
    services::Services,
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("upkeep_server={},tower_http=debug", config.logging.level).into());

    let registry = tracing_subscriber::registry().with(filter);
    if config.logging.format.eq_ignore_ascii_case("json") {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    tracing::info!("Starting Upkeep Server v{}", env!("CARGO_PKG_VERSION"));

    let db = &config.database;
    let auth_pool = open_pool(&db.auth_url, db.max_connections, db.min_connections)
        .await
        .context("Failed to open auth database")?;
    let equipment_pool = open_pool(&db.equipment_url, db.max_connections, db.min_connections)
        .await
        .context("Failed to open equipment database")?;
    let requests_pool = open_pool(&db.requests_url, db.max_connections, db.min_connections)
        .await
        .context("Failed to open requests database")?;

    tracing::info!("Connected to databases");

    let repository = Repository::new(auth_pool, equipment_pool, requests_pool);

    let report = ensure_schema(&repository).await.context("Failed to prepare database schema")?;
    if report.is_clean() {
        tracing::info!("Database schema ready ({} columns added)", report.added.len());
    } else {
        tracing::warn!(
            "Database schema ready with {} columns that could not be added: {}",
            report.failed.len(),
            report.failed.join(", ")
        );
    }

    let addr = SocketAddr::new(
        config.server.host.parse().context("Invalid host address")?,
        config.server.port,
    );

    let services = Services::new(repository, config.auth.clone(), config.requests.clone());

    let state = AppState {
        config: Arc::new(config),
        services: Arc::new(services),
    };

    let app = create_router(state);

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
