//! Application setup and initialization

pub mod database;
pub mod routes;
pub mod server;

use crate::state::AppState;
use anyhow::{Context, Result};
use filestats_core::Config;
use std::sync::Arc;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    // Fail fast on misconfiguration
    config.validate().context("Configuration validation failed")?;

    filestats_infra::init_telemetry(config.log_format, "filestats-api", &config.environment)
        .map_err(|e| anyhow::anyhow!("Failed to initialize telemetry: {}", e))?;

    tracing::info!("Configuration loaded and validated successfully");

    let stats = database::setup_stats_service(&config).await;
    let state = Arc::new(AppState::new(config.clone(), stats));

    let router = routes::setup_routes(&config, state.clone())?;

    Ok((state, router))
}
