//! Database setup and stats service initialization

use anyhow::{Context, Result};
use filestats_core::{Config, StatsBackend, SystemClock};
use filestats_db::create_stats_repository;
use filestats_infra::StatsService;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

/// Setup database connection pool and run migrations
pub async fn setup_database(config: &Config) -> Result<PgPool> {
    let database_url = config
        .database_url
        .as_deref()
        .context("DATABASE_URL is not set")?;

    tracing::info!("Connecting to database...");
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_timeout_seconds))
        .idle_timeout(Duration::from_secs(600))
        .max_lifetime(Duration::from_secs(1800))
        .connect(database_url)
        .await
        .context("Failed to connect to database")?;

    tracing::info!(
        max_connections = config.db_max_connections,
        "Database connected successfully"
    );

    // Workspace migrations/, relative to this crate's root
    let migrations_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../migrations");
    let migrator = sqlx::migrate::Migrator::new(migrations_dir)
        .await
        .context("Failed to load migrations")?;
    migrator
        .run(&pool)
        .await
        .context("Failed to run database migrations")?;
    tracing::info!("Database migrations applied");

    Ok(pool)
}

/// Build the stats service for the configured backend.
///
/// Returns `None` when the store cannot be initialized. The server still starts and
/// the stats endpoint answers 503.
pub async fn setup_stats_service(config: &Config) -> Option<StatsService> {
    let pool = match config.stats_backend {
        StatsBackend::Postgres => match setup_database(config).await {
            Ok(pool) => Some(pool),
            Err(e) => {
                tracing::error!(error = ?e, "Stats store initialization failed, stats disabled");
                return None;
            }
        },
        StatsBackend::Memory => None,
    };

    match create_stats_repository(config, pool) {
        Ok(repository) => {
            let clock = Arc::new(SystemClock::new(config.stats_timezone));
            tracing::info!(timezone = %config.stats_timezone, "Stats service initialized");
            Some(StatsService::new(repository, clock))
        }
        Err(e) => {
            tracing::error!(error = %e, "Stats repository creation failed, stats disabled");
            None
        }
    }
}
