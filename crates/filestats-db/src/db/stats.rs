use async_trait::async_trait;
use chrono::NaiveDate;
use filestats_core::models::{DailyBucket, WindowStats};
use filestats_core::{AppError, Config, StatsBackend};
use sqlx::PgPool;
use std::sync::Arc;

use super::memory::InMemoryStatsRepository;

/// Trait for the daily bucket store.
///
/// This is the only mutation surface for the counters. `increment` must apply the
/// whole event or nothing, even when many callers hit the same date concurrently.
#[async_trait]
pub trait StatsRepositoryTrait: Send + Sync {
    /// Add one event of `size_bytes` to the bucket for `date`, creating it if needed.
    /// Returns the bucket state right after this increment.
    async fn increment(&self, date: NaiveDate, size_bytes: i64) -> Result<DailyBucket, AppError>;

    async fn get_bucket(&self, date: NaiveDate) -> Result<Option<DailyBucket>, AppError>;

    /// Sum of all buckets with `start <= date < end`.
    async fn sum_range(&self, start: NaiveDate, end: NaiveDate) -> Result<WindowStats, AppError>;

    async fn sum_all(&self) -> Result<WindowStats, AppError>;

    /// Cheap reachability probe for readiness checks.
    async fn ping(&self) -> Result<(), AppError>;
}

pub(crate) fn ensure_non_negative(size_bytes: i64) -> Result<(), AppError> {
    if size_bytes < 0 {
        return Err(AppError::InvalidInput(format!(
            "File size must not be negative, got {}",
            size_bytes
        )));
    }
    Ok(())
}

#[derive(Clone)]
pub struct PostgresStatsRepository {
    pool: PgPool,
}

impl PostgresStatsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StatsRepositoryTrait for PostgresStatsRepository {
    #[tracing::instrument(skip(self), fields(
        db.system = "postgresql",
        db.table = "file_stats",
        db.operation = "upsert"
    ))]
    async fn increment(&self, date: NaiveDate, size_bytes: i64) -> Result<DailyBucket, AppError> {
        ensure_non_negative(size_bytes)?;

        // Single statement: concurrent increments for the same date serialize on the row lock.
        let bucket = sqlx::query_as::<_, DailyBucket>(
            r#"
            INSERT INTO file_stats (date, file_count, total_size)
            VALUES ($1, 1, $2)
            ON CONFLICT (date) DO UPDATE SET
                file_count = file_stats.file_count + 1,
                total_size = file_stats.total_size + EXCLUDED.total_size,
                updated_at = NOW()
            RETURNING date, file_count, total_size
            "#,
        )
        .bind(date)
        .bind(size_bytes)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!(error = ?e, %date, size_bytes, "Failed to record file event");
            AppError::from(e)
        })?;

        Ok(bucket)
    }

    #[tracing::instrument(skip(self), fields(
        db.system = "postgresql",
        db.table = "file_stats",
        db.operation = "select"
    ))]
    async fn get_bucket(&self, date: NaiveDate) -> Result<Option<DailyBucket>, AppError> {
        let bucket = sqlx::query_as::<_, DailyBucket>(
            r#"
            SELECT date, file_count, total_size
            FROM file_stats
            WHERE date = $1
            "#,
        )
        .bind(date)
        .fetch_optional(&self.pool)
        .await?;

        Ok(bucket)
    }

    #[tracing::instrument(skip(self), fields(
        db.system = "postgresql",
        db.table = "file_stats",
        db.operation = "aggregate"
    ))]
    async fn sum_range(&self, start: NaiveDate, end: NaiveDate) -> Result<WindowStats, AppError> {
        if end <= start {
            return Ok(WindowStats::ZERO);
        }

        let stats = sqlx::query_as::<_, WindowStats>(
            r#"
            SELECT
                COALESCE(SUM(file_count), 0)::BIGINT as file_count,
                COALESCE(SUM(total_size), 0)::BIGINT as total_size
            FROM file_stats
            WHERE date >= $1 AND date < $2
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_one(&self.pool)
        .await?;

        Ok(stats)
    }

    #[tracing::instrument(skip(self), fields(
        db.system = "postgresql",
        db.table = "file_stats",
        db.operation = "aggregate"
    ))]
    async fn sum_all(&self) -> Result<WindowStats, AppError> {
        let stats = sqlx::query_as::<_, WindowStats>(
            r#"
            SELECT
                COALESCE(SUM(file_count), 0)::BIGINT as file_count,
                COALESCE(SUM(total_size), 0)::BIGINT as total_size
            FROM file_stats
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(stats)
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

/// Build the stats repository selected by `STATS_BACKEND`.
///
/// The PostgreSQL backend needs a pool whose migrations have already been applied.
pub fn create_stats_repository(
    config: &Config,
    postgres_pool: Option<PgPool>,
) -> Result<Arc<dyn StatsRepositoryTrait>, AppError> {
    match config.stats_backend {
        StatsBackend::Postgres => {
            let pool = postgres_pool.ok_or_else(|| {
                AppError::Internal(
                    "PostgreSQL stats backend selected but no database pool was provided"
                        .to_string(),
                )
            })?;
            tracing::info!("Initializing PostgreSQL stats repository");
            Ok(Arc::new(PostgresStatsRepository::new(pool)))
        }
        StatsBackend::Memory => {
            tracing::warn!("Initializing in-memory stats repository; counters are not durable");
            Ok(Arc::new(InMemoryStatsRepository::new()))
        }
    }
}
