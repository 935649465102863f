//! Derived reporting windows over the daily buckets.
//!
//! All windows are half-open `[start, end)` on bucket dates. "Last week" is the seven
//! full days before today, so today's partial day is not counted twice in a report.

use chrono::{Days, NaiveDate};
use filestats_core::models::{
    DailyBucket, DailyStats, StatsSummary, StatsWindow, WeeklyStats, WindowStats,
};
use filestats_core::{AppError, Clock};
use filestats_db::StatsRepositoryTrait;
use std::sync::Arc;

const WEEK_DAYS: u64 = 7;

#[derive(Clone)]
pub struct StatsQuery {
    repository: Arc<dyn StatsRepositoryTrait>,
    clock: Arc<dyn Clock>,
}

fn days_before(date: NaiveDate, days: u64) -> Result<NaiveDate, AppError> {
    date.checked_sub_days(Days::new(days))
        .ok_or_else(|| AppError::Internal(format!("date out of range: {} - {} days", date, days)))
}

fn day_after(date: NaiveDate) -> Result<NaiveDate, AppError> {
    date.checked_add_days(Days::new(1))
        .ok_or_else(|| AppError::Internal(format!("date out of range: {} + 1 day", date)))
}

fn in_window<T>(window: StatsWindow, result: Result<T, AppError>) -> Result<T, AppError> {
    result.map_err(|source| AppError::StatsWindow {
        window,
        source: Box::new(source),
    })
}

impl StatsQuery {
    pub fn new(repository: Arc<dyn StatsRepositoryTrait>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    /// Totals over `start <= date < end`. An empty or inverted range yields zero.
    pub async fn get_window(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<WindowStats, AppError> {
        if end <= start {
            return Ok(WindowStats::ZERO);
        }
        self.repository.sum_range(start, end).await
    }

    pub async fn get_today(&self) -> Result<DailyStats, AppError> {
        self.today_stats(self.clock.today()).await
    }

    pub async fn get_yesterday(&self) -> Result<DailyStats, AppError> {
        self.yesterday_stats(self.clock.today()).await
    }

    pub async fn get_last_week(&self) -> Result<WeeklyStats, AppError> {
        self.last_week_stats(self.clock.today()).await
    }

    pub async fn get_all_time(&self) -> Result<DailyStats, AppError> {
        self.all_time_stats(self.clock.today()).await
    }

    /// Raw bucket for one day. `None` when nothing was recorded that day.
    pub async fn get_bucket(&self, date: NaiveDate) -> Result<Option<DailyBucket>, AppError> {
        self.repository.get_bucket(date).await
    }

    /// Full report. Every window is computed against the same `today`, and the first
    /// failing window fails the whole summary.
    #[tracing::instrument(skip(self))]
    pub async fn get_summary(&self) -> Result<StatsSummary, AppError> {
        let today = self.clock.today();

        let (today_stats, yesterday, last_week, total) = tokio::try_join!(
            async { in_window(StatsWindow::Today, self.today_stats(today).await) },
            async { in_window(StatsWindow::Yesterday, self.yesterday_stats(today).await) },
            async { in_window(StatsWindow::LastWeek, self.last_week_stats(today).await) },
            async { in_window(StatsWindow::AllTime, self.all_time_stats(today).await) },
        )
        .map_err(|e| {
            tracing::error!(error = %e, details = %e.detailed_message(), "Failed to build stats summary");
            e
        })?;

        Ok(StatsSummary {
            today: today_stats,
            yesterday,
            last_week,
            total,
        })
    }

    async fn today_stats(&self, today: NaiveDate) -> Result<DailyStats, AppError> {
        let window = self.get_window(today, day_after(today)?).await?;
        Ok(DailyStats::new(today, window))
    }

    async fn yesterday_stats(&self, today: NaiveDate) -> Result<DailyStats, AppError> {
        let yesterday = days_before(today, 1)?;
        let window = self.get_window(yesterday, today).await?;
        Ok(DailyStats::new(yesterday, window))
    }

    async fn last_week_stats(&self, today: NaiveDate) -> Result<WeeklyStats, AppError> {
        let start = days_before(today, WEEK_DAYS)?;
        let window = self.get_window(start, today).await?;
        Ok(WeeklyStats::new(start, today, window))
    }

    async fn all_time_stats(&self, today: NaiveDate) -> Result<DailyStats, AppError> {
        let window = self.repository.sum_all().await?;
        Ok(DailyStats::new(today, window))
    }
}
