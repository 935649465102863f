//! File statistics models: the persisted daily bucket and the derived window views.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

/// Aggregate counters for one calendar day in the reference timezone.
///
/// A day without events has no bucket; readers treat absence as zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct DailyBucket {
    pub date: NaiveDate,
    pub file_count: i64,
    #[serde(rename = "total_size")]
    #[cfg_attr(feature = "sqlx", sqlx(rename = "total_size"))]
    pub total_size_bytes: i64,
}

impl DailyBucket {
    /// Bucket created by the first event of a day.
    pub fn first(date: NaiveDate, size_bytes: i64) -> Self {
        Self {
            date,
            file_count: 1,
            total_size_bytes: size_bytes,
        }
    }

    /// Bucket after one more event, or `None` if a counter would overflow.
    pub fn record(self, size_bytes: i64) -> Option<Self> {
        Some(Self {
            date: self.date,
            file_count: self.file_count.checked_add(1)?,
            total_size_bytes: self.total_size_bytes.checked_add(size_bytes)?,
        })
    }
}

/// Sums over a half-open date range `[start, end)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct WindowStats {
    pub file_count: i64,
    #[serde(rename = "total_size")]
    #[cfg_attr(feature = "sqlx", sqlx(rename = "total_size"))]
    pub total_size_bytes: i64,
}

impl WindowStats {
    pub const ZERO: WindowStats = WindowStats {
        file_count: 0,
        total_size_bytes: 0,
    };

    pub fn new(file_count: i64, total_size_bytes: i64) -> Self {
        Self {
            file_count,
            total_size_bytes,
        }
    }

    /// Add two windows, or `None` if a counter would overflow.
    pub fn checked_add(self, other: WindowStats) -> Option<Self> {
        Some(Self {
            file_count: self.file_count.checked_add(other.file_count)?,
            total_size_bytes: self.total_size_bytes.checked_add(other.total_size_bytes)?,
        })
    }
}

impl From<DailyBucket> for WindowStats {
    fn from(bucket: DailyBucket) -> Self {
        Self::new(bucket.file_count, bucket.total_size_bytes)
    }
}

/// Stats for a single day (today, yesterday) or for all time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DailyStats {
    #[schema(value_type = String, format = Date)]
    pub date: NaiveDate,
    pub file_count: i64,
    #[serde(rename = "total_size")]
    pub total_size_bytes: i64,
}

impl DailyStats {
    pub fn new(date: NaiveDate, window: WindowStats) -> Self {
        Self {
            date,
            file_count: window.file_count,
            total_size_bytes: window.total_size_bytes,
        }
    }
}

/// Stats for the trailing seven days, today excluded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct WeeklyStats {
    #[schema(value_type = String, format = Date)]
    pub start_date: NaiveDate,
    #[schema(value_type = String, format = Date)]
    pub end_date: NaiveDate,
    pub file_count: i64,
    #[serde(rename = "total_size")]
    pub total_size_bytes: i64,
}

impl WeeklyStats {
    pub fn new(start_date: NaiveDate, end_date: NaiveDate, window: WindowStats) -> Self {
        Self {
            start_date,
            end_date,
            file_count: window.file_count,
            total_size_bytes: window.total_size_bytes,
        }
    }
}

/// Complete statistics report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct StatsSummary {
    pub today: DailyStats,
    pub yesterday: DailyStats,
    pub last_week: WeeklyStats,
    pub total: DailyStats,
}

/// The windows composed into a [`StatsSummary`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatsWindow {
    Today,
    Yesterday,
    LastWeek,
    AllTime,
}

impl StatsWindow {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatsWindow::Today => "today",
            StatsWindow::Yesterday => "yesterday",
            StatsWindow::LastWeek => "last week",
            StatsWindow::AllTime => "total",
        }
    }
}

impl fmt::Display for StatsWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
