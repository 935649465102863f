//! In-memory stats repository for tests and single-process deployments.
//!
//! Buckets live in a `BTreeMap` behind a std `Mutex`. Every operation runs in one
//! synchronous critical section, so an increment is never split across an `.await`.

use async_trait::async_trait;
use chrono::NaiveDate;
use filestats_core::models::{DailyBucket, WindowStats};
use filestats_core::AppError;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use super::stats::{ensure_non_negative, StatsRepositoryTrait};

#[derive(Clone, Default)]
pub struct InMemoryStatsRepository {
    buckets: Arc<Mutex<BTreeMap<NaiveDate, DailyBucket>>>,
    closed: Arc<AtomicBool>,
}

impl InMemoryStatsRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stop serving requests; every later call fails with `StoreUnavailable`.
    pub fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    /// Number of stored buckets (days with at least one event).
    pub fn bucket_count(&self) -> usize {
        self.buckets.lock().map(|b| b.len()).unwrap_or(0)
    }

    fn lock(&self) -> Result<MutexGuard<'_, BTreeMap<NaiveDate, DailyBucket>>, AppError> {
        if self.is_closed() {
            return Err(AppError::StoreUnavailable(
                "in-memory stats store is closed".to_string(),
            ));
        }
        self.buckets
            .lock()
            .map_err(|_| AppError::StoreUnavailable("in-memory stats store is poisoned".to_string()))
    }
}

fn sum<'a>(mut buckets: impl Iterator<Item = &'a DailyBucket>) -> Result<WindowStats, AppError> {
    buckets.try_fold(WindowStats::ZERO, |acc, b| {
        acc.checked_add(WindowStats::from(*b))
            .ok_or_else(|| AppError::Internal("window total overflows i64".to_string()))
    })
}

#[async_trait]
impl StatsRepositoryTrait for InMemoryStatsRepository {
    async fn increment(&self, date: NaiveDate, size_bytes: i64) -> Result<DailyBucket, AppError> {
        ensure_non_negative(size_bytes)?;

        let mut buckets = self.lock()?;
        let bucket = match buckets.get(&date).copied() {
            Some(bucket) => bucket
                .record(size_bytes)
                .ok_or_else(|| AppError::Internal(format!("total size overflow on {}", date)))?,
            None => DailyBucket::first(date, size_bytes),
        };
        buckets.insert(date, bucket);

        Ok(bucket)
    }

    async fn get_bucket(&self, date: NaiveDate) -> Result<Option<DailyBucket>, AppError> {
        Ok(self.lock()?.get(&date).copied())
    }

    async fn sum_range(&self, start: NaiveDate, end: NaiveDate) -> Result<WindowStats, AppError> {
        if end <= start {
            return Ok(WindowStats::ZERO);
        }
        let buckets = self.lock()?;
        sum(buckets.range(start..end).map(|(_, b)| b))
    }

    async fn sum_all(&self) -> Result<WindowStats, AppError> {
        let buckets = self.lock()?;
        sum(buckets.values())
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.lock().map(|_| ())
    }
}
