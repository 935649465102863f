use chrono::NaiveDate;
use filestats_core::models::DailyBucket;
use filestats_core::{AppError, Clock};
use filestats_db::StatsRepositoryTrait;
use std::sync::Arc;

/// Write path for file events.
#[derive(Clone)]
pub struct EventStore {
    repository: Arc<dyn StatsRepositoryTrait>,
    clock: Arc<dyn Clock>,
}

impl EventStore {
    pub fn new(repository: Arc<dyn StatsRepositoryTrait>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    /// Count one processed file of `size_bytes` in today's bucket.
    pub async fn record_event(&self, size_bytes: i64) -> Result<(), AppError> {
        let today = self.clock.today();
        self.record_event_at(today, size_bytes).await.map(|_| ())
    }

    /// Count one processed file in the bucket for `date`.
    #[tracing::instrument(skip(self))]
    pub async fn record_event_at(
        &self,
        date: NaiveDate,
        size_bytes: i64,
    ) -> Result<DailyBucket, AppError> {
        if size_bytes < 0 {
            return Err(AppError::InvalidInput(format!(
                "File size must not be negative, got {}",
                size_bytes
            )));
        }

        let bucket = self.repository.increment(date, size_bytes).await?;
        tracing::debug!(
            %date,
            file_count = bucket.file_count,
            total_size = bucket.total_size_bytes,
            "File event recorded"
        );
        Ok(bucket)
    }

    /// Record an event without failing the caller. Returns whether the event was stored.
    pub async fn record_event_best_effort(&self, size_bytes: i64) -> bool {
        match self.record_event(size_bytes).await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    error_code = e.error_type(),
                    size_bytes,
                    "Failed to record file event, continuing"
                );
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use filestats_core::FixedClock;
    use filestats_db::InMemoryStatsRepository;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn setup(today: NaiveDate) -> (EventStore, InMemoryStatsRepository) {
        let repo = InMemoryStatsRepository::new();
        let store = EventStore::new(Arc::new(repo.clone()), Arc::new(FixedClock::at_date(today)));
        (store, repo)
    }

    #[tokio::test]
    async fn record_event_uses_clock_day() {
        let today = day(2024, 6, 10);
        let (store, repo) = setup(today);

        store.record_event(1000).await.unwrap();

        let bucket = repo.get_bucket(today).await.unwrap();
        assert_eq!(bucket, Some(DailyBucket::first(today, 1000)));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn concurrent_events_are_all_counted() {
        let today = day(2024, 6, 10);
        let (store, repo) = setup(today);

        let handles: Vec<_> = (1..=150i64)
            .map(|size| {
                let store = store.clone();
                tokio::spawn(async move { store.record_event(size).await })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let bucket = repo.get_bucket(today).await.unwrap().unwrap();
        assert_eq!(bucket.file_count, 150);
        assert_eq!(bucket.total_size_bytes, (1..=150i64).sum::<i64>());
    }

    #[tokio::test]
    async fn negative_size_leaves_counters_unchanged() {
        let today = day(2024, 6, 10);
        let (store, repo) = setup(today);
        store.record_event(10).await.unwrap();

        let err = store.record_event(-1).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
        assert_eq!(
            repo.get_bucket(today).await.unwrap(),
            Some(DailyBucket::first(today, 10))
        );
    }

    #[tokio::test]
    async fn record_event_at_returns_bucket_state() {
        let (store, _) = setup(day(2024, 6, 10));
        let d = day(2024, 6, 1);

        store.record_event_at(d, 5).await.unwrap();
        let bucket = store.record_event_at(d, 7).await.unwrap();
        assert_eq!(bucket.file_count, 2);
        assert_eq!(bucket.total_size_bytes, 12);
    }

    #[tokio::test]
    async fn best_effort_swallows_store_failures() {
        let (store, repo) = setup(day(2024, 6, 10));
        assert!(store.record_event_best_effort(1).await);

        repo.close();
        assert!(!store.record_event_best_effort(1).await);
        assert!(!store.record_event_best_effort(-1).await);
    }
}
