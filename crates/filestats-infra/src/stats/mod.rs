//! File statistics service
//!
//! [`EventStore`] owns the write path and [`StatsQuery`] derives the reporting
//! windows. Both share one repository and one clock, so a day means the same thing
//! on either side.

mod event_store;
mod query;

pub use event_store::EventStore;
pub use query::StatsQuery;

use filestats_core::Clock;
use filestats_db::StatsRepositoryTrait;
use std::sync::Arc;

/// Write and read handles over a single stats repository.
#[derive(Clone)]
pub struct StatsService {
    pub events: EventStore,
    pub query: StatsQuery,
    repository: Arc<dyn StatsRepositoryTrait>,
}

impl StatsService {
    pub fn new(repository: Arc<dyn StatsRepositoryTrait>, clock: Arc<dyn Clock>) -> Self {
        Self {
            events: EventStore::new(repository.clone(), clock.clone()),
            query: StatsQuery::new(repository.clone(), clock),
            repository,
        }
    }

    /// Underlying repository, for readiness probes.
    pub fn repository(&self) -> &Arc<dyn StatsRepositoryTrait> {
        &self.repository
    }
}
