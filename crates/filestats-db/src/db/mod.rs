//! Database repositories for the daily stats buckets
//!
//! `StatsRepositoryTrait` abstracts the storage engine. `PostgresStatsRepository` is the
//! durable backend; `InMemoryStatsRepository` backs tests and throwaway deployments.

pub mod memory;
pub mod stats;

pub use memory::InMemoryStatsRepository;
pub use stats::{create_stats_repository, PostgresStatsRepository, StatsRepositoryTrait};
