//! filestats database layer
//!
//! Repositories owning the `file_stats` table. Schema migrations live in the workspace
//! `migrations/` directory and are applied by the application at startup.

pub mod db;

pub use db::{
    create_stats_repository, InMemoryStatsRepository, PostgresStatsRepository,
    StatsRepositoryTrait,
};
