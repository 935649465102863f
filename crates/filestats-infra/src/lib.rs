//! filestats infrastructure library
//!
//! This crate provides the components shared by every filestats entry point:
//! - Event store (the write path for file events)
//! - Stats query layer (today, yesterday, last week, all time)
//! - Telemetry initialization

#[cfg(feature = "observability-basic")]
pub mod telemetry;

#[cfg(feature = "stats")]
pub mod stats;

#[cfg(feature = "observability-basic")]
pub use telemetry::{init_telemetry, shutdown_telemetry};

#[cfg(feature = "stats")]
pub use stats::{EventStore, StatsQuery, StatsService};
