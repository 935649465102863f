//! filestats core library
//!
//! This crate provides the domain models, error types, configuration, the reference
//! clock and the file token codec shared by all filestats components.

pub mod clock;
pub mod config;
pub mod error;
pub mod file_token;
pub mod models;

// Re-export commonly used types
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{Config, LogFormat, StatsBackend};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use file_token::{check_hash, pack, short_hash, stream_link, FileToken};
pub use models::{
    DailyBucket, DailyStats, FileMetadata, StatsSummary, StatsWindow, WeeklyStats, WindowStats,
};
