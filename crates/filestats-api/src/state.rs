//! Shared application state handed to every handler.

use filestats_core::{AppError, Config};
use filestats_infra::StatsService;

pub struct AppState {
    pub config: Config,
    /// `None` when the stats store could not be initialized at startup.
    pub stats: Option<StatsService>,
}

impl AppState {
    pub fn new(config: Config, stats: Option<StatsService>) -> Self {
        Self { config, stats }
    }

    /// Stats service, or `StatsDisabled` when the store is not available.
    pub fn stats(&self) -> Result<&StatsService, AppError> {
        self.stats.as_ref().ok_or(AppError::StatsDisabled)
    }
}
