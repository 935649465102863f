//! Test helpers: build AppState and router for integration tests.
//!
//! The stats store is the in-memory backend, driven by a fixed clock.

use axum_test::TestServer;
use chrono::NaiveDate;
use filestats_api::constants;
use filestats_api::setup::routes;
use filestats_api::state::AppState;
use filestats_core::{Config, FixedClock, StatsBackend};
use filestats_db::InMemoryStatsRepository;
use filestats_infra::StatsService;
use std::sync::Arc;

pub const STREAM_BASE_URL: &str = "https://stream.example.com/watch";

/// API path prefix for tests (e.g. `/api`).
pub fn api_path(path: &str) -> String {
    format!("{}{}", constants::API_PREFIX, path)
}

pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 10).unwrap()
}

pub fn test_config() -> Config {
    Config {
        stats_backend: StatsBackend::Memory,
        stream_base_url: Some(STREAM_BASE_URL.to_string()),
        ..Config::default()
    }
}

/// Test application with an in-memory stats store.
pub struct TestApp {
    pub server: TestServer,
    pub stats: StatsService,
    pub repository: InMemoryStatsRepository,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }
}

pub fn setup_test_app() -> TestApp {
    let config = test_config();
    let repository = InMemoryStatsRepository::new();
    let stats = StatsService::new(
        Arc::new(repository.clone()),
        Arc::new(FixedClock::at_date(today())),
    );
    let state = Arc::new(AppState::new(config.clone(), Some(stats.clone())));
    let router = routes::setup_routes(&config, state).expect("Failed to build router");

    TestApp {
        server: TestServer::new(router).expect("Failed to start test server"),
        stats,
        repository,
    }
}

/// Test application whose stats store was never initialized.
pub fn setup_test_app_without_stats() -> TestServer {
    let config = test_config();
    let state = Arc::new(AppState::new(config.clone(), None));
    let router = routes::setup_routes(&config, state).expect("Failed to build router");
    TestServer::new(router).expect("Failed to start test server")
}
