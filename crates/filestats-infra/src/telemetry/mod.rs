//! Tracing subscriber initialization
//!
//! Logs go to stdout, filtered by `RUST_LOG`, in compact or JSON form depending on
//! `LOG_FORMAT`.

mod init_basic;

pub use init_basic::{init_telemetry, shutdown_telemetry};
