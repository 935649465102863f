//! Data models for the application
//!
//! This module contains the data structures shared by the store, the query layer
//! and the HTTP API.

mod file;
mod stats;

pub use file::*;
pub use stats::*;
