//! filestats API library
//!
//! HTTP handlers, error conversion and application setup for the file statistics service.

mod api_doc;
pub mod constants;
mod handlers;
pub mod setup;

pub mod error;
pub mod state;

pub use error::ErrorResponse;
pub use state::AppState;
