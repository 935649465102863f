//! API path constants

/// Prefix shared by every JSON endpoint
pub const API_PREFIX: &str = "/api";

/// Maximum accepted request body
pub const MAX_BODY_BYTES: usize = 64 * 1024;

/// Server-level cap on in-flight requests
pub const HTTP_CONCURRENCY_LIMIT: usize = 10_000;
