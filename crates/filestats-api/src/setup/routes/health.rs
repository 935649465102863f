//! Health check handlers.

use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use std::sync::Arc;
use std::time::Duration;

const READINESS_TIMEOUT: Duration = Duration::from_secs(5);

/// Liveness probe - process is running.
pub async fn liveness_check() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(serde_json::json!({ "status": "alive" })),
    )
}

/// Readiness probe - the stats store answers.
///
/// A disabled store does not block readiness: the forward hook still works and the
/// stats endpoint reports 503 on its own.
pub async fn readiness_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let mut response = serde_json::json!({
        "status": "ready",
        "stats_store": "unknown"
    });

    let Some(stats) = state.stats.as_ref() else {
        response["stats_store"] = serde_json::json!("disabled");
        return (StatusCode::OK, Json(response));
    };

    let ready = match tokio::time::timeout(READINESS_TIMEOUT, stats.repository().ping()).await {
        Ok(Ok(())) => {
            response["stats_store"] = serde_json::json!("ready");
            true
        }
        Ok(Err(e)) => {
            tracing::error!(error = %e, "Stats store readiness check failed");
            response["stats_store"] = serde_json::json!("not_ready");
            false
        }
        Err(_) => {
            tracing::error!("Stats store readiness check timed out");
            response["stats_store"] = serde_json::json!("timeout");
            false
        }
    };

    if ready {
        (StatusCode::OK, Json(response))
    } else {
        response["status"] = serde_json::json!("not_ready");
        (StatusCode::SERVICE_UNAVAILABLE, Json(response))
    }
}
