use crate::error::HttpAppError;
use crate::state::AppState;
use axum::{
    extract::State,
    response::{IntoResponse, Json},
};
use filestats_core::models::StatsSummary;
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct StatsResponse {
    pub success: bool,
    pub data: StatsSummary,
}

#[utoipa::path(
    get,
    path = "/api/stats",
    tag = "stats",
    responses(
        (status = 200, description = "File statistics summary", body = StatsResponse),
        (status = 500, description = "Statistics could not be computed", body = crate::error::ErrorResponse),
        (status = 503, description = "Statistics store is not available", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_stats(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpAppError> {
    let summary = state.stats()?.query.get_summary().await?;
    Ok(Json(StatsResponse {
        success: true,
        data: summary,
    }))
}
