//! OpenAPI documentation, served at `/api/openapi.json` and rendered at `/docs`.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;
use filestats_core::models;

pub fn get_openapi_spec() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "filestats API",
        version = "0.1.0",
        description = "Daily counters for forwarded files: today, yesterday, the trailing week and all time, plus short tokens for external stream links."
    ),
    paths(
        handlers::stats::get_stats,
        handlers::files::forwarded_file,
    ),
    components(
        schemas(
            models::DailyStats,
            models::WeeklyStats,
            models::StatsSummary,
            handlers::stats::StatsResponse,
            handlers::files::ForwardedFileRequest,
            handlers::files::ForwardedFile,
            handlers::files::ForwardedFileResponse,
            error::ErrorResponse,
        )
    ),
    tags(
        (name = "stats", description = "File statistics"),
        (name = "files", description = "Forwarded file hooks")
    )
)]
pub struct ApiDoc;
