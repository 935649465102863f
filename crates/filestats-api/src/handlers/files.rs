use crate::error::{HttpAppError, ValidatedJson};
use crate::state::AppState;
use axum::{
    extract::State,
    response::{IntoResponse, Json},
};
use filestats_core::models::FileMetadata;
use filestats_core::{stream_link, AppError, FileToken};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

/// A file the bot has just forwarded.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ForwardedFileRequest {
    pub file_name: String,
    /// Size in bytes
    pub file_size: i64,
    pub mime_type: String,
    pub file_id: i64,
    /// Message id of the forwarded copy; required to build a stream link
    pub message_id: Option<i64>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ForwardedFile {
    pub hash: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ForwardedFileResponse {
    pub success: bool,
    pub data: ForwardedFile,
}

#[utoipa::path(
    post,
    path = "/api/files/forwarded",
    tag = "files",
    request_body = ForwardedFileRequest,
    responses(
        (status = 200, description = "Token derived and event recorded", body = ForwardedFileResponse),
        (status = 400, description = "Invalid file metadata", body = crate::error::ErrorResponse)
    )
)]
pub async fn forwarded_file(
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<ForwardedFileRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    if request.file_size < 0 {
        return Err(AppError::InvalidInput(format!(
            "file_size must not be negative, got {}",
            request.file_size
        ))
        .into());
    }

    let file = FileMetadata::new(
        request.file_name,
        request.file_size,
        request.mime_type,
        request.file_id,
    );
    let token = FileToken::derive(&file, state.config.hash_length);

    let link = match (state.config.stream_base_url.as_deref(), request.message_id) {
        (Some(base), Some(message_id)) => {
            Some(stream_link(base, message_id, &token, &file.file_name))
        }
        _ => None,
    };

    // The forward already happened; a failed counter update must not fail the caller.
    match state.stats() {
        Ok(stats) => {
            stats.events.record_event_best_effort(file.file_size).await;
        }
        Err(_) => {
            tracing::debug!(file_id = file.file_id, "Stats disabled, file event not recorded");
        }
    }

    Ok(Json(ForwardedFileResponse {
        success: true,
        data: ForwardedFile {
            hash: token.into_string(),
            link,
        },
    }))
}
