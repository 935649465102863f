//! Metadata of a forwarded file, as seen by the link codec.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FileMetadata {
    pub file_name: String,
    /// Size in bytes
    pub file_size: i64,
    pub mime_type: String,
    /// Identifier of the file on the remote storage
    pub file_id: i64,
}

impl FileMetadata {
    pub fn new(
        file_name: impl Into<String>,
        file_size: i64,
        mime_type: impl Into<String>,
        file_id: i64,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            file_size,
            mime_type: mime_type.into(),
            file_id,
        }
    }
}
