//! Short deterministic token for addressing a forwarded file in an external link.
//!
//! Preimage: `file_name|file_size|mime_type|file_id`.
//! Token = first `len` hex characters of SHA-256(preimage), `len` in 8..=16.
//!
//! The token is not a signature. It keeps links compact without exposing the
//! internal identifiers; two distinct files collide only with negligible probability.

use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

use crate::models::FileMetadata;

pub const MIN_HASH_LENGTH: usize = 8;
pub const MAX_HASH_LENGTH: usize = 16;
pub const DEFAULT_HASH_LENGTH: usize = 8;

/// Build the canonical preimage for a file. Field order is part of the format.
pub fn pack(file_name: &str, file_size: i64, mime_type: &str, file_id: i64) -> String {
    format!("{}|{}|{}|{}", file_name, file_size, mime_type, file_id)
}

/// Truncated hex SHA-256 of the canonical string. `len` is clamped to 8..=16.
pub fn short_hash(canonical: &str, len: usize) -> String {
    let len = len.clamp(MIN_HASH_LENGTH, MAX_HASH_LENGTH);
    let digest = Sha256::digest(canonical.as_bytes());
    let mut encoded = hex::encode(digest);
    encoded.truncate(len);
    encoded
}

/// Check a presented token against the canonical string in constant time.
pub fn check_hash(candidate: &str, canonical: &str, len: usize) -> bool {
    let expected = short_hash(canonical, len);
    candidate.len() == expected.len() && bool::from(candidate.as_bytes().ct_eq(expected.as_bytes()))
}

/// Token derived from a file's metadata.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FileToken(String);

impl FileToken {
    pub fn derive(file: &FileMetadata, len: usize) -> Self {
        let canonical = pack(&file.file_name, file.file_size, &file.mime_type, file.file_id);
        FileToken(short_hash(&canonical, len))
    }

    pub fn matches(&self, file: &FileMetadata) -> bool {
        let canonical = pack(&file.file_name, file.file_size, &file.mime_type, file.file_id);
        check_hash(&self.0, &canonical, self.0.len())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for FileToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// External streaming/download link: `{base}?video={message_id}?hash={token}&filename={name}`.
///
/// The `video` value carries its own `?hash=` suffix, so both query values are percent-encoded.
pub fn stream_link(base_url: &str, message_id: i64, token: &FileToken, file_name: &str) -> String {
    let video = format!("{}?hash={}", message_id, token);
    format!(
        "{}?video={}&filename={}",
        base_url.trim_end_matches('/'),
        urlencoding::encode(&video),
        urlencoding::encode(file_name)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pack_preserves_field_order() {
        assert_eq!(pack("x.mp4", 100, "video/mp4", 1), "x.mp4|100|video/mp4|1");
    }

    #[test]
    fn short_hash_is_deterministic() {
        let canonical = pack("movie.mkv", 734_003_200, "video/x-matroska", 42);
        let first = short_hash(&canonical, DEFAULT_HASH_LENGTH);
        let second = short_hash(&canonical, DEFAULT_HASH_LENGTH);
        assert_eq!(first, second);
        assert_eq!(first.len(), DEFAULT_HASH_LENGTH);
        assert!(first.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn distinct_files_get_distinct_tokens() {
        let a = short_hash(&pack("x.mp4", 100, "video/mp4", 1), DEFAULT_HASH_LENGTH);
        let b = short_hash(&pack("y.mp4", 100, "video/mp4", 2), DEFAULT_HASH_LENGTH);
        assert_ne!(a, b);
    }

    #[test]
    fn length_is_clamped() {
        let canonical = pack("a", 1, "text/plain", 1);
        assert_eq!(short_hash(&canonical, 2).len(), MIN_HASH_LENGTH);
        assert_eq!(short_hash(&canonical, 64).len(), MAX_HASH_LENGTH);
        assert_eq!(short_hash(&canonical, 12).len(), 12);
        // A longer token extends the shorter one.
        assert!(short_hash(&canonical, 12).starts_with(&short_hash(&canonical, 8)));
    }

    #[test]
    fn check_hash_accepts_only_matching_token() {
        let canonical = pack("doc.pdf", 2048, "application/pdf", 7);
        let token = short_hash(&canonical, 10);
        assert!(check_hash(&token, &canonical, 10));
        assert!(!check_hash(&token, &pack("doc.pdf", 2049, "application/pdf", 7), 10));
        assert!(!check_hash(&token[..8], &canonical, 10));
    }

    #[test]
    fn file_token_round_trip_through_metadata() {
        let file = FileMetadata::new("song.mp3", 5_000, "audio/mpeg", 99);
        let token = FileToken::derive(&file, 8);
        assert!(token.matches(&file));
        assert!(!token.matches(&FileMetadata::new("song.mp3", 5_000, "audio/mpeg", 100)));
    }

    #[test]
    fn stream_link_encodes_query_values() {
        let file = FileMetadata::new("my clip.mp4", 100, "video/mp4", 1);
        let token = FileToken::derive(&file, 8);
        let link = stream_link("https://files.example.com/", 321, &token, &file.file_name);
        assert_eq!(
            link,
            format!(
                "https://files.example.com?video=321%3Fhash%3D{}&filename=my%20clip.mp4",
                token
            )
        );
    }
}
