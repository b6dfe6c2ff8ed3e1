//! Media storage port.
//!
//! Uploaded files are first staged on local disk; `upload` moves a staged
//! file into durable storage and returns a public URL. The staged file is
//! consumed either way.

use async_trait::async_trait;
use std::path::Path;

use crate::domain::foundation::DomainError;

/// A stored media object.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredMedia {
    pub url: String,
    pub public_id: String,
    /// Playback length, when the backend can tell.
    pub duration_secs: Option<f64>,
}

/// Durable storage for avatars, cover images and other uploads.
///
/// # Contract
///
/// Implementations must:
/// - Remove the staged file after `upload`, whether or not it succeeded
/// - Return URLs from which `media_public_id` recovers the `public_id`
/// - Treat `delete` of an unknown id as success
/// - Return `ErrorCode::Upstream` on storage failures
#[async_trait]
pub trait MediaStorage: Send + Sync {
    async fn upload(&self, staged: &Path) -> Result<StoredMedia, DomainError>;

    async fn delete(&self, public_id: &str) -> Result<(), DomainError>;
}

/// Opaque id of a stored object: the last URL path segment without its
/// extension.
pub fn media_public_id(url: &str) -> Option<String> {
    let path = url.split(['?', '#']).next()?;
    let segment = path.rsplit('/').next()?;
    let stem = match segment.rsplit_once('.') {
        Some((stem, _ext)) => stem,
        None => segment,
    };
    if stem.is_empty() {
        None
    } else {
        Some(stem.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_id_strips_directory_and_extension() {
        assert_eq!(
            media_public_id("https://cdn.example.com/v1/abc123.png"),
            Some("abc123".to_string())
        );
    }

    #[test]
    fn public_id_ignores_query_string() {
        assert_eq!(
            media_public_id("/media/abc123.jpg?w=200"),
            Some("abc123".to_string())
        );
    }

    #[test]
    fn public_id_without_extension_is_segment() {
        assert_eq!(media_public_id("/media/abc123"), Some("abc123".to_string()));
    }

    #[test]
    fn public_id_of_directory_url_is_none() {
        assert_eq!(media_public_id("https://cdn.example.com/"), None);
    }
}
