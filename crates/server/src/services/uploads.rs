//! File upload handling for game cover images.
//!
//! Uploaded bytes land under the configured upload directory with a
//! uuid-prefixed, sanitized filename; the stored relative path is what the
//! catalog persists and what the static file route serves.

use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

/// Default upper bound on upload size: 2 MiB.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 2 * 1024 * 1024;

/// Errors that can occur while storing an upload.
#[derive(Debug, Error)]
pub enum UploadError {
    /// Upload exceeds the configured size bound.
    #[error("file exceeds the maximum size of {max} bytes")]
    TooLarge { max: usize },

    /// Upload has no content.
    #[error("uploaded file is empty")]
    Empty,

    /// Filesystem failure while persisting the bytes.
    #[error("failed to store upload: {0}")]
    Io(#[from] std::io::Error),
}

/// A stored upload, as reported back to the client.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredFile {
    /// Path relative to the server root, e.g. `uploads/3f2a...-cover.png`.
    pub path: String,
    /// The sanitized filename on disk.
    pub filename: String,
}

/// Stores uploaded files on the local filesystem.
#[derive(Debug, Clone)]
pub struct UploadService {
    dir: PathBuf,
    max_bytes: usize,
}

impl UploadService {
    /// Create a service storing files under `dir`.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>, max_bytes: usize) -> Self {
        Self {
            dir: dir.into(),
            max_bytes,
        }
    }

    /// The directory uploads are written to.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Persist an uploaded file.
    ///
    /// The original filename is sanitized and prefixed with a fresh uuid so
    /// concurrent uploads of the same name never collide.
    ///
    /// # Errors
    ///
    /// Returns `UploadError::Empty` for zero-byte uploads,
    /// `UploadError::TooLarge` past the size bound, and `UploadError::Io`
    /// on filesystem failure.
    pub async fn save(&self, original_name: &str, data: &[u8]) -> Result<StoredFile, UploadError> {
        if data.is_empty() {
            return Err(UploadError::Empty);
        }
        if data.len() > self.max_bytes {
            return Err(UploadError::TooLarge {
                max: self.max_bytes,
            });
        }

        let filename = format!("{}-{}", Uuid::new_v4(), sanitize_filename(original_name));

        tokio::fs::create_dir_all(&self.dir).await?;
        tokio::fs::write(self.dir.join(&filename), data).await?;

        Ok(StoredFile {
            path: format!("uploads/{filename}"),
            filename,
        })
    }
}

/// Strip a client-supplied filename down to a safe basename.
///
/// Keeps ASCII alphanumerics, `.`, `-` and `_`; everything else becomes `_`.
/// Path separators are covered by the rejection, so traversal sequences
/// cannot survive.
fn sanitize_filename(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();

    let trimmed = cleaned.trim_matches('.');
    if trimmed.is_empty() {
        "upload".to_owned()
    } else {
        trimmed.to_owned()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_keeps_safe_names() {
        assert_eq!(sanitize_filename("cover.png"), "cover.png");
        assert_eq!(sanitize_filename("my-game_01.jpg"), "my-game_01.jpg");
    }

    #[test]
    fn test_sanitize_neutralizes_traversal() {
        assert_eq!(sanitize_filename("../../etc/passwd"), "_.._etc_passwd");
        assert_eq!(sanitize_filename("..\\boot.ini"), "_boot.ini");
    }

    #[test]
    fn test_sanitize_empty_falls_back() {
        assert_eq!(sanitize_filename(""), "upload");
        assert_eq!(sanitize_filename("..."), "upload");
    }

    #[tokio::test]
    async fn test_save_rejects_empty_and_oversized() {
        let dir = std::env::temp_dir().join(format!("uploads-{}", Uuid::new_v4()));
        let service = UploadService::new(&dir, 8);

        assert!(matches!(
            service.save("a.png", &[]).await,
            Err(UploadError::Empty)
        ));
        assert!(matches!(
            service.save("a.png", &[0u8; 9]).await,
            Err(UploadError::TooLarge { max: 8 })
        ));
    }

    #[tokio::test]
    async fn test_save_writes_uuid_prefixed_file() {
        let dir = std::env::temp_dir().join(format!("uploads-{}", Uuid::new_v4()));
        let service = UploadService::new(&dir, DEFAULT_MAX_UPLOAD_BYTES);

        let stored = service.save("cover.png", b"png bytes").await.unwrap();
        assert!(stored.filename.ends_with("-cover.png"));
        assert_eq!(stored.path, format!("uploads/{}", stored.filename));

        let on_disk = tokio::fs::read(dir.join(&stored.filename)).await.unwrap();
        assert_eq!(on_disk, b"png bytes");

        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }
}
