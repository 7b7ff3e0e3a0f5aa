//! Disk-backed upload store.
//!
//! Files are stored under a per-user prefix (`{user_id}/{random}.{ext}`)
//! and served read-only via the static-file route. Deletion only accepts
//! paths inside the caller's own prefix.

use std::path::{Path, PathBuf};

use rand::Rng;
use rand::distr::Alphanumeric;
use thiserror::Error;

use charted_art_core::UserId;

use crate::config::UploadConfig;

/// Length of the random file stem.
const STEM_LENGTH: usize = 16;

/// Errors from the upload store.
#[derive(Debug, Error)]
pub enum UploadError {
    /// The file extension is not an accepted image type.
    #[error("Please upload a JPG or PNG file")]
    UnsupportedType,

    /// The path does not belong to the caller or escapes the store.
    #[error("invalid upload path")]
    InvalidPath,

    /// Filesystem operation failed.
    #[error("storage error: {0}")]
    Io(#[from] std::io::Error),
}

/// A stored upload: its store-relative path and public URL.
#[derive(Debug, Clone)]
pub struct StoredUpload {
    pub path: String,
    pub public_url: String,
}

/// Disk-backed file store for uploaded images.
#[derive(Debug, Clone)]
pub struct UploadStore {
    root: PathBuf,
    public_prefix: String,
}

impl UploadStore {
    #[must_use]
    pub fn new(config: &UploadConfig) -> Self {
        Self {
            root: config.root.clone(),
            public_prefix: config.public_prefix.trim_end_matches('/').to_owned(),
        }
    }

    /// Root directory files are stored under.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Store a file under the user's prefix with a random name.
    ///
    /// # Errors
    ///
    /// Returns `UploadError::UnsupportedType` for non-JPG/PNG extensions
    /// and `UploadError::Io` on filesystem failure.
    pub async fn store(
        &self,
        user: UserId,
        original_name: &str,
        bytes: &[u8],
    ) -> Result<StoredUpload, UploadError> {
        let ext = extension_of(original_name)?;
        let stem: String = rand::rng()
            .sample_iter(&Alphanumeric)
            .take(STEM_LENGTH)
            .map(char::from)
            .collect();

        let rel_path = format!("{user}/{stem}.{ext}");
        let abs_path = self.root.join(&rel_path);

        if let Some(parent) = abs_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&abs_path, bytes).await?;

        Ok(StoredUpload {
            public_url: format!("{}/{rel_path}", self.public_prefix),
            path: rel_path,
        })
    }

    /// Delete a stored file by its store-relative path.
    ///
    /// # Errors
    ///
    /// Returns `UploadError::InvalidPath` when the path is outside the
    /// caller's prefix or otherwise malformed, `UploadError::Io` on
    /// filesystem failure.
    pub async fn delete(&self, user: UserId, rel_path: &str) -> Result<(), UploadError> {
        validate_owned_path(user, rel_path)?;
        tokio::fs::remove_file(self.root.join(rel_path)).await?;
        Ok(())
    }
}

/// Accepted lower-cased extension of an uploaded file name.
fn extension_of(name: &str) -> Result<&'static str, UploadError> {
    let ext = name
        .rsplit('.')
        .next()
        .map(str::to_lowercase)
        .ok_or(UploadError::UnsupportedType)?;

    match ext.as_str() {
        "jpg" | "jpeg" => Ok("jpg"),
        "png" => Ok("png"),
        _ => Err(UploadError::UnsupportedType),
    }
}

/// A deletable path is exactly `{user}/{file}` with no traversal parts.
fn validate_owned_path(user: UserId, rel_path: &str) -> Result<(), UploadError> {
    let mut parts = rel_path.split('/');
    let (prefix, file) = (parts.next(), parts.next());

    if parts.next().is_some() {
        return Err(UploadError::InvalidPath);
    }
    let (Some(prefix), Some(file)) = (prefix, file) else {
        return Err(UploadError::InvalidPath);
    };
    if prefix != user.to_string() || file.is_empty() || file == "." || file == ".." {
        return Err(UploadError::InvalidPath);
    }

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn user() -> UserId {
        UserId::new(Uuid::new_v4())
    }

    #[test]
    fn test_extension_of_accepts_images() {
        assert_eq!(extension_of("photo.jpg").unwrap(), "jpg");
        assert_eq!(extension_of("photo.JPEG").unwrap(), "jpg");
        assert_eq!(extension_of("scan.PNG").unwrap(), "png");
    }

    #[test]
    fn test_extension_of_rejects_others() {
        assert!(extension_of("malware.exe").is_err());
        assert!(extension_of("animation.gif").is_err());
        assert!(extension_of("noextension").is_err());
    }

    #[test]
    fn test_validate_owned_path_accepts_own_file() {
        let u = user();
        assert!(validate_owned_path(u, &format!("{u}/abc123.jpg")).is_ok());
    }

    #[test]
    fn test_validate_owned_path_rejects_foreign_and_traversal() {
        let u = user();
        let other = user();
        assert!(validate_owned_path(u, &format!("{other}/abc123.jpg")).is_err());
        assert!(validate_owned_path(u, &format!("{u}/../secrets.txt")).is_err());
        assert!(validate_owned_path(u, &format!("{u}/nested/file.jpg")).is_err());
        assert!(validate_owned_path(u, "file.jpg").is_err());
        assert!(validate_owned_path(u, &format!("{u}/")).is_err());
    }

    #[tokio::test]
    async fn test_store_and_delete_roundtrip() {
        let dir = std::env::temp_dir().join(format!("ca-uploads-{}", Uuid::new_v4()));
        let store = UploadStore::new(&crate::config::UploadConfig {
            root: dir.clone(),
            public_prefix: "/uploads/".to_string(),
        });
        let u = user();

        let stored = store.store(u, "photo.jpg", b"not really a jpeg").await.unwrap();
        assert!(stored.path.starts_with(&format!("{u}/")));
        assert!(stored.public_url.starts_with("/uploads/"));
        assert!(dir.join(&stored.path).exists());

        store.delete(u, &stored.path).await.unwrap();
        assert!(!dir.join(&stored.path).exists());

        tokio::fs::remove_dir_all(&dir).await.ok();
    }
}
