//! File storage abstraction for uploaded images (institution crests).
//!
//! The trait keeps the upload handling in the institutions module independent
//! of where bytes actually land; [`LocalFileStore`] writes them under a base
//! directory served back as static files.

use std::path::PathBuf;

use async_trait::async_trait;

/// Error type for file storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("file exceeds maximum size of {max_bytes} bytes")]
    TooLarge { max_bytes: usize },

    #[error("content type '{0}' is not an accepted image type")]
    UnsupportedType(String),

    #[error("invalid storage key: {0}")]
    InvalidKey(String),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

/// Storage backend for uploaded files.
#[async_trait]
pub trait FileStore: Send + Sync {
    /// Persist `content` under `key`, returning the key on success.
    async fn save(&self, key: &str, content: &[u8]) -> Result<String, StorageError>;

    /// Remove the file stored under `key`. Missing files are not an error.
    async fn delete(&self, key: &str) -> Result<(), StorageError>;

    /// Public URL under which the file at `key` is reachable.
    fn public_url(&self, key: &str) -> String;
}

const ACCEPTED_IMAGE_TYPES: [&str; 3] = ["image/png", "image/jpeg", "image/webp"];

/// Reject content types that are not crest-suitable images.
pub fn check_image_type(content_type: &str) -> Result<(), StorageError> {
    if ACCEPTED_IMAGE_TYPES.contains(&content_type) {
        Ok(())
    } else {
        Err(StorageError::UnsupportedType(content_type.to_string()))
    }
}

/// Local-filesystem storage serving files from a public base URL.
#[derive(Clone)]
pub struct LocalFileStore {
    base_dir: PathBuf,
    base_url: String,
    max_file_size: usize,
}

impl LocalFileStore {
    pub fn new(base_dir: PathBuf, base_url: String) -> Self {
        Self {
            base_dir,
            base_url,
            max_file_size: 5 * 1024 * 1024,
        }
    }

    pub fn with_max_size(base_dir: PathBuf, base_url: String, max_file_size: usize) -> Self {
        Self {
            base_dir,
            base_url,
            max_file_size,
        }
    }

    /// Keys are relative paths; reject traversal and oddball characters.
    fn validate_key(key: &str) -> Result<(), StorageError> {
        if key.is_empty() || key.contains("..") || key.starts_with('/') {
            return Err(StorageError::InvalidKey(
                "key must not be empty, contain '..', or start with '/'".to_string(),
            ));
        }
        if !key
            .chars()
            .all(|c| c.is_alphanumeric() || c == '-' || c == '_' || c == '/' || c == '.')
        {
            return Err(StorageError::InvalidKey(
                "key contains invalid characters".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl FileStore for LocalFileStore {
    async fn save(&self, key: &str, content: &[u8]) -> Result<String, StorageError> {
        Self::validate_key(key)?;

        if content.len() > self.max_file_size {
            return Err(StorageError::TooLarge {
                max_bytes: self.max_file_size,
            });
        }

        let file_path = self.base_dir.join(key);
        if let Some(parent) = file_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&file_path, content).await?;

        Ok(key.to_string())
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        Self::validate_key(key)?;

        let file_path = self.base_dir.join(key);
        match tokio::fs::remove_file(&file_path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn public_url(&self, key: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_key_accepts_valid_keys() {
        assert!(LocalFileStore::validate_key("escudos/abc-123.png").is_ok());
        assert!(LocalFileStore::validate_key("escudos/crest_1.webp").is_ok());
    }

    #[test]
    fn test_validate_key_rejects_traversal_and_absolute() {
        assert!(LocalFileStore::validate_key("../../etc/passwd").is_err());
        assert!(LocalFileStore::validate_key("/etc/passwd").is_err());
        assert!(LocalFileStore::validate_key("").is_err());
    }

    #[test]
    fn test_public_url_handles_trailing_slash() {
        let store = LocalFileStore::new(
            PathBuf::from("./uploads"),
            "http://localhost:8000/files/".to_string(),
        );
        assert_eq!(
            store.public_url("escudos/a.png"),
            "http://localhost:8000/files/escudos/a.png"
        );
    }

    #[test]
    fn test_check_image_type() {
        assert!(check_image_type("image/png").is_ok());
        assert!(check_image_type("image/jpeg").is_ok());
        assert!(check_image_type("application/pdf").is_err());
    }

    #[tokio::test]
    async fn test_save_rejects_oversized_content() {
        let dir = std::env::temp_dir().join("aula-storage-test");
        let store =
            LocalFileStore::with_max_size(dir, "http://localhost/files".to_string(), 4);
        let result = store.save("escudos/too-big.png", b"12345").await;
        assert!(matches!(result, Err(StorageError::TooLarge { max_bytes: 4 })));
    }

    #[tokio::test]
    async fn test_save_and_delete_roundtrip() {
        let dir = std::env::temp_dir().join(format!("aula-storage-{}", uuid::Uuid::new_v4()));
        let store = LocalFileStore::new(dir.clone(), "http://localhost/files".to_string());

        let key = store.save("escudos/crest.png", b"png-bytes").await.unwrap();
        assert_eq!(key, "escudos/crest.png");
        assert!(dir.join(&key).exists());

        store.delete(&key).await.unwrap();
        assert!(!dir.join(&key).exists());
        // Deleting again is not an error
        store.delete(&key).await.unwrap();

        tokio::fs::remove_dir_all(&dir).await.ok();
    }
}
