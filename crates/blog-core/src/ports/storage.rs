//! Image storage port.

use async_trait::async_trait;

/// An uploaded image that passed content-type and size checks.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub bytes: Vec<u8>,
    /// File extension derived from the content type (`png`, `jpg`, ...).
    pub extension: &'static str,
}

/// Public asset store for post images.
#[async_trait]
pub trait ImageStorage: Send + Sync {
    /// Store the image and return its path relative to the storage root.
    async fn store(&self, upload: ImageUpload) -> Result<String, StorageError>;

    /// Remove a previously stored image.
    async fn delete(&self, path: &str) -> Result<(), StorageError>;
}

/// Storage errors.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid path: {0}")]
    InvalidPath(String),
}
