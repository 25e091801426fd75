//! Filesystem-backed image storage.

use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use uuid::Uuid;

use blog_core::ports::{ImageStorage, ImageUpload, StorageError};

const POSTS_DIR: &str = "posts";

/// Stores post images under `<root>/posts/<uuid>.<ext>`.
///
/// Returned paths are relative to `root`, which is what gets persisted on
/// the post and served to clients.
#[derive(Debug, Clone)]
pub struct LocalImageStorage {
    root: PathBuf,
}

impl LocalImageStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, relative: &str) -> Result<PathBuf, StorageError> {
        let path = Path::new(relative);
        let escapes = path
            .components()
            .any(|c| !matches!(c, Component::Normal(_)));
        if relative.is_empty() || escapes {
            return Err(StorageError::InvalidPath(relative.to_owned()));
        }
        Ok(self.root.join(path))
    }
}

#[async_trait]
impl ImageStorage for LocalImageStorage {
    async fn store(&self, upload: ImageUpload) -> Result<String, StorageError> {
        let dir = self.root.join(POSTS_DIR);
        tokio::fs::create_dir_all(&dir).await?;

        let relative = format!("{POSTS_DIR}/{}.{}", Uuid::new_v4(), upload.extension);
        tokio::fs::write(self.root.join(&relative), &upload.bytes).await?;

        tracing::debug!(path = %relative, bytes = upload.bytes.len(), "Image stored");
        Ok(relative)
    }

    async fn delete(&self, path: &str) -> Result<(), StorageError> {
        let full = self.resolve(path)?;
        match tokio::fs::remove_file(&full).await {
            Ok(()) => {
                tracing::debug!(path, "Image deleted");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
