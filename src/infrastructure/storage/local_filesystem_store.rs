use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::PathBuf;
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

use crate::application::ports::{BlobStore, StorageError};
use crate::infrastructure::storage::PathBuilder;

/// Local filesystem blob store rooted at the public directory
pub struct LocalFilesystemStore {
    path_builder: PathBuilder,
}

impl LocalFilesystemStore {
    pub fn new(public_root: PathBuf) -> Self {
        Self {
            path_builder: PathBuilder::new(public_root),
        }
    }

    /// Initialize storage directories
    pub async fn init(&self) -> Result<(), StorageError> {
        fs::create_dir_all(self.path_builder.images_dir()).await?;
        Ok(())
    }
}

#[async_trait]
impl BlobStore for LocalFilesystemStore {
    async fn put(&self, name: &str, bytes: &[u8]) -> Result<String, StorageError> {
        let location = self.path_builder.location_for(name)?;
        let path = self.path_builder.resolve(&location)?;

        // create_new: an existing blob is never overwritten
        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
            .map_err(|e| match e.kind() {
                ErrorKind::AlreadyExists => StorageError::AlreadyExists(location.clone()),
                _ => StorageError::Io(e),
            })?;

        debug!("Writing blob to {:?}", path);
        let written = async {
            file.write_all(bytes).await?;
            file.sync_all().await?;
            Ok::<(), std::io::Error>(())
        }
        .await;

        if let Err(e) = written {
            warn!("Failed to write blob {:?}: {}", path, e);
            // Best effort cleanup of the partial file
            let _ = fs::remove_file(&path).await;
            return Err(StorageError::Io(e));
        }

        Ok(location)
    }

    async fn delete(&self, location: &str) -> Result<(), StorageError> {
        let path = self.path_builder.resolve(location)?;

        fs::remove_file(&path).await.map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                StorageError::NotFound(location.to_string())
            } else {
                StorageError::Io(e)
            }
        })?;

        Ok(())
    }

    async fn exists(&self, location: &str) -> Result<bool, StorageError> {
        let path = self.path_builder.resolve(location)?;
        Ok(fs::metadata(&path).await.is_ok())
    }

    async fn list(&self) -> Result<Vec<String>, StorageError> {
        let mut entries = match fs::read_dir(self.path_builder.images_dir()).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StorageError::Io(e)),
        };

        let mut locations = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            if !entry.file_type().await?.is_file() {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                locations.push(self.path_builder.location_for(name)?);
            }
        }
        locations.sort();

        Ok(locations)
    }
}
