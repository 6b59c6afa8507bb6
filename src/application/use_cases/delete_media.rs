use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

use crate::application::cache::MediaListCache;
use crate::application::ports::{BlobStore, MediaRepository, RepositoryError, StorageError};
use crate::domain::value_objects::MediaId;

#[derive(Debug, Error)]
pub enum DeleteError {
    #[error("Media not found: {0}")]
    NotFound(MediaId),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Repository error: {0}")]
    Persistence(#[from] RepositoryError),
}

/// Use case: Delete a media record and its blob
pub struct DeleteMediaUseCase {
    media_repo: Arc<dyn MediaRepository>,
    blob_store: Arc<dyn BlobStore>,
    cache: Arc<MediaListCache>,
    tolerate_missing_blobs: bool,
}

impl DeleteMediaUseCase {
    pub fn new(
        media_repo: Arc<dyn MediaRepository>,
        blob_store: Arc<dyn BlobStore>,
        cache: Arc<MediaListCache>,
    ) -> Self {
        Self {
            media_repo,
            blob_store,
            cache,
            tolerate_missing_blobs: false,
        }
    }

    /// Treat a blob that is already gone as deleted instead of failing
    pub fn tolerate_missing_blobs(mut self, tolerate: bool) -> Self {
        self.tolerate_missing_blobs = tolerate;
        self
    }

    /// Execute delete workflow
    pub async fn execute(&self, id: MediaId) -> Result<(), DeleteError> {
        // 1. Find record
        let record = self
            .media_repo
            .find_by_id(id)
            .await?
            .ok_or(DeleteError::NotFound(id))?;

        // 2. Delete blob; a failure leaves the record in place
        match self.blob_store.delete(record.relative_path()).await {
            Ok(()) => {}
            Err(StorageError::NotFound(location)) if self.tolerate_missing_blobs => {
                warn!(media_id = %id, %location, "Blob already missing, deleting record anyway");
            }
            Err(e) => return Err(DeleteError::Storage(e)),
        }

        // 3. Delete record
        self.media_repo.delete(&record).await?;

        // 4. Invalidate list
        self.cache.invalidate();

        info!(media_id = %id, location = record.relative_path(), "Media deleted");
        Ok(())
    }
}
