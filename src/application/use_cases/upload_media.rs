use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info};

use crate::application::cache::MediaListCache;
use crate::application::dto::{MediaDto, UploadRequest};
use crate::application::ports::{BlobStore, MediaRepository, RepositoryError, StorageError};
use crate::domain::errors::DomainError;
use crate::domain::value_objects::{BlobName, ImagePayload, Origin};

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("{0}")]
    InvalidPayload(#[from] DomainError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// The blob was written but its record was not
    #[error("Repository error: {source} (orphaned blob at {location})")]
    Persistence {
        location: String,
        #[source]
        source: RepositoryError,
    },
}

/// Use case: Upload a base64 encoded image
pub struct UploadMediaUseCase {
    media_repo: Arc<dyn MediaRepository>,
    blob_store: Arc<dyn BlobStore>,
    cache: Arc<MediaListCache>,
}

impl UploadMediaUseCase {
    pub fn new(
        media_repo: Arc<dyn MediaRepository>,
        blob_store: Arc<dyn BlobStore>,
        cache: Arc<MediaListCache>,
    ) -> Self {
        Self {
            media_repo,
            blob_store,
            cache,
        }
    }

    /// Execute upload workflow
    pub async fn execute(
        &self,
        request: UploadRequest,
        origin: &Origin,
    ) -> Result<MediaDto, UploadError> {
        // 1. Decode and validate payload
        let payload = ImagePayload::from_data_uri(&request.image)?;

        // 2. Write blob under a fresh name
        let name = BlobName::generate(payload.extension());
        let location = self.blob_store.put(name.as_str(), payload.bytes()).await?;
        info!(
            %location,
            content_type = payload.content_type(),
            size_bytes = payload.bytes().len(),
            "Image saved"
        );

        // 3. Persist record
        let record = match self.media_repo.create(&location).await {
            Ok(record) => record,
            Err(source) => {
                error!(
                    %location,
                    error = %source,
                    "Failed to persist media record; blob left without a record"
                );
                return Err(UploadError::Persistence { location, source });
            }
        };

        // 4. Writes only invalidate
        self.cache.invalidate();

        // 5. Return DTO
        Ok(MediaDto::from_record(&record, origin))
    }
}
