use async_trait::async_trait;
use thiserror::Error;

use crate::domain::entities::MediaRecord;
use crate::domain::value_objects::MediaId;
#[cfg(test)]
use mockall::{automock, predicate::*};

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Media not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Port for media record persistence operations
#[cfg_attr(test, automock)]
#[async_trait]
pub trait MediaRepository: Send + Sync {
    /// Insert a record for `relative_path` and return it with its assigned id
    async fn create(&self, relative_path: &str) -> Result<MediaRecord, RepositoryError>;

    /// All records in ascending id order
    async fn list_all(&self) -> Result<Vec<MediaRecord>, RepositoryError>;

    async fn find_by_id(&self, id: MediaId) -> Result<Option<MediaRecord>, RepositoryError>;

    /// Delete record (hard delete)
    async fn delete(&self, record: &MediaRecord) -> Result<(), RepositoryError>;

    /// Cheap connectivity check, touching no rows
    async fn ping(&self) -> Result<(), RepositoryError>;
}
