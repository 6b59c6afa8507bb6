use async_trait::async_trait;
#[cfg(test)]
use mockall::{automock, predicate::*};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Blob not found: {0}")]
    NotFound(String),

    #[error("Blob already exists: {0}")]
    AlreadyExists(String),

    #[error("Invalid blob location: {0}")]
    InvalidLocation(String),
}

/// Port for physical blob storage operations
#[cfg_attr(test, automock)]
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Write a new blob named `name` and return its location relative to the
    /// storage root. Never overwrites an existing blob.
    async fn put(&self, name: &str, bytes: &[u8]) -> Result<String, StorageError>;

    /// Delete blob at `location`; a missing blob is `StorageError::NotFound`
    async fn delete(&self, location: &str) -> Result<(), StorageError>;

    /// Check if blob exists
    async fn exists(&self, location: &str) -> Result<bool, StorageError>;

    /// Locations of every stored blob
    async fn list(&self) -> Result<Vec<String>, StorageError>;
}
