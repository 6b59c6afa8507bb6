mod blob_store;
mod media_repository;

pub use blob_store::{BlobStore, StorageError};
pub use media_repository::{MediaRepository, RepositoryError};

#[cfg(test)]
pub use blob_store::MockBlobStore;
#[cfg(test)]
pub use media_repository::MockMediaRepository;
