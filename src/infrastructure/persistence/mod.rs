mod in_memory_media_repository;
mod postgres_media_repository;

pub use in_memory_media_repository::InMemoryMediaRepository;
pub use postgres_media_repository::PostgresMediaRepository;
