use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

use crate::application::cache::MediaListCache;
use crate::application::dto::{MediaDto, MediaList};
use crate::application::ports::{MediaRepository, RepositoryError};
use crate::domain::value_objects::Origin;

#[derive(Debug, Error)]
pub enum ListError {
    #[error("Repository error: {0}")]
    Persistence(#[from] RepositoryError),
}

/// Use case: List all media, read through the media list cache
pub struct ListMediaUseCase {
    media_repo: Arc<dyn MediaRepository>,
    cache: Arc<MediaListCache>,
}

impl ListMediaUseCase {
    pub fn new(media_repo: Arc<dyn MediaRepository>, cache: Arc<MediaListCache>) -> Self {
        Self { media_repo, cache }
    }

    /// How long a listed snapshot stays fresh
    pub fn cache_ttl(&self) -> std::time::Duration {
        self.cache.ttl()
    }

    pub async fn execute(&self, origin: &Origin) -> Result<MediaList, ListError> {
        // 1. Serve a fresh snapshot
        if let Some(media) = self.cache.get(origin) {
            debug!(cache_hit = true, count = media.len(), "Listing media");
            return Ok(MediaList {
                media,
                cache_hit: true,
            });
        }

        // 2. Miss: load records and build URLs for this origin
        let generation = self.cache.generation();
        let records = self.media_repo.list_all().await?;
        let media: Arc<Vec<MediaDto>> = Arc::new(
            records
                .iter()
                .map(|record| MediaDto::from_record(record, origin))
                .collect(),
        );

        // 3. Repopulate unless a write landed during the load
        let cached = self
            .cache
            .set_if_current(generation, origin.clone(), Arc::clone(&media));
        debug!(cache_hit = false, cached, count = media.len(), "Listing media");

        Ok(MediaList {
            media,
            cache_hit: false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::MockMediaRepository;
    use crate::domain::entities::MediaRecord;
    use crate::domain::value_objects::MediaId;
    use chrono::Utc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn record(id: i64) -> MediaRecord {
        MediaRecord::reconstruct(MediaId::new(id), format!("images/{id}.png"), Utc::now())
    }

    #[tokio::test]
    async fn test_list_media_maps_urls_and_fills_cache() {
        // Arrange
        let mut mock_media_repo = MockMediaRepository::new();
        mock_media_repo
            .expect_list_all()
            .times(1)
            .returning(|| Ok(vec![record(1), record(2)]));

        let cache = Arc::new(MediaListCache::default());
        let use_case = ListMediaUseCase::new(Arc::new(mock_media_repo), Arc::clone(&cache));
        let origin = Origin::http("localhost:3000");

        // Act
        let first = use_case.execute(&origin).await.unwrap();
        let second = use_case.execute(&origin).await.unwrap();

        // Assert: repository consulted once, second call served from cache
        assert!(!first.cache_hit);
        assert!(second.cache_hit);
        assert_eq!(first.media.len(), 2);
        assert_eq!(first.media[0].image, "http://localhost:3000/images/1.png");
        assert_eq!(first.media, second.media);
    }

    #[tokio::test]
    async fn test_list_media_reloads_after_invalidate() {
        let mut mock_media_repo = MockMediaRepository::new();
        mock_media_repo
            .expect_list_all()
            .times(2)
            .returning(|| Ok(vec![record(1)]));

        let cache = Arc::new(MediaListCache::default());
        let use_case = ListMediaUseCase::new(Arc::new(mock_media_repo), Arc::clone(&cache));
        let origin = Origin::http("localhost:3000");

        use_case.execute(&origin).await.unwrap();
        cache.invalidate();
        let reloaded = use_case.execute(&origin).await.unwrap();

        assert!(!reloaded.cache_hit);
    }

    #[tokio::test]
    async fn test_list_media_different_origin_rebuilds_urls() {
        let mut mock_media_repo = MockMediaRepository::new();
        mock_media_repo
            .expect_list_all()
            .times(2)
            .returning(|| Ok(vec![record(1)]));

        let use_case =
            ListMediaUseCase::new(Arc::new(mock_media_repo), Arc::new(MediaListCache::default()));

        use_case.execute(&Origin::http("a.example")).await.unwrap();
        let other = use_case.execute(&Origin::http("b.example")).await.unwrap();

        assert!(!other.cache_hit);
        assert_eq!(other.media[0].image, "http://b.example/images/1.png");
    }

    #[tokio::test]
    async fn test_list_media_empty_result() {
        let mut mock_media_repo = MockMediaRepository::new();
        mock_media_repo
            .expect_list_all()
            .times(1)
            .returning(|| Ok(vec![]));

        let use_case =
            ListMediaUseCase::new(Arc::new(mock_media_repo), Arc::new(MediaListCache::default()));

        let result = use_case.execute(&Origin::http("localhost")).await.unwrap();
        assert!(result.media.is_empty());
    }

    #[tokio::test]
    async fn test_list_media_repository_failure_is_not_cached() {
        let mut mock_media_repo = MockMediaRepository::new();
        mock_media_repo
            .expect_list_all()
            .times(1)
            .returning(|| Err(RepositoryError::Internal("connection reset".to_string())));

        let cache = Arc::new(MediaListCache::default());
        let use_case = ListMediaUseCase::new(Arc::new(mock_media_repo), Arc::clone(&cache));

        let result = use_case.execute(&Origin::http("localhost")).await;

        assert!(matches!(result, Err(ListError::Persistence(_))));
        assert_eq!(cache.stats().entries, 0);
    }

    #[tokio::test]
    async fn test_list_racing_a_write_does_not_cache_stale_snapshot() {
        let cache = Arc::new(MediaListCache::default());
        let calls = Arc::new(AtomicUsize::new(0));

        let mut mock_media_repo = MockMediaRepository::new();
        let write_cache = Arc::clone(&cache);
        let call_count = Arc::clone(&calls);
        mock_media_repo
            .expect_list_all()
            .times(2)
            .returning(move || {
                if call_count.fetch_add(1, Ordering::SeqCst) == 0 {
                    // An upload commits and invalidates after this snapshot was read
                    write_cache.invalidate();
                    Ok(vec![])
                } else {
                    Ok(vec![record(1)])
                }
            });

        let use_case = ListMediaUseCase::new(Arc::new(mock_media_repo), Arc::clone(&cache));
        let origin = Origin::http("localhost:3000");

        let racing = use_case.execute(&origin).await.unwrap();
        let after_write = use_case.execute(&origin).await.unwrap();

        assert!(racing.media.is_empty());
        assert!(!after_write.cache_hit);
        assert_eq!(after_write.media.len(), 1);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
