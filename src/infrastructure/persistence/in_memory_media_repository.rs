use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::application::ports::{MediaRepository, RepositoryError};
use crate::domain::entities::MediaRecord;
use crate::domain::value_objects::MediaId;

#[derive(Default)]
struct State {
    next_id: i64,
    records: BTreeMap<MediaId, MediaRecord>,
}

/// Process-local media repository. Ids start at 1 and are never reused.
#[derive(Clone, Default)]
pub struct InMemoryMediaRepository {
    state: Arc<RwLock<State>>,
}

impl InMemoryMediaRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MediaRepository for InMemoryMediaRepository {
    async fn create(&self, relative_path: &str) -> Result<MediaRecord, RepositoryError> {
        let mut state = self.state.write().await;
        state.next_id += 1;
        let id = MediaId::new(state.next_id);
        let record = MediaRecord::reconstruct(id, relative_path.to_string(), Utc::now());
        state.records.insert(id, record.clone());
        Ok(record)
    }

    async fn list_all(&self) -> Result<Vec<MediaRecord>, RepositoryError> {
        Ok(self.state.read().await.records.values().cloned().collect())
    }

    async fn find_by_id(&self, id: MediaId) -> Result<Option<MediaRecord>, RepositoryError> {
        Ok(self.state.read().await.records.get(&id).cloned())
    }

    async fn delete(&self, record: &MediaRecord) -> Result<(), RepositoryError> {
        self.state
            .write()
            .await
            .records
            .remove(&record.id())
            .map(|_| ())
            .ok_or_else(|| RepositoryError::NotFound(record.id().to_string()))
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        Ok(())
    }
}
