use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use thiserror::Error;
use tracing::{info, warn};

use crate::application::dto::ReconcileReport;
use crate::application::ports::{BlobStore, MediaRepository, RepositoryError, StorageError};
use crate::domain::value_objects::BlobName;

#[derive(Debug, Error)]
pub enum ReconcileError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Repository error: {0}")]
    Persistence(#[from] RepositoryError),

    #[error("Grace period out of range: {0}")]
    GracePeriodOutOfRange(Duration),
}

/// Use case: Find (and optionally remove) records without blobs and blobs
/// without records left behind by partially failed uploads and deletes.
pub struct ReconcileMediaUseCase {
    media_repo: Arc<dyn MediaRepository>,
    blob_store: Arc<dyn BlobStore>,
    grace_period: Duration,
}

impl ReconcileMediaUseCase {
    pub fn new(media_repo: Arc<dyn MediaRepository>, blob_store: Arc<dyn BlobStore>) -> Self {
        Self {
            media_repo,
            blob_store,
            grace_period: Duration::minutes(5),
        }
    }

    /// Blobs newer than this may belong to an upload still in flight
    pub fn with_grace_period(mut self, grace_period: Duration) -> Self {
        self.grace_period = grace_period;
        self
    }

    pub async fn execute(&self, fix: bool) -> Result<ReconcileReport, ReconcileError> {
        self.execute_at(fix, Utc::now()).await
    }

    pub async fn execute_at(
        &self,
        fix: bool,
        now: DateTime<Utc>,
    ) -> Result<ReconcileReport, ReconcileError> {
        let cutoff = now
            .checked_sub_signed(self.grace_period)
            .ok_or(ReconcileError::GracePeriodOutOfRange(self.grace_period))?;

        let records = self.media_repo.list_all().await?;
        let blobs: HashSet<String> = self.blob_store.list().await?.into_iter().collect();
        let referenced: HashSet<&str> = records.iter().map(|r| r.relative_path()).collect();

        let dangling_records: Vec<_> = records
            .iter()
            .filter(|r| !blobs.contains(r.relative_path()))
            .cloned()
            .collect();

        let mut orphaned_blobs: Vec<String> = blobs
            .iter()
            .filter(|location| !referenced.contains(location.as_str()))
            .filter(|location| {
                BlobName::timestamp_of(location.as_str()).map_or(true, |created| created < cutoff)
            })
            .cloned()
            .collect();
        orphaned_blobs.sort();

        let mut report = ReconcileReport {
            dangling_records,
            orphaned_blobs,
            fixed: false,
        };

        if fix && !report.is_consistent() {
            for record in &report.dangling_records {
                self.media_repo.delete(record).await?;
                info!(media_id = %record.id(), location = record.relative_path(), "Removed dangling record");
            }
            for location in &report.orphaned_blobs {
                match self.blob_store.delete(location).await {
                    Ok(()) | Err(StorageError::NotFound(_)) => {
                        info!(%location, "Removed orphaned blob");
                    }
                    Err(e) => return Err(e.into()),
                }
            }
            report.fixed = true;
        } else if !report.is_consistent() {
            warn!(
                dangling_records = report.dangling_records.len(),
                orphaned_blobs = report.orphaned_blobs.len(),
                "Media store is inconsistent"
            );
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{MockBlobStore, MockMediaRepository};
    use crate::domain::entities::MediaRecord;
    use crate::domain::value_objects::MediaId;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.timestamp_millis_opt(1_712_000_000_000).unwrap()
    }

    fn record(id: i64, path: &str) -> MediaRecord {
        MediaRecord::reconstruct(MediaId::new(id), path.to_string(), now())
    }

    fn old_blob(suffix: &str) -> String {
        let created = now() - Duration::hours(1);
        format!("images/{}-{suffix}.png", created.timestamp_millis())
    }

    fn fresh_blob(suffix: &str) -> String {
        format!("images/{}-{suffix}.png", now().timestamp_millis())
    }

    #[tokio::test]
    async fn test_reconcile_reports_both_kinds() {
        let kept = old_blob("kept");
        let orphan = old_blob("orphan");
        let in_flight = fresh_blob("inflight");

        let mut mock_media_repo = MockMediaRepository::new();
        let records = vec![record(1, &kept), record(2, "images/gone.png")];
        mock_media_repo
            .expect_list_all()
            .times(1)
            .returning(move || Ok(records.clone()));

        let mut mock_blob_store = MockBlobStore::new();
        let blobs = vec![kept.clone(), orphan.clone(), in_flight.clone()];
        mock_blob_store
            .expect_list()
            .times(1)
            .returning(move || Ok(blobs.clone()));

        let use_case = ReconcileMediaUseCase::new(Arc::new(mock_media_repo), Arc::new(mock_blob_store));
        let report = use_case.execute_at(false, now()).await.unwrap();

        assert_eq!(report.dangling_records.len(), 1);
        assert_eq!(report.dangling_records[0].id(), MediaId::new(2));
        assert_eq!(report.orphaned_blobs, vec![orphan]);
        assert!(!report.fixed);
    }

    #[tokio::test]
    async fn test_reconcile_fix_removes_inconsistencies() {
        let orphan = old_blob("orphan");

        let mut mock_media_repo = MockMediaRepository::new();
        mock_media_repo
            .expect_list_all()
            .times(1)
            .returning(|| Ok(vec![record(2, "images/gone.png")]));
        mock_media_repo
            .expect_delete()
            .withf(|r| r.id() == MediaId::new(2))
            .times(1)
            .returning(|_| Ok(()));

        let mut mock_blob_store = MockBlobStore::new();
        let blobs = vec![orphan.clone()];
        mock_blob_store
            .expect_list()
            .times(1)
            .returning(move || Ok(blobs.clone()));
        let expected = orphan.clone();
        mock_blob_store
            .expect_delete()
            .withf(move |location| location == expected)
            .times(1)
            .returning(|_| Ok(()));

        let use_case = ReconcileMediaUseCase::new(Arc::new(mock_media_repo), Arc::new(mock_blob_store));
        let report = use_case.execute_at(true, now()).await.unwrap();

        assert!(report.fixed);
        assert_eq!(report.orphaned_blobs, vec![orphan]);
    }

    #[tokio::test]
    async fn test_reconcile_consistent_store_changes_nothing() {
        let kept = old_blob("kept");

        let mut mock_media_repo = MockMediaRepository::new();
        let records = vec![record(1, &kept)];
        mock_media_repo
            .expect_list_all()
            .times(1)
            .returning(move || Ok(records.clone()));
        mock_media_repo.expect_delete().times(0);

        let mut mock_blob_store = MockBlobStore::new();
        let blobs = vec![kept.clone()];
        mock_blob_store
            .expect_list()
            .times(1)
            .returning(move || Ok(blobs.clone()));
        mock_blob_store.expect_delete().times(0);

        let use_case = ReconcileMediaUseCase::new(Arc::new(mock_media_repo), Arc::new(mock_blob_store));
        let report = use_case.execute_at(true, now()).await.unwrap();

        assert!(report.is_consistent());
        assert!(!report.fixed);
    }

    #[tokio::test]
    async fn test_reconcile_rejects_unrepresentable_grace_period() {
        let mut mock_media_repo = MockMediaRepository::new();
        mock_media_repo.expect_list_all().never();
        let mut mock_blob_store = MockBlobStore::new();
        mock_blob_store.expect_list().never();

        let use_case = ReconcileMediaUseCase::new(Arc::new(mock_media_repo), Arc::new(mock_blob_store))
            .with_grace_period(Duration::MAX);
        let result = use_case.execute_at(false, now()).await;

        assert!(matches!(result, Err(ReconcileError::GracePeriodOutOfRange(_))));
    }
}
