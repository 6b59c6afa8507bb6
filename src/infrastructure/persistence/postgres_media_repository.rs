use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::application::ports::{MediaRepository, RepositoryError};
use crate::domain::entities::MediaRecord;
use crate::domain::value_objects::MediaId;

pub struct PostgresMediaRepository {
    pool: PgPool,
}

impl PostgresMediaRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MediaRepository for PostgresMediaRepository {
    async fn create(&self, relative_path: &str) -> Result<MediaRecord, RepositoryError> {
        let row = sqlx::query_as::<_, MediaRow>(
            r#"
            INSERT INTO media (image)
            VALUES ($1)
            RETURNING id, image, created_at
            "#,
        )
        .bind(relative_path)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into_domain())
    }

    async fn list_all(&self) -> Result<Vec<MediaRecord>, RepositoryError> {
        let rows = sqlx::query_as::<_, MediaRow>(
            r#"
            SELECT id, image, created_at
            FROM media
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(MediaRow::into_domain).collect())
    }

    async fn find_by_id(&self, id: MediaId) -> Result<Option<MediaRecord>, RepositoryError> {
        let row = sqlx::query_as::<_, MediaRow>(
            r#"
            SELECT id, image, created_at
            FROM media
            WHERE id = $1
            "#,
        )
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(MediaRow::into_domain))
    }

    async fn delete(&self, record: &MediaRecord) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM media WHERE id = $1")
            .bind(record.id().as_i64())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(record.id().to_string()));
        }

        Ok(())
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

/// Database row representation
#[derive(sqlx::FromRow)]
struct MediaRow {
    id: i64,
    image: String,
    created_at: DateTime<Utc>,
}

impl MediaRow {
    fn into_domain(self) -> MediaRecord {
        MediaRecord::reconstruct(MediaId::new(self.id), self.image, self.created_at)
    }
}
