use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::MediaId;

/// Durable record associating a media id with its blob's relative path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaRecord {
    id: MediaId,
    relative_path: String,
    created_at: DateTime<Utc>,
}

impl MediaRecord {
    /// Reconstruct from storage (e.g., database)
    pub fn reconstruct(id: MediaId, relative_path: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            relative_path,
            created_at,
        }
    }

    pub fn id(&self) -> MediaId {
        self.id
    }

    /// Location beneath the storage root; never an absolute URL
    pub fn relative_path(&self) -> &str {
        &self.relative_path
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
