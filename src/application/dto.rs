use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::domain::{entities::MediaRecord, value_objects::{MediaId, Origin}};

/// DTO for a media item as returned to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MediaDto {
    pub id: MediaId,
    /// Absolute URL of the stored image
    pub image: String,
}

impl MediaDto {
    pub fn from_record(record: &MediaRecord, origin: &Origin) -> Self {
        Self {
            id: record.id(),
            image: origin.url_for(record.relative_path()),
        }
    }
}

/// DTO for upload request
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UploadRequest {
    /// `data:<mime>;base64,<data>` encoded image
    pub image: String,
}

/// Result of listing media
#[derive(Debug, Clone)]
pub struct MediaList {
    pub media: Arc<Vec<MediaDto>>,
    /// Whether the list was served from the in-process cache
    pub cache_hit: bool,
}

/// Inconsistencies between records and stored blobs
#[derive(Debug, Clone, Default, Serialize)]
pub struct ReconcileReport {
    /// Records whose blob is missing
    pub dangling_records: Vec<MediaRecord>,
    /// Blob locations not referenced by any record
    pub orphaned_blobs: Vec<String>,
    /// Whether the inconsistencies were removed
    pub fixed: bool,
}

impl ReconcileReport {
    pub fn is_consistent(&self) -> bool {
        self.dangling_records.is_empty() && self.orphaned_blobs.is_empty()
    }
}
