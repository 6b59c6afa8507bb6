use chrono::{DateTime, TimeZone, Utc};
use uuid::Uuid;

/// Collision-resistant blob file name: `<unix-millis>-<uuid>.<ext>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlobName(String);

impl BlobName {
    pub fn generate(extension: &str) -> Self {
        Self::generate_at(Utc::now(), extension)
    }

    pub fn generate_at(now: DateTime<Utc>, extension: &str) -> Self {
        Self(format!(
            "{}-{}.{}",
            now.timestamp_millis(),
            Uuid::new_v4().simple(),
            extension
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Creation time encoded in a blob name or location, if it has one
    pub fn timestamp_of(location: &str) -> Option<DateTime<Utc>> {
        let file_name = location.rsplit('/').next()?;
        let (millis, _) = file_name.split_once('-')?;
        let millis: i64 = millis.parse().ok()?;
        Utc.timestamp_millis_opt(millis).single()
    }
}

impl std::fmt::Display for BlobName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
