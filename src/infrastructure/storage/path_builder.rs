use std::path::{Component, Path, PathBuf};

use crate::application::ports::StorageError;

/// Directory beneath the public root that holds uploaded images
pub const IMAGES_DIR: &str = "images";

/// Utility for mapping blob names and locations to filesystem paths
#[derive(Debug, Clone)]
pub struct PathBuilder {
    public_root: PathBuf,
}

impl PathBuilder {
    pub fn new(public_root: PathBuf) -> Self {
        Self { public_root }
    }

    /// `<root>/images`
    pub fn images_dir(&self) -> PathBuf {
        self.public_root.join(IMAGES_DIR)
    }

    /// Relative location for a blob name: `images/{name}`
    pub fn location_for(&self, name: &str) -> Result<String, StorageError> {
        if name.is_empty() || name.contains(['/', '\\']) || name == "." || name == ".." {
            return Err(StorageError::InvalidLocation(name.to_string()));
        }
        Ok(format!("{IMAGES_DIR}/{name}"))
    }

    /// Absolute path of a relative location. Rejects anything that could
    /// escape the public root.
    pub fn resolve(&self, location: &str) -> Result<PathBuf, StorageError> {
        let relative = Path::new(location);
        let safe = !location.is_empty()
            && relative
                .components()
                .all(|component| matches!(component, Component::Normal(_)));

        if !safe {
            return Err(StorageError::InvalidLocation(location.to_string()));
        }
        Ok(self.public_root.join(relative))
    }
}
