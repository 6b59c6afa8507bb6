mod local_filesystem_store;
mod path_builder;

pub use local_filesystem_store::LocalFilesystemStore;
pub use path_builder::{PathBuilder, IMAGES_DIR};
