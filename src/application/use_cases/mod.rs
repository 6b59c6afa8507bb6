mod delete_media;
mod list_media;
mod reconcile_media;
mod upload_media;

pub use delete_media::{DeleteError, DeleteMediaUseCase};
pub use list_media::{ListError, ListMediaUseCase};
pub use reconcile_media::{ReconcileError, ReconcileMediaUseCase};
pub use upload_media::{UploadError, UploadMediaUseCase};
