mod blob_name;
mod image_payload;
mod media_id;
mod origin;

pub use blob_name::BlobName;
pub use image_payload::ImagePayload;
pub use media_id::MediaId;
pub use origin::Origin;
