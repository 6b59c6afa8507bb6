mod media;

pub use media::MediaRecord;
