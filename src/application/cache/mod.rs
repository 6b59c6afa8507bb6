mod media_list_cache;
mod ttl_cache;

pub use media_list_cache::{MediaListCache, ALL_MEDIA_KEY};
pub use ttl_cache::{CacheStats, EntryState, TtlCache, DEFAULT_CAPACITY, DEFAULT_TTL};
