use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tracing::debug;

use crate::application::cache::{CacheStats, TtlCache};
use crate::application::dto::MediaDto;
use crate::domain::value_objects::Origin;

/// Key of the full media list snapshot
pub const ALL_MEDIA_KEY: &str = "all_media";

#[derive(Debug, Clone)]
struct CachedMediaList {
    origin: Origin,
    media: Arc<Vec<MediaDto>>,
}

/// Read-through cache of the URL-mapped media list.
///
/// The snapshot remembers the origin its URLs were built for; a lookup from
/// another origin is a miss.
///
/// Every invalidation bumps a generation counter. A reader takes the
/// generation before loading records and stores its snapshot only if no
/// write invalidated the cache in between, so a slow list can never put a
/// pre-write snapshot back.
pub struct MediaListCache {
    cache: TtlCache<CachedMediaList>,
    generation: Mutex<u64>,
}

impl MediaListCache {
    pub fn new(ttl: Duration, capacity: usize) -> Self {
        Self::from_cache(TtlCache::new(ttl, capacity))
    }

    fn from_cache(cache: TtlCache<CachedMediaList>) -> Self {
        Self {
            cache,
            generation: Mutex::new(0),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.cache.default_ttl()
    }

    pub fn get(&self, origin: &Origin) -> Option<Arc<Vec<MediaDto>>> {
        let cached = self.cache.get(ALL_MEDIA_KEY)?;
        if &cached.origin == origin {
            Some(cached.media)
        } else {
            debug!(cached_origin = %cached.origin, %origin, "Cached media list built for another origin");
            None
        }
    }

    /// Token to pass to `set_if_current` for a snapshot loaded after this call
    pub fn generation(&self) -> u64 {
        *self.generation.lock()
    }

    /// Store the snapshot unless the cache was invalidated since `generation`
    /// was taken. Returns whether it was stored.
    pub fn set_if_current(
        &self,
        generation: u64,
        origin: Origin,
        media: Arc<Vec<MediaDto>>,
    ) -> bool {
        let current = self.generation.lock();
        if *current != generation {
            debug!(
                snapshot_generation = generation,
                current_generation = *current,
                "Discarding media list loaded before a write"
            );
            return false;
        }
        self.cache
            .set(ALL_MEDIA_KEY, CachedMediaList { origin, media });
        true
    }

    pub fn invalidate(&self) {
        let mut generation = self.generation.lock();
        *generation = generation.wrapping_add(1);
        if self.cache.invalidate(ALL_MEDIA_KEY) {
            debug!("Media list cache invalidated");
        }
    }

    pub fn stats(&self) -> CacheStats {
        self.cache.stats()
    }
}

impl Default for MediaListCache {
    fn default() -> Self {
        Self::from_cache(TtlCache::default())
    }
}
