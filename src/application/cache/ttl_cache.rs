use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use moka::notification::RemovalCause;
use moka::policy::EvictionPolicy;
use moka::sync::Cache;
use serde::Serialize;
use utoipa::ToSchema;

/// Default time-to-live for cached entries (1 hour)
pub const DEFAULT_TTL: Duration = Duration::from_secs(3600);

/// Default maximum number of entries
pub const DEFAULT_CAPACITY: usize = 100;

/// Observable state of a single key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryState {
    Empty,
    Fresh,
    Expired,
}

/// A cached value and the instant it stops being valid
#[derive(Debug, Clone)]
struct CacheEntry<V> {
    value: V,
    /// `None` when `now + ttl` is not representable
    expires_at: Option<Instant>,
}

impl<V> CacheEntry<V> {
    fn is_fresh_at(&self, now: Instant) -> bool {
        match self.expires_at {
            Some(expires_at) => now < expires_at,
            None => true,
        }
    }
}

/// Counters reported by `TtlCache::stats`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct CacheStats {
    pub entries: usize,
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
}

#[derive(Default)]
struct Counters {
    hits: AtomicU64,
    misses: AtomicU64,
    evictions: AtomicU64,
}

/// Bounded in-process cache with per-entry expiry, backed by moka.
///
/// Expiry is checked against the entry's own deadline so callers can drive
/// the clock, and so an expired key can be told apart from a missing one
/// until it is read. Eviction is least-recently-used: a `get` or `set` makes
/// the key newest. Pending moka maintenance runs after every `set`, so the
/// capacity bound holds as soon as `set` returns.
pub struct TtlCache<V> {
    cache: Cache<String, CacheEntry<V>>,
    counters: Arc<Counters>,
    default_ttl: Duration,
    capacity: usize,
}

impl<V: Clone + Send + Sync + 'static> TtlCache<V> {
    pub fn new(default_ttl: Duration, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let counters = Arc::new(Counters::default());

        let listener_counters = Arc::clone(&counters);
        let cache = Cache::builder()
            .max_capacity(capacity as u64)
            .eviction_policy(EvictionPolicy::lru())
            .eviction_listener(move |_key, _value, cause| {
                if cause == RemovalCause::Size {
                    listener_counters.evictions.fetch_add(1, Ordering::Relaxed);
                }
            })
            .build();

        Self {
            cache,
            counters,
            default_ttl,
            capacity,
        }
    }

    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Return the value only while the entry is fresh
    pub fn get(&self, key: &str) -> Option<V> {
        self.get_at(key, Instant::now())
    }

    /// `get` against an explicit clock reading
    pub fn get_at(&self, key: &str, now: Instant) -> Option<V> {
        let fresh = match self.cache.get(key) {
            Some(entry) if entry.is_fresh_at(now) => Some(entry.value),
            Some(_) => {
                self.cache.invalidate(key);
                None
            }
            None => None,
        };

        let counter = if fresh.is_some() {
            &self.counters.hits
        } else {
            &self.counters.misses
        };
        counter.fetch_add(1, Ordering::Relaxed);
        fresh
    }

    pub fn set(&self, key: impl Into<String>, value: V) {
        self.set_at(key, value, self.default_ttl, Instant::now());
    }

    /// `set` with an explicit ttl and clock reading
    pub fn set_at(&self, key: impl Into<String>, value: V, ttl: Duration, now: Instant) {
        let entry = CacheEntry {
            value,
            expires_at: now.checked_add(ttl),
        };
        self.cache.insert(key.into(), entry);
        self.cache.run_pending_tasks();
    }

    /// Drop the entry regardless of its state. Returns whether one existed.
    pub fn invalidate(&self, key: &str) -> bool {
        self.cache.remove(key).is_some()
    }

    /// Inspect a key without touching hit/miss counters
    pub fn state_at(&self, key: &str, now: Instant) -> EntryState {
        match self.cache.get(key) {
            None => EntryState::Empty,
            Some(entry) if entry.is_fresh_at(now) => EntryState::Fresh,
            Some(_) => EntryState::Expired,
        }
    }

    pub fn state(&self, key: &str) -> EntryState {
        self.state_at(key, Instant::now())
    }

    pub fn len(&self) -> usize {
        self.cache.run_pending_tasks();
        self.cache.entry_count() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.len(),
            hits: self.counters.hits.load(Ordering::Relaxed),
            misses: self.counters.misses.load(Ordering::Relaxed),
            evictions: self.counters.evictions.load(Ordering::Relaxed),
        }
    }
}

impl<V: Clone + Send + Sync + 'static> Default for TtlCache<V> {
    fn default() -> Self {
        Self::new(DEFAULT_TTL, DEFAULT_CAPACITY)
    }
}
