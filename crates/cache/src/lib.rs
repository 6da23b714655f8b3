//! Bounded in-memory key/value cache with per-entry expiry.
//!
//! Used by the data proxy for cache-aside around upstream fetches. Each
//! resource class gets its own instance (see [`TtlCache::volatile`] and
//! [`TtlCache::reference`]), created once at startup and shared via `Arc`.
//!
//! # Expiry
//!
//! An entry is readable only while `now < expires_at`. Expiry is lazy: a
//! `get` on an expired key removes it and reports a miss, and every insert
//! of a new key purges all expired entries first.
//!
//! # Eviction
//!
//! When inserting a new key while the cache already holds `capacity` live
//! entries, the entry with the nearest `expires_at` is evicted. Ties go to
//! the entry inserted first. Overwriting an existing key never evicts.
//!
//! Time is read from `tokio::time::Instant` so tests can pause the clock.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;

/// Capacity of the short-lived resource cache.
pub const VOLATILE_CAPACITY: usize = 200;
/// TTL of the short-lived resource cache.
pub const VOLATILE_TTL: Duration = Duration::from_secs(5 * 60);
/// Capacity of the reference-data cache.
pub const REFERENCE_CAPACITY: usize = 500;
/// TTL of the reference-data cache.
pub const REFERENCE_TTL: Duration = Duration::from_secs(60 * 60);
/// Longest TTL honoured. Longer TTLs are clamped to this.
pub const MAX_TTL: Duration = Duration::from_secs(365 * 24 * 60 * 60);

struct Entry<V> {
    value: V,
    expires_at: Instant,
    /// Insertion order, used to break expiry ties.
    seq: u64,
}

struct Inner<V> {
    entries: HashMap<String, Entry<V>>,
    next_seq: u64,
    hits: u64,
    misses: u64,
    evictions: u64,
}

/// Thread-safe TTL cache with a fixed capacity.
pub struct TtlCache<V> {
    capacity: usize,
    default_ttl: Duration,
    inner: Mutex<Inner<V>>,
}

/// Point-in-time cache counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    /// Entries physically held (may include not-yet-purged expired ones).
    pub entries: usize,
    pub capacity: usize,
    pub hits: u64,
    pub misses: u64,
    /// Live entries removed to make room.
    pub evictions: u64,
}

impl<V: Clone> TtlCache<V> {
    /// Create a cache. `capacity` is clamped to at least 1.
    pub fn new(capacity: usize, default_ttl: Duration) -> Self {
        Self {
            capacity: capacity.max(1),
            default_ttl,
            inner: Mutex::new(Inner {
                entries: HashMap::new(),
                next_seq: 0,
                hits: 0,
                misses: 0,
                evictions: 0,
            }),
        }
    }

    /// Cache for volatile resource data: 200 entries, 5 minutes.
    pub fn volatile() -> Self {
        Self::new(VOLATILE_CAPACITY, VOLATILE_TTL)
    }

    /// Cache for slow-changing reference data: 500 entries, 1 hour.
    pub fn reference() -> Self {
        Self::new(REFERENCE_CAPACITY, REFERENCE_TTL)
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    /// Look up `key`. Returns `None` if it was never set or has expired.
    pub fn get(&self, key: &str) -> Option<V> {
        let now = Instant::now();
        let mut inner = self.lock();

        let expired = inner.entries.get(key).map(|e| now >= e.expires_at);
        match expired {
            Some(false) => {
                inner.hits += 1;
                inner.entries.get(key).map(|e| e.value.clone())
            }
            Some(true) => {
                debug!(key, "Cache entry expired");
                inner.entries.remove(key);
                inner.misses += 1;
                None
            }
            None => {
                inner.misses += 1;
                None
            }
        }
    }

    /// Insert or overwrite `key` with an explicit TTL.
    pub fn set(&self, key: impl Into<String>, value: V, ttl: Duration) {
        let key = key.into();
        let now = Instant::now();
        let mut inner = self.lock();

        if !inner.entries.contains_key(&key) {
            inner.entries.retain(|_, e| now < e.expires_at);

            while inner.entries.len() >= self.capacity {
                let victim = inner
                    .entries
                    .iter()
                    .min_by_key(|(_, e)| (e.expires_at, e.seq))
                    .map(|(k, _)| k.clone());
                match victim {
                    Some(victim) => {
                        debug!(key = %victim, "Evicting cache entry with nearest expiry");
                        inner.entries.remove(&victim);
                        inner.evictions += 1;
                    }
                    None => break,
                }
            }
        }

        let seq = inner.next_seq;
        inner.next_seq += 1;
        inner.entries.insert(
            key,
            Entry {
                value,
                expires_at: expiry(now, ttl),
                seq,
            },
        );
    }

    /// Insert or overwrite `key` using the cache's default TTL.
    pub fn insert(&self, key: impl Into<String>, value: V) {
        self.set(key, value, self.default_ttl);
    }

    /// Remove `key`, returning its value if it was still live.
    pub fn remove(&self, key: &str) -> Option<V> {
        let now = Instant::now();
        self.lock()
            .entries
            .remove(key)
            .filter(|e| now < e.expires_at)
            .map(|e| e.value)
    }

    /// Drop every entry. Counters are kept.
    pub fn clear(&self) {
        self.lock().entries.clear();
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        let now = Instant::now();
        self.lock()
            .entries
            .values()
            .filter(|e| now < e.expires_at)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn stats(&self) -> CacheStats {
        let inner = self.lock();
        CacheStats {
            entries: inner.entries.len(),
            capacity: self.capacity,
            hits: inner.hits,
            misses: inner.misses,
            evictions: inner.evictions,
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner<V>> {
        // A panic while holding the lock cannot leave the map half-updated,
        // so a poisoned lock is still usable.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// `now + ttl` with the TTL clamped to [`MAX_TTL`], so huge values cannot
/// overflow `Instant`.
fn expiry(now: Instant, ttl: Duration) -> Instant {
    let ttl = ttl.min(MAX_TTL);
    now.checked_add(ttl).unwrap_or(now)
}

impl<V> std::fmt::Debug for TtlCache<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TtlCache")
            .field("capacity", &self.capacity)
            .field("default_ttl", &self.default_ttl)
            .finish_non_exhaustive()
    }
}
