//! Time-bounded memoization.
//!
//! Entries are valid while `now - written_at < ttl`. Reads never refresh the
//! timestamp. Concurrent misses may both recompute and both write; the last
//! write wins and carries a fresh timestamp either way.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Arc, Mutex, RwLock};
use std::time::{Duration, Instant};

/// Source of "now" for TTL checks.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// A clock that only moves when told to. Used by tests.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<Instant>,
}

impl ManualClock {
    #[must_use]
    pub fn new() -> Self {
        Self {
            now: Mutex::new(Instant::now()),
        }
    }

    pub fn advance(&self, by: Duration) {
        if let Ok(mut now) = self.now.lock() {
            *now += by;
        }
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.now.lock().map_or_else(|e| *e.into_inner(), |now| *now)
    }
}

pub trait Cache<K, V>: Send + Sync {
    fn get(&self, key: &K) -> Option<V>;
    fn set(&self, key: K, value: V);
    fn clear(&self);
}

struct Entry<V> {
    value: V,
    written_at: Instant,
}

pub struct TtlCache<K, V> {
    entries: RwLock<HashMap<K, Entry<V>>>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash,
{
    #[must_use]
    pub fn new(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl,
            clock,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().map_or(0, |e| e.len())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<K, V> Cache<K, V> for TtlCache<K, V>
where
    K: Eq + Hash + Send + Sync,
    V: Clone + Send + Sync,
{
    fn get(&self, key: &K) -> Option<V> {
        let now = self.clock.now();
        let entries = self.entries.read().ok()?;
        entries
            .get(key)
            .filter(|e| now.saturating_duration_since(e.written_at) < self.ttl)
            .map(|e| e.value.clone())
    }

    fn set(&self, key: K, value: V) {
        let now = self.clock.now();
        if let Ok(mut entries) = self.entries.write() {
            // Opportunistic cleanup of expired entries.
            entries.retain(|_, e| now.saturating_duration_since(e.written_at) < self.ttl);
            entries.insert(
                key,
                Entry {
                    value,
                    written_at: now,
                },
            );
        }
    }

    fn clear(&self) {
        if let Ok(mut entries) = self.entries.write() {
            entries.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cache(clock: &Arc<ManualClock>) -> TtlCache<&'static str, u32> {
        TtlCache::new(Duration::from_secs(300), clock.clone())
    }

    #[test]
    fn hit_within_ttl() {
        let clock = Arc::new(ManualClock::new());
        let cache = cache(&clock);
        cache.set("k", 1);
        clock.advance(Duration::from_secs(299));
        assert_eq!(cache.get(&"k"), Some(1));
    }

    #[test]
    fn expires_at_ttl() {
        let clock = Arc::new(ManualClock::new());
        let cache = cache(&clock);
        cache.set("k", 1);
        clock.advance(Duration::from_secs(300));
        assert_eq!(cache.get(&"k"), None);
    }

    #[test]
    fn reads_do_not_refresh_the_timestamp() {
        let clock = Arc::new(ManualClock::new());
        let cache = cache(&clock);
        cache.set("k", 1);
        clock.advance(Duration::from_secs(200));
        assert_eq!(cache.get(&"k"), Some(1));
        clock.advance(Duration::from_secs(200));
        assert_eq!(cache.get(&"k"), None);
    }

    #[test]
    fn overwrite_resets_the_timestamp() {
        let clock = Arc::new(ManualClock::new());
        let cache = cache(&clock);
        cache.set("k", 1);
        clock.advance(Duration::from_secs(200));
        cache.set("k", 2);
        clock.advance(Duration::from_secs(200));
        assert_eq!(cache.get(&"k"), Some(2));
    }

    #[test]
    fn set_purges_expired_entries() {
        let clock = Arc::new(ManualClock::new());
        let cache = cache(&clock);
        cache.set("old", 1);
        clock.advance(Duration::from_secs(301));
        cache.set("new", 2);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn clear_drops_everything() {
        let clock = Arc::new(ManualClock::new());
        let cache = cache(&clock);
        cache.set("a", 1);
        cache.set("b", 2);
        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.get(&"a"), None);
    }
}
