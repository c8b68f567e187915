//! Cache Namespace Module
//!
//! A single key space of the cache: a HashMap of entries with lazy and
//! bulk expiry. Callers pass the current time in, which keeps this type
//! free of any clock or locking concerns.

use std::collections::HashMap;
use std::hash::Hash;
use std::time::Duration;

use crate::cache::{CacheEntry, CacheStats};

// == Generation ==
/// Opaque count of removals from a namespace.
///
/// A read-through caller captures it before consulting the backing store
/// and hands it back on insert; any removal in between makes the insert
/// a no-op, so a value read before an invalidation is never stored after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Generation(u64);

// == Namespace ==
/// Generic TTL map for one namespace.
#[derive(Debug)]
pub struct Namespace<K, V> {
    /// Key-value storage
    entries: HashMap<K, CacheEntry<V>>,
    /// Performance statistics
    stats: CacheStats,
    /// Lifetime of every entry, measured from insertion
    ttl: Duration,
    /// Bumped by every `remove`, present key or not
    generation: u64,
}

impl<K, V> Namespace<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    // == Constructor ==
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            stats: CacheStats::new(),
            ttl,
            generation: 0,
        }
    }

    // == Get ==
    /// Returns a clone of the value if present and fresh at `now_ms`.
    ///
    /// An expired entry is removed in the same call and reported as a miss.
    pub fn get(&mut self, key: &K, now_ms: u64) -> Option<V> {
        let expired = match self.entries.get(key) {
            None => {
                self.stats.record_miss();
                return None;
            }
            Some(entry) => entry.is_expired(now_ms),
        };

        if expired {
            self.entries.remove(key);
            self.stats.record_expired();
            self.stats.set_total_entries(self.entries.len());
            return None;
        }

        self.stats.record_hit();
        self.entries.get(key).map(|entry| entry.data.clone())
    }

    // == Insert ==
    /// Stores `value` under `key`, replacing any previous entry and
    /// restarting its lifetime at `now_ms`.
    pub fn insert(&mut self, key: K, value: V, now_ms: u64) {
        self.entries
            .insert(key, CacheEntry::new(value, now_ms, self.ttl));
        self.stats.set_total_entries(self.entries.len());
    }

    pub fn generation(&self) -> Generation {
        Generation(self.generation)
    }

    /// Inserts like [`Namespace::insert`] unless a removal happened since
    /// `seen` was captured. Returns whether the value was stored.
    pub fn insert_if_unchanged(
        &mut self,
        key: K,
        value: V,
        now_ms: u64,
        seen: Generation,
    ) -> bool {
        if self.generation() != seen {
            return false;
        }
        self.insert(key, value, now_ms);
        true
    }

    // == Remove ==
    /// Removes an entry. Returns whether anything was removed; absent keys
    /// are a no-op for the map but still advance the generation.
    pub fn remove(&mut self, key: &K) -> bool {
        self.generation = self.generation.wrapping_add(1);
        let removed = self.entries.remove(key).is_some();
        self.stats.set_total_entries(self.entries.len());
        removed
    }

    // == Sweep ==
    /// Removes every entry that has expired at `now_ms`.
    ///
    /// Returns the number of entries removed.
    pub fn sweep(&mut self, now_ms: u64) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired(now_ms));
        let removed = before - self.entries.len();

        self.stats.record_swept(removed);
        self.stats.set_total_entries(self.entries.len());
        removed
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }
}
