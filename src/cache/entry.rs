//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with an absolute expiry.

use std::time::Duration;

// == Cache Entry ==
/// A cached value together with the moment it stops being served.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry<T> {
    /// The stored value
    pub data: T,
    /// Expiration timestamp (Unix milliseconds)
    pub expiry: u64,
}

impl<T> CacheEntry<T> {
    // == Constructor ==
    /// Creates an entry inserted at `now_ms` that lives for `ttl`.
    pub fn new(data: T, now_ms: u64, ttl: Duration) -> Self {
        Self {
            data,
            expiry: now_ms.saturating_add(ttl.as_millis() as u64),
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired at `now_ms`.
    ///
    /// Boundary condition: an entry is still fresh at exactly its expiry
    /// timestamp and becomes stale one millisecond later.
    pub fn is_expired(&self, now_ms: u64) -> bool {
        now_ms > self.expiry
    }
}
