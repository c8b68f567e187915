//! Cache Module
//!
//! In-process TTL cache with lazy expiry on read and a periodic sweep.

mod clock;
mod entry;
mod film_cache;
mod key;
mod namespace;
mod stats;


use std::time::Duration;

// Re-export public types
pub use clock::{Clock, ManualClock, SystemClock};
pub use entry::CacheEntry;
pub use film_cache::FilmCache;
pub use key::{CacheKey, WatchlistKey};
pub use namespace::{Generation, Namespace};
pub use stats::{CacheStats, CacheStatsSnapshot, SweepReport};

// == Public Constants ==
/// Lifetime of every cache entry, measured from insertion
pub const CACHE_TTL: Duration = Duration::from_secs(5 * 60);

/// Period of the background sweep
pub const SWEEP_INTERVAL: Duration = Duration::from_secs(15 * 60);
