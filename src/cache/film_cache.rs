//! Film Cache Module
//!
//! The three-namespace cache consulted by the film, rating and watchlist
//! read paths. Every namespace sits behind its own mutex, so lazy eviction
//! on read and the background sweep never interleave within a namespace.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, info};

use crate::cache::{
    CacheKey, CacheStatsSnapshot, Clock, Generation, Namespace, SweepReport, SystemClock,
    WatchlistKey, CACHE_TTL,
};
use crate::models::{Film, WatchlistStatus};

// == Film Cache ==
/// Short-lived memoization for films, average ratings and watchlists.
///
/// No operation can fail: a miss is `None` and removals of absent keys are
/// no-ops. A disabled cache misses on every read and ignores every write.
///
/// Read-through callers that fill the cache from a slower store should
/// capture the namespace [`Generation`] before the fetch and store with the
/// matching `set_*_if_unchanged`, so a fill racing an invalidation is
/// dropped instead of outliving it.
#[derive(Debug)]
pub struct FilmCache {
    films: Mutex<Namespace<CacheKey, Film>>,
    ratings: Mutex<Namespace<CacheKey, f64>>,
    watchlists: Mutex<Namespace<WatchlistKey, WatchlistStatus>>,
    clock: Arc<dyn Clock>,
    enabled: bool,
}

impl Default for FilmCache {
    fn default() -> Self {
        Self::new()
    }
}

impl FilmCache {
    // == Constructors ==
    /// Creates an enabled cache on the system clock.
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Creates an enabled cache reading time from `clock`.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            films: Mutex::new(Namespace::new(CACHE_TTL)),
            ratings: Mutex::new(Namespace::new(CACHE_TTL)),
            watchlists: Mutex::new(Namespace::new(CACHE_TTL)),
            clock,
            enabled: true,
        }
    }

    /// Creates a cache that never stores anything.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::new()
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    // == Films ==
    pub fn get_film(&self, key: impl Into<CacheKey>) -> Option<Film> {
        if !self.enabled {
            return None;
        }
        let now = self.clock.now_ms();
        lock(&self.films).get(&key.into(), now)
    }

    pub fn set_film(&self, key: impl Into<CacheKey>, film: Film) {
        if !self.enabled {
            return;
        }
        let now = self.clock.now_ms();
        lock(&self.films).insert(key.into(), film, now);
    }

    pub fn film_generation(&self) -> Generation {
        lock(&self.films).generation()
    }

    /// Stores `film` unless a film was removed or invalidated since
    /// `seen`. Returns whether it was stored.
    pub fn set_film_if_unchanged(
        &self,
        key: impl Into<CacheKey>,
        film: Film,
        seen: Generation,
    ) -> bool {
        if !self.enabled {
            return false;
        }
        let now = self.clock.now_ms();
        lock(&self.films).insert_if_unchanged(key.into(), film, now, seen)
    }

    /// Drops the film payload only; a cached rating for the same id stays.
    pub fn remove_film(&self, key: impl Into<CacheKey>) {
        if !self.enabled {
            return;
        }
        let key = key.into();
        if lock(&self.films).remove(&key) {
            debug!(film = %key, "Removed cached film");
        }
    }

    /// Drops both the film payload and its average rating.
    pub fn invalidate_film(&self, key: impl Into<CacheKey>) {
        if !self.enabled {
            return;
        }
        let key = key.into();
        let film_removed = lock(&self.films).remove(&key);
        let rating_removed = lock(&self.ratings).remove(&key);
        debug!(film = %key, film_removed, rating_removed, "Invalidated cached film");
    }

    // == Ratings ==
    pub fn get_rating(&self, key: impl Into<CacheKey>) -> Option<f64> {
        if !self.enabled {
            return None;
        }
        let now = self.clock.now_ms();
        lock(&self.ratings).get(&key.into(), now)
    }

    pub fn set_rating(&self, key: impl Into<CacheKey>, rating: f64) {
        if !self.enabled {
            return;
        }
        let now = self.clock.now_ms();
        lock(&self.ratings).insert(key.into(), rating, now);
    }

    pub fn rating_generation(&self) -> Generation {
        lock(&self.ratings).generation()
    }

    pub fn set_rating_if_unchanged(
        &self,
        key: impl Into<CacheKey>,
        rating: f64,
        seen: Generation,
    ) -> bool {
        if !self.enabled {
            return false;
        }
        let now = self.clock.now_ms();
        lock(&self.ratings).insert_if_unchanged(key.into(), rating, now, seen)
    }

    // == Watchlists ==
    pub fn get_watchlist_status(&self, user_id: impl Into<CacheKey>) -> Option<WatchlistStatus> {
        if !self.enabled {
            return None;
        }
        let now = self.clock.now_ms();
        lock(&self.watchlists).get(&WatchlistKey::new(user_id), now)
    }

    pub fn set_watchlist_status(&self, user_id: impl Into<CacheKey>, status: WatchlistStatus) {
        if !self.enabled {
            return;
        }
        let now = self.clock.now_ms();
        lock(&self.watchlists).insert(WatchlistKey::new(user_id), status, now);
    }

    pub fn watchlist_generation(&self) -> Generation {
        lock(&self.watchlists).generation()
    }

    pub fn set_watchlist_status_if_unchanged(
        &self,
        user_id: impl Into<CacheKey>,
        status: WatchlistStatus,
        seen: Generation,
    ) -> bool {
        if !self.enabled {
            return false;
        }
        let now = self.clock.now_ms();
        lock(&self.watchlists).insert_if_unchanged(WatchlistKey::new(user_id), status, now, seen)
    }

    pub fn invalidate_watchlist(&self, user_id: impl Into<CacheKey>) {
        if !self.enabled {
            return;
        }
        let key = WatchlistKey::new(user_id);
        if lock(&self.watchlists).remove(&key) {
            debug!(watchlist = %key, "Invalidated cached watchlist");
        }
    }

    // == Sweep ==
    /// Removes every expired entry from all three namespaces.
    pub fn sweep_expired(&self) -> SweepReport {
        if !self.enabled {
            return SweepReport::default();
        }

        let now = self.clock.now_ms();
        let report = SweepReport {
            films: lock(&self.films).sweep(now),
            ratings: lock(&self.ratings).sweep(now),
            watchlists: lock(&self.watchlists).sweep(now),
        };

        info!(
            films = report.films,
            ratings = report.ratings,
            watchlists = report.watchlists,
            "Cache sweep completed"
        );
        report
    }

    // == Stats ==
    pub fn stats(&self) -> CacheStatsSnapshot {
        CacheStatsSnapshot {
            enabled: self.enabled,
            films: lock(&self.films).stats(),
            ratings: lock(&self.ratings).stats(),
            watchlists: lock(&self.watchlists).stats(),
        }
    }

    /// Whether the films namespace physically holds `key`, fresh or not.
    #[cfg(test)]
    pub(crate) fn holds_film(&self, key: impl Into<CacheKey>) -> bool {
        lock(&self.films).contains_key(&key.into())
    }
}

/// Every operation leaves its namespace consistent, so a panic while a lock
/// was held does not invalidate the data behind it.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::ManualClock;
    use std::time::Duration;

    fn cache_at_zero() -> (FilmCache, ManualClock) {
        let clock = ManualClock::new(0);
        let cache = FilmCache::with_clock(Arc::new(clock.clone()));
        (cache, clock)
    }

    fn film(id: i64, title: &str) -> Film {
        Film::new(id, title, 1968)
    }

    #[test]
    fn test_film_scenario_expires_after_ttl() {
        let (cache, clock) = cache_at_zero();
        cache.set_film("42", film(42, "X"));

        clock.set(100_000);
        assert_eq!(cache.get_film("42").map(|f| f.title), Some("X".to_string()));

        clock.set(301_000);
        assert_eq!(cache.get_film("42"), None);
        assert!(!cache.holds_film("42"));
    }

    #[test]
    fn test_fresh_at_exact_ttl_boundary() {
        let (cache, clock) = cache_at_zero();
        cache.set_rating(1, 4.5);

        clock.advance(CACHE_TTL);
        assert_eq!(cache.get_rating(1), Some(4.5));

        clock.advance(Duration::from_millis(1));
        assert_eq!(cache.get_rating(1), None);
    }

    #[test]
    fn test_overwrite_restarts_ttl() {
        let (cache, clock) = cache_at_zero();
        cache.set_film(1, film(1, "first"));

        clock.set(200_000);
        cache.set_film(1, film(1, "second"));

        clock.set(450_000);
        assert_eq!(cache.get_film(1).map(|f| f.title), Some("second".to_string()));
    }

    #[test]
    fn test_numeric_and_string_keys_are_equivalent() {
        let (cache, _) = cache_at_zero();
        cache.set_film(123i64, film(123, "Eraserhead"));
        cache.set_watchlist_status(77u64, WatchlistStatus::new("77"));

        assert!(cache.get_film("123").is_some());
        assert!(cache.get_watchlist_status("77").is_some());
    }

    #[test]
    fn test_namespaces_are_independent() {
        let (cache, _) = cache_at_zero();
        cache.set_film("5", film(5, "Alien"));

        assert_eq!(cache.get_rating("5"), None);
        assert_eq!(cache.get_watchlist_status("5"), None);
    }

    #[test]
    fn test_invalidate_film_clears_films_and_ratings_only() {
        let (cache, _) = cache_at_zero();
        cache.set_film(9, film(9, "Suspiria"));
        cache.set_rating(9, 3.0);
        cache.set_watchlist_status(9, WatchlistStatus::new("9"));

        cache.invalidate_film(9);

        assert_eq!(cache.get_film(9), None);
        assert_eq!(cache.get_rating(9), None);
        assert!(cache.get_watchlist_status(9).is_some());
    }

    #[test]
    fn test_remove_film_keeps_rating() {
        let (cache, _) = cache_at_zero();
        cache.set_film(9, film(9, "Suspiria"));
        cache.set_rating(9, 3.0);

        cache.remove_film(9);

        assert_eq!(cache.get_film(9), None);
        assert_eq!(cache.get_rating(9), Some(3.0));
    }

    #[test]
    fn test_removing_absent_keys_is_noop() {
        let (cache, _) = cache_at_zero();
        cache.set_film(1, film(1, "kept"));

        cache.remove_film(2);
        cache.invalidate_film(2);
        cache.invalidate_watchlist("nobody");

        let stats = cache.stats();
        assert_eq!(stats.films.total_entries, 1);
        assert_eq!(stats.ratings.total_entries, 0);
        assert_eq!(stats.watchlists.total_entries, 0);
    }

    #[test]
    fn test_invalidate_watchlist() {
        let (cache, _) = cache_at_zero();
        cache.set_watchlist_status("user_a", WatchlistStatus::new("user_a"));
        cache.set_watchlist_status("user_b", WatchlistStatus::new("user_b"));

        cache.invalidate_watchlist("user_a");

        assert_eq!(cache.get_watchlist_status("user_a"), None);
        assert!(cache.get_watchlist_status("user_b").is_some());
    }

    #[test]
    fn test_sweep_removes_exactly_expired_entries() {
        let (cache, clock) = cache_at_zero();
        cache.set_film(1, film(1, "old"));
        cache.set_rating(1, 2.0);

        clock.set(200_000);
        cache.set_film(2, film(2, "new"));
        cache.set_watchlist_status("u", WatchlistStatus::new("u"));

        clock.set(400_000);
        let report = cache.sweep_expired();

        assert_eq!(
            report,
            SweepReport {
                films: 1,
                ratings: 1,
                watchlists: 0
            }
        );
        assert!(!cache.holds_film(1));
        assert!(cache.holds_film(2));
        assert!(cache.get_watchlist_status("u").is_some());
    }

    #[test]
    fn test_stats_track_hits_and_misses() {
        let (cache, _) = cache_at_zero();
        cache.set_rating(1, 5.0);

        cache.get_rating(1);
        cache.get_rating(2);

        let stats = cache.stats();
        assert!(stats.enabled);
        assert_eq!(stats.ratings.hits, 1);
        assert_eq!(stats.ratings.misses, 1);
        assert_eq!(stats.total_entries(), 1);
    }

    #[test]
    fn test_disabled_cache_never_stores() {
        let cache = FilmCache::disabled();
        cache.set_film(1, film(1, "ignored"));
        cache.set_rating(1, 4.0);
        cache.set_watchlist_status("u", WatchlistStatus::new("u"));

        assert!(!cache.is_enabled());
        assert_eq!(cache.get_film(1), None);
        assert_eq!(cache.get_rating(1), None);
        assert_eq!(cache.get_watchlist_status("u"), None);
        assert_eq!(cache.sweep_expired(), SweepReport::default());
        assert_eq!(cache.stats().total_entries(), 0);
    }

    #[test]
    fn test_conditional_set_dropped_after_invalidation() {
        let (cache, _) = cache_at_zero();

        let films_seen = cache.film_generation();
        let ratings_seen = cache.rating_generation();
        let watchlists_seen = cache.watchlist_generation();

        cache.invalidate_film(3);
        cache.invalidate_watchlist("u");

        assert!(!cache.set_film_if_unchanged(3, film(3, "stale"), films_seen));
        assert!(!cache.set_rating_if_unchanged(3, 1.0, ratings_seen));
        assert!(!cache.set_watchlist_status_if_unchanged(
            "u",
            WatchlistStatus::new("u"),
            watchlists_seen
        ));
        assert_eq!(cache.stats().total_entries(), 0);

        let seen = cache.film_generation();
        assert!(cache.set_film_if_unchanged(3, film(3, "fresh"), seen));
        assert_eq!(cache.get_film(3).map(|f| f.title), Some("fresh".to_string()));
    }

    #[test]
    fn test_remove_film_does_not_move_rating_generation() {
        let (cache, _) = cache_at_zero();
        let seen = cache.rating_generation();

        cache.remove_film(3);

        assert!(cache.set_rating_if_unchanged(3, 4.0, seen));
        assert_eq!(cache.get_rating(3), Some(4.0));
    }

    #[test]
    fn test_concurrent_sweep_never_evicts_fresh_entries() {
        let (cache, _) = cache_at_zero();
        let cache = Arc::new(cache);

        let writers: Vec<_> = (0..4i64)
            .map(|t| {
                let cache = Arc::clone(&cache);
                std::thread::spawn(move || {
                    for i in 0..200i64 {
                        let id = t * 1_000 + i;
                        cache.set_rating(id, (i % 5 + 1) as f64);
                        assert_eq!(cache.get_rating(id), Some((i % 5 + 1) as f64));
                    }
                })
            })
            .collect();

        let sweeper = {
            let cache = Arc::clone(&cache);
            std::thread::spawn(move || {
                (0..10)
                    .map(|_| {
                        std::thread::yield_now();
                        cache.sweep_expired().total()
                    })
                    .sum::<usize>()
            })
        };

        for handle in writers {
            handle.join().expect("writer should not panic");
        }
        let swept = sweeper.join().expect("sweeper should not panic");

        // The clock never moves, so nothing is ever expired
        assert_eq!(swept, 0);
        assert_eq!(cache.stats().ratings.total_entries, 800);
    }
}
