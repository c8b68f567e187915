//! Cache Sweep Task
//!
//! Background task that periodically removes expired cache entries, so
//! keys written once and never read again do not accumulate.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::FilmCache;

/// Handle to a running sweep task.
///
/// The task stops when [`SweepTask::stop`] is awaited or the handle is
/// dropped, whichever comes first.
#[derive(Debug)]
pub struct SweepTask {
    handle: Option<JoinHandle<()>>,
}

impl SweepTask {
    /// Spawns a task that sleeps for `period` and then sweeps `cache`,
    /// forever. Must be called from within a tokio runtime.
    ///
    /// # Example
    /// ```ignore
    /// let cache = Arc::new(FilmCache::new());
    /// let sweeper = SweepTask::start(cache.clone(), SWEEP_INTERVAL);
    /// // Later, during shutdown:
    /// sweeper.stop().await;
    /// ```
    pub fn start(cache: Arc<FilmCache>, period: Duration) -> Self {
        let handle = tokio::spawn(async move {
            info!(period_secs = period.as_secs(), "Starting cache sweep task");

            loop {
                tokio::time::sleep(period).await;

                let report = cache.sweep_expired();
                if report.total() == 0 {
                    debug!("Cache sweep: no expired entries found");
                }
            }
        });

        Self {
            handle: Some(handle),
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle
            .as_ref()
            .map(|handle| !handle.is_finished())
            .unwrap_or(false)
    }

    /// Aborts the task and waits until it has finished.
    pub async fn stop(mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            // A cancelled task resolves to a JoinError, which is the expected outcome
            let _ = handle.await;
            info!("Cache sweep task stopped");
        }
    }
}

impl Drop for SweepTask {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{ManualClock, CACHE_TTL, SWEEP_INTERVAL};
    use crate::models::Film;

    fn cache_with_clock() -> (Arc<FilmCache>, ManualClock) {
        let clock = ManualClock::new(0);
        let cache = Arc::new(FilmCache::with_clock(Arc::new(clock.clone())));
        (cache, clock)
    }

    #[tokio::test(start_paused = true)]
    async fn test_sweep_task_removes_expired_entries() {
        let (cache, clock) = cache_with_clock();
        cache.set_film(1, Film::new(1, "Nosferatu", 1922));
        cache.set_rating(1, 4.0);

        let sweeper = SweepTask::start(cache.clone(), SWEEP_INTERVAL);

        clock.advance(CACHE_TTL + Duration::from_secs(1));
        tokio::time::sleep(SWEEP_INTERVAL + Duration::from_millis(1)).await;

        let stats = cache.stats();
        assert_eq!(stats.films.swept, 1);
        assert_eq!(stats.ratings.swept, 1);
        assert_eq!(stats.total_entries(), 0);

        sweeper.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_sweep_task_preserves_fresh_entries() {
        let (cache, clock) = cache_with_clock();
        let sweeper = SweepTask::start(cache.clone(), SWEEP_INTERVAL);

        clock.advance(Duration::from_secs(60));
        cache.set_film(2, Film::new(2, "Vampyr", 1932));
        tokio::time::sleep(SWEEP_INTERVAL + Duration::from_millis(1)).await;

        assert!(cache.get_film(2).is_some(), "fresh entry should survive the sweep");
        assert_eq!(cache.stats().films.swept, 0);

        sweeper.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_sweep_task_runs_every_period() {
        let (cache, clock) = cache_with_clock();
        let period = Duration::from_secs(10);
        let sweeper = SweepTask::start(cache.clone(), period);
        // Offset the test by 1ms so each check lands just after a sweep
        tokio::time::sleep(Duration::from_millis(1)).await;

        for round in 1..=3u64 {
            cache.set_rating(round, 3.0);
            clock.advance(CACHE_TTL + Duration::from_secs(1));
            tokio::time::sleep(period).await;
            assert_eq!(cache.stats().ratings.swept, round);
        }

        assert!(sweeper.is_running());
        sweeper.stop().await;
    }

    #[tokio::test]
    async fn test_sweep_task_can_be_stopped() {
        let sweeper = SweepTask::start(Arc::new(FilmCache::new()), Duration::from_secs(1));
        assert!(sweeper.is_running());

        sweeper.stop().await;
    }

    #[tokio::test]
    async fn test_dropping_handle_aborts_task() {
        let cache = Arc::new(FilmCache::new());
        let sweeper = SweepTask::start(cache.clone(), Duration::from_secs(1));

        drop(sweeper);
        tokio::task::yield_now().await;

        // Only the test's reference remains once the task is gone
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(Arc::strong_count(&cache), 1);
    }
}
