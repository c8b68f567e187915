//! Catalog Module
//!
//! The source of truth the cache sits in front of. The HTTP handlers only
//! talk to it through [`FilmRepository`], so a database-backed catalog can
//! replace the in-memory one without touching them.

mod memory;

pub use memory::InMemoryCatalog;

use crate::error::Result;
use crate::models::{Film, WatchlistStatus};

/// Lowest accepted user rating
pub const MIN_RATING: u8 = 1;

/// Highest accepted user rating
pub const MAX_RATING: u8 = 5;

/// Film, rating and watchlist storage.
#[async_trait::async_trait]
pub trait FilmRepository: Send + Sync {
    /// Fetch a film with its current average rating filled in.
    async fn film(&self, id: i64) -> Result<Option<Film>>;

    /// Insert or replace a film. Any `average_rating` on the input is ignored.
    async fn upsert_film(&self, film: Film) -> Result<Film>;

    /// Delete a film together with its ratings and watchlist memberships.
    ///
    /// Returns whether the film existed.
    async fn delete_film(&self, id: i64) -> Result<bool>;

    /// Mean of all user ratings, or `None` when the film is unrated.
    async fn average_rating(&self, film_id: i64) -> Result<Option<f64>>;

    /// Record or replace `user_id`'s rating of a film.
    async fn rate_film(&self, film_id: i64, user_id: &str, rating: u8) -> Result<()>;

    /// Returns whether a rating was removed.
    async fn remove_rating(&self, film_id: i64, user_id: &str) -> Result<bool>;

    async fn watchlist(&self, user_id: &str) -> Result<WatchlistStatus>;

    /// Returns whether the film was newly added.
    async fn add_to_watchlist(&self, user_id: &str, film_id: i64) -> Result<bool>;

    /// Returns whether the film was on the watchlist.
    async fn remove_from_watchlist(&self, user_id: &str, film_id: i64) -> Result<bool>;
}
