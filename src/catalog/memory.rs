//! In-memory catalog used by the binary and the tests.

use std::collections::{BTreeSet, HashMap};

use tokio::sync::RwLock;
use tracing::debug;

use crate::catalog::{FilmRepository, MAX_RATING, MIN_RATING};
use crate::error::{Result, ServiceError};
use crate::models::{Film, WatchlistStatus};

#[derive(Debug, Default)]
struct CatalogState {
    films: HashMap<i64, Film>,
    /// film id -> user id -> rating
    ratings: HashMap<i64, HashMap<String, u8>>,
    watchlists: HashMap<String, BTreeSet<i64>>,
}

impl CatalogState {
    fn average_rating(&self, film_id: i64) -> Option<f64> {
        let ratings = self.ratings.get(&film_id)?;
        if ratings.is_empty() {
            return None;
        }
        let sum: u32 = ratings.values().map(|r| u32::from(*r)).sum();
        Some(f64::from(sum) / ratings.len() as f64)
    }
}

/// Catalog held entirely in process memory.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    state: RwLock<CatalogState>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a catalog pre-populated with `films`.
    pub fn with_films(films: impl IntoIterator<Item = Film>) -> Self {
        let films = films
            .into_iter()
            .map(|mut film| {
                film.average_rating = None;
                (film.id, film)
            })
            .collect();

        Self {
            state: RwLock::new(CatalogState {
                films,
                ..CatalogState::default()
            }),
        }
    }
}

#[async_trait::async_trait]
impl FilmRepository for InMemoryCatalog {
    async fn film(&self, id: i64) -> Result<Option<Film>> {
        let state = self.state.read().await;
        Ok(state.films.get(&id).map(|film| Film {
            average_rating: state.average_rating(id),
            ..film.clone()
        }))
    }

    async fn upsert_film(&self, mut film: Film) -> Result<Film> {
        if film.title.trim().is_empty() {
            return Err(ServiceError::InvalidRequest(
                "Film title cannot be empty".to_string(),
            ));
        }

        let mut state = self.state.write().await;
        film.average_rating = None;
        state.films.insert(film.id, film.clone());
        film.average_rating = state.average_rating(film.id);
        debug!(film_id = film.id, "Stored film");
        Ok(film)
    }

    async fn delete_film(&self, id: i64) -> Result<bool> {
        let mut state = self.state.write().await;
        if state.films.remove(&id).is_none() {
            return Ok(false);
        }
        state.ratings.remove(&id);
        for films in state.watchlists.values_mut() {
            films.remove(&id);
        }
        debug!(film_id = id, "Deleted film");
        Ok(true)
    }

    async fn average_rating(&self, film_id: i64) -> Result<Option<f64>> {
        Ok(self.state.read().await.average_rating(film_id))
    }

    async fn rate_film(&self, film_id: i64, user_id: &str, rating: u8) -> Result<()> {
        if !(MIN_RATING..=MAX_RATING).contains(&rating) {
            return Err(ServiceError::InvalidRequest(format!(
                "Rating must be between {} and {}",
                MIN_RATING, MAX_RATING
            )));
        }

        let mut state = self.state.write().await;
        if !state.films.contains_key(&film_id) {
            return Err(ServiceError::NotFound(format!("film {}", film_id)));
        }
        state
            .ratings
            .entry(film_id)
            .or_default()
            .insert(user_id.to_string(), rating);
        Ok(())
    }

    async fn remove_rating(&self, film_id: i64, user_id: &str) -> Result<bool> {
        let mut state = self.state.write().await;
        Ok(state
            .ratings
            .get_mut(&film_id)
            .map(|ratings| ratings.remove(user_id).is_some())
            .unwrap_or(false))
    }

    async fn watchlist(&self, user_id: &str) -> Result<WatchlistStatus> {
        let state = self.state.read().await;
        Ok(WatchlistStatus {
            user_id: user_id.to_string(),
            film_ids: state.watchlists.get(user_id).cloned().unwrap_or_default(),
        })
    }

    async fn add_to_watchlist(&self, user_id: &str, film_id: i64) -> Result<bool> {
        let mut state = self.state.write().await;
        if !state.films.contains_key(&film_id) {
            return Err(ServiceError::NotFound(format!("film {}", film_id)));
        }
        Ok(state
            .watchlists
            .entry(user_id.to_string())
            .or_default()
            .insert(film_id))
    }

    async fn remove_from_watchlist(&self, user_id: &str, film_id: i64) -> Result<bool> {
        let mut state = self.state.write().await;
        Ok(state
            .watchlists
            .get_mut(user_id)
            .map(|films| films.remove(&film_id))
            .unwrap_or(false))
    }
}
