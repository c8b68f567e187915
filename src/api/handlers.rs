//! API Handlers
//!
//! HTTP request handlers for each film service endpoint. Read handlers
//! consult the cache before the catalog; write handlers invalidate the
//! affected cache entries right after the catalog accepts the change.
//!
//! A read fills the cache only if no invalidation landed on its namespace
//! while it was waiting on the catalog.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use tracing::debug;

use crate::cache::FilmCache;
use crate::catalog::{FilmRepository, InMemoryCatalog};
use crate::config::Config;
use crate::error::{Result, ServiceError};
use crate::models::{
    Film, FilmRequest, HealthResponse, MessageResponse, RateFilmRequest, RatingResponse,
    StatsResponse, SweepResponse, WatchlistMembershipResponse, WatchlistStatus,
    WatchlistStatusQuery,
};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Read cache in front of the catalog
    pub cache: Arc<FilmCache>,
    /// Source of truth for films, ratings and watchlists
    pub catalog: Arc<dyn FilmRepository>,
}

impl AppState {
    pub fn new(cache: Arc<FilmCache>, catalog: Arc<dyn FilmRepository>) -> Self {
        Self { cache, catalog }
    }

    /// Creates a new AppState from configuration, backed by an empty
    /// in-memory catalog.
    pub fn from_config(config: &Config) -> Self {
        let cache = if config.cache_enabled {
            FilmCache::new()
        } else {
            FilmCache::disabled()
        };
        Self::new(Arc::new(cache), Arc::new(InMemoryCatalog::new()))
    }
}

fn film_not_found(film_id: i64) -> ServiceError {
    ServiceError::NotFound(format!("film {}", film_id))
}

/// Cache-first watchlist lookup shared by the watchlist read endpoints.
async fn load_watchlist(state: &AppState, user_id: &str) -> Result<WatchlistStatus> {
    if let Some(status) = state.cache.get_watchlist_status(user_id) {
        return Ok(status);
    }

    let generation = state.cache.watchlist_generation();
    let status = state.catalog.watchlist(user_id).await?;
    state
        .cache
        .set_watchlist_status_if_unchanged(user_id, status.clone(), generation);
    Ok(status)
}

// == Films ==

/// Handler for GET /films/:film_id
pub async fn get_film_handler(
    State(state): State<AppState>,
    Path(film_id): Path<i64>,
) -> Result<Json<Film>> {
    if let Some(film) = state.cache.get_film(film_id) {
        debug!(film_id, "Film served from cache");
        return Ok(Json(film));
    }

    let generation = state.cache.film_generation();
    let film = state
        .catalog
        .film(film_id)
        .await?
        .ok_or_else(|| film_not_found(film_id))?;
    state
        .cache
        .set_film_if_unchanged(film_id, film.clone(), generation);

    Ok(Json(film))
}

/// Handler for PUT /films/:film_id
///
/// Film metadata does not feed the average rating, so only the film
/// payload is dropped from the cache.
pub async fn upsert_film_handler(
    State(state): State<AppState>,
    Path(film_id): Path<i64>,
    Json(req): Json<FilmRequest>,
) -> Result<Json<Film>> {
    let film = state.catalog.upsert_film(req.into_film(film_id)).await?;
    state.cache.remove_film(film_id);

    Ok(Json(film))
}

/// Handler for DELETE /films/:film_id
pub async fn delete_film_handler(
    State(state): State<AppState>,
    Path(film_id): Path<i64>,
) -> Result<Json<MessageResponse>> {
    if !state.catalog.delete_film(film_id).await? {
        return Err(film_not_found(film_id));
    }
    state.cache.invalidate_film(film_id);

    Ok(Json(MessageResponse::new(format!(
        "Film {} deleted successfully",
        film_id
    ))))
}

// == Ratings ==

/// Handler for GET /films/:film_id/rating
///
/// Unrated films answer `null` and are not cached, so the first rating
/// shows up immediately.
pub async fn get_rating_handler(
    State(state): State<AppState>,
    Path(film_id): Path<i64>,
) -> Result<Json<RatingResponse>> {
    if let Some(average) = state.cache.get_rating(film_id) {
        return Ok(Json(RatingResponse {
            film_id,
            average_rating: Some(average),
        }));
    }

    let generation = state.cache.rating_generation();
    let average_rating = match state.catalog.average_rating(film_id).await? {
        Some(average) => {
            state
                .cache
                .set_rating_if_unchanged(film_id, average, generation);
            Some(average)
        }
        None => {
            if state.catalog.film(film_id).await?.is_none() {
                return Err(film_not_found(film_id));
            }
            None
        }
    };

    Ok(Json(RatingResponse {
        film_id,
        average_rating,
    }))
}

/// Handler for PUT /films/:film_id/ratings
pub async fn rate_film_handler(
    State(state): State<AppState>,
    Path(film_id): Path<i64>,
    Json(req): Json<RateFilmRequest>,
) -> Result<Json<MessageResponse>> {
    let rating = req.validate().map_err(ServiceError::InvalidRequest)?;

    state
        .catalog
        .rate_film(film_id, &req.user_id, rating)
        .await?;
    // The cached film payload embeds the average rating as well
    state.cache.invalidate_film(film_id);

    Ok(Json(MessageResponse::new(format!(
        "Rating for film {} saved",
        film_id
    ))))
}

/// Handler for DELETE /films/:film_id/ratings/:user_id
pub async fn delete_rating_handler(
    State(state): State<AppState>,
    Path((film_id, user_id)): Path<(i64, String)>,
) -> Result<Json<MessageResponse>> {
    if !state.catalog.remove_rating(film_id, &user_id).await? {
        return Err(ServiceError::NotFound(format!(
            "rating of film {} by {}",
            film_id, user_id
        )));
    }
    state.cache.invalidate_film(film_id);

    Ok(Json(MessageResponse::new(format!(
        "Rating for film {} removed",
        film_id
    ))))
}

// == Watchlists ==

/// Handler for GET /users/:user_id/watchlist
pub async fn get_watchlist_handler(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<WatchlistStatus>> {
    load_watchlist(&state, &user_id).await.map(Json)
}

/// Handler for GET /films/:film_id/watchlist-status?userId=
pub async fn watchlist_status_handler(
    State(state): State<AppState>,
    Path(film_id): Path<i64>,
    Query(query): Query<WatchlistStatusQuery>,
) -> Result<Json<WatchlistMembershipResponse>> {
    let user_id = query
        .user_id
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| ServiceError::InvalidRequest("User ID is required".to_string()))?;

    let status = load_watchlist(&state, &user_id).await?;

    Ok(Json(WatchlistMembershipResponse {
        in_watchlist: status.contains(film_id),
        watch_list_id: status.entry_id(film_id),
    }))
}

/// Handler for PUT /users/:user_id/watchlist/:film_id
pub async fn add_to_watchlist_handler(
    State(state): State<AppState>,
    Path((user_id, film_id)): Path<(String, i64)>,
) -> Result<Json<MessageResponse>> {
    let added = state.catalog.add_to_watchlist(&user_id, film_id).await?;
    state.cache.invalidate_watchlist(user_id.as_str());

    let message = if added {
        format!("Film {} added to watchlist", film_id)
    } else {
        format!("Film {} already on watchlist", film_id)
    };
    Ok(Json(MessageResponse::new(message)))
}

/// Handler for DELETE /users/:user_id/watchlist/:film_id
pub async fn remove_from_watchlist_handler(
    State(state): State<AppState>,
    Path((user_id, film_id)): Path<(String, i64)>,
) -> Result<Json<MessageResponse>> {
    if !state
        .catalog
        .remove_from_watchlist(&user_id, film_id)
        .await?
    {
        return Err(ServiceError::NotFound(format!(
            "film {} on watchlist of {}",
            film_id, user_id
        )));
    }
    state.cache.invalidate_watchlist(user_id.as_str());

    Ok(Json(MessageResponse::new(format!(
        "Film {} removed from watchlist",
        film_id
    ))))
}

// == Cache Administration ==

/// Handler for GET /cache/stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(state.cache.stats().into())
}

/// Handler for POST /cache/sweep
pub async fn sweep_handler(State(state): State<AppState>) -> Json<SweepResponse> {
    Json(state.cache.sweep_expired().into())
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
