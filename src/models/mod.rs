//! Domain payloads and request/response models for the film service
//!
//! This module defines the film and watchlist payloads held by the cache
//! and the DTOs used for serializing/deserializing HTTP bodies.

pub mod film;
pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use film::{Film, WatchlistStatus};
pub use requests::{FilmRequest, RateFilmRequest, WatchlistStatusQuery};
pub use responses::{
    HealthResponse, MessageResponse, NamespaceStatsResponse, RatingResponse, StatsResponse,
    SweepResponse, WatchlistMembershipResponse,
};
