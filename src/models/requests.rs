//! Request DTOs for the film service API
//!
//! Defines the structure of incoming HTTP request bodies and query strings.

use serde::Deserialize;

use crate::catalog::{MAX_RATING, MIN_RATING};
use crate::models::Film;

/// Request body for `PUT /films/:film_id/ratings`
///
/// `rating` is taken as any JSON number so that fractional, negative and
/// oversized values reach [`RateFilmRequest::validate`] instead of failing
/// in the extractor.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateFilmRequest {
    pub user_id: String,
    pub rating: f64,
}

impl RateFilmRequest {
    /// Validates the request data
    ///
    /// Returns the rating as a whole star count, or an error message.
    pub fn validate(&self) -> Result<u8, String> {
        if self.user_id.trim().is_empty() {
            return Err("User ID is required".to_string());
        }

        let range = f64::from(MIN_RATING)..=f64::from(MAX_RATING);
        if !range.contains(&self.rating) || self.rating.fract() != 0.0 {
            return Err(format!(
                "Rating must be a whole number between {} and {}",
                MIN_RATING, MAX_RATING
            ));
        }
        Ok(self.rating as u8)
    }
}

/// Request body for `PUT /films/:film_id`. The id comes from the path.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilmRequest {
    pub title: String,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub category: String,
    pub release_year: i32,
    #[serde(default)]
    pub duration: Option<u32>,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub trailer_url: String,
    #[serde(default)]
    pub director: Option<String>,
    #[serde(default)]
    pub producer: Option<String>,
    #[serde(default)]
    pub studio: Option<String>,
    #[serde(default)]
    pub age_rating: Option<u8>,
}

impl FilmRequest {
    pub fn into_film(self, id: i64) -> Film {
        Film {
            id,
            title: self.title,
            overview: self.overview,
            category: self.category,
            release_year: self.release_year,
            duration: self.duration,
            image_url: self.image_url,
            trailer_url: self.trailer_url,
            director: self.director,
            producer: self.producer,
            studio: self.studio,
            age_rating: self.age_rating,
            average_rating: None,
        }
    }
}

/// Query string for `GET /films/:film_id/watchlist-status`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WatchlistStatusQuery {
    #[serde(rename = "userId")]
    pub user_id: Option<String>,
}
