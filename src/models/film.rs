//! Domain payloads held by the cache and returned by the API.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Film detail payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Film {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub category: String,
    pub release_year: i32,
    /// Running time in minutes
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
    /// Mean user rating, filled in by the catalog on read
    #[serde(default)]
    pub average_rating: Option<f64>,
}

impl Film {
    /// Minimal film with only the required fields set.
    pub fn new(id: i64, title: impl Into<String>, release_year: i32) -> Self {
        Self {
            id,
            title: title.into(),
            overview: String::new(),
            category: String::new(),
            release_year,
            duration: None,
            image_url: String::new(),
            trailer_url: String::new(),
            director: None,
            producer: None,
            studio: None,
            age_rating: None,
            average_rating: None,
        }
    }
}

/// The set of films a user has on their watchlist.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchlistStatus {
    pub user_id: String,
    pub film_ids: BTreeSet<i64>,
}

impl WatchlistStatus {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            film_ids: BTreeSet::new(),
        }
    }

    pub fn contains(&self, film_id: i64) -> bool {
        self.film_ids.contains(&film_id)
    }

    /// Identifier of the watchlist row for `film_id`, if it is listed.
    pub fn entry_id(&self, film_id: i64) -> Option<String> {
        self.contains(film_id)
            .then(|| format!("{}-{}", self.user_id, film_id))
    }
}
