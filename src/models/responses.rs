//! Response DTOs for the film service API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::cache::{CacheStats, CacheStatsSnapshot, SweepReport};

/// Response body for `GET /films/:film_id/rating`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingResponse {
    pub film_id: i64,
    /// `null` when nobody has rated the film yet
    pub average_rating: Option<f64>,
}

/// Response body for `GET /films/:film_id/watchlist-status`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchlistMembershipResponse {
    pub in_watchlist: bool,
    pub watch_list_id: Option<String>,
}

/// Response body for write endpoints
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Statistics of one namespace, as reported by `GET /cache/stats`
#[derive(Debug, Clone, Serialize)]
pub struct NamespaceStatsResponse {
    pub hits: u64,
    pub misses: u64,
    pub expired: u64,
    pub swept: u64,
    pub total_entries: usize,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl From<CacheStats> for NamespaceStatsResponse {
    fn from(stats: CacheStats) -> Self {
        Self {
            hit_rate: stats.hit_rate(),
            hits: stats.hits,
            misses: stats.misses,
            expired: stats.expired,
            swept: stats.swept,
            total_entries: stats.total_entries,
        }
    }
}

/// Response body for the stats endpoint (`GET /cache/stats`)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    pub enabled: bool,
    pub total_entries: usize,
    pub films: NamespaceStatsResponse,
    pub ratings: NamespaceStatsResponse,
    pub watchlists: NamespaceStatsResponse,
}

impl From<CacheStatsSnapshot> for StatsResponse {
    fn from(snapshot: CacheStatsSnapshot) -> Self {
        Self {
            enabled: snapshot.enabled,
            total_entries: snapshot.total_entries(),
            films: snapshot.films.into(),
            ratings: snapshot.ratings.into(),
            watchlists: snapshot.watchlists.into(),
        }
    }
}

/// Response body for `POST /cache/sweep`
#[derive(Debug, Clone, Serialize)]
pub struct SweepResponse {
    pub films: usize,
    pub ratings: usize,
    pub watchlists: usize,
    pub total: usize,
    /// When the sweep ran, in ISO 8601 format
    pub swept_at: String,
}

impl From<SweepReport> for SweepResponse {
    fn from(report: SweepReport) -> Self {
        Self {
            films: report.films,
            ratings: report.ratings,
            watchlists: report.watchlists,
            total: report.total(),
            swept_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_response_serialize() {
        let resp = RatingResponse {
            film_id: 3,
            average_rating: None,
        };
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["filmId"], 3);
        assert!(json["averageRating"].is_null());
    }

    #[test]
    fn test_membership_response_serialize() {
        let resp = WatchlistMembershipResponse {
            in_watchlist: true,
            watch_list_id: Some("u-3".to_string()),
        };
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["inWatchlist"], true);
        assert_eq!(json["watchListId"], "u-3");
    }

    #[test]
    fn test_stats_response_from_snapshot() {
        let mut snapshot = CacheStatsSnapshot {
            enabled: true,
            ..Default::default()
        };
        snapshot.films.hits = 8;
        snapshot.films.misses = 2;
        snapshot.films.total_entries = 4;
        snapshot.ratings.total_entries = 1;

        let resp = StatsResponse::from(snapshot);
        assert_eq!(resp.total_entries, 5);
        assert!((resp.films.hit_rate - 0.8).abs() < 0.001);
        assert_eq!(resp.watchlists.hit_rate, 0.0);
    }

    #[test]
    fn test_sweep_response_total() {
        let resp = SweepResponse::from(SweepReport {
            films: 1,
            ratings: 2,
            watchlists: 3,
        });
        assert_eq!(resp.total, 6);
        assert!(!resp.swept_at.is_empty());
    }

    #[test]
    fn test_health_response_serialize() {
        let resp = HealthResponse::healthy();
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("healthy"));
        assert!(json.contains("timestamp"));
    }
}
