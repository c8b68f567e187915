//! API Routes
//!
//! Configures the Axum router with all film service endpoints.

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    add_to_watchlist_handler, delete_film_handler, delete_rating_handler, get_film_handler,
    get_rating_handler, get_watchlist_handler, health_handler, rate_film_handler,
    remove_from_watchlist_handler, stats_handler, sweep_handler, upsert_film_handler,
    watchlist_status_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(
            "/films/:film_id",
            get(get_film_handler)
                .put(upsert_film_handler)
                .delete(delete_film_handler),
        )
        .route("/films/:film_id/rating", get(get_rating_handler))
        .route("/films/:film_id/ratings", put(rate_film_handler))
        .route("/films/:film_id/ratings/:user_id", delete(delete_rating_handler))
        .route(
            "/films/:film_id/watchlist-status",
            get(watchlist_status_handler),
        )
        .route("/users/:user_id/watchlist", get(get_watchlist_handler))
        .route(
            "/users/:user_id/watchlist/:film_id",
            put(add_to_watchlist_handler).delete(remove_from_watchlist_handler),
        )
        .route("/cache/stats", get(stats_handler))
        .route("/cache/sweep", post(sweep_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
