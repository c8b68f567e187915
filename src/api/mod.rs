//! API Module
//!
//! HTTP handlers and routing for the film service REST API.
//!
//! # Endpoints
//! - `GET|PUT|DELETE /films/:film_id` - Read, store or delete a film
//! - `GET /films/:film_id/rating` - Average rating of a film
//! - `PUT /films/:film_id/ratings` - Rate a film
//! - `DELETE /films/:film_id/ratings/:user_id` - Withdraw a rating
//! - `GET /films/:film_id/watchlist-status?userId=` - Watchlist membership
//! - `GET /users/:user_id/watchlist` - A user's watchlist
//! - `PUT|DELETE /users/:user_id/watchlist/:film_id` - Edit a watchlist
//! - `GET /cache/stats` - Cache statistics
//! - `POST /cache/sweep` - Sweep expired cache entries now
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
