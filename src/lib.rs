//! Film Cache - short-lived memoization for a film-streaming platform
//!
//! Caches film details, average ratings and watchlist status in process,
//! with lazy expiry on read and a periodic background sweep, and serves
//! them over HTTP in front of a film catalog.

pub mod api;
pub mod cache;
pub mod catalog;
pub mod config;
pub mod error;
pub mod models;
pub mod tasks;

pub use api::AppState;
pub use cache::FilmCache;
pub use config::Config;
pub use tasks::SweepTask;
