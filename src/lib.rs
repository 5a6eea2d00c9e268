//! Persistence core of a personal movie tracker: accounts with their
//! watchlists, reviews and watch history, stored in a single JSON file behind
//! an in-memory cache.

pub mod cache;
pub mod config;
pub mod entities;
pub mod error;
pub mod session;
pub mod store;
pub mod tmdb;

pub use cache::CacheManager;
pub use entities::{Account, AddOutcome, Movie, Review, WatchHistory, WatchedEntry, Watchlist};
pub use error::{AppError, AppResult, ModelError, StoreError, StoreResult};
pub use session::Session;
pub use store::{AccountRepository, FileStore, MemoryCache};
