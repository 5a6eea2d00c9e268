mod account;
mod movie;
mod review;
mod watch_history;
mod watchlist;

pub use account::{Account, DEFAULT_WATCHLIST_SUFFIX};
pub use movie::Movie;
pub use review::{MAX_RATING, MIN_RATING, Review};
pub use watch_history::{WatchHistory, WatchedEntry};
pub use watchlist::{AddOutcome, Watchlist};

pub(crate) fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
