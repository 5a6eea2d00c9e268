use std::{io, path::PathBuf};

/// Domain invariant violations, raised when an entity is constructed.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ModelError {
    #[error("username must not be empty")]
    EmptyUsername,
    #[error("password must not be empty")]
    EmptyPassword,
    #[error("watchlist name must not be empty")]
    EmptyWatchlistName,
    #[error("review rating must be between 1 and 5, got {0}")]
    RatingOutOfRange(u8),
    #[error("movie rating must be a finite number, got {0}")]
    NonFiniteRating(f64),
    #[error("movie popularity must be a finite number, got {0}")]
    NonFinitePopularity(f64),
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to read store file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write store file {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed store file {}: {source}", path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid record for account {username:?}: {source}")]
    InvalidRecord {
        username: String,
        #[source]
        source: ModelError,
    },
    #[error("{map} entry {key:?} holds a record for {id:?}")]
    MismatchedKey { map: &'static str, key: String, id: String },
    #[error("failed to serialize store: {0}")]
    Serialize(#[source] serde_json::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// The single failure the UI layer shows to the user.
#[derive(Debug)]
pub struct AppError(anyhow::Error);

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::error::Error for AppError {}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        Self(err)
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        Self(anyhow::Error::new(err))
    }
}

impl From<ModelError> for AppError {
    fn from(err: ModelError) -> Self {
        Self(anyhow::Error::new(err))
    }
}

impl From<wreq::Error> for AppError {
    fn from(err: wreq::Error) -> Self {
        Self(anyhow::Error::new(err))
    }
}

pub type AppResult<T> = Result<T, AppError>;
