use jiff::Timestamp;

use super::{Movie, new_id};
use crate::error::ModelError;

/// Result of [`Watchlist::add`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AddOutcome {
    Added,
    AlreadyPresent,
}

/// A named, ordered list of movies without duplicate ids.
///
/// `owner` is the username of the account holding the list; the account owns
/// the list, not the other way round.
#[derive(Clone, Debug, PartialEq)]
pub struct Watchlist {
    id: String,
    owner: String,
    name: String,
    created_at: Timestamp,
    movies: Vec<Movie>,
}

impl Watchlist {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Result<Self, ModelError> {
        Self::from_parts(new_id(), owner, name, Timestamp::now(), Vec::new())
    }

    /// Rebuilds a list read back from storage. Duplicate movie ids collapse to
    /// their first occurrence.
    pub fn from_parts(
        id: impl Into<String>,
        owner: impl Into<String>,
        name: impl Into<String>,
        created_at: Timestamp,
        movies: Vec<Movie>,
    ) -> Result<Self, ModelError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ModelError::EmptyWatchlistName);
        }
        let mut list =
            Self { id: id.into(), owner: owner.into(), name, created_at, movies: Vec::new() };
        for movie in movies {
            list.add(movie);
        }
        Ok(list)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    pub fn contains(&self, movie_id: &str) -> bool {
        self.movies.iter().any(|m| m.id() == movie_id)
    }

    pub fn add(&mut self, movie: Movie) -> AddOutcome {
        if self.contains(movie.id()) {
            return AddOutcome::AlreadyPresent;
        }
        self.movies.push(movie);
        AddOutcome::Added
    }

    /// Returns whether a movie was removed.
    pub fn remove(&mut self, movie_id: &str) -> bool {
        let before = self.movies.len();
        self.movies.retain(|m| m.id() != movie_id);
        self.movies.len() != before
    }

    pub fn rename(&mut self, name: impl Into<String>) -> Result<(), ModelError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ModelError::EmptyWatchlistName);
        }
        self.name = name;
        Ok(())
    }
}
