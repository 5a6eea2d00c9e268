use jiff::Timestamp;

use super::{Movie, new_id};

/// One viewing of a movie.
#[derive(Clone, Debug, PartialEq)]
pub struct WatchedEntry {
    movie: Movie,
    watched_at: Timestamp,
}

impl WatchedEntry {
    pub fn new(movie: Movie, watched_at: Option<Timestamp>) -> Self {
        Self { movie, watched_at: watched_at.unwrap_or_else(Timestamp::now) }
    }

    pub fn movie(&self) -> &Movie {
        &self.movie
    }

    pub fn watched_at(&self) -> Timestamp {
        self.watched_at
    }
}

/// Viewing log of an account, in the order entries were recorded.
///
/// Repeat viewings of the same movie are kept as separate entries.
#[derive(Clone, Debug, PartialEq)]
pub struct WatchHistory {
    id: String,
    owner: String,
    entries: Vec<WatchedEntry>,
}

impl WatchHistory {
    pub fn new(owner: impl Into<String>) -> Self {
        Self::from_parts(new_id(), owner, Vec::new())
    }

    pub fn from_parts(
        id: impl Into<String>,
        owner: impl Into<String>,
        entries: Vec<WatchedEntry>,
    ) -> Self {
        Self { id: id.into(), owner: owner.into(), entries }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn entries(&self) -> &[WatchedEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn record(&mut self, entry: WatchedEntry) -> &WatchedEntry {
        self.entries.push(entry);
        &self.entries[self.entries.len() - 1]
    }

    pub fn times_watched(&self, movie_id: &str) -> usize {
        self.entries.iter().filter(|e| e.movie.id() == movie_id).count()
    }

    /// Latest viewing by watched-at value, which need not be the last entry.
    pub fn last_watched(&self, movie_id: &str) -> Option<Timestamp> {
        self.entries.iter().filter(|e| e.movie.id() == movie_id).map(|e| e.watched_at).max()
    }
}
