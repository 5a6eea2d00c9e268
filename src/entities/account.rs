use std::collections::BTreeMap;

use jiff::Timestamp;

use super::{Movie, Review, WatchHistory, WatchedEntry, Watchlist};
use crate::error::ModelError;

/// Appended to the username to name the list every new account starts with.
pub const DEFAULT_WATCHLIST_SUFFIX: &str = "'s Watch List";

/// A user's credentials and everything they own.
///
/// Reviews are keyed by movie id, so an account holds at most one review per
/// movie.
#[derive(Clone, Debug, PartialEq)]
pub struct Account {
    username: String,
    password: String,
    watchlists: Vec<Watchlist>,
    watch_history: Option<WatchHistory>,
    reviews: BTreeMap<String, Review>,
}

impl Account {
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, ModelError> {
        let mut account = Self::from_parts(username, password, Vec::new(), None, Vec::new())?;
        let name = format!("{}{DEFAULT_WATCHLIST_SUFFIX}", account.username);
        account.add_watchlist(name)?;
        Ok(account)
    }

    /// Rebuilds an account read back from storage. No default watchlist is
    /// added; later reviews of the same movie replace earlier ones.
    pub fn from_parts(
        username: impl Into<String>,
        password: impl Into<String>,
        watchlists: Vec<Watchlist>,
        watch_history: Option<WatchHistory>,
        reviews: Vec<Review>,
    ) -> Result<Self, ModelError> {
        let username = username.into();
        let password = password.into();
        if username.is_empty() {
            return Err(ModelError::EmptyUsername);
        }
        if password.is_empty() {
            return Err(ModelError::EmptyPassword);
        }
        let mut account =
            Self { username, password, watchlists, watch_history, reviews: BTreeMap::new() };
        for review in reviews {
            account.add_review(review);
        }
        Ok(account)
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn check_password(&self, candidate: &str) -> bool {
        self.password == candidate
    }

    pub fn watchlists(&self) -> &[Watchlist] {
        &self.watchlists
    }

    /// The first list, created along with the account.
    pub fn default_watchlist(&self) -> Option<&Watchlist> {
        self.watchlists.first()
    }

    pub fn watchlist(&self, id: &str) -> Option<&Watchlist> {
        self.watchlists.iter().find(|w| w.id() == id)
    }

    pub fn watchlist_mut(&mut self, id: &str) -> Option<&mut Watchlist> {
        self.watchlists.iter_mut().find(|w| w.id() == id)
    }

    pub fn watchlist_by_name(&self, name: &str) -> Option<&Watchlist> {
        self.watchlists.iter().find(|w| w.name() == name)
    }

    pub fn add_watchlist(&mut self, name: impl Into<String>) -> Result<&mut Watchlist, ModelError> {
        let list = Watchlist::new(self.username.clone(), name)?;
        self.watchlists.push(list);
        let last = self.watchlists.len() - 1;
        Ok(&mut self.watchlists[last])
    }

    pub fn remove_watchlist(&mut self, id: &str) -> Option<Watchlist> {
        let pos = self.watchlists.iter().position(|w| w.id() == id)?;
        Some(self.watchlists.remove(pos))
    }

    pub fn reviews(&self) -> impl Iterator<Item = &Review> {
        self.reviews.values()
    }

    pub fn review_count(&self) -> usize {
        self.reviews.len()
    }

    pub fn review_for(&self, movie_id: &str) -> Option<&Review> {
        self.reviews.get(movie_id)
    }

    /// Stores `review` under its movie id, returning the review it replaced.
    pub fn add_review(&mut self, review: Review) -> Option<Review> {
        self.reviews.insert(review.movie().id().to_string(), review)
    }

    pub fn remove_review(&mut self, movie_id: &str) -> Option<Review> {
        self.reviews.remove(movie_id)
    }

    pub fn watch_history(&self) -> Option<&WatchHistory> {
        self.watch_history.as_ref()
    }

    /// Appends a viewing, creating the history on first use.
    pub fn record_watch(&mut self, movie: Movie, watched_at: Option<Timestamp>) -> &WatchedEntry {
        let username = &self.username;
        let history =
            self.watch_history.get_or_insert_with(|| WatchHistory::new(username.clone()));
        history.record(WatchedEntry::new(movie, watched_at))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_account_has_default_watchlist() {
        let account = Account::new("bob", "secret").unwrap();
        assert_eq!(account.watchlists().len(), 1);
        let list = account.default_watchlist().unwrap();
        assert_eq!(list.name(), "bob's Watch List");
        assert_eq!(list.owner(), "bob");
        assert!(account.watch_history().is_none());
        assert_eq!(account.review_count(), 0);
    }

    #[test]
    fn rejects_empty_credentials() {
        assert_eq!(Account::new("", "secret").unwrap_err(), ModelError::EmptyUsername);
        assert_eq!(Account::new("bob", "").unwrap_err(), ModelError::EmptyPassword);
    }

    #[test]
    fn second_review_for_same_movie_replaces_first() {
        let mut account = Account::new("bob", "secret").unwrap();
        let heat = Movie::new("1", "Heat");
        let first = Review::new("bob", heat.clone(), 3, Some("ok".into()), None).unwrap();
        let second = Review::new("bob", heat, 5, Some("great".into()), None).unwrap();
        assert!(account.add_review(first.clone()).is_none());
        assert_eq!(account.add_review(second), Some(first));
        assert_eq!(account.review_count(), 1);
        assert_eq!(account.review_for("1").unwrap().rating(), 5);
    }

    #[test]
    fn record_watch_creates_history_once() {
        let mut account = Account::new("bob", "secret").unwrap();
        account.record_watch(Movie::new("1", "Heat"), None);
        let history_id = account.watch_history().unwrap().id().to_string();
        account.record_watch(Movie::new("1", "Heat"), None);
        let history = account.watch_history().unwrap();
        assert_eq!(history.id(), history_id);
        assert_eq!(history.owner(), "bob");
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn watchlists_can_be_found_and_removed() {
        let mut account = Account::new("bob", "secret").unwrap();
        let id = account.add_watchlist("Favorites").unwrap().id().to_string();
        assert_eq!(account.watchlist_by_name("Favorites").unwrap().id(), id);
        account.watchlist_mut(&id).unwrap().add(Movie::new("100", "Inception"));
        assert_eq!(account.watchlist(&id).unwrap().len(), 1);
        assert!(account.remove_watchlist(&id).is_some());
        assert!(account.remove_watchlist(&id).is_none());
        assert_eq!(account.watchlists().len(), 1);
        assert!(account.add_watchlist("").is_err());
    }

    #[test]
    fn check_password_compares_exactly() {
        let account = Account::new("bob", "secret").unwrap();
        assert!(account.check_password("secret"));
        assert!(!account.check_password("Secret"));
    }
}
