//! On-disk document layout.
//!
//! Every record spells out its field names; optional fields tolerate being
//! absent. Owner back-references are not written, they are implied by the
//! enclosing user entry and restored on load.

use std::collections::BTreeMap;

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::{
    entities::{Account, Movie, Review, WatchHistory, WatchedEntry, Watchlist},
    error::{ModelError, StoreError, StoreResult},
};

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreDocument {
    #[serde(default)]
    pub current_user: Option<String>,
    #[serde(default)]
    pub users: BTreeMap<String, AccountRecord>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountRecord {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub watchlists: Vec<WatchlistRecord>,
    #[serde(default)]
    pub reviews: BTreeMap<String, ReviewRecord>,
    #[serde(default)]
    pub watch_history: Option<WatchHistoryRecord>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchlistRecord {
    pub id: String,
    pub name: String,
    pub date_created: Timestamp,
    #[serde(default)]
    pub movies: Vec<MovieRecord>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieRecord {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub plot: Option<String>,
    #[serde(default)]
    pub genre_ids: Vec<i32>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub popularity: f64,
    #[serde(default)]
    pub poster_url: Option<String>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewRecord {
    pub id: String,
    pub movie: MovieRecord,
    pub rating: u8,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchHistoryRecord {
    pub id: String,
    #[serde(default)]
    pub movies: Vec<WatchedMovieRecord>,
}

/// A movie record with the viewing time alongside its fields.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchedMovieRecord {
    #[serde(flatten)]
    pub movie: MovieRecord,
    #[serde(default)]
    pub watched_at: Option<Timestamp>,
}

impl From<&Movie> for MovieRecord {
    fn from(movie: &Movie) -> Self {
        Self {
            id: movie.id().to_string(),
            title: movie.title().to_string(),
            plot: movie.plot().map(str::to_string),
            genre_ids: movie.genre_ids().iter().copied().collect(),
            release_date: movie.release_date().map(str::to_string),
            rating: movie.rating(),
            popularity: movie.popularity(),
            poster_url: movie.poster_url().map(str::to_string),
        }
    }
}

impl TryFrom<MovieRecord> for Movie {
    type Error = ModelError;

    fn try_from(rec: MovieRecord) -> Result<Self, ModelError> {
        let mut movie = Movie::new(rec.id, rec.title)
            .with_genres(rec.genre_ids)
            .with_rating(rec.rating)?
            .with_popularity(rec.popularity)?;
        if let Some(plot) = rec.plot {
            movie = movie.with_plot(plot);
        }
        if let Some(date) = rec.release_date {
            movie = movie.with_release_date(date);
        }
        if let Some(url) = rec.poster_url {
            movie = movie.with_poster_url(url);
        }
        Ok(movie)
    }
}

impl From<&Account> for AccountRecord {
    fn from(account: &Account) -> Self {
        let watchlists = account
            .watchlists()
            .iter()
            .map(|list| WatchlistRecord {
                id: list.id().to_string(),
                name: list.name().to_string(),
                date_created: list.created_at(),
                movies: list.movies().iter().map(MovieRecord::from).collect(),
            })
            .collect();

        let reviews = account
            .reviews()
            .map(|review| {
                let rec = ReviewRecord {
                    id: review.id().to_string(),
                    movie: review.movie().into(),
                    rating: review.rating(),
                    comment: review.comment().to_string(),
                    created_at: Some(review.created_at()),
                };
                (rec.id.clone(), rec)
            })
            .collect();

        let watch_history = account.watch_history().map(|history| WatchHistoryRecord {
            id: history.id().to_string(),
            movies: history
                .entries()
                .iter()
                .map(|entry| WatchedMovieRecord {
                    movie: entry.movie().into(),
                    watched_at: Some(entry.watched_at()),
                })
                .collect(),
        });

        Self {
            username: account.username().to_string(),
            password: account.password().to_string(),
            watchlists,
            reviews,
            watch_history,
        }
    }
}

impl AccountRecord {
    pub fn into_account(self) -> StoreResult<Account> {
        for (key, review) in &self.reviews {
            if *key != review.id {
                return Err(StoreError::MismatchedKey {
                    map: "reviews",
                    key: key.clone(),
                    id: review.id.clone(),
                });
            }
        }
        let username = self.username.clone();
        self.build().map_err(|source| StoreError::InvalidRecord { username, source })
    }

    fn build(self) -> Result<Account, ModelError> {
        let owner = self.username;

        let watchlists = self
            .watchlists
            .into_iter()
            .map(|rec| -> Result<Watchlist, ModelError> {
                let movies =
                    rec.movies.into_iter().map(Movie::try_from).collect::<Result<Vec<_>, _>>()?;
                Watchlist::from_parts(rec.id, owner.clone(), rec.name, rec.date_created, movies)
            })
            .collect::<Result<Vec<_>, _>>()?;

        let reviews = self
            .reviews
            .into_values()
            .map(|rec| -> Result<Review, ModelError> {
                Review::from_parts(
                    rec.id,
                    owner.clone(),
                    rec.movie.try_into()?,
                    rec.rating,
                    Some(rec.comment),
                    rec.created_at,
                )
            })
            .collect::<Result<Vec<_>, _>>()?;

        let watch_history = self
            .watch_history
            .map(|rec| -> Result<WatchHistory, ModelError> {
                let entries = rec
                    .movies
                    .into_iter()
                    .map(|w| -> Result<WatchedEntry, ModelError> {
                        Ok(WatchedEntry::new(w.movie.try_into()?, w.watched_at))
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(WatchHistory::from_parts(rec.id, owner.clone(), entries))
            })
            .transpose()?;

        Account::from_parts(owner, self.password, watchlists, watch_history, reviews)
    }
}

impl StoreDocument {
    pub fn from_accounts<'a>(
        current_user: Option<&str>,
        accounts: impl IntoIterator<Item = &'a Account>,
    ) -> Self {
        Self {
            current_user: current_user.map(str::to_string),
            users: accounts
                .into_iter()
                .map(|account| (account.username().to_string(), AccountRecord::from(account)))
                .collect(),
        }
    }

    /// Converts every user entry into an account keyed by username.
    pub fn into_accounts(self) -> StoreResult<BTreeMap<String, Account>> {
        let mut accounts = BTreeMap::new();
        for (key, record) in self.users {
            if key != record.username {
                let id = record.username;
                return Err(StoreError::MismatchedKey { map: "users", key, id });
            }
            let account = record.into_account()?;
            accounts.insert(key, account);
        }
        Ok(accounts)
    }
}
