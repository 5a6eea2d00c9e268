use jiff::Timestamp;

use super::{Movie, new_id};
use crate::error::ModelError;

pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;

/// One account's verdict on one movie.
#[derive(Clone, Debug, PartialEq)]
pub struct Review {
    id: String,
    author: String,
    movie: Movie,
    rating: u8,
    comment: String,
    created_at: Timestamp,
}

impl Review {
    /// Missing comment becomes empty; missing timestamp becomes now.
    pub fn new(
        author: impl Into<String>,
        movie: Movie,
        rating: u8,
        comment: Option<String>,
        created_at: Option<Timestamp>,
    ) -> Result<Self, ModelError> {
        Self::from_parts(new_id(), author, movie, rating, comment, created_at)
    }

    pub fn from_parts(
        id: impl Into<String>,
        author: impl Into<String>,
        movie: Movie,
        rating: u8,
        comment: Option<String>,
        created_at: Option<Timestamp>,
    ) -> Result<Self, ModelError> {
        if !(MIN_RATING..=MAX_RATING).contains(&rating) {
            return Err(ModelError::RatingOutOfRange(rating));
        }
        Ok(Self {
            id: id.into(),
            author: author.into(),
            movie,
            rating,
            comment: comment.unwrap_or_default(),
            created_at: created_at.unwrap_or_else(Timestamp::now),
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn movie(&self) -> &Movie {
        &self.movie
    }

    pub fn rating(&self) -> u8 {
        self.rating
    }

    pub fn comment(&self) -> &str {
        &self.comment
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }
}
