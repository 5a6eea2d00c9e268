use std::collections::BTreeSet;

use crate::error::ModelError;

/// A catalog movie as the rest of the application sees it.
///
/// Everything except the rating is fixed once built; the rating can be
/// refreshed from the catalog. Rating and popularity are always finite.
#[derive(Clone, Debug, PartialEq)]
pub struct Movie {
    id: String,
    title: String,
    plot: Option<String>,
    genre_ids: BTreeSet<i32>,
    release_date: Option<String>,
    rating: f64,
    popularity: f64,
    poster_url: Option<String>,
}

impl Movie {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            plot: None,
            genre_ids: BTreeSet::new(),
            release_date: None,
            rating: 0.0,
            popularity: 0.0,
            poster_url: None,
        }
    }

    pub fn with_plot(mut self, plot: impl Into<String>) -> Self {
        self.plot = Some(plot.into());
        self
    }

    pub fn with_genres(mut self, genre_ids: impl IntoIterator<Item = i32>) -> Self {
        self.genre_ids = genre_ids.into_iter().collect();
        self
    }

    pub fn with_release_date(mut self, release_date: impl Into<String>) -> Self {
        self.release_date = Some(release_date.into());
        self
    }

    pub fn with_rating(mut self, rating: f64) -> Result<Self, ModelError> {
        self.set_rating(rating)?;
        Ok(self)
    }

    pub fn with_popularity(mut self, popularity: f64) -> Result<Self, ModelError> {
        if !popularity.is_finite() {
            return Err(ModelError::NonFinitePopularity(popularity));
        }
        self.popularity = popularity;
        Ok(self)
    }

    pub fn with_poster_url(mut self, poster_url: impl Into<String>) -> Self {
        self.poster_url = Some(poster_url.into());
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn plot(&self) -> Option<&str> {
        self.plot.as_deref()
    }

    pub fn genre_ids(&self) -> &BTreeSet<i32> {
        &self.genre_ids
    }

    pub fn has_genre(&self, genre_id: i32) -> bool {
        self.genre_ids.contains(&genre_id)
    }

    pub fn release_date(&self) -> Option<&str> {
        self.release_date.as_deref()
    }

    pub fn rating(&self) -> f64 {
        self.rating
    }

    pub fn popularity(&self) -> f64 {
        self.popularity
    }

    pub fn poster_url(&self) -> Option<&str> {
        self.poster_url.as_deref()
    }

    pub fn set_rating(&mut self, rating: f64) -> Result<(), ModelError> {
        if !rating.is_finite() {
            return Err(ModelError::NonFiniteRating(rating));
        }
        self.rating = rating;
        Ok(())
    }
}
