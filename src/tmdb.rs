use std::{num::NonZeroU32, sync::Arc};

use governor::{
    Quota, RateLimiter,
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
};
use serde::Deserialize;
use tracing::debug;

use crate::{
    entities::Movie,
    error::{AppResult, ModelError},
};

/// One page of catalog results.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CatalogPage {
    pub page: u32,
    pub total_pages: u32,
    pub total_results: u32,
    pub movies: Vec<Movie>,
}

pub struct TmdbClient {
    client: wreq::Client,
    access_token: String,
    base_url: String,
    image_base_url: String,
    limiter: Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>,
}

impl TmdbClient {
    pub fn new(
        client: wreq::Client,
        access_token: String,
        base_url: String,
        image_base_url: String,
        rps: u32,
    ) -> Self {
        if access_token.trim().is_empty() {
            tracing::warn!("no TMDB_ACCESS_TOKEN provided, catalog lookups return nothing");
        }

        let rps = NonZeroU32::new(rps).unwrap_or(NonZeroU32::MIN);
        let limiter = Arc::new(RateLimiter::direct(Quota::per_second(rps)));
        Self { client, access_token, base_url, image_base_url, limiter }
    }

    fn offline(&self) -> bool {
        self.access_token.trim().is_empty()
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }

    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<Movie>> {
        if self.offline() {
            return Ok(None);
        }

        self.limiter.until_ready().await;

        debug!(id = %id, "fetching movie details");
        let resp = self
            .client
            .get(self.url(&format!("movie/{id}")))
            .bearer_auth(&self.access_token)
            .send()
            .await?;
        if resp.status().as_u16() == 404 {
            return Ok(None);
        }
        let details: MovieDetails = resp.error_for_status()?.json().await?;
        Ok(Some(details.into_movie(&self.image_base_url)?))
    }

    /// Pages start at 1; page 0 is treated as 1.
    pub async fn search_by_title(&self, query: &str, page: u32) -> AppResult<CatalogPage> {
        let page = page.max(1);
        if self.offline() || query.trim().is_empty() {
            return Ok(CatalogPage { page, ..CatalogPage::default() });
        }

        self.limiter.until_ready().await;

        debug!(query = %query, page = page, "searching catalog");
        let resp: ResultsPage = self
            .client
            .get(self.url("search/movie"))
            .bearer_auth(&self.access_token)
            .query(&[("query", query.to_string()), ("page", page.to_string())])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(resp.into_page(&self.image_base_url)?)
    }

    pub async fn filter_by_genres(&self, genre_ids: &[i32], page: u32) -> AppResult<CatalogPage> {
        let page = page.max(1);
        if self.offline() || genre_ids.is_empty() {
            return Ok(CatalogPage { page, ..CatalogPage::default() });
        }

        self.limiter.until_ready().await;

        let genres = genre_ids.iter().map(i32::to_string).collect::<Vec<_>>().join(",");
        debug!(genres = %genres, page = page, "discovering by genre");
        let resp: ResultsPage = self
            .client
            .get(self.url("discover/movie"))
            .bearer_auth(&self.access_token)
            .query(&[
                ("with_genres", genres),
                ("page", page.to_string()),
                ("sort_by", "popularity.desc".to_string()),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(resp.into_page(&self.image_base_url)?)
    }

    /// Replaces the movie's rating with the catalog's current value. Returns
    /// whether the catalog knew the movie.
    pub async fn refresh_rating(&self, movie: &mut Movie) -> AppResult<bool> {
        let Some(latest) = self.find_by_id(movie.id()).await? else {
            return Ok(false);
        };
        movie.set_rating(latest.rating())?;
        Ok(true)
    }
}

#[derive(Debug, Deserialize)]
struct ResultsPage {
    #[serde(default)]
    page: u32,
    #[serde(default)]
    total_pages: u32,
    #[serde(default)]
    total_results: u32,
    #[serde(default)]
    results: Vec<MovieSummary>,
}

impl ResultsPage {
    fn into_page(self, image_base_url: &str) -> Result<CatalogPage, ModelError> {
        Ok(CatalogPage {
            page: self.page,
            total_pages: self.total_pages,
            total_results: self.total_results,
            movies: self
                .results
                .into_iter()
                .map(|m| m.into_movie(image_base_url))
                .collect::<Result<_, _>>()?,
        })
    }
}

#[derive(Debug, Deserialize)]
struct MovieSummary {
    id: i64,
    title: String,
    overview: Option<String>,
    #[serde(default)]
    genre_ids: Vec<i32>,
    release_date: Option<String>,
    #[serde(default)]
    vote_average: f64,
    #[serde(default)]
    popularity: f64,
    poster_path: Option<String>,
}

impl MovieSummary {
    fn into_movie(self, image_base_url: &str) -> Result<Movie, ModelError> {
        build_movie(
            self.id,
            self.title,
            self.overview,
            self.genre_ids,
            self.release_date,
            self.vote_average,
            self.popularity,
            self.poster_path,
            image_base_url,
        )
    }
}

#[derive(Debug, Deserialize)]
struct MovieDetails {
    id: i64,
    title: String,
    overview: Option<String>,
    #[serde(default)]
    genres: Vec<Genre>,
    release_date: Option<String>,
    #[serde(default)]
    vote_average: f64,
    #[serde(default)]
    popularity: f64,
    poster_path: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Genre {
    id: i32,
}

impl MovieDetails {
    fn into_movie(self, image_base_url: &str) -> Result<Movie, ModelError> {
        build_movie(
            self.id,
            self.title,
            self.overview,
            self.genres.into_iter().map(|g| g.id).collect(),
            self.release_date,
            self.vote_average,
            self.popularity,
            self.poster_path,
            image_base_url,
        )
    }
}

#[allow(clippy::too_many_arguments)]
fn build_movie(
    id: i64,
    title: String,
    overview: Option<String>,
    genre_ids: Vec<i32>,
    release_date: Option<String>,
    rating: f64,
    popularity: f64,
    poster_path: Option<String>,
    image_base_url: &str,
) -> Result<Movie, ModelError> {
    let mut movie = Movie::new(id.to_string(), title)
        .with_genres(genre_ids)
        .with_rating(rating)?
        .with_popularity(popularity)?;
    // The catalog sends "" rather than null for unknown values.
    if let Some(plot) = non_empty(overview) {
        movie = movie.with_plot(plot);
    }
    if let Some(date) = non_empty(release_date) {
        movie = movie.with_release_date(date);
    }
    if let Some(path) = non_empty(poster_path) {
        movie = movie.with_poster_url(format!("{}{}", image_base_url.trim_end_matches('/'), path));
    }
    Ok(movie)
}

fn non_empty(s: Option<String>) -> Option<String> {
    s.and_then(|s| {
        let s = s.trim();
        (!s.is_empty()).then(|| s.to_string())
    })
}
