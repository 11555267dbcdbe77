//! TMDB (The Movie Database) metadata provider.
//!
//! Implements [`MetadataProvider`] against the TMDB v3 REST API. Every
//! request carries the API key as a query parameter and uses a 30-second
//! timeout. Optional response fields are defaulted rather than rejected.

use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use crate::config::TmdbConfig;
use crate::metadata::is_numeric_id;
use crate::metadata::provider::{MediaDetails, MetadataProvider, SearchCandidate};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
/// Poster size used for search thumbnails.
pub const SEARCH_POSTER_SIZE: &str = "w200";
/// Poster size used for newsletter cards.
pub const DETAIL_POSTER_SIZE: &str = "w500";

// ---------------------------------------------------------------------------
// TMDB API response types (private)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct TmdbSearchResponse<T> {
    #[serde(default = "Vec::new")]
    results: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct TmdbMovieSearchResult {
    id: u64,
    title: Option<String>,
    release_date: Option<String>,
    poster_path: Option<String>,
    popularity: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct TmdbTvSearchResult {
    id: u64,
    name: Option<String>,
    first_air_date: Option<String>,
    poster_path: Option<String>,
    popularity: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct TmdbMovieDetail {
    title: Option<String>,
    release_date: Option<String>,
    vote_average: Option<f64>,
    vote_count: Option<u64>,
    genres: Option<Vec<TmdbGenre>>,
    poster_path: Option<String>,
    overview: Option<String>,
    imdb_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TmdbTvDetail {
    name: Option<String>,
    first_air_date: Option<String>,
    vote_average: Option<f64>,
    vote_count: Option<u64>,
    genres: Option<Vec<TmdbGenre>>,
    poster_path: Option<String>,
    overview: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TmdbGenre {
    name: String,
}

// ---------------------------------------------------------------------------
// Provider implementation
// ---------------------------------------------------------------------------

/// TMDB metadata provider.
///
/// # Examples
///
/// ```no_run
/// use plexletter::config::TmdbConfig;
/// use plexletter::metadata::providers::TmdbProvider;
///
/// let mut config = TmdbConfig::default();
/// config.api_key = "your-api-key".into();
/// let provider = TmdbProvider::new(&config);
/// ```
pub struct TmdbProvider {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    image_base_url: String,
}

impl TmdbProvider {
    pub fn new(config: &TmdbConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!("Failed to build HTTP client: {}", e);
                reqwest::Client::new()
            });

        Self {
            client,
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            image_base_url: config.image_base_url.trim_end_matches('/').to_string(),
        }
    }

    /// GET `path` with the API key attached and decode the JSON body.
    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        extra_params: &[(&str, &str)],
    ) -> anyhow::Result<T> {
        let url = format!("{}{path}", self.base_url);
        debug!(url = %url, "TMDB request");

        let mut params: Vec<(&str, &str)> = vec![("api_key", &self.api_key)];
        params.extend_from_slice(extra_params);

        let resp = self
            .client
            .get(&url)
            .query(&params)
            .send()
            .await
            .with_context(|| format!("TMDB request failed: {path}"))?
            .error_for_status()
            .with_context(|| format!("TMDB request returned error: {path}"))?;

        resp.json::<T>()
            .await
            .with_context(|| format!("failed to parse TMDB response: {path}"))
    }

    /// Convert a TMDB image path fragment to a full URL at `size`.
    fn image_url(&self, path: &str, size: &str) -> String {
        format!("{}/{size}{path}", self.image_base_url)
    }

    /// Path for a details lookup; ids never reach the URL unless purely numeric.
    fn details_path(kind: &str, id: &str) -> anyhow::Result<String> {
        anyhow::ensure!(is_numeric_id(id), "invalid TMDB {kind} id: {id:?}");
        Ok(format!("/{kind}/{id}"))
    }

    fn poster(&self, path: Option<String>, size: &str) -> Option<String> {
        path.filter(|p| !p.is_empty())
            .map(|p| self.image_url(&p, size))
    }
}

fn genre_names(genres: Option<Vec<TmdbGenre>>) -> Vec<String> {
    genres
        .unwrap_or_default()
        .into_iter()
        .map(|g| g.name)
        .collect()
}

#[async_trait]
impl MetadataProvider for TmdbProvider {
    fn name(&self) -> &'static str {
        "tmdb"
    }

    fn is_available(&self) -> bool {
        !self.api_key.is_empty()
    }

    async fn search_movie(&self, query: &str) -> anyhow::Result<Vec<SearchCandidate>> {
        let body: TmdbSearchResponse<TmdbMovieSearchResult> =
            self.get("/search/movie", &[("query", query)]).await?;

        Ok(body
            .results
            .into_iter()
            .map(|r| SearchCandidate {
                id: r.id,
                title: r.title.unwrap_or_default(),
                date: r.release_date,
                poster_url: self.poster(r.poster_path, SEARCH_POSTER_SIZE),
                popularity: r.popularity.unwrap_or(0.0),
            })
            .collect())
    }

    async fn search_tv(&self, query: &str) -> anyhow::Result<Vec<SearchCandidate>> {
        let body: TmdbSearchResponse<TmdbTvSearchResult> =
            self.get("/search/tv", &[("query", query)]).await?;

        Ok(body
            .results
            .into_iter()
            .map(|r| SearchCandidate {
                id: r.id,
                title: r.name.unwrap_or_default(),
                date: r.first_air_date,
                poster_url: self.poster(r.poster_path, SEARCH_POSTER_SIZE),
                popularity: r.popularity.unwrap_or(0.0),
            })
            .collect())
    }

    async fn movie_details(&self, id: &str) -> anyhow::Result<MediaDetails> {
        let detail: TmdbMovieDetail = self.get(&Self::details_path("movie", id)?, &[]).await?;

        Ok(MediaDetails {
            title: detail.title.unwrap_or_default(),
            release_date: detail.release_date.unwrap_or_default(),
            vote_average: detail.vote_average.unwrap_or(0.0),
            vote_count: detail.vote_count.unwrap_or(0),
            genres: genre_names(detail.genres),
            poster_url: self.poster(detail.poster_path, DETAIL_POSTER_SIZE),
            overview: detail.overview.unwrap_or_default(),
            imdb_id: detail.imdb_id.filter(|i| !i.is_empty()),
        })
    }

    async fn tv_details(&self, id: &str) -> anyhow::Result<MediaDetails> {
        let detail: TmdbTvDetail = self.get(&Self::details_path("tv", id)?, &[]).await?;

        Ok(MediaDetails {
            title: detail.name.unwrap_or_default(),
            release_date: detail.first_air_date.unwrap_or_default(),
            vote_average: detail.vote_average.unwrap_or(0.0),
            vote_count: detail.vote_count.unwrap_or(0),
            genres: genre_names(detail.genres),
            poster_url: self.poster(detail.poster_path, DETAIL_POSTER_SIZE),
            overview: detail.overview.unwrap_or_default(),
            imdb_id: None,
        })
    }
}
