//! Trait definitions and types for metadata providers.
//!
//! [`MetadataProvider`] covers the movie/TV catalog (TMDB) and
//! [`CriticScoreProvider`] covers critic aggregate scores (OMDb). Both are
//! object safe so the HTTP layer can hold them as `Arc<dyn ...>`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Media kind
// ---------------------------------------------------------------------------

/// Catalog a provider item belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Movie,
    Tv,
}

impl MediaKind {
    /// Parse the wire tag used by search results and item references.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "movie" => Some(MediaKind::Movie),
            "tv" => Some(MediaKind::Tv),
            _ => None,
        }
    }

    /// Human-facing label shown in the newsletter.
    pub fn label(self) -> &'static str {
        match self {
            MediaKind::Movie => "Movie",
            MediaKind::Tv => "TV Show",
        }
    }
}

// ---------------------------------------------------------------------------
// Search results
// ---------------------------------------------------------------------------

/// A raw search result, before filtering and type tagging.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchCandidate {
    /// Provider-specific identifier (TMDB numeric ID).
    pub id: u64,
    /// Display title (`title` for movies, `name` for TV).
    pub title: String,
    /// Release or first-air date as returned by the provider.
    pub date: Option<String>,
    /// Absolute poster URL at search-thumbnail size, if a poster exists.
    pub poster_url: Option<String>,
    /// Provider popularity score used for ranking.
    pub popularity: f64,
}

/// A search result as returned to API callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchHit {
    pub id: u64,
    #[serde(rename = "type")]
    pub kind: MediaKind,
    pub title: String,
    pub year: String,
    pub poster_url: String,
    pub popularity: f64,
}

// ---------------------------------------------------------------------------
// Details
// ---------------------------------------------------------------------------

/// Detail record for one movie or TV show.
///
/// Optional upstream fields are defaulted to empty values by the provider
/// so consumers never deal with partial JSON.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MediaDetails {
    /// Title (`title` for movies, `name` for TV). Empty when absent.
    pub title: String,
    /// Release date for movies, first-air date for TV. Empty when absent.
    pub release_date: String,
    /// Community vote average (0.0 - 10.0).
    pub vote_average: f64,
    pub vote_count: u64,
    /// Genre names in provider order.
    pub genres: Vec<String>,
    /// Absolute poster URL at full-card size, if a poster exists.
    pub poster_url: Option<String>,
    pub overview: String,
    /// IMDb cross-reference id, used for critic score lookups.
    pub imdb_id: Option<String>,
}

// ---------------------------------------------------------------------------
// Provider traits
// ---------------------------------------------------------------------------

/// Movie/TV catalog provider.
#[async_trait]
pub trait MetadataProvider: Send + Sync {
    /// Short, lowercase identifier for this provider (e.g. `"tmdb"`).
    fn name(&self) -> &'static str;

    /// Returns `true` when the provider has credentials configured.
    fn is_available(&self) -> bool;

    /// Search movies by free-text query, in provider order.
    async fn search_movie(&self, query: &str) -> anyhow::Result<Vec<SearchCandidate>>;

    /// Search TV shows by free-text query, in provider order.
    async fn search_tv(&self, query: &str) -> anyhow::Result<Vec<SearchCandidate>>;

    /// Fetch details for a movie.
    async fn movie_details(&self, id: &str) -> anyhow::Result<MediaDetails>;

    /// Fetch details for a TV show.
    async fn tv_details(&self, id: &str) -> anyhow::Result<MediaDetails>;
}

/// Critic aggregate score provider.
///
/// Lookups are best effort: every failure mode collapses to `None`.
#[async_trait]
pub trait CriticScoreProvider: Send + Sync {
    async fn critic_score(&self, imdb_id: Option<&str>) -> Option<String>;
}

/// Provider used when critic scores are disabled.
pub struct NoCriticScores;

#[async_trait]
impl CriticScoreProvider for NoCriticScores {
    async fn critic_score(&self, _imdb_id: Option<&str>) -> Option<String> {
        None
    }
}
