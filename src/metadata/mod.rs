//! Metadata client for enriching newsletter items with external data.
//!
//! # Module layout
//!
//! - [`provider`] -- Trait definitions and shared data types.
//! - [`providers`] -- TMDB (catalog) and OMDb (critic score) implementations.
//! - [`search`] -- Combined movie + TV search with popularity ranking.

pub mod provider;
pub mod providers;
pub mod search;

pub use provider::{
    CriticScoreProvider, MediaDetails, MediaKind, MetadataProvider, NoCriticScores,
    SearchCandidate, SearchHit,
};
pub use search::search_media;

/// Leading four characters of a provider date (`"2023-04-15"` -> `"2023"`).
///
/// Shorter strings are returned whole, matching a plain prefix slice.
pub fn year_of(date: &str) -> String {
    date.chars().take(4).collect()
}

/// True for a non-empty run of ASCII digits, the only id shape the catalog serves.
pub fn is_numeric_id(id: &str) -> bool {
    !id.is_empty() && id.bytes().all(|b| b.is_ascii_digit())
}
