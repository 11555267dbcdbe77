//! Enrichment engine: item references to fully populated newsletter items.
//!
//! Upstream failures never escape this module. A reference whose details
//! cannot be fetched (or carry no title) enriches to `None` and is dropped
//! by the caller; a failed critic lookup only leaves `critic_score` empty.

use std::sync::Arc;

use futures::future::join_all;
use tracing::{debug, warn};

use crate::metadata::{CriticScoreProvider, MediaDetails, MediaKind, MetadataProvider};
use crate::metadata::year_of;

use super::types::{EnrichedItem, ItemReference};

/// Resolves [`ItemReference`]s against the metadata and critic providers.
#[derive(Clone)]
pub struct Enricher {
    metadata: Arc<dyn MetadataProvider>,
    critic: Arc<dyn CriticScoreProvider>,
}

impl Enricher {
    pub fn new(metadata: Arc<dyn MetadataProvider>, critic: Arc<dyn CriticScoreProvider>) -> Self {
        Self { metadata, critic }
    }

    /// Enrich a single reference.
    ///
    /// Movies get a best-effort critic score; TV shows never do.
    pub async fn enrich(&self, item: &ItemReference) -> Option<EnrichedItem> {
        let Some(kind) = item.media_kind() else {
            warn!(id = %item.id, kind = %item.kind, "Unsupported media type; dropping item");
            return None;
        };

        let details = match kind {
            MediaKind::Movie => self.metadata.movie_details(&item.id).await,
            MediaKind::Tv => self.metadata.tv_details(&item.id).await,
        };

        let details = match details {
            Ok(d) => d,
            Err(e) => {
                warn!(id = %item.id, kind = %item.kind, "Failed to fetch details: {:#}", e);
                return None;
            }
        };

        let critic_score = match kind {
            MediaKind::Movie => self.critic.critic_score(details.imdb_id.as_deref()).await,
            MediaKind::Tv => None,
        };

        let enriched = build_item(kind, details, item.blurb.as_deref(), critic_score);
        if enriched.is_none() {
            warn!(id = %item.id, kind = %item.kind, "Provider returned no title; dropping item");
        }
        enriched
    }

    /// Enrich an optional featured slot.
    pub async fn enrich_slot(&self, item: Option<&ItemReference>) -> Option<EnrichedItem> {
        match item {
            Some(item) => self.enrich(item).await,
            None => None,
        }
    }

    /// Enrich a list concurrently, keeping input order and dropping failures.
    pub async fn enrich_all(&self, items: &[ItemReference]) -> Vec<EnrichedItem> {
        let enriched: Vec<EnrichedItem> = join_all(items.iter().map(|item| self.enrich(item)))
            .await
            .into_iter()
            .flatten()
            .collect();

        if enriched.len() < items.len() {
            debug!(
                requested = items.len(),
                enriched = enriched.len(),
                "Dropped items that failed enrichment"
            );
        }
        enriched
    }
}

/// Round a vote average to one decimal place.
pub fn round_rating(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Normalize provider details into an [`EnrichedItem`].
///
/// Returns `None` when the details carry no usable title.
pub fn build_item(
    kind: MediaKind,
    details: MediaDetails,
    blurb: Option<&str>,
    critic_score: Option<String>,
) -> Option<EnrichedItem> {
    if details.title.trim().is_empty() {
        return None;
    }

    Some(EnrichedItem {
        kind,
        year: year_of(&details.release_date),
        title: details.title,
        rating: round_rating(details.vote_average),
        votes: details.vote_count,
        genres: details.genres.join(", "),
        poster_url: details.poster_url.unwrap_or_default(),
        overview: details.overview,
        blurb: blurb
            .map(str::trim)
            .filter(|b| !b.is_empty())
            .map(str::to_string),
        critic_score: critic_score.filter(|s| !s.is_empty()),
    })
}
