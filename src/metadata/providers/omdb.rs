//! OMDb critic-score provider.
//!
//! Looks up a title by IMDb id and extracts the Rotten Tomatoes entry from
//! the `Ratings` array. Every failure is logged and reported as `None`.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::OmdbConfig;
use crate::metadata::provider::CriticScoreProvider;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);
/// Rating source whose value is surfaced as the critic score.
pub const CRITIC_SOURCE: &str = "Rotten Tomatoes";

#[derive(Debug, Deserialize)]
struct OmdbResponse {
    #[serde(rename = "Response")]
    response: Option<String>,
    #[serde(rename = "Ratings", default)]
    ratings: Vec<OmdbRating>,
}

#[derive(Debug, Deserialize)]
struct OmdbRating {
    #[serde(rename = "Source")]
    source: String,
    #[serde(rename = "Value")]
    value: String,
}

pub struct OmdbProvider {
    client: reqwest::Client,
    api_key: Option<String>,
    base_url: String,
}

impl OmdbProvider {
    pub fn new(config: &OmdbConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|e| {
                warn!("Failed to build HTTP client: {}", e);
                reqwest::Client::new()
            });

        Self {
            client,
            api_key: config.api_key.clone().filter(|k| !k.is_empty()),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn fetch(&self, imdb_id: &str, api_key: &str) -> anyhow::Result<OmdbResponse> {
        let url = format!("{}/", self.base_url);
        let resp = self
            .client
            .get(&url)
            .query(&[("i", imdb_id), ("apikey", api_key)])
            .send()
            .await?
            .error_for_status()?;
        Ok(resp.json().await?)
    }
}

fn critic_rating(body: OmdbResponse) -> Option<String> {
    if body.response.as_deref() != Some("True") {
        return None;
    }
    body.ratings
        .into_iter()
        .find(|r| r.source == CRITIC_SOURCE)
        .map(|r| r.value)
}

#[async_trait]
impl CriticScoreProvider for OmdbProvider {
    async fn critic_score(&self, imdb_id: Option<&str>) -> Option<String> {
        let (Some(imdb_id), Some(api_key)) = (imdb_id, self.api_key.as_deref()) else {
            debug!("Critic score skipped: missing IMDb id or OMDb API key");
            return None;
        };

        debug!(imdb_id, "Fetching critic score");
        match self.fetch(imdb_id, api_key).await {
            Ok(body) => {
                let score = critic_rating(body);
                if score.is_none() {
                    debug!(imdb_id, "No {} rating in OMDb response", CRITIC_SOURCE);
                }
                score
            }
            Err(e) => {
                warn!(imdb_id, "OMDb request failed: {:#}", e);
                None
            }
        }
    }
}
