//! Shared test harness for integration tests.
//!
//! Provides in-memory fakes for the catalog, critic and mail collaborators
//! and a [`TestHarness`] that wires them into a full [`AppContext`]. The
//! [`TestHarness::with_server`] constructor starts Axum on a random port for
//! HTTP-level testing.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use plexletter::config::Config;
use plexletter::mail::{MailError, Mailer, OutgoingEmail};
use plexletter::metadata::{
    CriticScoreProvider, MediaDetails, MediaKind, MetadataProvider, SearchCandidate,
};
use plexletter::server::{create_router, AppContext};

// ---------------------------------------------------------------------------
// Catalog fake
// ---------------------------------------------------------------------------

/// Catalog backed by hash maps. Unknown ids fail like an upstream 404.
#[derive(Default)]
pub struct FakeCatalog {
    pub details: HashMap<(MediaKind, String), MediaDetails>,
    pub movie_results: Vec<SearchCandidate>,
    pub tv_results: Vec<SearchCandidate>,
    pub fail_search: bool,
    /// Reported as lacking credentials
    pub unavailable: bool,
    pub lookups: Mutex<Vec<(MediaKind, String)>>,
}

impl FakeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_movie(mut self, id: &str, details: MediaDetails) -> Self {
        self.details.insert((MediaKind::Movie, id.to_string()), details);
        self
    }

    pub fn with_tv(mut self, id: &str, details: MediaDetails) -> Self {
        self.details.insert((MediaKind::Tv, id.to_string()), details);
        self
    }

    pub fn lookups(&self) -> Vec<(MediaKind, String)> {
        self.lookups.lock().unwrap().clone()
    }

    fn lookup(&self, kind: MediaKind, id: &str) -> anyhow::Result<MediaDetails> {
        self.lookups.lock().unwrap().push((kind, id.to_string()));
        self.details
            .get(&(kind, id.to_string()))
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("404 Not Found for {id}"))
    }
}

#[async_trait]
impl MetadataProvider for FakeCatalog {
    fn name(&self) -> &'static str {
        "fake"
    }

    fn is_available(&self) -> bool {
        !self.unavailable
    }

    async fn search_movie(&self, _query: &str) -> anyhow::Result<Vec<SearchCandidate>> {
        if self.fail_search {
            anyhow::bail!("connection refused");
        }
        Ok(self.movie_results.clone())
    }

    async fn search_tv(&self, _query: &str) -> anyhow::Result<Vec<SearchCandidate>> {
        if self.fail_search {
            anyhow::bail!("connection refused");
        }
        Ok(self.tv_results.clone())
    }

    async fn movie_details(&self, id: &str) -> anyhow::Result<MediaDetails> {
        self.lookup(MediaKind::Movie, id)
    }

    async fn tv_details(&self, id: &str) -> anyhow::Result<MediaDetails> {
        self.lookup(MediaKind::Tv, id)
    }
}

/// Details for a titled item with sensible defaults.
pub fn details(title: &str, date: &str) -> MediaDetails {
    MediaDetails {
        title: title.to_string(),
        release_date: date.to_string(),
        vote_average: 7.25,
        vote_count: 1234,
        genres: vec!["Drama".to_string(), "Comedy".to_string()],
        poster_url: Some(format!(
            "https://image.tmdb.org/t/p/w500/{}.jpg",
            title.to_lowercase().replace(' ', "_")
        )),
        overview: format!("{title} overview."),
        imdb_id: Some(format!("tt{}", title.len())),
    }
}

pub fn candidate(id: u64, title: &str, date: Option<&str>, popularity: f64) -> SearchCandidate {
    SearchCandidate {
        id,
        title: title.to_string(),
        date: date.map(str::to_string),
        poster_url: Some(format!("https://image.tmdb.org/t/p/w200/{id}.jpg")),
        popularity,
    }
}

// ---------------------------------------------------------------------------
// Critic fake
// ---------------------------------------------------------------------------

/// Critic provider returning a fixed score for known IMDb ids.
#[derive(Default)]
pub struct FakeCritic {
    pub scores: HashMap<String, String>,
    pub calls: Mutex<Vec<Option<String>>>,
}

impl FakeCritic {
    pub fn with_score(mut self, imdb_id: &str, score: &str) -> Self {
        self.scores.insert(imdb_id.to_string(), score.to_string());
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl CriticScoreProvider for FakeCritic {
    async fn critic_score(&self, imdb_id: Option<&str>) -> Option<String> {
        self.calls.lock().unwrap().push(imdb_id.map(str::to_string));
        imdb_id.and_then(|id| self.scores.get(id).cloned())
    }
}

// ---------------------------------------------------------------------------
// Mailer fake
// ---------------------------------------------------------------------------

/// Mailer that records every message instead of sending it.
#[derive(Default)]
pub struct RecordingMailer {
    pub sent: Mutex<Vec<OutgoingEmail>>,
    pub fail_with: Option<String>,
}

impl RecordingMailer {
    pub fn failing(message: &str) -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail_with: Some(message.to_string()),
        }
    }

    pub fn sent(&self) -> Vec<OutgoingEmail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), MailError> {
        if let Some(message) = &self.fail_with {
            return Err(MailError::Smtp(message.clone()));
        }
        self.sent.lock().unwrap().push(email.clone());
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Harness
// ---------------------------------------------------------------------------

/// Test harness wrapping a fully-constructed [`AppContext`] backed by fakes.
pub struct TestHarness {
    pub ctx: AppContext,
    pub catalog: Arc<FakeCatalog>,
    pub critic: Arc<FakeCritic>,
    pub mailer: Option<Arc<RecordingMailer>>,
}

impl TestHarness {
    /// Harness with a default catalog and a recording mailer.
    pub fn new() -> Self {
        Self::build(FakeCatalog::new(), FakeCritic::default(), Some(RecordingMailer::default()))
    }

    pub fn build(
        catalog: FakeCatalog,
        critic: FakeCritic,
        mailer: Option<RecordingMailer>,
    ) -> Self {
        let catalog = Arc::new(catalog);
        let critic = Arc::new(critic);
        let mailer = mailer.map(Arc::new);

        let ctx = AppContext::new(
            Config::default(),
            catalog.clone(),
            critic.clone(),
            mailer.clone().map(|m| m as Arc<dyn Mailer>),
        );

        Self {
            ctx,
            catalog,
            critic,
            mailer,
        }
    }

    pub fn router(&self) -> axum::Router {
        create_router(self.ctx.clone(), None)
    }

    pub fn sent(&self) -> Vec<OutgoingEmail> {
        self.mailer.as_ref().map(|m| m.sent()).unwrap_or_default()
    }

    /// Start an Axum server on a random port and return the bound address.
    pub async fn serve(&self) -> SocketAddr {
        let app = self.router();

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind random port");
        let addr = listener.local_addr().expect("failed to get local addr");

        tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        addr
    }
}

/// Unique set of lookups, for assertions that ignore call order.
pub fn lookup_set(catalog: &FakeCatalog) -> HashSet<(MediaKind, String)> {
    catalog.lookups().into_iter().collect()
}
