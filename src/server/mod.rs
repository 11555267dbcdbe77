use crate::config::Config;
use crate::mail::{Mailer, SmtpMailer};
use crate::metadata::providers::{OmdbProvider, TmdbProvider};
use crate::metadata::{CriticScoreProvider, MetadataProvider, NoCriticScores};
use crate::newsletter::NewsletterService;
use anyhow::{Context, Result};
use axum::{
    http::{header, Method},
    Router,
};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::signal;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeFile,
    trace::TraceLayer,
};

pub mod error;
pub mod routes_api;

/// Shared application context
#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<Config>,
    /// Catalog used by `/search` and enrichment
    pub metadata: Arc<dyn MetadataProvider>,
    pub newsletter: NewsletterService,
    /// `None` when mail credentials are not configured
    pub mailer: Option<Arc<dyn Mailer>>,
}

impl AppContext {
    /// Wire the production providers and mailer from configuration.
    pub fn from_config(config: Config) -> Self {
        let metadata: Arc<dyn MetadataProvider> = Arc::new(TmdbProvider::new(&config.tmdb));

        let critic: Arc<dyn CriticScoreProvider> = match config.omdb.api_key.as_deref() {
            Some(key) if !key.trim().is_empty() => Arc::new(OmdbProvider::new(&config.omdb)),
            _ => {
                tracing::info!("OMDb API key not set, critic scores disabled");
                Arc::new(NoCriticScores)
            }
        };

        let mailer: Option<Arc<dyn Mailer>> = match SmtpMailer::from_config(&config.mail) {
            Ok(mailer) => Some(Arc::new(mailer)),
            Err(e) => {
                tracing::warn!("Email delivery disabled: {}", e);
                None
            }
        };

        Self::new(config, metadata, critic, mailer)
    }

    /// Assemble a context from explicit collaborators.
    pub fn new(
        config: Config,
        metadata: Arc<dyn MetadataProvider>,
        critic: Arc<dyn CriticScoreProvider>,
        mailer: Option<Arc<dyn Mailer>>,
    ) -> Self {
        let newsletter = NewsletterService::new(metadata.clone(), critic, &config.newsletter);
        Self {
            config: Arc::new(config),
            metadata,
            newsletter,
            mailer,
        }
    }
}

/// Create the Axum router with all routes
pub fn create_router(ctx: AppContext, static_dir: Option<PathBuf>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    let mut app = routes_api::api_routes()
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(ctx);

    // Composition pages
    if let Some(dir) = static_dir {
        if dir.exists() {
            tracing::info!("Serving static pages from {:?}", dir);
            app = app
                .route_service("/", ServeFile::new(dir.join("index.html")))
                .route_service("/alt", ServeFile::new(dir.join("alt.html")));
        }
    }

    app
}

/// Start the HTTP server
pub async fn start_server(config: Config) -> Result<()> {
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("Invalid server address")?;

    let static_dir = config.server.static_dir.clone();
    let ctx = AppContext::from_config(config);
    let app = create_router(ctx, static_dir);

    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => {}
            Err(e) => {
                tracing::error!("Failed to install Ctrl+C handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
