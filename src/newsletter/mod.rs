//! Newsletter pipeline: enrich, assemble, render, inline.
//!
//! - [`types`] -- Request payloads, enriched items and document variants.
//! - [`enrichment`] -- Item references to [`EnrichedItem`]s.
//! - [`assembler`] -- Layout selection and document construction.
//! - [`render`] -- askama templates for both layouts.
//! - [`inline`] -- Email-safe CSS inlining.

pub mod assembler;
pub mod enrichment;
pub mod inline;
pub mod render;
pub mod types;

use std::sync::Arc;

use tracing::info;

use crate::config::NewsletterConfig;
use crate::error::{Error, Result};
use crate::metadata::{CriticScoreProvider, MetadataProvider};

pub use assembler::Assembler;
pub use enrichment::Enricher;
pub use types::{
    ClassicDocument, EnrichedItem, GenerateRequest, ItemReference, Layout, MagazineDocument,
    NewsletterDocument,
};

/// End-to-end newsletter generation for one request at a time.
#[derive(Clone)]
pub struct NewsletterService {
    assembler: Assembler,
    config: NewsletterConfig,
}

impl NewsletterService {
    pub fn new(
        metadata: Arc<dyn MetadataProvider>,
        critic: Arc<dyn CriticScoreProvider>,
        config: &NewsletterConfig,
    ) -> Self {
        let enricher = Enricher::new(metadata, critic);
        Self {
            assembler: Assembler::new(enricher, config.featured_intro.clone()),
            config: config.clone(),
        }
    }

    /// Build the structured document without rendering it.
    pub async fn assemble(&self, request: GenerateRequest) -> NewsletterDocument {
        self.assembler.assemble(request).await
    }

    /// Render a document to raw HTML (before CSS inlining).
    pub fn render(&self, document: &NewsletterDocument) -> Result<String> {
        render::render(document, &self.config).map_err(|e| Error::Generate(e.to_string()))
    }

    /// Full pipeline: returns email-ready HTML.
    pub async fn generate(&self, request: GenerateRequest) -> Result<String> {
        let document = self.assemble(request).await;
        let html = self.render(&document)?;
        let inlined = inline::inline_css(&html)?;

        info!(
            layout = ?document.layout(),
            bytes = inlined.len(),
            "Newsletter generated"
        );
        Ok(inlined)
    }
}
