//! Document assembler: request payload to [`NewsletterDocument`].

use tracing::info;

use super::enrichment::Enricher;
use super::types::{
    ClassicDocument, GenerateRequest, ItemReference, Layout, MagazineDocument,
    NewsletterDocument,
};

/// Builds newsletter documents from generate requests.
#[derive(Clone)]
pub struct Assembler {
    enricher: Enricher,
    default_featured_intro: String,
}

impl Assembler {
    pub fn new(enricher: Enricher, default_featured_intro: impl Into<String>) -> Self {
        Self {
            enricher,
            default_featured_intro: default_featured_intro.into(),
        }
    }

    /// Enrich every referenced item and build the document for the
    /// request's layout.
    pub async fn assemble(&self, request: GenerateRequest) -> NewsletterDocument {
        let layout = request.layout();
        info!(?layout, "Assembling newsletter");

        match layout {
            Layout::Classic => NewsletterDocument::Classic(self.classic(request).await),
            Layout::Magazine => NewsletterDocument::Magazine(self.magazine(request).await),
        }
    }

    async fn classic(&self, request: GenerateRequest) -> ClassicDocument {
        let new_refs = request.new_items.unwrap_or_default();
        let featured_refs = request.featured_items.unwrap_or_default();

        let (new_items, featured_items) = tokio::join!(
            self.enricher.enrich_all(&new_refs),
            self.enricher.enrich_all(&featured_refs),
        );

        let featured_intro_text = request
            .featured_intro_text
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| self.default_featured_intro.clone());

        ClassicDocument {
            intro_text: request.intro_text.unwrap_or_default(),
            new_items,
            featured_intro_text,
            featured_items,
        }
    }

    async fn magazine(&self, request: GenerateRequest) -> MagazineDocument {
        let new_refs = request.new_items.unwrap_or_default();
        let additional_new = additional_new_items(&new_refs, request.featured_new_item.is_some());
        let featured_refs = request.featured_items.unwrap_or_default();

        let (featured_new_item, new_items, featured_library_item, featured_items) = tokio::join!(
            self.enricher.enrich_slot(request.featured_new_item.as_ref()),
            self.enricher.enrich_all(additional_new),
            self.enricher.enrich_slot(request.featured_library_item.as_ref()),
            self.enricher.enrich_all(&featured_refs),
        );

        MagazineDocument {
            intro_text: request.intro_text.unwrap_or_default(),
            featured_new_item,
            new_items,
            new_items_longform: request.new_items_longform.unwrap_or_default(),
            featured_library_item,
            featured_items,
            library_picks_longform: request.library_picks_longform.unwrap_or_default(),
        }
    }
}

/// New items shown beside the featured new item.
///
/// Callers put the featured item first in `newItems`, so with a featured
/// item present the first reference is skipped. Nothing checks that it is
/// actually the same item.
pub fn additional_new_items(new_items: &[ItemReference], has_featured: bool) -> &[ItemReference] {
    if has_featured && !new_items.is_empty() {
        &new_items[1..]
    } else {
        new_items
    }
}
