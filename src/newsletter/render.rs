//! HTML rendering of newsletter documents.
//!
//! Documents are mapped onto flat view models (all display strings
//! preformatted) and rendered through askama templates under `templates/`.
//! Rendering is pure: the same document and owner name always produce the
//! same bytes.

use askama::Template;

use crate::config::NewsletterConfig;

use super::types::{ClassicDocument, EnrichedItem, MagazineDocument, NewsletterDocument};

/// Quoted in place of a missing blurb on classic cards.
pub const BLURB_PLACEHOLDER: &str = "No blurb provided.";
pub const NEW_SECTION_HEADING: &str = "NEW THIS WEEK";
pub const LIBRARY_SECTION_HEADING: &str = "PLEX PICKS — THIS WEEK'S FEATURE";

// ---------------------------------------------------------------------------
// View models
// ---------------------------------------------------------------------------

/// One item with every field ready for interpolation.
#[derive(Debug, Clone)]
pub struct ItemView {
    pub title: String,
    pub year: String,
    pub type_label: &'static str,
    pub rating: String,
    pub votes: String,
    pub genres: String,
    pub poster_url: String,
    pub has_poster: bool,
    pub overview: String,
    pub blurb: String,
    pub has_blurb: bool,
    pub critic_score: String,
    pub has_critic_score: bool,
    /// Compact row (magazine side column) rather than a full card.
    pub compact: bool,
}

impl From<&EnrichedItem> for ItemView {
    fn from(item: &EnrichedItem) -> Self {
        let blurb = item.blurb.clone().unwrap_or_default();
        let critic_score = item.critic_score.clone().unwrap_or_default();
        Self {
            title: item.title.clone(),
            year: item.year.clone(),
            type_label: item.kind.label(),
            rating: format!("{:.1}", item.rating),
            votes: group_thousands(item.votes),
            genres: item.genres.clone(),
            has_poster: !item.poster_url.is_empty(),
            poster_url: item.poster_url.clone(),
            overview: item.overview.clone(),
            has_blurb: !blurb.is_empty(),
            blurb,
            has_critic_score: !critic_score.is_empty(),
            critic_score,
            compact: false,
        }
    }
}

fn views(items: &[EnrichedItem]) -> Vec<ItemView> {
    items.iter().map(ItemView::from).collect()
}

fn rows(items: &[EnrichedItem]) -> Vec<ItemView> {
    items
        .iter()
        .map(|item| ItemView {
            compact: true,
            ..ItemView::from(item)
        })
        .collect()
}

/// One magazine section: featured item on the left, the rest on the right.
#[derive(Debug, Clone)]
pub struct SectionView {
    pub heading: &'static str,
    pub featured: Option<ItemView>,
    pub editor_note: String,
    pub has_editor_note: bool,
    pub items: Vec<ItemView>,
}

impl SectionView {
    fn new(
        heading: &'static str,
        featured: Option<&EnrichedItem>,
        longform: &str,
        items: &[EnrichedItem],
    ) -> Self {
        Self {
            heading,
            featured: featured.map(ItemView::from),
            editor_note: normalize_newlines(longform.trim()),
            has_editor_note: !longform.trim().is_empty(),
            items: rows(items),
        }
    }
}

// ---------------------------------------------------------------------------
// Templates
// ---------------------------------------------------------------------------

#[derive(Template)]
#[template(path = "classic.html")]
struct ClassicTemplate<'a> {
    owner_name: &'a str,
    intro_text: String,
    new_items: Vec<ItemView>,
    featured_intro_text: String,
    featured_items: Vec<ItemView>,
}

#[derive(Template)]
#[template(path = "magazine.html")]
struct MagazineTemplate<'a> {
    owner_name: &'a str,
    masthead: &'a str,
    intro_text: String,
    sections: Vec<SectionView>,
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Render a document to raw (not yet inlined) HTML.
///
/// Free text is escaped by the templates and its line breaks become `<br/>`.
pub fn render(document: &NewsletterDocument, config: &NewsletterConfig) -> askama::Result<String> {
    match document {
        NewsletterDocument::Classic(doc) => render_classic(doc, config),
        NewsletterDocument::Magazine(doc) => render_magazine(doc, config),
    }
}

fn render_classic(doc: &ClassicDocument, config: &NewsletterConfig) -> askama::Result<String> {
    ClassicTemplate {
        owner_name: &config.owner_name,
        intro_text: normalize_newlines(&doc.intro_text),
        new_items: views(&doc.new_items),
        featured_intro_text: normalize_newlines(&doc.featured_intro_text),
        featured_items: views(&doc.featured_items),
    }
    .render()
}

fn render_magazine(doc: &MagazineDocument, config: &NewsletterConfig) -> askama::Result<String> {
    let sections = vec![
        SectionView::new(
            NEW_SECTION_HEADING,
            doc.featured_new_item.as_ref(),
            &doc.new_items_longform,
            &doc.new_items,
        ),
        SectionView::new(
            LIBRARY_SECTION_HEADING,
            doc.featured_library_item.as_ref(),
            &doc.library_picks_longform,
            &doc.featured_items,
        ),
    ];

    MagazineTemplate {
        owner_name: &config.owner_name,
        masthead: &config.masthead,
        intro_text: normalize_newlines(&doc.intro_text),
        sections,
    }
    .render()
}

/// Fold `\r\n` and lone `\r` into `\n` so every line break renders.
pub fn normalize_newlines(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

/// Format a count with comma thousands separators (`12345` -> `"12,345"`).
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
