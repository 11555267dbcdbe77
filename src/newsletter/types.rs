//! Request payloads and document types for newsletter generation.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::metadata::{is_numeric_id, MediaKind};

// ---------------------------------------------------------------------------
// Request payload
// ---------------------------------------------------------------------------

/// A caller-curated pointer to a catalog item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemReference {
    /// Provider id; accepted as a JSON number or a string of digits.
    #[serde(deserialize_with = "id_from_number_or_string")]
    pub id: String,

    /// Wire tag (`"movie"` or `"tv"`); anything else is never enriched.
    #[serde(rename = "type", default = "default_kind")]
    pub kind: String,

    #[serde(default)]
    pub blurb: Option<String>,
}

fn default_kind() -> String {
    "movie".to_string()
}

fn id_from_number_or_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Number(u64),
        Text(String),
    }

    match Id::deserialize(deserializer)? {
        Id::Number(n) => Ok(n.to_string()),
        Id::Text(s) if is_numeric_id(s.trim()) => Ok(s.trim().to_string()),
        Id::Text(s) => Err(serde::de::Error::custom(format!(
            "item id must be numeric, got {s:?}"
        ))),
    }
}

impl ItemReference {
    pub fn new(id: impl Into<String>, kind: MediaKind) -> Self {
        let kind = match kind {
            MediaKind::Movie => "movie",
            MediaKind::Tv => "tv",
        };
        Self {
            id: id.into(),
            kind: kind.to_string(),
            blurb: None,
        }
    }

    pub fn with_blurb(mut self, blurb: impl Into<String>) -> Self {
        self.blurb = Some(blurb.into());
        self
    }

    /// The parsed media kind, or `None` for unsupported tags.
    pub fn media_kind(&self) -> Option<MediaKind> {
        MediaKind::from_tag(&self.kind)
    }
}

/// Body of `POST /generate`.
///
/// Every field is optional; the magazine-only fields decide the layout.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    #[serde(default)]
    pub intro_text: Option<String>,
    #[serde(default)]
    pub new_items: Option<Vec<ItemReference>>,
    #[serde(default)]
    pub featured_intro_text: Option<String>,
    #[serde(default)]
    pub featured_items: Option<Vec<ItemReference>>,
    #[serde(default)]
    pub featured_new_item: Option<ItemReference>,
    #[serde(default)]
    pub new_items_longform: Option<String>,
    #[serde(default)]
    pub featured_library_item: Option<ItemReference>,
    #[serde(default)]
    pub library_picks_longform: Option<String>,
}

/// Newsletter layout variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    Classic,
    Magazine,
}

fn has_text(text: &Option<String>) -> bool {
    text.as_deref().is_some_and(|t| !t.trim().is_empty())
}

impl GenerateRequest {
    /// Magazine iff a featured item is set or either longform text is non-empty.
    pub fn layout(&self) -> Layout {
        if self.featured_new_item.is_some()
            || self.featured_library_item.is_some()
            || has_text(&self.new_items_longform)
            || has_text(&self.library_picks_longform)
        {
            Layout::Magazine
        } else {
            Layout::Classic
        }
    }
}

// ---------------------------------------------------------------------------
// Enriched items
// ---------------------------------------------------------------------------

/// A fully populated newsletter entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedItem {
    #[serde(rename = "type", serialize_with = "kind_label")]
    pub kind: MediaKind,
    pub title: String,
    pub year: String,
    /// Vote average rounded to one decimal.
    pub rating: f64,
    pub votes: u64,
    /// Genre names joined with `", "`.
    pub genres: String,
    /// Empty when the provider has no poster.
    pub poster_url: String,
    pub overview: String,
    pub blurb: Option<String>,
    pub critic_score: Option<String>,
}

fn kind_label<S: Serializer>(kind: &MediaKind, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(kind.label())
}

// ---------------------------------------------------------------------------
// Documents
// ---------------------------------------------------------------------------

/// Simple stacked-list newsletter.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassicDocument {
    pub intro_text: String,
    pub new_items: Vec<EnrichedItem>,
    pub featured_intro_text: String,
    pub featured_items: Vec<EnrichedItem>,
}

/// Two-column, featured-item-forward newsletter.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MagazineDocument {
    pub intro_text: String,
    pub featured_new_item: Option<EnrichedItem>,
    /// Additional new items, excluding the featured slot.
    pub new_items: Vec<EnrichedItem>,
    pub new_items_longform: String,
    pub featured_library_item: Option<EnrichedItem>,
    pub featured_items: Vec<EnrichedItem>,
    pub library_picks_longform: String,
}

/// Structured newsletter ready for rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "layout", rename_all = "lowercase")]
pub enum NewsletterDocument {
    Classic(ClassicDocument),
    Magazine(MagazineDocument),
}

impl NewsletterDocument {
    pub fn layout(&self) -> Layout {
        match self {
            NewsletterDocument::Classic(_) => Layout::Classic,
            NewsletterDocument::Magazine(_) => Layout::Magazine,
        }
    }
}
