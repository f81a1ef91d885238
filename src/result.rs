//! Record types produced by extraction and stored in the catalog.

use serde::{Deserialize, Serialize};

/// Metadata extracted from one fetched page.
///
/// Consumed immediately by the merge step; never persisted on its own.
/// `title` and `author` always carry a value because both fall back to the
/// URL. The optional fields are best-effort.
///
/// Serializes with the same camelCase keys as [`CatalogEntry`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionResult {
    /// The page URL as given in the URL list.
    pub url: String,

    /// Page title, or the URL when no title source matched.
    pub title: String,

    /// Author name, or the URL host when no author source matched.
    pub author: String,

    /// Year inferred from the URL, else the current year.
    pub year: i32,

    /// One short paragraph describing the page.
    pub preview: Option<String>,

    /// Whitespace-delimited token count of the main content region.
    pub word_count: Option<u32>,
}

/// A persisted catalog record.
///
/// Serialized with camelCase keys; absent optional fields are omitted so the
/// catalog stays compact and diffs stay small.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CatalogEntry {
    pub id: String,
    pub url: String,
    pub year: i32,
    pub author: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub word_count: Option<u32>,
}

impl CatalogEntry {
    /// Builds an entry from an extraction under an already allocated id.
    #[must_use]
    pub fn from_extraction(id: String, result: ExtractionResult) -> Self {
        Self {
            id,
            url: result.url,
            year: result.year,
            author: result.author,
            title: result.title,
            preview: result.preview,
            word_count: result.word_count,
        }
    }

    /// True if either fill-once field is still missing.
    #[must_use]
    pub fn needs_enrichment(&self) -> bool {
        self.preview.is_none() || self.word_count.is_none()
    }
}

/// Optional fields offered to an existing entry.
///
/// Only fields the entry lacks are ever applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnrichmentPatch {
    pub preview: Option<String>,
    pub word_count: Option<u32>,
}

impl EnrichmentPatch {
    /// Keeps only the fields `entry` is missing.
    #[must_use]
    pub fn for_entry(entry: &CatalogEntry, result: ExtractionResult) -> Self {
        Self {
            preview: result.preview.filter(|_| entry.preview.is_none()),
            word_count: result.word_count.filter(|_| entry.word_count.is_none()),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.preview.is_none() && self.word_count.is_none()
    }
}
