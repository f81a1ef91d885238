//! DOM-based Strategies
//!
//! Fallbacks that read the document body when meta tags are insufficient:
//! the `<title>` element, a preview paragraph, and the word count of the main
//! content region.

use dom_query::{Document, Selection};

use crate::dom;

/// Containers searched for a preview paragraph, most specific first.
pub const PREVIEW_SELECTORS: &[&str] = &[
    "article p",
    "main p",
    ".post-content p",
    ".entry-content p",
    ".content p",
    "p",
];

/// Content regions measured for word count, most specific first.
pub const CONTENT_REGION_SELECTORS: &[&str] = &[
    "article",
    "main",
    ".post-content",
    ".entry-content",
    ".content",
    "body",
];

/// Bounds (in characters) for a paragraph to serve as a preview.
pub const PREVIEW_MIN_CHARS: usize = 50;
pub const PREVIEW_MAX_CHARS: usize = 500;

/// A region must hold more than this many characters of collapsed text
/// before its words are counted.
pub const REGION_MIN_CHARS: usize = 100;

/// Trimmed text of the first `<title>` element.
#[must_use]
pub fn title_element(doc: &Document) -> Option<String> {
    let title = doc.select("title");
    if title.is_empty() {
        return None;
    }

    let text = dom::text_content(&title.first()).trim().to_string();
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Whether a paragraph's trimmed text reads like a preview.
///
/// Rejects text outside the length bounds and text that is entirely
/// uppercase (banners, bylines, shouty headings).
#[must_use]
pub fn is_preview_candidate(text: &str) -> bool {
    let len = text.chars().count();
    (PREVIEW_MIN_CHARS..=PREVIEW_MAX_CHARS).contains(&len) && text != text.to_uppercase()
}

/// First qualifying paragraph across [`PREVIEW_SELECTORS`].
#[must_use]
pub fn paragraph_preview(doc: &Document) -> Option<String> {
    PREVIEW_SELECTORS.iter().find_map(|selector| {
        doc.select(selector).nodes().iter().find_map(|node| {
            let paragraph = Selection::from(*node);
            let text = dom::text_content(&paragraph);
            let text = text.trim();
            is_preview_candidate(text).then(|| text.to_string())
        })
    })
}

/// Word count of the first region in [`CONTENT_REGION_SELECTORS`] with
/// enough text.
///
/// All elements matching a selector are measured together, so a page with
/// several `<article>` elements counts them as one region.
#[must_use]
pub fn region_word_count(doc: &Document) -> Option<u32> {
    CONTENT_REGION_SELECTORS.iter().find_map(|selector| {
        let region = doc.select(selector);
        if region.is_empty() {
            return None;
        }

        let text = dom::collapse_whitespace(&dom::text_content(&region));
        if text.chars().count() <= REGION_MIN_CHARS {
            return None;
        }

        u32::try_from(text.split_whitespace().count()).ok()
    })
}
