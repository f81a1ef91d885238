//! Metadata extraction module.
//!
//! Every field is resolved by an ordered chain of strategies. A strategy is a
//! plain function that either finds a value or returns `None`, and the first
//! value found wins. Extraction never fails; a field nobody could find is
//! simply absent (or falls back to something derived from the URL).

pub mod dom_extraction;
pub mod json_ld;
pub mod meta_tags;

use chrono::Datelike;
use dom_query::Document;
use regex::Regex;
use std::sync::LazyLock;

use crate::dom;
use crate::result::ExtractionResult;
use crate::url_utils;

/// A single extraction heuristic for one field.
pub type Strategy<T> = fn(&Document) -> Option<T>;

/// Host label used when the URL has no usable host.
pub const UNKNOWN_HOST: &str = "unknown";

/// Four-digit year token starting with 19 or 20
#[allow(clippy::expect_used)]
static YEAR_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(19|20)\d{2}").expect("valid regex")
});

const TITLE_CHAIN: &[Strategy<String>] = &[
    meta_tags::og_title,
    meta_tags::twitter_title,
    meta_tags::meta_title,
    dom_extraction::title_element,
];

const AUTHOR_CHAIN: &[Strategy<String>] = &[json_ld::json_ld_author, meta_tags::meta_author];

const PREVIEW_CHAIN: &[Strategy<String>] = &[
    meta_tags::og_description,
    meta_tags::meta_description,
    meta_tags::twitter_description,
    dom_extraction::paragraph_preview,
];

const WORD_COUNT_CHAIN: &[Strategy<u32>] = &[dom_extraction::region_word_count];

/// Run `chain` in order and return the first value any strategy produces.
#[must_use]
pub fn first_match<T>(doc: &Document, chain: &[Strategy<T>]) -> Option<T> {
    chain.iter().find_map(|strategy| strategy(doc))
}

/// Extract a catalog record from fetched page content.
///
/// `url` is only consulted for fallbacks: it becomes the title when no title
/// source matched, its host becomes the author when no byline matched, and
/// it is the sole source for the year.
///
/// # Example
///
/// ```rust
/// use yir_harvest::extract;
///
/// let html = r#"<html><head>
///     <meta property="og:title" content="2024 in Review">
///     <meta name="author" content="@janedoe">
/// </head><body></body></html>"#;
///
/// let result = extract(html, "https://jane.example/2024/review");
/// assert_eq!(result.title, "2024 in Review");
/// assert_eq!(result.author, "janedoe");
/// assert_eq!(result.year, 2024);
/// assert_eq!(result.preview, None);
/// ```
#[must_use]
pub fn extract(content: &str, url: &str) -> ExtractionResult {
    let doc = Document::from(content);
    extract_document(&doc, url)
}

/// [`extract`] for an already parsed document.
#[must_use]
pub fn extract_document(doc: &Document, url: &str) -> ExtractionResult {
    let title = first_match(doc, TITLE_CHAIN).unwrap_or_else(|| url.to_string());

    let author = first_match(doc, AUTHOR_CHAIN)
        .map(|a| clean_author(&a))
        .filter(|a| !a.is_empty())
        .unwrap_or_else(|| clean_author(&host_fallback(url)));

    let preview = first_match(doc, PREVIEW_CHAIN)
        .map(|p| dom::collapse_whitespace(&p))
        .filter(|p| !p.is_empty());

    ExtractionResult {
        url: url.to_string(),
        title,
        author,
        year: infer_year(url),
        preview,
        word_count: first_match(doc, WORD_COUNT_CHAIN),
    }
}

/// Year from the first `19xx`/`20xx` token in the URL, else the current year.
///
/// Common patterns: `/2025/`, `/2025/Dec/31/`, `?year=2025`.
#[must_use]
pub fn infer_year(url: &str) -> i32 {
    year_in_url(url).unwrap_or_else(|| chrono::Local::now().year())
}

/// The year token in `url`, if it has one.
#[must_use]
pub fn year_in_url(url: &str) -> Option<i32> {
    YEAR_PATTERN
        .find(url)
        .and_then(|m| m.as_str().parse().ok())
}

/// Strip surrounding whitespace and a leading `@` handle marker.
#[must_use]
pub fn clean_author(author: &str) -> String {
    let trimmed = author.trim();
    trimmed.strip_prefix('@').unwrap_or(trimmed).trim().to_string()
}

fn host_fallback(url: &str) -> String {
    url_utils::host_label(url).unwrap_or_else(|| UNKNOWN_HOST.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const URL: &str = "https://www.jane.example/posts/2023-review";

    #[test]
    fn test_title_priority() {
        let html = r#"<html><head>
            <title>Element Title</title>
            <meta name="title" content="Meta Title">
            <meta name="twitter:title" content="Twitter Title">
            <meta property="og:title" content="OG Title">
        </head></html>"#;

        assert_eq!(extract(html, URL).title, "OG Title");
    }

    #[test]
    fn test_title_falls_back_through_chain() {
        let html = r#"<html><head>
            <title>Element Title</title>
            <meta name="title" content="Meta Title">
        </head></html>"#;
        assert_eq!(extract(html, URL).title, "Meta Title");

        let html = "<html><head><title>Element Title</title></head></html>";
        assert_eq!(extract(html, URL).title, "Element Title");
    }

    #[test]
    fn test_title_falls_back_to_url() {
        let result = extract("<html><body><p>No titles.</p></body></html>", URL);
        assert_eq!(result.title, URL);
    }

    #[test]
    fn test_json_ld_author_beats_meta() {
        let html = r#"<html><head>
            <meta name="author" content="Meta Author">
            <script type="application/ld+json">{"author":{"name":"LD Author"}}</script>
        </head></html>"#;

        assert_eq!(extract(html, URL).author, "LD Author");
    }

    #[test]
    fn test_author_strips_handle_marker() {
        let html = r#"<meta name="twitter:creator" content=" @janedoe ">"#;
        assert_eq!(extract(html, URL).author, "janedoe");
    }

    #[test]
    fn test_author_falls_back_to_host() {
        assert_eq!(extract("<html></html>", URL).author, "jane.example");
        assert_eq!(extract("<html></html>", "not-a-url-2024").author, UNKNOWN_HOST);
    }

    #[test]
    fn test_bare_handle_falls_back_to_host() {
        let html = r#"<meta name="author" content="@">"#;
        assert_eq!(extract(html, URL).author, "jane.example");
    }

    #[test]
    fn test_year_from_url() {
        assert_eq!(infer_year("https://a.example/2025/12/31/review"), 2025);
        assert_eq!(infer_year("https://a.example/review?year=1999"), 1999);
        assert_eq!(year_in_url("https://a.example/posts/review"), None);
        assert_eq!(
            infer_year("https://a.example/posts/review"),
            chrono::Local::now().year()
        );
    }

    #[test]
    fn test_year_uses_first_token() {
        assert_eq!(year_in_url("https://a.example/2019/looking-back-at-2024"), Some(2019));
    }

    #[test]
    fn test_preview_meta_before_paragraphs() {
        let para = "A perfectly reasonable paragraph with well over fifty characters in it.";
        let html = format!(
            r#"<html><head><meta name="description" content="Meta description"></head>
            <body><article><p>{para}</p></article></body></html>"#
        );

        assert_eq!(
            extract(&html, URL).preview.as_deref(),
            Some("Meta description")
        );
    }

    #[test]
    fn test_preview_collapses_whitespace() {
        let html = r#"<meta property="og:description" content="Line one
            line   two">"#;
        assert_eq!(extract(html, URL).preview.as_deref(), Some("Line one line two"));
    }

    #[test]
    fn test_empty_page_leaves_optionals_absent() {
        let result = extract("", URL);

        assert_eq!(result.url, URL);
        assert_eq!(result.title, URL);
        assert_eq!(result.author, "jane.example");
        assert_eq!(result.year, 2023);
        assert_eq!(result.preview, None);
        assert_eq!(result.word_count, None);
    }

    #[test]
    fn test_first_match_order() {
        fn none(_: &Document) -> Option<u32> {
            None
        }
        fn one(_: &Document) -> Option<u32> {
            Some(1)
        }
        fn two(_: &Document) -> Option<u32> {
            Some(2)
        }

        let doc = Document::from("");
        let chain: &[Strategy<u32>] = &[none, two, one];
        assert_eq!(first_match(&doc, chain), Some(2));

        let chain: &[Strategy<u32>] = &[none];
        assert_eq!(first_match(&doc, chain), None);
        assert_eq!(first_match::<u32>(&doc, &[]), None);
    }
}
