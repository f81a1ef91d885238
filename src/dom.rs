//! DOM Operations Adapter
//!
//! Thin helpers over the `dom_query` crate used by the metadata strategies.

use dom_query::{Document, Selection};
use tendril::StrTendril;

/// Get any attribute value
#[inline]
#[must_use]
pub fn get_attribute(sel: &Selection, name: &str) -> Option<String> {
    sel.attr(name).map(|s| s.to_string())
}

/// Get all text content of the matched nodes and their descendants
///
/// Returns `StrTendril` for zero-copy passing. Use `.to_string()` only when
/// you need owned storage.
#[inline]
#[must_use]
pub fn text_content(sel: &Selection) -> StrTendril {
    sel.text()
}

/// Trimmed `content` attribute of the first element matching `selector`.
///
/// Empty or whitespace-only values count as absent.
#[must_use]
pub fn meta_content(doc: &Document, selector: &str) -> Option<String> {
    let sel = doc.select(selector);
    if sel.is_empty() {
        return None;
    }

    get_attribute(&sel.first(), "content")
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// First non-empty `content` attribute across `selectors`, tried in order.
#[must_use]
pub fn pick_meta(doc: &Document, selectors: &[&str]) -> Option<String> {
    selectors.iter().find_map(|s| meta_content(doc, s))
}

/// Collapse every whitespace run to a single space and trim the ends.
#[must_use]
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_attribute() {
        let doc = Document::from(r#"<div id="a" class="x y"></div>"#);
        let sel = doc.select("div");

        assert_eq!(get_attribute(&sel, "class"), Some("x y".to_string()));
        assert_eq!(get_attribute(&sel, "title"), None);
    }

    #[test]
    fn test_text_content_includes_descendants() {
        let doc = Document::from("<div>Hello <b>brave</b> world</div>");
        let text = text_content(&doc.select("div"));

        assert_eq!(&*text, "Hello brave world");
    }

    #[test]
    fn test_meta_content_skips_blank_values() {
        let doc = Document::from(
            r#"<head>
                <meta name="author" content="   ">
                <meta property="og:title" content="  Spaced  ">
            </head>"#,
        );

        assert_eq!(meta_content(&doc, r#"meta[name="author"]"#), None);
        assert_eq!(
            meta_content(&doc, r#"meta[property="og:title"]"#),
            Some("Spaced".to_string())
        );
        assert_eq!(meta_content(&doc, r#"meta[name="missing"]"#), None);
    }

    #[test]
    fn test_pick_meta_order() {
        let doc = Document::from(
            r#"<head>
                <meta name="twitter:title" content="Twitter">
                <meta property="og:title" content="OG">
            </head>"#,
        );

        let picked = pick_meta(
            &doc,
            &[r#"meta[property="og:title"]"#, r#"meta[name="twitter:title"]"#],
        );
        assert_eq!(picked, Some("OG".to_string()));
    }

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("  a \n\t b   c "), "a b c");
        assert_eq!(collapse_whitespace("   "), "");
    }
}
