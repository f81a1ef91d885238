//! HTML Meta Tag Strategies
//!
//! Title, author and description candidates read from Open Graph, Twitter
//! card and plain `<meta>` tags.

use dom_query::Document;

use crate::dom;

const OG_TITLE: &str = r#"meta[property="og:title"]"#;
const TWITTER_TITLE: &str = r#"meta[name="twitter:title"]"#;
const META_TITLE: &str = r#"meta[name="title"]"#;

const OG_DESCRIPTION: &str = r#"meta[property="og:description"]"#;
const META_DESCRIPTION: &str = r#"meta[name="description"]"#;
const TWITTER_DESCRIPTION: &str = r#"meta[name="twitter:description"]"#;

/// Byline tags, most specific first.
const AUTHOR_META: &[&str] = &[
    r#"meta[name="author"]"#,
    r#"meta[property="article:author"]"#,
    r#"meta[name="twitter:creator"]"#,
];

#[must_use]
pub fn og_title(doc: &Document) -> Option<String> {
    dom::meta_content(doc, OG_TITLE)
}

#[must_use]
pub fn twitter_title(doc: &Document) -> Option<String> {
    dom::meta_content(doc, TWITTER_TITLE)
}

#[must_use]
pub fn meta_title(doc: &Document) -> Option<String> {
    dom::meta_content(doc, META_TITLE)
}

/// Author from byline meta tags (`author`, `article:author`, `twitter:creator`).
#[must_use]
pub fn meta_author(doc: &Document) -> Option<String> {
    dom::pick_meta(doc, AUTHOR_META)
}

#[must_use]
pub fn og_description(doc: &Document) -> Option<String> {
    dom::meta_content(doc, OG_DESCRIPTION)
}

#[must_use]
pub fn meta_description(doc: &Document) -> Option<String> {
    dom::meta_content(doc, META_DESCRIPTION)
}

#[must_use]
pub fn twitter_description(doc: &Document) -> Option<String> {
    dom::meta_content(doc, TWITTER_DESCRIPTION)
}
