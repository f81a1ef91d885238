//! URL Utility Functions
//!
//! Validation, redirect resolution and host labels for catalog URLs.

use url::Url;

/// Check if a string is a valid absolute http(s) URL.
///
/// # Returns
/// * `(is_absolute, parsed_url)` - Whether URL is absolute and the parsed URL if valid
#[must_use]
pub fn is_absolute_url(s: &str) -> (bool, Option<Url>) {
    let s = s.trim();

    if !s.starts_with("http://") && !s.starts_with("https://") {
        return (false, None);
    }

    match Url::parse(s) {
        Ok(url) if url.host().is_some() => (true, Some(url)),
        _ => (false, None),
    }
}

/// Parse a URL string into a Url object.
///
/// # Returns
/// * `Some(Url)` if valid absolute URL, `None` otherwise
#[must_use]
pub fn parse_url(url_str: &str) -> Option<Url> {
    let (is_abs, parsed) = is_absolute_url(url_str);
    if is_abs {
        parsed
    } else {
        None
    }
}

/// Resolve a `Location` header value against the URL that returned it.
///
/// Absolute locations replace the base; relative ones (`/path`, `next`,
/// `//host/path`) are joined per RFC 3986.
#[must_use]
pub fn resolve_location(location: &str, base: &Url) -> Option<Url> {
    base.join(location.trim()).ok()
}

/// Host name with a leading `www.` removed.
///
/// # Examples
/// ```
/// use yir_harvest::url_utils::host_label;
///
/// assert_eq!(host_label("https://www.example.com/2024/"), Some("example.com".to_string()));
/// assert_eq!(host_label("not a url"), None);
/// ```
#[must_use]
pub fn host_label(url_str: &str) -> Option<String> {
    let url = Url::parse(url_str.trim()).ok()?;
    let host = url.host_str()?;
    let host = host.strip_prefix("www.").unwrap_or(host);

    if host.is_empty() {
        None
    } else {
        Some(host.to_string())
    }
}
