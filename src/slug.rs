//! Entry identifiers.
//!
//! An id is `slug(author)-year`, made unique with a `-2`, `-3`, … suffix.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Longest slug kept before the year is appended.
pub const MAX_SLUG_LEN: usize = 60;

/// Lowercase, strip diacritics, and collapse everything outside `[a-z0-9]`
/// into single hyphens.
///
/// # Examples
/// ```
/// use yir_harvest::slug::slugify;
///
/// assert_eq!(slugify("Jane Doe"), "jane-doe");
/// assert_eq!(slugify("  Zoë O'Brien!! "), "zoe-o-brien");
/// ```
#[must_use]
pub fn slugify(text: &str) -> String {
    let folded: String = text
        .to_lowercase()
        .nfkd()
        .filter(|c| !is_combining_mark(*c))
        .collect();

    let mut slug = String::with_capacity(folded.len());
    let mut pending_hyphen = false;
    for c in folded.chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c);
        } else {
            pending_hyphen = true;
        }
    }

    // ASCII only from here, so byte truncation is safe
    slug.truncate(MAX_SLUG_LEN);
    slug
}

/// Base id for an author and year, before collision handling.
#[must_use]
pub fn make_id(author: &str, year: i32) -> String {
    format!("{}-{year}", slugify(author))
}

/// First of `base`, `base-2`, `base-3`, … for which `is_taken` is false.
pub fn unique_id(base: &str, mut is_taken: impl FnMut(&str) -> bool) -> String {
    if !is_taken(base) {
        return base.to_string();
    }

    (2u32..)
        .map(|n| format!("{base}-{n}"))
        .find(|candidate| !is_taken(candidate))
        .unwrap_or_else(|| base.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_slugify_basic() {
        assert_eq!(slugify("Jane Doe"), "jane-doe");
        assert_eq!(slugify("jane.example"), "jane-example");
        assert_eq!(slugify("---Jane---Doe---"), "jane-doe");
    }

    #[test]
    fn test_slugify_strips_diacritics() {
        assert_eq!(slugify("José Müller"), "jose-muller");
        assert_eq!(slugify("Ångström"), "angstrom");
    }

    #[test]
    fn test_slugify_compatibility_forms() {
        // NFKD turns the ligature and full-width digits into plain ASCII
        assert_eq!(slugify("ﬁne ２０２４"), "fine-2024");
    }

    #[test]
    fn test_slugify_non_latin_is_dropped() {
        assert_eq!(slugify("山田 太郎"), "");
        assert_eq!(make_id("山田 太郎", 2024), "-2024");
    }

    #[test]
    fn test_slugify_truncates() {
        let long = "a".repeat(100);
        assert_eq!(slugify(&long).len(), MAX_SLUG_LEN);

        // hyphens are trimmed before truncation, so one can end the slug
        let words = format!("{}-b", "a".repeat(59));
        assert_eq!(slugify(&words), format!("{}-", "a".repeat(59)));
    }

    #[test]
    fn test_make_id() {
        assert_eq!(make_id("Jane Doe", 2024), "jane-doe-2024");
        assert_eq!(make_id("@jane_doe", 2023), "jane-doe-2023");
    }

    #[test]
    fn test_unique_id_suffixes() {
        let mut taken: HashSet<String> = HashSet::new();

        for expected in ["jane-doe-2024", "jane-doe-2024-2", "jane-doe-2024-3"] {
            let id = unique_id("jane-doe-2024", |c| taken.contains(c));
            assert_eq!(id, expected);
            taken.insert(id);
        }
    }

    #[test]
    fn test_unique_id_fills_gaps() {
        let taken: HashSet<&str> = ["x-2024", "x-2024-3"].into_iter().collect();
        assert_eq!(unique_id("x-2024", |c| taken.contains(c)), "x-2024-2");
    }
}
