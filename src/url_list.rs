//! Newline-delimited URL lists.
//!
//! The input side of a run, and the file regenerated from the catalog.

use std::fs;
use std::path::Path;

use crate::catalog::Catalog;
use crate::error::{Error, Result};

/// Split text into URLs: one per line, whitespace trimmed, blanks dropped.
#[must_use]
pub fn parse_url_list(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Read the URL list at `path`.
///
/// # Errors
///
/// Returns [`Error::MissingInputFile`] if the file does not exist,
/// [`Error::EmptyUrlList`] if it holds no URLs, and [`Error::Io`] for any
/// other read failure.
pub fn read_url_list(path: &Path) -> Result<Vec<String>> {
    let text = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::MissingInputFile(path.to_path_buf())
        } else {
            Error::io(path, e)
        }
    })?;

    let urls = parse_url_list(&text);
    if urls.is_empty() {
        return Err(Error::EmptyUrlList(path.to_path_buf()));
    }

    Ok(urls)
}

/// Write the catalog's URLs to `path`, one per line, in catalog order.
///
/// Returns the number of URLs written.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be written.
pub fn write_url_list(catalog: &Catalog, path: &Path) -> Result<usize> {
    let mut text = String::new();
    for url in catalog.urls() {
        text.push_str(url);
        text.push('\n');
    }

    fs::write(path, text).map_err(|e| Error::io(path, e))?;
    Ok(catalog.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::ExtractionResult;

    #[test]
    fn test_parse_url_list_trims_and_skips_blanks() {
        let text = "  https://a.example/2024  \n\n\r\nhttps://b.example\r\n   \n";
        assert_eq!(
            parse_url_list(text),
            vec!["https://a.example/2024".to_string(), "https://b.example".to_string()]
        );
    }

    #[test]
    fn test_parse_url_list_empty() {
        assert!(parse_url_list("\n  \n").is_empty());
    }

    fn catalog(urls: &[&str]) -> Catalog {
        let mut catalog = Catalog::new();
        for url in urls {
            let result = ExtractionResult {
                url: (*url).to_string(),
                author: "A".to_string(),
                year: 2024,
                ..ExtractionResult::default()
            };
            if let Err(err) = catalog.insert(result) {
                panic!("insert failed: {err}");
            }
        }
        catalog
    }

    #[test]
    fn test_write_url_list_in_catalog_order() {
        let Ok(dir) = tempfile::tempdir() else {
            panic!("temp dir");
        };
        let path = dir.path().join("urls.txt");

        let written = write_url_list(&catalog(&["c", "a", "b"]), &path);
        assert!(matches!(written, Ok(3)));
        assert!(matches!(fs::read_to_string(&path).as_deref(), Ok("c\na\nb\n")));
    }

    #[test]
    fn test_write_then_read_round_trip() {
        let Ok(dir) = tempfile::tempdir() else {
            panic!("temp dir");
        };
        let path = dir.path().join("urls.txt");
        let urls = ["https://a.example/2024", "https://b.example/2023", "https://c.example"];

        assert!(write_url_list(&catalog(&urls), &path).is_ok());

        match read_url_list(&path) {
            Ok(read) => assert_eq!(read, urls),
            Err(err) => panic!("expected Ok(_), got Err({err:?})"),
        }
    }

    #[test]
    fn test_read_url_list_errors() {
        let Ok(dir) = tempfile::tempdir() else {
            panic!("temp dir");
        };
        let missing = dir.path().join("missing.txt");
        assert!(matches!(read_url_list(&missing), Err(Error::MissingInputFile(_))));

        let blank = dir.path().join("blank.txt");
        assert!(fs::write(&blank, "\n \n").is_ok());
        assert!(matches!(read_url_list(&blank), Err(Error::EmptyUrlList(_))));
    }
}
