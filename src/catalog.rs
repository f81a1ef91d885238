//! Catalog store.
//!
//! The catalog is an ordered list of [`CatalogEntry`] records keyed by URL,
//! persisted as one pretty-printed JSON array. The whole document is read and
//! written at once; there are no partial writes. Order is insertion order and
//! new entries always go at the end.
//!
//! Catalogs hold hundreds of entries, so lookups are linear scans.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Error, Result};
use crate::result::{CatalogEntry, EnrichmentPatch, ExtractionResult};
use crate::slug;

/// Ordered, validated collection of catalog entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    /// An empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from entries, checking its invariants.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCatalog`] on a duplicate `url`, a duplicate
    /// `id`, or a `wordCount` of zero.
    pub fn from_entries(entries: Vec<CatalogEntry>) -> Result<Self> {
        let mut urls = HashSet::with_capacity(entries.len());
        let mut ids = HashSet::with_capacity(entries.len());

        for entry in &entries {
            if !urls.insert(entry.url.as_str()) {
                return Err(Error::InvalidCatalog(format!("duplicate url {}", entry.url)));
            }
            if !ids.insert(entry.id.as_str()) {
                return Err(Error::InvalidCatalog(format!("duplicate id {}", entry.id)));
            }
            if entry.word_count == Some(0) {
                return Err(Error::InvalidCatalog(format!(
                    "wordCount must be positive for {}",
                    entry.url
                )));
            }
        }

        Ok(Self { entries })
    }

    /// Parse a catalog document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`] if the text is not an array of entries and
    /// [`Error::InvalidCatalog`] if the entries break an invariant.
    pub fn parse(text: &str) -> Result<Self> {
        let entries: Vec<CatalogEntry> = serde_json::from_str(text)?;
        Self::from_entries(entries)
    }

    /// Load the catalog at `path`. A missing file is an empty catalog.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file exists but cannot be read, or any
    /// error from [`Catalog::parse`].
    pub fn load(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(text) => Self::parse(&text),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no catalog yet, starting empty");
                Ok(Self::new())
            }
            Err(e) => Err(Error::io(path, e)),
        }
    }

    /// Serialize to the persisted form: a 2-space indented JSON array with a
    /// trailing newline.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`] if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        let mut text = serde_json::to_string_pretty(&self.entries)?;
        text.push('\n');
        Ok(text)
    }

    /// Write the whole catalog to `path`.
    ///
    /// The document goes to a sibling temporary file first and is renamed
    /// over `path`, so readers never observe a half-written catalog.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the directory, temporary file or rename fails.
    pub fn save(&self, path: &Path) -> Result<()> {
        let text = self.to_json()?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
        }

        let tmp = temp_path(path);
        fs::write(&tmp, text).map_err(|e| Error::io(&tmp, e))?;
        fs::rename(&tmp, path).map_err(|e| Error::io(path, e))?;

        debug!(path = %path.display(), entries = self.entries.len(), "catalog saved");
        Ok(())
    }

    /// The entry for `url`, if present.
    #[must_use]
    pub fn lookup(&self, url: &str) -> Option<&CatalogEntry> {
        self.entries.iter().find(|e| e.url == url)
    }

    /// Whether some entry already uses `id`.
    #[must_use]
    pub fn contains_id(&self, id: &str) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    /// The id the next insertion for `author`/`year` would receive.
    #[must_use]
    pub fn next_id(&self, author: &str, year: i32) -> String {
        slug::unique_id(&slug::make_id(author, year), |candidate| {
            self.contains_id(candidate)
        })
    }

    /// Append an entry for `result` under a fresh unique id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateUrl`] if the catalog already holds the URL;
    /// callers are expected to check with [`Catalog::lookup`] first.
    pub fn insert(&mut self, result: ExtractionResult) -> Result<&CatalogEntry> {
        if self.lookup(&result.url).is_some() {
            return Err(Error::DuplicateUrl(result.url));
        }

        let id = self.next_id(&result.author, result.year);
        let index = self.entries.len();
        self.entries.push(CatalogEntry::from_extraction(id, result));
        Ok(&self.entries[index])
    }

    /// Fill the missing optional fields of the entry at `url` from `patch`.
    ///
    /// Fields the entry already has are left untouched. Returns `true` if
    /// any field was set.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EntryNotFound`] if no entry has this URL.
    pub fn enrich_in_place(&mut self, url: &str, patch: &EnrichmentPatch) -> Result<bool> {
        let entry = self
            .entries
            .iter_mut()
            .find(|e| e.url == url)
            .ok_or_else(|| Error::EntryNotFound(url.to_string()))?;

        let mut changed = false;
        if entry.preview.is_none() {
            if let Some(preview) = &patch.preview {
                entry.preview = Some(preview.clone());
                changed = true;
            }
        }
        if entry.word_count.is_none() {
            if let Some(count) = patch.word_count {
                entry.word_count = Some(count);
                changed = true;
            }
        }

        Ok(changed)
    }

    /// Entries in catalog order.
    #[must_use]
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.iter()
    }

    /// URLs in catalog order.
    pub fn urls(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.url.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(std::ffi::OsStr::to_os_string)
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
