//! Merge pipeline.
//!
//! One run:
//! 1. read the URL list and the catalog,
//! 2. split the URLs into new / needs-enrichment / complete,
//! 3. fetch and extract every new URL, then every URL needing enrichment,
//!    one at a time,
//! 4. commit staged insertions (in processing order) and enrichments,
//! 5. save the catalog once, or not at all when nothing changed.
//!
//! A failed fetch is logged and counted; it never aborts the run.

use std::collections::HashSet;
use std::fmt;

use tracing::{debug, info, warn};

use crate::catalog::Catalog;
use crate::error::Result;
use crate::fetch::Fetcher;
use crate::metadata;
use crate::options::Options;
use crate::result::{EnrichmentPatch, ExtractionResult};
use crate::url_list;

/// Candidate URLs split against the catalog.
///
/// The three lists are disjoint and keep input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Partition {
    /// Not in the catalog yet.
    pub new: Vec<String>,
    /// In the catalog but missing a preview or word count.
    pub enrich: Vec<String>,
    /// In the catalog and complete.
    pub skip: Vec<String>,
}

/// Split `urls` into new / enrich / skip.
///
/// A URL listed more than once is only considered at its first occurrence.
#[must_use]
pub fn partition(urls: &[String], catalog: &Catalog) -> Partition {
    let mut seen = HashSet::with_capacity(urls.len());
    let mut parts = Partition::default();

    for url in urls {
        if !seen.insert(url.as_str()) {
            debug!(%url, "duplicate in URL list");
            continue;
        }

        match catalog.lookup(url) {
            None => parts.new.push(url.clone()),
            Some(entry) if entry.needs_enrichment() => parts.enrich.push(url.clone()),
            Some(_) => parts.skip.push(url.clone()),
        }
    }

    parts
}

/// Counts reported at the end of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// New entries appended to the catalog.
    pub inserted: usize,
    /// Existing entries that gained at least one field.
    pub enriched: usize,
    /// URLs already complete in the catalog; never fetched.
    pub skipped: usize,
    /// URLs fetched for enrichment that yielded nothing new.
    pub unchanged: usize,
    /// URLs whose fetch failed, in processing order.
    pub failed: Vec<String>,
}

impl RunSummary {
    /// Whether the run changed the catalog.
    #[must_use]
    pub fn has_changes(&self) -> bool {
        self.inserted > 0 || self.enriched > 0
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Added {} new posts and enriched {} existing posts ({} skipped, {} unchanged, {} failed).",
            self.inserted,
            self.enriched,
            self.skipped,
            self.unchanged,
            self.failed.len()
        )
    }
}

/// Results held back until every URL has been processed.
#[derive(Debug, Default)]
struct Staged {
    insertions: Vec<ExtractionResult>,
    enrichments: Vec<(String, EnrichmentPatch)>,
}

/// Fetch, extract and merge `urls` into `catalog`.
///
/// The catalog is only modified after all fetching is done. Insertions are
/// appended in the order their URLs were processed, so ids are assigned
/// deterministically regardless of how long each fetch took.
///
/// # Errors
///
/// Only store errors ([`crate::Error::DuplicateUrl`],
/// [`crate::Error::EntryNotFound`]) escape; they mean the partition and the
/// catalog disagree and the run must stop.
pub async fn merge(catalog: &mut Catalog, urls: &[String], fetcher: &Fetcher) -> Result<RunSummary> {
    let parts = partition(urls, catalog);
    let mut summary = RunSummary {
        skipped: parts.skip.len(),
        ..RunSummary::default()
    };
    let mut staged = Staged::default();

    for url in &parts.skip {
        debug!(%url, "already complete");
    }

    for url in &parts.new {
        match fetcher.fetch(url).await {
            Ok(content) => {
                staged.insertions.push(metadata::extract(&content, url));
                info!("✓ [new] {url}");
            }
            Err(err) => {
                warn!("✗ [new] {url} - {err}");
                summary.failed.push(url.clone());
            }
        }
    }

    for url in &parts.enrich {
        let Some(entry) = catalog.lookup(url) else {
            continue;
        };

        match fetcher.fetch(url).await {
            Ok(content) => {
                let patch = EnrichmentPatch::for_entry(entry, metadata::extract(&content, url));
                if patch.is_empty() {
                    debug!(%url, "nothing new to enrich");
                    summary.unchanged += 1;
                } else {
                    info!("✓ [enriched] {url}");
                    staged.enrichments.push((url.clone(), patch));
                }
            }
            Err(err) => {
                warn!("✗ [enrich] {url} - {err}");
                summary.failed.push(url.clone());
            }
        }
    }

    commit(catalog, staged, &mut summary)?;
    Ok(summary)
}

fn commit(catalog: &mut Catalog, staged: Staged, summary: &mut RunSummary) -> Result<()> {
    for result in staged.insertions {
        let entry = catalog.insert(result)?;
        debug!(id = %entry.id, url = %entry.url, "inserted");
        summary.inserted += 1;
    }

    for (url, patch) in staged.enrichments {
        if catalog.enrich_in_place(&url, &patch)? {
            summary.enriched += 1;
        } else {
            summary.unchanged += 1;
        }
    }

    Ok(())
}

/// Run the whole pipeline as configured by `opts`.
///
/// Reads the URL list and the catalog, merges, and saves the catalog if
/// anything changed (unless `opts.dry_run`). The summary line is logged on
/// every completed run, including ones that change nothing.
///
/// # Errors
///
/// Returns input errors ([`crate::Error::MissingInputFile`],
/// [`crate::Error::EmptyUrlList`]) before any fetch, catalog load/save
/// errors, and store errors from [`merge`].
pub async fn run(opts: &Options) -> Result<RunSummary> {
    let urls = url_list::read_url_list(&opts.urls_path)?;
    let mut catalog = Catalog::load(&opts.catalog_path)?;
    let fetcher = Fetcher::new(opts)?;

    info!(
        urls = urls.len(),
        entries = catalog.len(),
        catalog = %opts.catalog_path.display(),
        "starting run"
    );

    let summary = merge(&mut catalog, &urls, &fetcher).await?;

    match (summary.has_changes(), opts.dry_run) {
        (false, _) => info!("No new URLs to add and no posts to enrich."),
        (true, true) => info!("Dry run: catalog not written."),
        (true, false) => catalog.save(&opts.catalog_path)?,
    }

    info!("{summary}");
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::CatalogEntry;

    fn entry(id: &str, url: &str, preview: Option<&str>, word_count: Option<u32>) -> CatalogEntry {
        CatalogEntry {
            id: id.to_string(),
            url: url.to_string(),
            year: 2024,
            author: "A".to_string(),
            title: "T".to_string(),
            preview: preview.map(str::to_string),
            word_count,
        }
    }

    fn urls(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_partition() {
        let catalog = Catalog::from_entries(vec![
            entry("a-2024", "https://a.example", Some("P"), Some(10)),
            entry("b-2024", "https://b.example", None, Some(10)),
            entry("c-2024", "https://c.example", Some("P"), None),
        ]);
        let Ok(catalog) = catalog else {
            panic!("valid catalog rejected");
        };

        let parts = partition(
            &urls(&[
                "https://new.example",
                "https://a.example",
                "https://b.example",
                "https://c.example",
            ]),
            &catalog,
        );

        assert_eq!(parts.new, urls(&["https://new.example"]));
        assert_eq!(parts.enrich, urls(&["https://b.example", "https://c.example"]));
        assert_eq!(parts.skip, urls(&["https://a.example"]));
    }

    #[test]
    fn test_partition_collapses_duplicates() {
        let parts = partition(
            &urls(&["https://x.example", "https://y.example", "https://x.example"]),
            &Catalog::new(),
        );

        assert_eq!(parts.new, urls(&["https://x.example", "https://y.example"]));
    }

    #[test]
    fn test_commit_appends_in_processing_order() {
        let mut catalog = Catalog::new();
        let staged = Staged {
            insertions: vec![
                ExtractionResult {
                    url: "https://one.example".to_string(),
                    author: "Jane Doe".to_string(),
                    year: 2024,
                    ..ExtractionResult::default()
                },
                ExtractionResult {
                    url: "https://two.example".to_string(),
                    author: "Jane Doe".to_string(),
                    year: 2024,
                    ..ExtractionResult::default()
                },
            ],
            enrichments: Vec::new(),
        };
        let mut summary = RunSummary::default();

        assert!(commit(&mut catalog, staged, &mut summary).is_ok());

        let ids: Vec<&str> = catalog.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["jane-doe-2024", "jane-doe-2024-2"]);
        assert_eq!(summary.inserted, 2);
    }

    #[test]
    fn test_commit_missing_entry_is_fatal() {
        let mut catalog = Catalog::new();
        let staged = Staged {
            insertions: Vec::new(),
            enrichments: vec![("https://ghost.example".to_string(), EnrichmentPatch::default())],
        };

        let result = commit(&mut catalog, staged, &mut RunSummary::default());
        assert!(matches!(result, Err(crate::Error::EntryNotFound(_))));
    }

    #[test]
    fn test_summary_display() {
        let summary = RunSummary {
            inserted: 2,
            enriched: 1,
            skipped: 5,
            unchanged: 0,
            failed: vec!["https://bad.example".to_string()],
        };

        assert_eq!(
            summary.to_string(),
            "Added 2 new posts and enriched 1 existing posts (5 skipped, 0 unchanged, 1 failed)."
        );
        assert!(summary.has_changes());
        assert!(!RunSummary::default().has_changes());
    }
}
