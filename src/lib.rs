//! # yir-harvest
//!
//! Builds a catalog of year-in-review posts from a plain list of URLs.
//!
//! Each URL is fetched, its metadata (title, author, year, preview, word
//! count) is extracted with layered fallback heuristics, and the result is
//! merged into a JSON catalog: new URLs are appended under a unique id, and
//! entries missing a preview or word count are enriched without touching any
//! field they already have.
//!
//! ## Quick Start
//!
//! ```rust
//! use yir_harvest::{extract, Catalog};
//!
//! let html = r#"<html><head><title>2024 in Review</title>
//! <meta name="author" content="Jane Doe"></head><body></body></html>"#;
//!
//! let result = extract(html, "https://jane.example/2024/review");
//!
//! let mut catalog = Catalog::new();
//! let entry = catalog.insert(result)?;
//! assert_eq!(entry.id, "jane-doe-2024");
//! assert_eq!(entry.title, "2024 in Review");
//! # Ok::<(), yir_harvest::Error>(())
//! ```
//!
//! ## Components
//!
//! - **Fetcher**: GET with bounded, hand-followed redirects
//! - **Extractor**: per-field strategy chains over meta tags, JSON-LD and the DOM
//! - **Catalog**: ordered, validated entries with fill-once enrichment
//! - **Pipeline**: partition, sequential fetch/extract, single commit and save

mod error;
mod options;
mod result;

/// Thin helpers over `dom_query`.
pub mod dom;

/// Character encoding detection and transcoding of fetched bodies.
pub mod encoding;

/// URL validation, redirect resolution and host labels.
pub mod url_utils;

/// Metadata extraction strategy chains.
pub mod metadata;

/// Entry id slugs and collision suffixes.
pub mod slug;

/// The persisted catalog.
pub mod catalog;

/// Newline-delimited URL list I/O.
pub mod url_list;

/// HTTP fetching with bounded redirects.
pub mod fetch;

/// Partition, fetch, extract and commit.
pub mod pipeline;

// Public API - re-exports
pub use catalog::Catalog;
pub use error::{Error, Result};
pub use fetch::{FetchError, Fetcher};
pub use metadata::extract;
pub use options::{Options, DEFAULT_USER_AGENT};
pub use pipeline::{merge, partition, run, Partition, RunSummary};
pub use result::{CatalogEntry, EnrichmentPatch, ExtractionResult};
