//! Configuration options for a harvest run.
//!
//! The `Options` struct controls where the URL list and catalog live and how
//! pages are fetched.

use std::path::PathBuf;
use std::time::Duration;

/// Identifying client header sent with every request.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (compatible; YearInReviewBot/1.0; +https://example.invalid)";

/// Configuration options for a harvest run.
///
/// All fields are public for easy configuration. Use `Default::default()`
/// for standard settings.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use yir_harvest::Options;
///
/// let options = Options {
///     timeout: Duration::from_secs(10),
///     dry_run: true,
///     ..Options::default()
/// };
/// assert_eq!(options.max_redirects, 5);
/// ```
#[derive(Debug, Clone)]
pub struct Options {
    /// Newline-delimited list of candidate URLs.
    ///
    /// Default: `data/urls.txt`
    pub urls_path: PathBuf,

    /// Catalog document read at the start of a run and written at the end.
    ///
    /// Default: `data/catalog.json`
    pub catalog_path: PathBuf,

    /// `User-Agent` header sent with every request.
    ///
    /// Default: [`DEFAULT_USER_AGENT`]
    pub user_agent: String,

    /// Upper bound on a single request, redirects counted separately.
    ///
    /// Default: 30 seconds
    pub timeout: Duration,

    /// Redirect hops followed before a fetch fails.
    ///
    /// Default: `5`
    pub max_redirects: usize,

    /// Run the whole merge but never write the catalog.
    ///
    /// Default: `false`
    pub dry_run: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            urls_path: PathBuf::from("data/urls.txt"),
            catalog_path: PathBuf::from("data/catalog.json"),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(30),
            max_redirects: 5,
            dry_run: false,
        }
    }
}
