//! Page fetching.
//!
//! Redirects are followed by hand rather than by the HTTP client so that a
//! missing `Location`, a loop and the hop limit each surface as their own
//! [`FetchError`]. There are no retries: a failure is reported once and the
//! caller moves on to the next URL.

use std::collections::HashSet;

use reqwest::header::{ACCEPT, CONTENT_TYPE, LOCATION};
use reqwest::redirect::Policy;
use tracing::debug;
use url::Url;

use crate::encoding;
use crate::options::Options;
use crate::url_utils;

/// `Accept` header sent with every request.
pub const ACCEPT_HTML: &str = "text/html,application/xhtml+xml";

/// Why a single URL could not be fetched.
///
/// None of these abort a run; the URL is logged and skipped.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The URL (or a redirect target) is not an absolute http(s) URL.
    #[error("not a fetchable URL: {0}")]
    InvalidUrl(String),

    /// A 3xx response carried no usable `Location` header.
    #[error("HTTP {status} without Location header")]
    RedirectWithoutLocation { status: u16 },

    /// The redirect chain exceeded the hop limit.
    #[error("Too many redirects ({max})")]
    TooManyRedirects { max: usize },

    /// A redirect pointed back to a URL already visited in this chain.
    #[error("redirect loop back to {0}")]
    RedirectLoop(String),

    /// The final response had a status of 400 or above.
    #[error("HTTP {0}")]
    HttpStatus(u16),

    /// The request did not complete within the configured timeout.
    #[error("request timed out")]
    Timeout,

    /// Connection, TLS or body transfer failure.
    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),

    /// The HTTP client could not be constructed.
    #[error("HTTP client setup failed: {0}")]
    Client(#[source] reqwest::Error),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Network(err)
        }
    }
}

/// HTTP client for catalog pages.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: reqwest::Client,
    max_redirects: usize,
}

impl Fetcher {
    /// Build a fetcher from the run options.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Client`] if the HTTP client cannot be built.
    pub fn new(opts: &Options) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .redirect(Policy::none())
            .user_agent(opts.user_agent.as_str())
            .timeout(opts.timeout)
            .build()
            .map_err(FetchError::Client)?;

        Ok(Self {
            client,
            max_redirects: opts.max_redirects,
        })
    }

    /// Fetch `url` and return its body as text.
    ///
    /// Follows up to `max_redirects` redirect hops, resolving each `Location`
    /// against the URL that returned it.
    ///
    /// # Errors
    ///
    /// See [`FetchError`] for the failure kinds.
    pub async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let mut current =
            url_utils::parse_url(url).ok_or_else(|| FetchError::InvalidUrl(url.to_string()))?;
        let mut visited: HashSet<Url> = HashSet::from([current.clone()]);

        for hop in 1..=self.max_redirects + 1 {
            let response = self
                .client
                .get(current.clone())
                .header(ACCEPT, ACCEPT_HTML)
                .send()
                .await?;
            let status = response.status();

            if status.is_redirection() {
                let location = response
                    .headers()
                    .get(LOCATION)
                    .and_then(|v| v.to_str().ok())
                    .ok_or(FetchError::RedirectWithoutLocation {
                        status: status.as_u16(),
                    })?;
                let next = url_utils::resolve_location(location, &current)
                    .ok_or_else(|| FetchError::InvalidUrl(location.to_string()))?;

                if !visited.insert(next.clone()) {
                    return Err(FetchError::RedirectLoop(next.to_string()));
                }

                debug!(from = %current, to = %next, hop, "following redirect");
                current = next;
                continue;
            }

            if status.as_u16() >= 400 {
                return Err(FetchError::HttpStatus(status.as_u16()));
            }

            let content_type = response
                .headers()
                .get(CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string);
            let body = response.bytes().await?;

            return Ok(encoding::decode_body(&body, content_type.as_deref()));
        }

        Err(FetchError::TooManyRedirects {
            max: self.max_redirects,
        })
    }
}
