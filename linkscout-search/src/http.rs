//! The fetcher: the only I/O primitive in the crate.
//!
//! [`HttpFetcher`] wraps a single pooled [`reqwest::Client`] with a fixed,
//! browser-like header block. A fetch succeeds only on HTTP 200; every other
//! status, transport error, or timeout becomes [`SearchError::Fetch`]. There
//! are no retries.

use crate::config::SearchConfig;
use crate::error::SearchError;
use rand::seq::SliceRandom;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::StatusCode;
use std::future::Future;
use std::time::Duration;

/// Realistic desktop browser User-Agent strings. One is picked per client.
const USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:133.0) Gecko/20100101 Firefox/133.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10.15; rv:133.0) Gecko/20100101 Firefox/133.0",
];

/// Headers sent with every provider request, in addition to the User-Agent.
const BROWSER_HEADERS: &[(&str, &str)] = &[
    (
        "Accept",
        "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8",
    ),
    ("Accept-Language", "en-US,en;q=0.5"),
    ("DNT", "1"),
    ("Upgrade-Insecure-Requests", "1"),
    ("Sec-Fetch-Dest", "document"),
    ("Sec-Fetch-Mode", "navigate"),
    ("Sec-Fetch-Site", "none"),
    ("Sec-Fetch-User", "?1"),
    ("Cache-Control", "max-age=0"),
];

/// Retrieves raw provider responses.
///
/// Implementations must treat anything other than HTTP 200 as a failure.
/// All implementations must be `Send + Sync` so that every provider task of a
/// batch can share one fetcher.
pub trait Fetcher: Send + Sync {
    /// Issue one GET for `url` and return the response body.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Fetch`] on transport errors, timeouts, and
    /// non-200 responses.
    fn fetch(&self, url: &str) -> impl Future<Output = Result<String, SearchError>> + Send;
}

/// [`Fetcher`] backed by a real HTTP client.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Build a fetcher whose client applies `config`'s timeout and headers.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Config`] if the client cannot be constructed.
    pub fn new(config: &SearchConfig) -> Result<Self, SearchError> {
        Ok(Self {
            client: build_client(config)?,
        })
    }
}

impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, SearchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| SearchError::Fetch(format!("{url}: request failed: {e}")))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(SearchError::Fetch(format!("{url}: HTTP {status}")));
        }

        let body = response
            .text()
            .await
            .map_err(|e| SearchError::Fetch(format!("{url}: body read failed: {e}")))?;

        tracing::trace!(url, bytes = body.len(), "provider response received");
        Ok(body)
    }
}

/// Build a [`reqwest::Client`] configured for provider scraping.
///
/// The client has:
/// - Cookie store enabled (for consent interstitials)
/// - Request and connect timeouts from config
/// - The browser header block as default headers
/// - A User-Agent from config, or one from the built-in list
/// - Brotli and gzip decompression
///
/// # Errors
///
/// Returns [`SearchError::Config`] if the client cannot be constructed.
pub fn build_client(config: &SearchConfig) -> Result<reqwest::Client, SearchError> {
    let ua = match config.user_agent {
        Some(ref custom) => custom.clone(),
        None => random_user_agent().to_owned(),
    };
    let timeout = Duration::from_secs(config.timeout_seconds);

    reqwest::Client::builder()
        .cookie_store(true)
        .timeout(timeout)
        .connect_timeout(timeout)
        .user_agent(ua)
        .default_headers(browser_headers()?)
        .redirect(reqwest::redirect::Policy::limited(10))
        .build()
        .map_err(|e| SearchError::Config(format!("failed to build HTTP client: {e}")))
}

/// The fixed header block sent with every request.
///
/// # Errors
///
/// Returns [`SearchError::Config`] if a header name or value is invalid.
pub fn browser_headers() -> Result<HeaderMap, SearchError> {
    let mut headers = HeaderMap::with_capacity(BROWSER_HEADERS.len());
    for (name, value) in BROWSER_HEADERS {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| SearchError::Config(format!("invalid header name {name}: {e}")))?;
        headers.insert(name, HeaderValue::from_static(value));
    }
    Ok(headers)
}

/// Select a random User-Agent string from the built-in list.
pub fn random_user_agent() -> &'static str {
    let mut rng = rand::thread_rng();
    USER_AGENTS
        .choose(&mut rng)
        .copied()
        // USER_AGENTS is a non-empty const array, choose only returns None on empty slices
        .unwrap_or(USER_AGENTS[0])
}
