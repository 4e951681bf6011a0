//! # linkscout-search
//!
//! Concurrent multi-provider web and video search by scraping public search
//! pages. No API keys, no external services.
//!
//! ## Design
//!
//! - One [`Fetcher`] is shared by every provider task of a batch
//! - Each [`Provider`] has an [`Extractor`] that turns a page into
//!   [`SearchResult`]s using CSS selectors
//! - A [`ProviderTask`] walks a provider's pages sequentially, with a fixed
//!   delay between pages, and stops at the provider's result cap
//! - The [`Collector`] runs all tasks concurrently and deduplicates by URL
//! - Failures stay local: a bad block, page, or provider is logged and
//!   skipped, and the batch still completes
//!
//! ## Privacy
//!
//! Queries are logged only at debug level.

pub mod config;
pub mod dom;
pub mod engines;
pub mod error;
pub mod extractor;
pub mod http;
pub mod orchestrator;
pub mod registry;
pub mod source;
pub mod task;
pub mod types;

pub use config::SearchConfig;
pub use error::{Result, SearchError};
pub use extractor::{Extraction, Extractor, PageContext};
pub use http::{Fetcher, HttpFetcher};
pub use orchestrator::collector::Collector;
pub use registry::Registry;
pub use source::source_from_url;
pub use task::ProviderTask;
pub use types::{Artwork, Provider, ResultKind, SearchRequest, SearchResult};

/// Search every enabled provider over HTTP and return the merged,
/// deduplicated results in provider launch order.
///
/// # Errors
///
/// Returns [`SearchError::Config`] if `config` is invalid. Provider failures
/// never surface here; they only shrink the result set.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> linkscout_search::Result<()> {
/// let request = linkscout_search::SearchRequest::new("rust async", false, true)?;
/// let config = linkscout_search::SearchConfig::default();
/// let results = linkscout_search::search(&request, config).await?;
/// for result in &results {
///     println!("[{}] {}: {}", result.platform, result.title, result.url);
/// }
/// # Ok(())
/// # }
/// ```
pub async fn search(request: &SearchRequest, config: SearchConfig) -> Result<Vec<SearchResult>> {
    let collector = Collector::http(config)?;
    Ok(collector.collect(request).await)
}

/// [`search`] with [`SearchConfig::default()`].
///
/// # Errors
///
/// Same as [`search`].
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> linkscout_search::Result<()> {
/// let request = linkscout_search::SearchRequest::new("lofi beats", true, false)?;
/// let videos = linkscout_search::search_default(&request).await?;
/// println!("{} videos", videos.len());
/// # Ok(())
/// # }
/// ```
pub async fn search_default(request: &SearchRequest) -> Result<Vec<SearchResult>> {
    search(request, SearchConfig::default()).await
}
