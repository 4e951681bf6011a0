//! Error types for the linkscout-search crate.
//!
//! Every failure in a search batch is local to the page, block, or provider
//! that produced it. These variants are how that locality is reported: the
//! collector inspects them, logs them, and keeps going.

/// Errors that can occur while fetching, extracting, or collecting results.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// An HTTP GET did not produce a 200 response (transport error,
    /// timeout, or any other status).
    #[error("fetch failed: {0}")]
    Fetch(String),

    /// A single candidate result block could not be processed.
    #[error("extraction failed: {0}")]
    Extraction(String),

    /// An entire provider task produced nothing usable.
    #[error("provider failed: {0}")]
    Provider(String),

    /// A search request was rejected before any work was done.
    #[error("{0}")]
    Validation(String),

    /// Invalid search configuration.
    #[error("config error: {0}")]
    Config(String),
}

/// Convenience type alias for linkscout-search results.
pub type Result<T> = std::result::Result<T, SearchError>;
