//! Error types for the linkscout host.

use linkscout_search::SearchError;

/// Top-level error type for sessions, the stdio bridge and configuration.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Channel send/receive error.
    #[error("channel error: {0}")]
    Channel(String),

    /// Malformed or unsupported wire message.
    #[error("protocol error: {0}")]
    Protocol(String),

    /// Error from the search library.
    #[error(transparent)]
    Search(#[from] SearchError),
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, AppError>;
