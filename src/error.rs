//! Error types for the site core.

/// Top-level error type.
#[derive(Debug, thiserror::Error)]
pub enum SiteError {
    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// Search backend error.
    #[error("search error: {0}")]
    Search(#[from] etya_search::SearchError),

    /// Host bridge protocol error.
    #[error("bridge error: {0}")]
    Bridge(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, SiteError>;
