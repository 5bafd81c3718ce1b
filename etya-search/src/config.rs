//! Search configuration with sensible defaults.
//!
//! [`SearchConfig`] controls the instant-answer endpoint, request timeout,
//! request spacing, and how web answers are shaped into records. The
//! defaults reproduce the live site's behaviour.

use crate::error::SearchError;

/// Public instant-answer endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://api.duckduckgo.com/";

/// Configuration for web lookups.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Base URL of the instant-answer API. Query parameters are appended.
    pub endpoint: String,
    /// Keyword appended to every web query.
    pub query_suffix: String,
    /// HTTP request timeout in seconds. Bounds the loading state.
    pub timeout_seconds: u64,
    /// Maximum number of related-topic records per lookup.
    pub max_related_topics: usize,
    /// Character limit for excerpts before the ellipsis is appended.
    pub excerpt_chars: usize,
    /// Character limit for titles that have no `" - "` separator.
    pub title_chars: usize,
    /// Minimum spacing between two outgoing requests in milliseconds.
    /// Set to 0 to disable spacing.
    pub min_request_interval_ms: u64,
    /// Custom User-Agent string. If `None`, a crate-identifying default is sent.
    pub user_agent: Option<String>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_owned(),
            query_suffix: " news".to_owned(),
            timeout_seconds: 5,
            max_related_topics: 3,
            excerpt_chars: 150,
            title_chars: 60,
            min_request_interval_ms: 250,
            user_agent: None,
        }
    }
}

impl SearchConfig {
    /// Validates this configuration, returning an error if any field is invalid.
    ///
    /// Checks:
    /// - `endpoint` must parse as an absolute URL
    /// - `timeout_seconds` must be greater than 0
    /// - `max_related_topics` must be greater than 0
    /// - `excerpt_chars` and `title_chars` must be greater than 0
    pub fn validate(&self) -> Result<(), SearchError> {
        if url::Url::parse(&self.endpoint).is_err() {
            return Err(SearchError::Config(format!(
                "endpoint is not a valid URL: {}",
                self.endpoint
            )));
        }
        if self.timeout_seconds == 0 {
            return Err(SearchError::Config(
                "timeout_seconds must be greater than 0".into(),
            ));
        }
        if self.max_related_topics == 0 {
            return Err(SearchError::Config(
                "max_related_topics must be greater than 0".into(),
            ));
        }
        if self.excerpt_chars == 0 || self.title_chars == 0 {
            return Err(SearchError::Config(
                "excerpt_chars and title_chars must be greater than 0".into(),
            ));
        }
        Ok(())
    }
}
