//! # etya-search
//!
//! Site search for the Etya Radio website.
//!
//! A query is matched against the station's built-in content index and,
//! at the same time, sent to the DuckDuckGo instant-answer API. The two
//! result sets are concatenated with local matches first.
//!
//! ## Design
//!
//! - Local matching is a case-insensitive substring test over title and
//!   excerpt; no ranking
//! - One GET per search to the instant-answer endpoint, bounded by a timeout
//!   and spaced by a minimum request interval
//! - At most three related-topic records, or one abstract record as fallback
//! - No caching: web records are built fresh for every query
//!
//! ## Privacy
//!
//! - Search queries are logged only at trace level
//! - No API keys; the endpoint is public

pub mod config;
pub mod engine;
pub mod engines;
pub mod error;
pub mod http;
pub mod local;
pub mod orchestrator;
pub mod types;

pub use config::SearchConfig;
pub use engine::WebLookup;
pub use engines::DuckDuckGoEngine;
pub use error::{Result, SearchError};
pub use local::{LocalEntry, LocalIndex};
pub use orchestrator::SearchOutcome;
pub use types::{ContentRecord, Query, ResultSource};

/// Search the built-in content and the web.
///
/// Returns local matches followed by web records. An empty or
/// whitespace-only query returns an empty list without any network call.
///
/// # Errors
///
/// Returns [`SearchError::Config`] for an invalid `config`, and the web
/// lookup's [`SearchError::Network`] or [`SearchError::Decode`] if it fails.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> etya_search::Result<()> {
/// let config = etya_search::SearchConfig::default();
/// let results = etya_search::search("football", &config).await?;
/// for result in &results {
///     println!("{} [{}]: {}", result.title, result.category, result.url);
/// }
/// # Ok(())
/// # }
/// ```
pub async fn search(query: &str, config: &SearchConfig) -> Result<Vec<ContentRecord>> {
    config.validate()?;
    let Some(query) = Query::parse(query) else {
        return Ok(Vec::new());
    };
    let engine = DuckDuckGoEngine::new(config.clone())?;
    orchestrator::orchestrate_search(&query, &LocalIndex::default(), &engine, config)
        .await
        .merged()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn search_validates_config_zero_timeout() {
        let config = SearchConfig {
            timeout_seconds: 0,
            ..Default::default()
        };
        let result = search("test", &config).await;
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("timeout"));
    }

    #[tokio::test]
    async fn blank_query_returns_empty_without_network() {
        let config = SearchConfig {
            endpoint: "http://127.0.0.1:9/".into(),
            ..Default::default()
        };
        let results = search("   ", &config).await.expect("blank query is not an error");
        assert!(results.is_empty());
    }
}
