//! Core search pipeline: scan local content, query the web, merge.

use std::time::Duration;

use crate::config::SearchConfig;
use crate::engine::WebLookup;
use crate::error::SearchError;
use crate::local::LocalIndex;
use crate::types::{ContentRecord, Query};

/// Both halves of one search, kept apart so the caller decides what a web
/// failure means for the local matches.
#[derive(Debug)]
pub struct SearchOutcome {
    /// Local matches in index order. Always computed.
    pub local: Vec<ContentRecord>,
    /// Web records in adapter order, or the reason the lookup failed.
    pub web: Result<Vec<ContentRecord>, SearchError>,
}

impl SearchOutcome {
    /// Local matches followed by web records.
    ///
    /// # Errors
    ///
    /// Returns the web error unchanged; local matches are dropped with it.
    pub fn merged(self) -> Result<Vec<ContentRecord>, SearchError> {
        let web = self.web?;
        Ok(merge_results(self.local, web))
    }
}

/// Concatenate local matches and web records, local first.
pub fn merge_results(local: Vec<ContentRecord>, web: Vec<ContentRecord>) -> Vec<ContentRecord> {
    let mut merged = local;
    merged.extend(web);
    merged
}

/// Run one search against `index` and `engine`.
///
/// # Pipeline
///
/// 1. Scan every category of `index` for case-insensitive substring matches
/// 2. Query `engine` with the trimmed query, bounded by
///    `config.timeout_seconds`
/// 3. Return both result sets in a [`SearchOutcome`]
///
/// A timeout is reported as [`SearchError::Network`].
pub async fn orchestrate_search<W: WebLookup>(
    query: &Query,
    index: &LocalIndex,
    engine: &W,
    config: &SearchConfig,
) -> SearchOutcome {
    let local = index.matches(query);
    tracing::debug!(count = local.len(), "local matches");

    let limit = Duration::from_secs(config.timeout_seconds);
    let web = match tokio::time::timeout(limit, engine.lookup(query.as_str())).await {
        Ok(result) => result,
        Err(_) => Err(SearchError::Network(format!(
            "{} lookup timed out after {}s",
            engine.name(),
            config.timeout_seconds
        ))),
    };

    match &web {
        Ok(records) => tracing::debug!(engine = engine.name(), count = records.len(), "web records"),
        Err(err) => tracing::warn!(engine = engine.name(), error = %err, "web lookup failed"),
    }

    SearchOutcome { local, web }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ResultSource;

    struct FixedLookup(Vec<ContentRecord>);

    impl WebLookup for FixedLookup {
        async fn lookup(&self, _query: &str) -> Result<Vec<ContentRecord>, SearchError> {
            Ok(self.0.clone())
        }

        fn name(&self) -> &'static str {
            "fixed"
        }
    }

    struct FailingLookup;

    impl WebLookup for FailingLookup {
        async fn lookup(&self, _query: &str) -> Result<Vec<ContentRecord>, SearchError> {
            Err(SearchError::Network("connection refused".into()))
        }

        fn name(&self) -> &'static str {
            "failing"
        }
    }

    struct StalledLookup;

    impl WebLookup for StalledLookup {
        async fn lookup(&self, _query: &str) -> Result<Vec<ContentRecord>, SearchError> {
            tokio::time::sleep(Duration::from_secs(30)).await;
            Ok(vec![])
        }

        fn name(&self) -> &'static str {
            "stalled"
        }
    }

    fn query(raw: &str) -> Query {
        Query::parse(raw).expect("non-empty query")
    }

    #[test]
    fn merge_puts_local_first() {
        let local = vec![ContentRecord {
            title: "Local".into(),
            excerpt: "x".into(),
            url: "news.html".into(),
            category: "News".into(),
            source: ResultSource::Local,
        }];
        let web = vec![ContentRecord::web("Web", "y", "https://example.com")];
        let merged = merge_results(local, web);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].source, ResultSource::Local);
        assert_eq!(merged[1].source, ResultSource::Web);
    }

    #[tokio::test]
    async fn outcome_merges_local_then_web() {
        let engine = FixedLookup(vec![ContentRecord::web(
            "Political news",
            "From the web...",
            "https://example.com/politics",
        )]);
        let outcome = orchestrate_search(
            &query("political"),
            &LocalIndex::default(),
            &engine,
            &SearchConfig::default(),
        )
        .await;
        let merged = outcome.merged().expect("web succeeded");
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].title, "Political Developments");
        assert_eq!(merged[1].title, "Political news");
    }

    #[tokio::test]
    async fn web_failure_keeps_local_in_outcome_but_merged_errors() {
        let outcome = orchestrate_search(
            &query("football"),
            &LocalIndex::default(),
            &FailingLookup,
            &SearchConfig::default(),
        )
        .await;
        assert_eq!(outcome.local.len(), 1);
        assert!(outcome.web.is_err());
        assert!(matches!(outcome.merged(), Err(SearchError::Network(_))));
    }

    #[tokio::test]
    async fn stalled_lookup_times_out_as_network_error() {
        let config = SearchConfig {
            timeout_seconds: 1,
            ..Default::default()
        };
        let outcome =
            orchestrate_search(&query("news"), &LocalIndex::default(), &StalledLookup, &config)
                .await;
        let err = outcome.web.unwrap_err();
        assert!(matches!(err, SearchError::Network(_)));
        assert!(err.to_string().contains("timed out"));
    }
}
