//! Trait definition for web lookup backends.
//!
//! The orchestrator talks to the web through [`WebLookup`], so the
//! instant-answer adapter can be swapped for a scripted double in tests.

use crate::error::SearchError;
use crate::types::ContentRecord;

/// A backend that turns a query into web-derived [`ContentRecord`]s.
///
/// Implementations handle their own:
///
/// - URL construction with query encoding
/// - HTTP request and status handling
/// - Response decoding into records tagged [`crate::ResultSource::Web`]
///
/// All implementations must be `Send + Sync` so a controller can share them
/// across tasks.
pub trait WebLookup: Send + Sync {
    /// Look up `query` and return zero or more web records.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Network`] if the request cannot be completed
    /// and [`SearchError::Decode`] if the response cannot be parsed.
    fn lookup(
        &self,
        query: &str,
    ) -> impl std::future::Future<Output = Result<Vec<ContentRecord>, SearchError>> + Send;

    /// Human-readable backend name for logs.
    fn name(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A scripted backend for testing trait bounds and async execution.
    struct MockLookup {
        records: Vec<ContentRecord>,
        fail: bool,
    }

    impl WebLookup for MockLookup {
        async fn lookup(&self, _query: &str) -> Result<Vec<ContentRecord>, SearchError> {
            if self.fail {
                return Err(SearchError::Network("mock lookup failure".into()));
            }
            Ok(self.records.clone())
        }

        fn name(&self) -> &'static str {
            "mock"
        }
    }

    #[test]
    fn mock_lookup_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<MockLookup>();
    }

    #[tokio::test]
    async fn mock_lookup_returns_records() {
        let lookup = MockLookup {
            records: vec![ContentRecord::web("Test", "A test", "https://test.com")],
            fail: false,
        };
        let records = lookup.lookup("test").await.expect("should succeed");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, "Test");
        assert_eq!(lookup.name(), "mock");
    }

    #[tokio::test]
    async fn mock_lookup_propagates_errors() {
        let lookup = MockLookup {
            records: vec![],
            fail: true,
        };
        let err = lookup.lookup("test").await.unwrap_err();
        assert!(err.to_string().contains("mock lookup failure"));
    }
}
