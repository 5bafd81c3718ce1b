//! Error types for the etya-search crate.
//!
//! Messages are stable strings meant for logs. None of them are shown to
//! site visitors; the UI layer replaces any failure with a generic card.

/// Errors that can occur while looking up web results.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// The request could not be sent, timed out, was rate limited, or the
    /// endpoint answered with a non-success status.
    #[error("network error: {0}")]
    Network(String),

    /// The response body was not the expected instant-answer JSON shape.
    #[error("decode error: {0}")]
    Decode(String),

    /// Invalid search configuration.
    #[error("config error: {0}")]
    Config(String),
}

/// Convenience type alias for etya-search results.
pub type Result<T> = std::result::Result<T, SearchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_network() {
        let err = SearchError::Network("connection refused".into());
        assert_eq!(err.to_string(), "network error: connection refused");
    }

    #[test]
    fn display_decode() {
        let err = SearchError::Decode("expected value at line 1".into());
        assert_eq!(err.to_string(), "decode error: expected value at line 1");
    }

    #[test]
    fn display_config() {
        let err = SearchError::Config("timeout_seconds must be greater than 0".into());
        assert_eq!(
            err.to_string(),
            "config error: timeout_seconds must be greater than 0"
        );
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SearchError>();
    }
}
