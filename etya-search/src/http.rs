//! Shared HTTP client and request spacing for the instant-answer endpoint.

use crate::config::SearchConfig;
use crate::error::SearchError;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

/// User-Agent sent when the configuration does not override it.
const DEFAULT_USER_AGENT: &str = concat!("etya-search/", env!("CARGO_PKG_VERSION"));

/// Build a [`reqwest::Client`] configured for instant-answer lookups.
///
/// The client has:
/// - Timeout from config
/// - Configured or default User-Agent
/// - gzip decompression
///
/// # Errors
///
/// Returns [`SearchError::Network`] if the client cannot be constructed.
pub fn build_client(config: &SearchConfig) -> Result<reqwest::Client, SearchError> {
    let ua = config
        .user_agent
        .clone()
        .unwrap_or_else(|| DEFAULT_USER_AGENT.to_owned());

    reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout_seconds))
        .user_agent(ua)
        .redirect(reqwest::redirect::Policy::limited(5))
        .build()
        .map_err(|e| SearchError::Network(format!("failed to build HTTP client: {e}")))
}

/// Enforces a minimum gap between consecutive outgoing requests.
#[derive(Debug)]
pub struct RequestSpacer {
    interval: Duration,
    last: Mutex<Option<Instant>>,
}

impl RequestSpacer {
    /// Create a spacer with the given minimum interval.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: Mutex::new(None),
        }
    }

    /// Wait until at least `interval` has passed since the previous request,
    /// then claim the slot.
    pub async fn wait_turn(&self) {
        let mut last = self.last.lock().await;
        if let Some(prev) = *last {
            let elapsed = prev.elapsed();
            if elapsed < self.interval {
                let wait = self.interval - elapsed;
                tracing::trace!(wait_ms = wait.as_millis() as u64, "spacing web request");
                tokio::time::sleep(wait).await;
            }
        }
        *last = Some(Instant::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_client_with_default_config() {
        let client = build_client(&SearchConfig::default());
        assert!(client.is_ok());
    }

    #[test]
    fn build_client_with_custom_ua() {
        let config = SearchConfig {
            user_agent: Some("EtyaBot/1.0".into()),
            ..Default::default()
        };
        assert!(build_client(&config).is_ok());
    }

    #[test]
    fn default_user_agent_names_crate() {
        assert!(DEFAULT_USER_AGENT.starts_with("etya-search/"));
    }

    #[tokio::test]
    async fn first_request_is_not_delayed() {
        let spacer = RequestSpacer::new(Duration::from_secs(5));
        let start = Instant::now();
        spacer.wait_turn().await;
        assert!(start.elapsed() < Duration::from_secs(1));
    }

    #[tokio::test]
    async fn second_request_waits_for_interval() {
        let spacer = RequestSpacer::new(Duration::from_millis(60));
        spacer.wait_turn().await;
        let start = Instant::now();
        spacer.wait_turn().await;
        assert!(start.elapsed() >= Duration::from_millis(50));
    }

    #[tokio::test]
    async fn zero_interval_never_waits() {
        let spacer = RequestSpacer::new(Duration::ZERO);
        let start = Instant::now();
        for _ in 0..5 {
            spacer.wait_turn().await;
        }
        assert!(start.elapsed() < Duration::from_secs(1));
    }
}
