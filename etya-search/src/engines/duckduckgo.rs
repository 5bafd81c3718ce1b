//! DuckDuckGo instant-answer adapter.
//!
//! Issues one GET to `https://api.duckduckgo.com/` with the query suffixed
//! by `" news"` and shapes the JSON answer into at most a handful of
//! [`ContentRecord`]s: related topics first, the abstract as a fallback.

use std::time::Duration;

use reqwest::StatusCode;
use serde::Deserialize;
use url::Url;

use crate::config::SearchConfig;
use crate::engine::WebLookup;
use crate::error::SearchError;
use crate::http::{self, RequestSpacer};
use crate::types::ContentRecord;

/// Suffix appended to truncated titles and excerpts.
const ELLIPSIS: &str = "...";

/// Placeholder link for an abstract without a source URL.
const PLACEHOLDER_URL: &str = "#";

/// Instant-answer response body. Every field is optional; empty strings are
/// treated the same as absent ones.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct InstantAnswer {
    /// Ordered related topics. Category groups carry no `Text` and are skipped.
    #[serde(rename = "RelatedTopics")]
    pub related_topics: Option<Vec<RelatedTopic>>,
    /// Abstract body, used for the excerpt of the fallback record.
    #[serde(rename = "Abstract")]
    pub summary: Option<String>,
    /// Plain-text abstract, used for the fallback title.
    #[serde(rename = "AbstractText")]
    pub abstract_text: Option<String>,
    /// Source page of the abstract.
    #[serde(rename = "AbstractURL")]
    pub abstract_url: Option<String>,
}

/// A single entry of `RelatedTopics`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RelatedTopic {
    /// `"Title - description"` text.
    #[serde(rename = "Text")]
    pub text: Option<String>,
    /// Absolute link to the topic.
    #[serde(rename = "FirstURL")]
    pub first_url: Option<String>,
}

/// DuckDuckGo instant-answer client.
///
/// Holds one HTTP client for its lifetime and spaces consecutive requests
/// by `config.min_request_interval_ms`.
pub struct DuckDuckGoEngine {
    client: reqwest::Client,
    config: SearchConfig,
    spacer: RequestSpacer,
}

impl DuckDuckGoEngine {
    /// Create an adapter for the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Config`] if the configuration is invalid, or
    /// [`SearchError::Network`] if the HTTP client cannot be built.
    pub fn new(config: SearchConfig) -> Result<Self, SearchError> {
        config.validate()?;
        let client = http::build_client(&config)?;
        let spacer = RequestSpacer::new(Duration::from_millis(config.min_request_interval_ms));
        Ok(Self {
            client,
            config,
            spacer,
        })
    }

    /// Build the request URL for `query`.
    ///
    /// The query gets the configured suffix and is form-encoded, so
    /// `"rust"` becomes `?q=rust+news&format=json&pretty=1`.
    pub fn request_url(&self, query: &str) -> Result<Url, SearchError> {
        let q = format!("{query}{}", self.config.query_suffix);
        Url::parse_with_params(
            &self.config.endpoint,
            [("q", q.as_str()), ("format", "json"), ("pretty", "1")],
        )
        .map_err(|e| SearchError::Config(format!("invalid endpoint URL: {e}")))
    }
}

impl WebLookup for DuckDuckGoEngine {
    async fn lookup(&self, query: &str) -> Result<Vec<ContentRecord>, SearchError> {
        tracing::trace!(query, "instant-answer lookup");

        let url = self.request_url(query)?;
        self.spacer.wait_turn().await;

        let response = self
            .client
            .get(url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SearchError::Network(format!("instant-answer request timed out: {e}"))
                } else {
                    SearchError::Network(format!("instant-answer request failed: {e}"))
                }
            })?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(SearchError::Network(
                "instant-answer endpoint is rate limiting requests (HTTP 429)".into(),
            ));
        }
        if !status.is_success() {
            return Err(SearchError::Network(format!(
                "instant-answer HTTP error: {status}"
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| SearchError::Network(format!("instant-answer response read failed: {e}")))?;

        tracing::trace!(bytes = body.len(), "instant-answer response received");

        let answer = parse_instant_answer(&body)?;
        let records = records_from_answer(&answer, query, &self.config);
        tracing::debug!(count = records.len(), "instant-answer records built");
        Ok(records)
    }

    fn name(&self) -> &'static str {
        "DuckDuckGo"
    }
}

/// Decode a response body into an [`InstantAnswer`].
///
/// # Errors
///
/// Returns [`SearchError::Decode`] if the body is not JSON or a field has an
/// unexpected type.
pub fn parse_instant_answer(body: &str) -> Result<InstantAnswer, SearchError> {
    serde_json::from_str(body).map_err(|e| SearchError::Decode(format!("invalid instant answer: {e}")))
}

/// Shape an answer into web records.
///
/// Only the first `config.max_related_topics` related topics are looked
/// at; those with both `Text` and `FirstURL` become records. Only when none
/// of them qualify is the abstract consulted, yielding at most one record.
/// An answer with neither gives an empty list.
pub fn records_from_answer(
    answer: &InstantAnswer,
    query: &str,
    config: &SearchConfig,
) -> Vec<ContentRecord> {
    let records: Vec<ContentRecord> = answer
        .related_topics
        .iter()
        .flatten()
        .take(config.max_related_topics)
        .filter_map(|topic| {
            let text = non_empty(topic.text.as_deref())?;
            let url = non_empty(topic.first_url.as_deref())?;
            Some(ContentRecord::web(
                topic_title(text, config.title_chars),
                with_ellipsis(text, config.excerpt_chars),
                url,
            ))
        })
        .collect();

    if !records.is_empty() {
        return records;
    }

    let Some(summary) = non_empty(answer.summary.as_deref()) else {
        return records;
    };

    let title = match non_empty(answer.abstract_text.as_deref()) {
        Some(text) => text.split_once(". ").map_or(text, |(head, _)| head).to_owned(),
        None => format!("{query} - Information"),
    };
    let url = non_empty(answer.abstract_url.as_deref()).unwrap_or(PLACEHOLDER_URL);

    vec![ContentRecord::web(
        title,
        with_ellipsis(summary, config.excerpt_chars),
        url,
    )]
}

/// Title of a related topic: the text before `" - "`, or a truncated copy
/// of the whole text when there is no separator.
fn topic_title(text: &str, limit: usize) -> String {
    match text.split_once(" - ") {
        Some((head, _)) if !head.is_empty() => head.to_owned(),
        _ => with_ellipsis(text, limit),
    }
}

/// First `limit` characters of `text` followed by `...`.
///
/// The ellipsis is appended even when nothing was cut, which is how the
/// site has always displayed web excerpts.
fn with_ellipsis(text: &str, limit: usize) -> String {
    let mut out: String = text.chars().take(limit).collect();
    out.push_str(ELLIPSIS);
    out
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
