//! Core types for search results and their origin.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Category label attached to every web-derived record.
pub const WEB_CATEGORY: &str = "Web";

/// Where a [`ContentRecord`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultSource {
    /// Matched in the built-in site content index.
    Local,
    /// Derived from the instant-answer web endpoint.
    Web,
}

impl ResultSource {
    /// Returns the lowercase tag used in serialized output.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Web => "web",
        }
    }

    /// Glyph shown next to the category label.
    pub fn glyph(&self) -> &'static str {
        match self {
            Self::Local => "📁",
            Self::Web => "🌐",
        }
    }
}

impl fmt::Display for ResultSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One piece of discoverable content, local or web.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentRecord {
    /// Short display title.
    pub title: String,
    /// Summary text.
    pub excerpt: String,
    /// Navigation target: absolute for web results, page-relative for local.
    pub url: String,
    /// Display label (capitalized category key, or `"Web"`).
    pub category: String,
    /// Origin tag; decides click behaviour and glyph.
    pub source: ResultSource,
}

impl ContentRecord {
    /// Build a web-derived record. The category is always [`WEB_CATEGORY`].
    pub fn web(title: impl Into<String>, excerpt: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            excerpt: excerpt.into(),
            url: url.into(),
            category: WEB_CATEGORY.to_owned(),
            source: ResultSource::Web,
        }
    }

    /// Returns `true` for records from the web adapter.
    pub fn is_web(&self) -> bool {
        self.source == ResultSource::Web
    }
}

/// A search query that survived normalization.
///
/// Constructed only through [`Query::parse`], so an instance is never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    trimmed: String,
    folded: String,
}

impl Query {
    /// Trim and case-fold `raw`. Returns `None` for empty or
    /// whitespace-only input, which callers treat as "clear the results".
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self {
            trimmed: trimmed.to_owned(),
            folded: trimmed.to_lowercase(),
        })
    }

    /// The query with surrounding whitespace removed, case preserved.
    pub fn as_str(&self) -> &str {
        &self.trimmed
    }

    /// The lowercased query used for substring matching.
    pub fn folded(&self) -> &str {
        &self.folded
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.trimmed)
    }
}
