//! Search results panel state and rendering.
//!
//! The panel is the single display surface for search output. It is
//! either hidden or showing one of: a loading indicator, a list of result
//! cards, a "no results" message, or the generic unavailable card.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use etya_search::{ContentRecord, ResultSource};
use serde::{Deserialize, Serialize};

/// Text of the loading indicator.
pub const LOADING_TEXT: &str = "🔍 Searching the web...";
/// Title of the empty-result card.
pub const NO_RESULTS_TITLE: &str = "No results found";
/// Hint of the empty-result card.
pub const NO_RESULTS_HINT: &str = "Try searching with different keywords";
/// Title of the failure card.
pub const UNAVAILABLE_TITLE: &str = "Search temporarily unavailable";
/// Hint of the failure card.
pub const UNAVAILABLE_HINT: &str = "Please try again in a moment";

/// What happens when a result card is clicked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ClickAction {
    /// Open the link in a new browser tab (web results).
    OpenNewTab { url: String },
    /// Navigate the current view (local results).
    Navigate { url: String },
}

impl ClickAction {
    /// The link target.
    pub fn url(&self) -> &str {
        match self {
            Self::OpenNewTab { url } | Self::Navigate { url } => url,
        }
    }
}

/// One rendered search result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultCard {
    /// Result title.
    pub title: String,
    /// Result excerpt.
    pub excerpt: String,
    /// Category label with source glyph, e.g. `Category: Politics 📁`.
    pub label: String,
    /// Source tag the card was built from.
    pub source: ResultSource,
    /// Click behaviour.
    pub action: ClickAction,
}

impl From<&ContentRecord> for ResultCard {
    fn from(record: &ContentRecord) -> Self {
        let action = match record.source {
            ResultSource::Web => ClickAction::OpenNewTab {
                url: record.url.clone(),
            },
            ResultSource::Local => ClickAction::Navigate {
                url: record.url.clone(),
            },
        };
        Self {
            title: record.title.clone(),
            excerpt: record.excerpt.clone(),
            label: format!("Category: {} {}", record.category, record.source.glyph()),
            source: record.source,
            action,
        }
    }
}

/// Current panel content.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum PanelContent {
    /// Nothing rendered yet.
    #[default]
    Blank,
    /// A web lookup is outstanding.
    Loading,
    /// One card per result, in display order.
    Results { cards: Vec<ResultCard> },
    /// The search matched nothing.
    NoResults,
    /// The web lookup failed.
    Unavailable,
}

/// The search results panel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultsPanel {
    /// Whether the panel is shown.
    pub visible: bool,
    /// What the panel shows when visible.
    pub content: PanelContent,
}

impl ResultsPanel {
    /// Render a result list and show the panel.
    ///
    /// An empty list shows the "no results" message.
    pub fn render(&mut self, results: &[ContentRecord]) {
        self.content = if results.is_empty() {
            PanelContent::NoResults
        } else {
            PanelContent::Results {
                cards: results.iter().map(ResultCard::from).collect(),
            }
        };
        self.visible = true;
    }

    /// Show the loading indicator.
    pub fn show_loading(&mut self) {
        self.content = PanelContent::Loading;
        self.visible = true;
    }

    /// Show the generic failure card. Never carries error details.
    pub fn show_unavailable(&mut self) {
        self.content = PanelContent::Unavailable;
        self.visible = true;
    }

    /// Hide the panel, keeping its content.
    pub fn hide(&mut self) {
        self.visible = false;
    }

    /// Rendered cards, empty unless the panel holds results.
    pub fn cards(&self) -> &[ResultCard] {
        match &self.content {
            PanelContent::Results { cards } => cards,
            _ => &[],
        }
    }

    /// Click action of the card at `index`.
    pub fn click(&self, index: usize) -> Option<ClickAction> {
        self.cards().get(index).map(|card| card.action.clone())
    }

    /// Render the panel body as HTML using the site's result markup.
    #[must_use]
    pub fn to_html(&self) -> String {
        match &self.content {
            PanelContent::Blank => String::new(),
            PanelContent::Loading => format!(r#"<div class="search-loading">{LOADING_TEXT}</div>"#),
            PanelContent::NoResults => message_html(NO_RESULTS_TITLE, NO_RESULTS_HINT),
            PanelContent::Unavailable => message_html(UNAVAILABLE_TITLE, UNAVAILABLE_HINT),
            PanelContent::Results { cards } => cards.iter().map(card_html).collect(),
        }
    }
}

fn message_html(title: &str, hint: &str) -> String {
    format!(
        r#"<div class="search-result-item"><div class="search-result-title">{title}</div><div class="search-result-excerpt">{hint}</div></div>"#
    )
}

fn card_html(card: &ResultCard) -> String {
    let target = match card.action {
        ClickAction::OpenNewTab { .. } => "_blank",
        ClickAction::Navigate { .. } => "_self",
    };
    format!(
        r#"<div class="search-result-item" data-href="{href}" data-target="{target}"><div class="search-result-title">{title}</div><div class="search-result-excerpt">{excerpt}</div><small class="search-result-category">{label}</small></div>"#,
        href = html_escape(card.action.url()),
        title = html_escape(&card.title),
        excerpt = html_escape(&card.excerpt),
        label = html_escape(&card.label),
    )
}

/// Escape HTML special characters.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Shared handle to the results panel.
///
/// The search controller and the event handlers both write to the same
/// panel. The lock is never held across an `.await`.
#[derive(Debug, Clone, Default)]
pub struct SharedPanel(Arc<Mutex<ResultsPanel>>);

impl SharedPanel {
    /// Create a handle around a fresh, blank panel.
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `f` with exclusive access to the panel.
    pub fn update<R>(&self, f: impl FnOnce(&mut ResultsPanel) -> R) -> R {
        f(&mut self.lock())
    }

    /// Hide the panel.
    pub fn hide(&self) {
        self.lock().hide();
    }

    /// Copy of the current panel state.
    pub fn snapshot(&self) -> ResultsPanel {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, ResultsPanel> {
        // A panicked writer leaves plain data behind; keep serving it.
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
