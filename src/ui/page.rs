//! Page-level behaviour: anchor scrolling, the search box, frequency labels,
//! and the staggered card reveal on load.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Element id of the live player section.
pub const LIVE_PLAYER_ID: &str = "live-player";

/// Where a scrolled-to element should land in the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrollBlock {
    /// Align the element's top with the viewport top.
    Start,
    /// Centre the element vertically.
    Center,
}

/// A smooth-scroll instruction for the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrollRequest {
    /// Element id to scroll to.
    pub target: String,
    /// Vertical alignment.
    pub block: ScrollBlock,
}

/// The search input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchBox {
    /// Current input text.
    pub value: String,
    /// Whether the input has keyboard focus.
    pub focused: bool,
}

/// Static facts about the loaded page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageState {
    /// Ids of elements that anchor links can scroll to.
    pub element_ids: Vec<String>,
    /// Number of content cards revealed on load.
    pub content_cards: usize,
    /// Text shown in every frequency label.
    pub frequency: String,
}

impl PageState {
    /// Whether an element with `id` exists on the page.
    pub fn has_element(&self, id: &str) -> bool {
        self.element_ids.iter().any(|e| e == id)
    }

    /// Scroll instruction for an in-page anchor `href` like `#schedule`.
    ///
    /// Returns `None` for non-anchor hrefs and for anchors whose target is
    /// not on the page.
    pub fn anchor_scroll(&self, href: &str) -> Option<ScrollRequest> {
        let id = href.strip_prefix('#')?;
        if id.is_empty() || !self.has_element(id) {
            return None;
        }
        Some(ScrollRequest {
            target: id.to_owned(),
            block: ScrollBlock::Start,
        })
    }

    /// Scroll instruction that centres the live player, if present.
    pub fn live_player_scroll(&self) -> Option<ScrollRequest> {
        self.has_element(LIVE_PLAYER_ID).then(|| ScrollRequest {
            target: LIVE_PLAYER_ID.to_owned(),
            block: ScrollBlock::Center,
        })
    }
}

/// Reveal delay for each content card: `index * step`.
pub fn reveal_delays(count: usize, step: Duration) -> Vec<Duration> {
    (0..count)
        .map(|i| step.saturating_mul(u32::try_from(i).unwrap_or(u32::MAX)))
        .collect()
}
