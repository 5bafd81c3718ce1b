//! Fullscreen toggle for the video placeholder.

use serde::{Deserialize, Serialize};

/// Platform request produced by a toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FullscreenRequest {
    /// Ask the platform to make the placeholder fullscreen.
    Enter,
    /// Leave fullscreen.
    Exit,
}

/// Fullscreen state of the page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FullscreenState {
    /// Whether the page has a video placeholder element at all.
    pub placeholder_present: bool,
    /// Whether an element is currently fullscreen.
    pub active: bool,
}

impl FullscreenState {
    /// State for a page with or without the placeholder.
    pub fn new(placeholder_present: bool) -> Self {
        Self {
            placeholder_present,
            active: false,
        }
    }

    /// Decide what the platform should do. Without a placeholder this is a
    /// no-op.
    pub fn toggle(&mut self) -> Option<FullscreenRequest> {
        if !self.placeholder_present {
            return None;
        }
        if self.active {
            self.active = false;
            Some(FullscreenRequest::Exit)
        } else {
            self.active = true;
            Some(FullscreenRequest::Enter)
        }
    }

    /// The platform reported its fullscreen state, e.g. after the visitor
    /// left fullscreen with Esc.
    pub fn platform_changed(&mut self, active: bool) {
        if self.active != active {
            tracing::debug!(active, "fullscreen state changed by platform");
        }
        self.active = active;
    }

    /// The platform refused to enter fullscreen; roll back.
    pub fn enter_failed(&mut self, reason: &str) {
        tracing::info!(reason, "error attempting to enable fullscreen");
        self.active = false;
    }
}
