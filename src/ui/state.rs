//! Aggregate UI state handed to event handlers.

use std::time::Duration;

use serde::Serialize;

use crate::config::SiteConfig;
use crate::ui::fullscreen::FullscreenState;
use crate::ui::navigation::NavigationState;
use crate::ui::page::{PageState, SearchBox};
use crate::ui::player::PlayerState;
use crate::ui::results_panel::{ResultsPanel, SharedPanel};

/// All mutable UI state of the site, in one place.
#[derive(Debug, Clone)]
pub struct SiteUiState {
    /// Navigation bar and mobile menu.
    pub nav: NavigationState,
    /// Search results panel, shared with the search controller.
    pub results: SharedPanel,
    /// Search input.
    pub search_box: SearchBox,
    /// Simulated live player.
    pub player: PlayerState,
    /// Video placeholder fullscreen state.
    pub fullscreen: FullscreenState,
    /// Facts about the loaded page.
    pub page: PageState,
    /// Delay before the live button auto-starts playback.
    pub autoplay_delay: Duration,
    /// Step between content card reveals.
    pub card_reveal_step: Duration,
}

impl SiteUiState {
    /// Initial state for a page that has not reported its contents yet.
    pub fn new(config: &SiteConfig, results: SharedPanel) -> Self {
        Self {
            nav: NavigationState::new(
                config.site.nav_links.clone(),
                config.site.home_page.clone(),
                config.site.mobile_breakpoint,
            ),
            results,
            search_box: SearchBox::default(),
            player: PlayerState::new(&config.site, &config.player),
            fullscreen: FullscreenState::default(),
            page: PageState {
                frequency: config.site.frequency.clone(),
                ..PageState::default()
            },
            autoplay_delay: Duration::from_millis(config.player.autoplay_delay_ms),
            card_reveal_step: Duration::from_millis(config.site.card_reveal_step_ms),
        }
    }

    /// Serializable copy of the visible state.
    pub fn snapshot(&self) -> UiSnapshot {
        UiSnapshot {
            menu_open: self.nav.menu_open,
            menu_label: self.nav.toggle_label(),
            active_link: self.nav.active_href().map(str::to_owned),
            search_box: self.search_box.clone(),
            results: self.results.snapshot(),
            player: self.player.clone(),
            fullscreen: self.fullscreen.clone(),
        }
    }
}

/// Point-in-time view of [`SiteUiState`] for the host.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UiSnapshot {
    /// Whether the mobile menu is open.
    pub menu_open: bool,
    /// Menu toggle label.
    pub menu_label: &'static str,
    /// Href of the highlighted nav link.
    pub active_link: Option<String>,
    /// Search input.
    pub search_box: SearchBox,
    /// Results panel.
    pub results: ResultsPanel,
    /// Player widget.
    pub player: PlayerState,
    /// Fullscreen state.
    pub fullscreen: FullscreenState,
}
