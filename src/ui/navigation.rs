//! Site navigation: mobile menu toggle and active link highlighting.

use serde::{Deserialize, Serialize};

/// Toggle label while the mobile menu is closed.
pub const MENU_CLOSED_LABEL: &str = "☰";
/// Toggle label while the mobile menu is open.
pub const MENU_OPEN_LABEL: &str = "✕";

/// State of the navigation bar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationState {
    /// Link targets in page order, e.g. `["index.html", "news.html"]`.
    pub links: Vec<String>,
    /// Index into `links` of the highlighted link, if any.
    pub active: Option<usize>,
    /// Whether the mobile menu is expanded.
    pub menu_open: bool,
    /// Viewport width at or below which the mobile layout applies.
    pub mobile_breakpoint: u32,
    /// Page assumed when the location path has no file segment.
    pub home_page: String,
}

impl NavigationState {
    /// Create a navigation bar over `links` with the menu closed.
    pub fn new(links: Vec<String>, home_page: impl Into<String>, mobile_breakpoint: u32) -> Self {
        Self {
            links,
            active: None,
            menu_open: false,
            mobile_breakpoint,
            home_page: home_page.into(),
        }
    }

    /// Label the menu toggle should show.
    pub fn toggle_label(&self) -> &'static str {
        if self.menu_open {
            MENU_OPEN_LABEL
        } else {
            MENU_CLOSED_LABEL
        }
    }

    /// Flip the mobile menu open or closed.
    pub fn toggle_menu(&mut self) {
        self.menu_open = !self.menu_open;
    }

    /// Close the mobile menu.
    pub fn close_menu(&mut self) {
        self.menu_open = false;
    }

    /// Highlight the link for the current location path.
    ///
    /// The current page is the last path segment, or the home page when
    /// that segment is empty. A link is active only on an exact match.
    pub fn set_active_from_path(&mut self, path: &str) {
        let current = current_page(path, &self.home_page);
        self.active = self.links.iter().position(|href| href == current);
    }

    /// Highlight a clicked link. On a mobile-width viewport the menu closes.
    ///
    /// Unknown hrefs clear the highlight.
    pub fn link_clicked(&mut self, href: &str, viewport_width: u32) {
        self.active = self.links.iter().position(|l| l == href);
        if viewport_width <= self.mobile_breakpoint {
            self.close_menu();
        }
    }

    /// React to a viewport resize: leaving the mobile layout closes the menu.
    pub fn resized(&mut self, viewport_width: u32) {
        if viewport_width > self.mobile_breakpoint {
            self.close_menu();
        }
    }

    /// Href of the highlighted link.
    pub fn active_href(&self) -> Option<&str> {
        self.active.and_then(|i| self.links.get(i)).map(String::as_str)
    }
}

/// Last segment of a location path, defaulting to `home_page`.
fn current_page<'a>(path: &'a str, home_page: &'a str) -> &'a str {
    match path.rsplit('/').next() {
        Some(segment) if !segment.is_empty() => segment,
        _ => home_page,
    }
}
