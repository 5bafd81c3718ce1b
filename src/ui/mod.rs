//! UI state for the station website.
//!
//! Each submodule models one widget as plain data plus the transitions the
//! page script used to perform on the DOM. Nothing here touches a real
//! rendering surface, so every transition is unit-testable.

pub mod fullscreen;
pub mod navigation;
pub mod page;
pub mod player;
pub mod results_panel;
pub mod state;

pub use state::{SiteUiState, UiSnapshot};
