//! Etya Radio site core.
//!
//! Headless implementation of the station website's interactive behaviour:
//! the search panel (local content plus web instant answers), mobile
//! navigation, the simulated live player, keyboard shortcuts, smooth
//! scrolling, and the video fullscreen toggle.
//!
//! # Architecture
//!
//! - **Search**: [`SearchController`] runs queries through `etya-search`
//!   and renders the outcome into the shared results panel
//! - **Events**: [`Dispatcher`] routes each [`UiEvent`] to a handler that
//!   mutates [`SiteUiState`] and returns [`UiEffect`]s for the page
//! - **Host**: [`host::SiteHost`] ties the two together; `etya-host`
//!   exposes it over a newline-delimited JSON stdio bridge

pub mod config;
pub mod error;
pub mod events;
pub mod host;
pub mod search;
pub mod ui;

pub use config::{FailurePolicy, SiteConfig};
pub use error::{Result, SiteError};
pub use events::{Dispatcher, UiEffect, UiEvent};
pub use search::{SearchController, SearchStatus};
pub use ui::{SiteUiState, UiSnapshot};
