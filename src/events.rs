//! UI events, their effects, and the dispatch table between them.
//!
//! The page reports what the visitor did as a [`UiEvent`]. The
//! [`Dispatcher`] looks up the handler registered for the event's
//! [`EventKind`], lets it update [`SiteUiState`], and returns the
//! [`UiEffect`]s the host must carry out (start a search, scroll, open a
//! link, schedule a timer). Searching itself happens outside the table so
//! the handlers stay synchronous.

use std::collections::HashMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::ui::SiteUiState;
use crate::ui::fullscreen::FullscreenRequest;
use crate::ui::page::{ScrollRequest, reveal_delays};
use crate::ui::results_panel::ClickAction;

/// Something the visitor or the page did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum UiEvent {
    /// The page finished loading.
    PageLoaded {
        /// Location path, e.g. `/news.html`.
        path: String,
        /// Ids of elements anchors may scroll to.
        #[serde(default)]
        element_ids: Vec<String>,
        /// Number of content cards to reveal.
        #[serde(default)]
        content_cards: usize,
        /// Whether a video placeholder exists.
        #[serde(default)]
        video_placeholder: bool,
    },
    /// The hamburger toggle was clicked.
    MenuToggleClicked,
    /// A navigation link was clicked.
    NavLinkClicked { href: String, viewport_width: u32 },
    /// The viewport was resized.
    Resized { width: u32 },
    /// The search input text changed.
    SearchInputChanged { value: String },
    /// The search button was clicked.
    SearchButtonClicked,
    /// A key was pressed inside the search input.
    SearchKeyPressed { key: String },
    /// A click landed somewhere on the document.
    DocumentClicked {
        /// Whether the click was inside the search box or results panel.
        inside_search: bool,
    },
    /// A key was pressed anywhere on the page.
    KeyDown {
        key: String,
        #[serde(default)]
        ctrl: bool,
        #[serde(default)]
        meta: bool,
    },
    /// A rendered search result was clicked.
    ResultClicked { index: usize },
    /// The play/pause control was clicked.
    PlayClicked,
    /// The "Live" header button was clicked.
    LiveButtonClicked,
    /// The delayed autoplay scheduled by the live button elapsed.
    AutoplayTimerFired,
    /// An in-page anchor link was clicked.
    AnchorClicked { href: String },
    /// The fullscreen button was clicked.
    FullscreenClicked,
    /// The platform refused a fullscreen request.
    FullscreenFailed { reason: String },
    /// The platform entered or left fullscreen on its own.
    FullscreenChanged { active: bool },
}

/// Discriminant of [`UiEvent`], used as the dispatch table key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    PageLoaded,
    MenuToggleClicked,
    NavLinkClicked,
    Resized,
    SearchInputChanged,
    SearchButtonClicked,
    SearchKeyPressed,
    DocumentClicked,
    KeyDown,
    ResultClicked,
    PlayClicked,
    LiveButtonClicked,
    AutoplayTimerFired,
    AnchorClicked,
    FullscreenClicked,
    FullscreenFailed,
    FullscreenChanged,
}

impl UiEvent {
    /// Dispatch key of this event.
    pub fn kind(&self) -> EventKind {
        match self {
            Self::PageLoaded { .. } => EventKind::PageLoaded,
            Self::MenuToggleClicked => EventKind::MenuToggleClicked,
            Self::NavLinkClicked { .. } => EventKind::NavLinkClicked,
            Self::Resized { .. } => EventKind::Resized,
            Self::SearchInputChanged { .. } => EventKind::SearchInputChanged,
            Self::SearchButtonClicked => EventKind::SearchButtonClicked,
            Self::SearchKeyPressed { .. } => EventKind::SearchKeyPressed,
            Self::DocumentClicked { .. } => EventKind::DocumentClicked,
            Self::KeyDown { .. } => EventKind::KeyDown,
            Self::ResultClicked { .. } => EventKind::ResultClicked,
            Self::PlayClicked => EventKind::PlayClicked,
            Self::LiveButtonClicked => EventKind::LiveButtonClicked,
            Self::AutoplayTimerFired => EventKind::AutoplayTimerFired,
            Self::AnchorClicked { .. } => EventKind::AnchorClicked,
            Self::FullscreenClicked => EventKind::FullscreenClicked,
            Self::FullscreenFailed { .. } => EventKind::FullscreenFailed,
            Self::FullscreenChanged { .. } => EventKind::FullscreenChanged,
        }
    }
}

/// Work the host must carry out after an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "effect", rename_all = "snake_case")]
pub enum UiEffect {
    /// Suppress the browser's default action for the event.
    PreventDefault,
    /// Run a search for the given raw query.
    Search { query: String },
    /// Smooth-scroll to an element.
    Scroll(ScrollRequest),
    /// Follow a result link.
    Open(ClickAction),
    /// Give the search input keyboard focus.
    FocusSearch,
    /// Remove keyboard focus from the search input.
    BlurSearch,
    /// Enter or leave fullscreen.
    Fullscreen { request: FullscreenRequest },
    /// Set every frequency label to `text`.
    SetFrequencyLabels { text: String },
    /// Reveal content cards after the given delays, one per card.
    RevealCards { delays_ms: Vec<u64> },
    /// Deliver `event` back to the dispatcher after `after_ms`.
    Schedule { event: Box<UiEvent>, after_ms: u64 },
}

/// A dispatch table entry.
pub type Handler = fn(&mut SiteUiState, &UiEvent) -> Vec<UiEffect>;

/// Routes each [`UiEvent`] to the handler registered for its kind.
#[derive(Clone)]
pub struct Dispatcher {
    handlers: HashMap<EventKind, Handler>,
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("kinds", &self.handlers.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl Default for Dispatcher {
    /// Table wired with the site's standard behaviour.
    fn default() -> Self {
        let mut d = Self::empty();
        d.register(EventKind::PageLoaded, on_page_loaded);
        d.register(EventKind::MenuToggleClicked, on_menu_toggle);
        d.register(EventKind::NavLinkClicked, on_nav_link);
        d.register(EventKind::Resized, on_resize);
        d.register(EventKind::SearchInputChanged, on_search_input);
        d.register(EventKind::SearchButtonClicked, on_search_submit);
        d.register(EventKind::SearchKeyPressed, on_search_key);
        d.register(EventKind::DocumentClicked, on_document_click);
        d.register(EventKind::KeyDown, on_key_down);
        d.register(EventKind::ResultClicked, on_result_click);
        d.register(EventKind::PlayClicked, on_play);
        d.register(EventKind::LiveButtonClicked, on_live_button);
        d.register(EventKind::AutoplayTimerFired, on_autoplay);
        d.register(EventKind::AnchorClicked, on_anchor);
        d.register(EventKind::FullscreenClicked, on_fullscreen);
        d.register(EventKind::FullscreenFailed, on_fullscreen_failed);
        d.register(EventKind::FullscreenChanged, on_fullscreen_changed);
        d
    }
}

impl Dispatcher {
    /// A table with no handlers.
    pub fn empty() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Install `handler` for `kind`, replacing any previous one.
    pub fn register(&mut self, kind: EventKind, handler: Handler) {
        self.handlers.insert(kind, handler);
    }

    /// Run the handler for `event`. Unhandled events produce no effects.
    pub fn dispatch(&self, state: &mut SiteUiState, event: &UiEvent) -> Vec<UiEffect> {
        let kind = event.kind();
        match self.handlers.get(&kind) {
            Some(handler) => handler(state, event),
            None => {
                tracing::debug!(?kind, "no handler registered for event");
                Vec::new()
            }
        }
    }
}

fn on_page_loaded(state: &mut SiteUiState, event: &UiEvent) -> Vec<UiEffect> {
    let UiEvent::PageLoaded {
        path,
        element_ids,
        content_cards,
        video_placeholder,
    } = event
    else {
        return Vec::new();
    };

    state.nav.set_active_from_path(path);
    state.page.element_ids = element_ids.clone();
    state.page.content_cards = *content_cards;
    state.fullscreen = crate::ui::fullscreen::FullscreenState::new(*video_placeholder);

    let delays_ms = reveal_delays(*content_cards, state.card_reveal_step)
        .iter()
        .map(duration_ms)
        .collect();

    vec![
        UiEffect::SetFrequencyLabels {
            text: state.page.frequency.clone(),
        },
        UiEffect::RevealCards { delays_ms },
    ]
}

fn on_menu_toggle(state: &mut SiteUiState, _event: &UiEvent) -> Vec<UiEffect> {
    state.nav.toggle_menu();
    Vec::new()
}

fn on_nav_link(state: &mut SiteUiState, event: &UiEvent) -> Vec<UiEffect> {
    if let UiEvent::NavLinkClicked {
        href,
        viewport_width,
    } = event
    {
        state.nav.link_clicked(href, *viewport_width);
    }
    Vec::new()
}

fn on_resize(state: &mut SiteUiState, event: &UiEvent) -> Vec<UiEffect> {
    if let UiEvent::Resized { width } = event {
        state.nav.resized(*width);
    }
    Vec::new()
}

fn on_search_input(state: &mut SiteUiState, event: &UiEvent) -> Vec<UiEffect> {
    if let UiEvent::SearchInputChanged { value } = event {
        state.search_box.value.clone_from(value);
    }
    Vec::new()
}

fn on_search_submit(state: &mut SiteUiState, _event: &UiEvent) -> Vec<UiEffect> {
    vec![UiEffect::Search {
        query: state.search_box.value.clone(),
    }]
}

fn on_search_key(state: &mut SiteUiState, event: &UiEvent) -> Vec<UiEffect> {
    match event {
        UiEvent::SearchKeyPressed { key } if key == "Enter" => on_search_submit(state, event),
        _ => Vec::new(),
    }
}

fn on_document_click(state: &mut SiteUiState, event: &UiEvent) -> Vec<UiEffect> {
    if let UiEvent::DocumentClicked {
        inside_search: false,
    } = event
    {
        state.results.hide();
    }
    Vec::new()
}

fn on_key_down(state: &mut SiteUiState, event: &UiEvent) -> Vec<UiEffect> {
    let UiEvent::KeyDown { key, ctrl, meta } = event else {
        return Vec::new();
    };

    if (*ctrl || *meta) && key == "k" {
        state.search_box.focused = true;
        return vec![UiEffect::PreventDefault, UiEffect::FocusSearch];
    }
    if key == "Escape" {
        state.results.hide();
        state.search_box.focused = false;
        return vec![UiEffect::BlurSearch];
    }
    Vec::new()
}

fn on_result_click(state: &mut SiteUiState, event: &UiEvent) -> Vec<UiEffect> {
    let UiEvent::ResultClicked { index } = event else {
        return Vec::new();
    };
    state
        .results
        .snapshot()
        .click(*index)
        .map(UiEffect::Open)
        .into_iter()
        .collect()
}

fn on_play(state: &mut SiteUiState, _event: &UiEvent) -> Vec<UiEffect> {
    state.player.toggle();
    Vec::new()
}

fn on_live_button(state: &mut SiteUiState, _event: &UiEvent) -> Vec<UiEffect> {
    let mut effects = vec![UiEffect::PreventDefault];
    if let Some(scroll) = state.page.live_player_scroll() {
        effects.push(UiEffect::Scroll(scroll));
        effects.push(UiEffect::Schedule {
            event: Box::new(UiEvent::AutoplayTimerFired),
            after_ms: duration_ms(&state.autoplay_delay),
        });
    }
    effects
}

fn on_autoplay(state: &mut SiteUiState, _event: &UiEvent) -> Vec<UiEffect> {
    if !state.player.playing {
        state.player.start();
    }
    Vec::new()
}

fn on_anchor(state: &mut SiteUiState, event: &UiEvent) -> Vec<UiEffect> {
    let UiEvent::AnchorClicked { href } = event else {
        return Vec::new();
    };
    let mut effects = vec![UiEffect::PreventDefault];
    if let Some(scroll) = state.page.anchor_scroll(href) {
        effects.push(UiEffect::Scroll(scroll));
    }
    effects
}

fn on_fullscreen(state: &mut SiteUiState, _event: &UiEvent) -> Vec<UiEffect> {
    state
        .fullscreen
        .toggle()
        .map(|request| UiEffect::Fullscreen { request })
        .into_iter()
        .collect()
}

fn on_fullscreen_failed(state: &mut SiteUiState, event: &UiEvent) -> Vec<UiEffect> {
    if let UiEvent::FullscreenFailed { reason } = event {
        state.fullscreen.enter_failed(reason);
    }
    Vec::new()
}

fn on_fullscreen_changed(state: &mut SiteUiState, event: &UiEvent) -> Vec<UiEffect> {
    if let UiEvent::FullscreenChanged { active } = event {
        state.fullscreen.platform_changed(*active);
    }
    Vec::new()
}

fn duration_ms(d: &Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}
