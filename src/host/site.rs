//! Event loop glue between the page and the site core.
//!
//! [`SiteHost`] owns the UI state, the dispatch table, and the search
//! controller. Each incoming [`UiEvent`] is dispatched synchronously; the
//! resulting effects that need time (searches, scheduled timers) are spawned
//! on a [`TaskTracker`] and report back through the outbound channel.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use etya_search::{LocalIndex, WebLookup};
use serde::Serialize;
use tokio::sync::mpsc;
use tokio_util::task::TaskTracker;

use crate::config::SiteConfig;
use crate::events::{Dispatcher, EventKind, UiEffect, UiEvent};
use crate::search::{SearchController, SearchStart, SearchStatus};
use crate::ui::results_panel::SharedPanel;
use crate::ui::{SiteUiState, UiSnapshot};

/// One outbound message to the page.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Envelope {
    /// An event was dispatched.
    Effects {
        /// Kind of the dispatched event.
        event: EventKind,
        /// Effects the page should apply.
        effects: Vec<UiEffect>,
        /// UI state after the event.
        state: UiSnapshot,
    },
    /// The loading indicator went up for a search.
    SearchStarted {
        /// Raw query as submitted.
        query: String,
        /// Generation number; the matching `search_finished` carries it in
        /// its outcome.
        generation: u64,
        /// UI state with the loading indicator (or hidden panel).
        state: UiSnapshot,
    },
    /// A search completed.
    SearchFinished {
        /// Raw query as submitted.
        query: String,
        /// How the search ended.
        outcome: SearchStatus,
        /// Results panel body as HTML.
        results_html: String,
        /// UI state after rendering.
        state: UiSnapshot,
    },
    /// An inbound line could not be processed.
    Error {
        /// Human-readable reason.
        message: String,
    },
}

/// Site core driven by UI events.
pub struct SiteHost<W: WebLookup> {
    state: Mutex<SiteUiState>,
    dispatcher: Dispatcher,
    controller: SearchController<W>,
    tasks: TaskTracker,
    outbound: Mutex<Option<mpsc::UnboundedSender<Envelope>>>,
}

impl<W: WebLookup + 'static> SiteHost<W> {
    /// Build a host for `config` using `engine` for web lookups.
    ///
    /// Returns the host and the receiving end of its outbound channel.
    pub fn new(config: &SiteConfig, engine: W) -> (Arc<Self>, mpsc::UnboundedReceiver<Envelope>) {
        Self::with_dispatcher(config, engine, Dispatcher::default())
    }

    /// Like [`SiteHost::new`] with a custom dispatch table.
    pub fn with_dispatcher(
        config: &SiteConfig,
        engine: W,
        dispatcher: Dispatcher,
    ) -> (Arc<Self>, mpsc::UnboundedReceiver<Envelope>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let panel = SharedPanel::new();
        let controller = SearchController::new(
            engine,
            LocalIndex::default(),
            config.search.to_search_config(),
            config.search.failure_policy,
            panel.clone(),
        );
        let host = Arc::new(Self {
            state: Mutex::new(SiteUiState::new(config, panel)),
            dispatcher,
            controller,
            tasks: TaskTracker::new(),
            outbound: Mutex::new(Some(tx)),
        });
        (host, rx)
    }

    /// Current UI state.
    pub fn snapshot(&self) -> UiSnapshot {
        self.lock_state().snapshot()
    }

    /// The search controller.
    pub fn controller(&self) -> &SearchController<W> {
        &self.controller
    }

    /// Dispatch `event`, start any follow-up work, and report the effects.
    pub fn handle_event(self: &Arc<Self>, event: UiEvent) {
        let kind = event.kind();
        let (effects, state) = {
            let mut state = self.lock_state();
            let effects = self.dispatcher.dispatch(&mut state, &event);
            (effects, state.snapshot())
        };

        self.send(Envelope::Effects {
            event: kind,
            effects: effects.clone(),
            state,
        });

        for effect in effects {
            match effect {
                UiEffect::Search { query } => self.spawn_search(query),
                UiEffect::Schedule { event, after_ms } => {
                    self.spawn_timer(*event, Duration::from_millis(after_ms));
                }
                _ => {}
            }
        }
    }

    /// Report a malformed inbound message.
    pub fn report_error(&self, message: impl Into<String>) {
        self.send(Envelope::Error {
            message: message.into(),
        });
    }

    /// Wait for all spawned work to finish, then close the outbound channel.
    pub async fn drain(&self) {
        self.tasks.close();
        self.tasks.wait().await;
        self.outbound
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
    }

    fn spawn_search(self: &Arc<Self>, query: String) {
        let pending = match self.controller.begin(&query) {
            SearchStart::Cleared(outcome) => {
                self.report_search(query, outcome);
                return;
            }
            SearchStart::Loading(pending) => pending,
        };
        self.send(Envelope::SearchStarted {
            query: query.clone(),
            generation: pending.generation(),
            state: self.snapshot(),
        });

        let host = Arc::clone(self);
        self.tasks.spawn(async move {
            let outcome = host.controller.finish(pending).await;
            host.report_search(query, outcome);
        });
    }

    fn report_search(&self, query: String, outcome: SearchStatus) {
        let results_html = self.controller.panel().snapshot().to_html();
        self.send(Envelope::SearchFinished {
            query,
            outcome,
            results_html,
            state: self.snapshot(),
        });
    }

    fn spawn_timer(self: &Arc<Self>, event: UiEvent, delay: Duration) {
        let host = Arc::clone(self);
        self.tasks.spawn(async move {
            tokio::time::sleep(delay).await;
            host.handle_event(event);
        });
    }

    fn send(&self, envelope: Envelope) {
        let outbound = self.outbound.lock().unwrap_or_else(PoisonError::into_inner);
        match outbound.as_ref() {
            Some(tx) => {
                if tx.send(envelope).is_err() {
                    tracing::debug!("outbound receiver dropped; envelope discarded");
                }
            }
            None => tracing::debug!("outbound channel closed; envelope discarded"),
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, SiteUiState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use etya_search::{ContentRecord, SearchError};

    struct NoWeb;

    impl WebLookup for NoWeb {
        async fn lookup(&self, _query: &str) -> Result<Vec<ContentRecord>, SearchError> {
            Ok(Vec::new())
        }

        fn name(&self) -> &'static str {
            "no-web"
        }
    }

    #[tokio::test]
    async fn handle_event_reports_effects_with_state() {
        let (host, mut rx) = SiteHost::new(&SiteConfig::default(), NoWeb);
        host.handle_event(UiEvent::PlayClicked);

        let Some(Envelope::Effects { event, effects, state }) = rx.recv().await else {
            panic!("expected effects envelope");
        };
        assert_eq!(event, EventKind::PlayClicked);
        assert!(effects.is_empty());
        assert!(state.player.playing);
    }

    #[tokio::test]
    async fn drain_waits_for_search_then_closes_channel() {
        let (host, mut rx) = SiteHost::new(&SiteConfig::default(), NoWeb);
        host.handle_event(UiEvent::SearchInputChanged {
            value: "economic".into(),
        });
        host.handle_event(UiEvent::SearchButtonClicked);
        host.drain().await;

        let mut kinds = Vec::new();
        while let Some(envelope) = rx.recv().await {
            kinds.push(match envelope {
                Envelope::Effects { .. } => "effects",
                Envelope::SearchStarted { .. } => "search_started",
                Envelope::SearchFinished { outcome, .. } => {
                    assert_eq!(
                        outcome,
                        SearchStatus::Rendered {
                            generation: 1,
                            count: 1
                        }
                    );
                    "search_finished"
                }
                Envelope::Error { .. } => "error",
            });
        }
        assert_eq!(
            kinds,
            ["effects", "effects", "search_started", "search_finished"]
        );
    }

    #[tokio::test]
    async fn report_error_after_drain_is_discarded() {
        let (host, mut rx) = SiteHost::new(&SiteConfig::default(), NoWeb);
        host.drain().await;
        host.report_error("late");
        assert!(rx.recv().await.is_none());
    }
}
