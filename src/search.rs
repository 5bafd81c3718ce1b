//! Search controller: drives one search from query to rendered panel.
//!
//! Every call to [`SearchController::search`] takes a new generation
//! number. When the web lookup returns, the result is rendered only if no
//! newer search has started in the meantime; otherwise it is dropped. This
//! makes the panel reflect the most recently *started* search, whatever
//! order the responses arrive in.

use std::sync::atomic::{AtomicU64, Ordering};

use etya_search::orchestrator::{merge_results, orchestrate_search};
use etya_search::{LocalIndex, Query, SearchConfig, WebLookup};
use serde::{Deserialize, Serialize};

use crate::config::FailurePolicy;
use crate::ui::results_panel::{ResultsPanel, SharedPanel};

/// How a search call ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SearchStatus {
    /// The query was blank; the panel was hidden.
    Cleared { generation: u64 },
    /// Results (possibly none) were rendered.
    Rendered { generation: u64, count: usize },
    /// The web lookup failed and the unavailable card was shown.
    Unavailable { generation: u64 },
    /// A newer search started first; nothing was rendered.
    Stale { generation: u64 },
}

impl SearchStatus {
    /// Generation number of the search.
    pub fn generation(&self) -> u64 {
        match *self {
            Self::Cleared { generation }
            | Self::Rendered { generation, .. }
            | Self::Unavailable { generation }
            | Self::Stale { generation } => generation,
        }
    }
}

/// Owns the search pipeline and writes its output to the results panel.
pub struct SearchController<W: WebLookup> {
    engine: W,
    index: LocalIndex,
    config: SearchConfig,
    policy: FailurePolicy,
    panel: SharedPanel,
    generation: AtomicU64,
}

impl<W: WebLookup> SearchController<W> {
    /// Create a controller rendering into `panel`.
    pub fn new(
        engine: W,
        index: LocalIndex,
        config: SearchConfig,
        policy: FailurePolicy,
        panel: SharedPanel,
    ) -> Self {
        Self {
            engine,
            index,
            config,
            policy,
            panel,
            generation: AtomicU64::new(0),
        }
    }

    /// The panel this controller renders into.
    pub fn panel(&self) -> &SharedPanel {
        &self.panel
    }

    /// Generation number of the most recently started search.
    pub fn latest_generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Run a search for `raw` and render the outcome.
    ///
    /// 1. Blank query: hide the panel and return without any lookup
    /// 2. Show the loading indicator
    /// 3. Match local content and query the web backend
    /// 4. Unless a newer search has started, render local matches followed
    ///    by web records, or the unavailable card if the web lookup failed
    pub async fn search(&self, raw: &str) -> SearchStatus {
        match self.begin(raw) {
            SearchStart::Cleared(status) => status,
            SearchStart::Loading(pending) => self.finish(pending).await,
        }
    }

    /// First half of [`SearchController::search`]: take a generation and
    /// either hide the panel or put up the loading indicator.
    pub fn begin(&self, raw: &str) -> SearchStart {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let Some(query) = Query::parse(raw) else {
            self.panel.hide();
            tracing::debug!(generation, "blank query; results hidden");
            return SearchStart::Cleared(SearchStatus::Cleared { generation });
        };

        tracing::trace!(%query, generation, "search started");
        self.panel.update(ResultsPanel::show_loading);
        SearchStart::Loading(PendingSearch { query, generation })
    }

    /// Second half of [`SearchController::search`]: run the lookup and
    /// render its outcome unless the search went stale.
    pub async fn finish(&self, pending: PendingSearch) -> SearchStatus {
        let PendingSearch { query, generation } = pending;
        let outcome = orchestrate_search(&query, &self.index, &self.engine, &self.config).await;

        self.panel.update(|panel| {
            if self.latest_generation() != generation {
                tracing::debug!(generation, "discarding stale search response");
                return SearchStatus::Stale { generation };
            }

            match (outcome.web, self.policy) {
                (Ok(web), _) => {
                    let results = merge_results(outcome.local, web);
                    panel.render(&results);
                    SearchStatus::Rendered {
                        generation,
                        count: results.len(),
                    }
                }
                (Err(err), FailurePolicy::KeepLocal) if !outcome.local.is_empty() => {
                    tracing::debug!(generation, error = %err, "web lookup failed; showing local matches only");
                    panel.render(&outcome.local);
                    SearchStatus::Rendered {
                        generation,
                        count: outcome.local.len(),
                    }
                }
                (Err(err), _) => {
                    tracing::debug!(generation, error = %err, "web lookup failed; showing unavailable card");
                    panel.show_unavailable();
                    SearchStatus::Unavailable { generation }
                }
            }
        })
    }
}

/// Result of [`SearchController::begin`].
#[derive(Debug)]
pub enum SearchStart {
    /// Blank query; the search is already over.
    Cleared(SearchStatus),
    /// Loading indicator is up; pass to [`SearchController::finish`].
    Loading(PendingSearch),
}

/// A search whose loading indicator is showing.
#[derive(Debug)]
pub struct PendingSearch {
    query: Query,
    generation: u64,
}

impl PendingSearch {
    /// Generation number assigned to this search.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}
