//! Search orchestrator: local scan, web lookup, merge.
//!
//! The local index is scanned synchronously, the web backend is queried
//! under a timeout, and the two result sets are concatenated with local
//! matches first.

pub mod search;

pub use search::{merge_results, orchestrate_search, SearchOutcome};
