//! Web lookup implementations.
//!
//! Each module provides a struct implementing [`crate::engine::WebLookup`]
//! for one external answer service.

pub mod duckduckgo;

pub use duckduckgo::DuckDuckGoEngine;
