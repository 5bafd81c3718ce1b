//! Headless host integration: event loop and stdio JSON bridge.

pub mod site;
pub mod stdio;

pub use site::{Envelope, SiteHost};
