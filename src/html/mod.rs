//! Embedded HTML served by the web UI.
//!
//! Kept as `&'static str` so the binary has no runtime asset lookups.

pub mod index;

pub use index::INDEX_HTML;
