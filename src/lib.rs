//! Newsprint Library
//!
//! Restores corrupted or abbreviated words in newspaper text. Wildcarded
//! fragments such as `c*t` are matched against a dictionary of known words,
//! each weighted by how often it was observed, and rewritten either as every
//! candidate or as the most frequent one with the original capitalisation.
//!
//! # Architecture
//!
//! - `data_structures` holds the frequency trie every query runs against
//! - `restoration` builds case projection, confidence scoring, keyword files
//!   and the line-oriented restoration driver on top of it
//! - `session` is the single-owner command surface used by the CLI
//! - `config` and `error` carry settings and failures across all of them

pub mod config;
pub mod data_structures;
pub mod error;
pub mod restoration;
pub mod session;

// Internal modules that are not part of the public API
#[cfg(test)]
pub(crate) mod tests;

/// Version information for newsprint.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library initialization function
///
/// Routes errors reported at operation boundaries through `tracing`.
pub fn init() {
    error::set_error_reporter(std::sync::Arc::new(error::TracingErrorReporter));
}
