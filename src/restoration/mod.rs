//! Restoration of defective newspaper text.
//!
//! Components, leaves first:
//! - [`case`] re-applies a token's capitalisation to its replacement
//! - [`confidence`] turns candidate frequencies into percentages
//! - [`keywords`] loads and exports the word dictionary
//! - [`driver`] rewrites lines of defect text, writing into a [`sink`]

pub mod case;
pub mod confidence;
pub mod driver;
pub mod files;
pub mod keywords;
pub mod sink;

pub use case::apply_case;
pub use confidence::{ConfidenceError, ConfidenceScorer, ScoredCandidate};
pub use driver::{RestorationDriver, RestorationMode, RestorationSummary};
pub use keywords::{load_keywords_file, write_keywords_file, write_tree_file, LoadReport};
pub use sink::{ConsoleSink, FileSink, LineSink};
