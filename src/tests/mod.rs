//! Test modules for newsprint.
//!
//! This module contains testing infrastructure shared across components:
//! - Unit tests that span several modules
//! - Property-based tests using proptest
//! - Test fixtures and utilities

pub mod trie_property_tests;
