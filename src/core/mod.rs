//! Core save functionality
//!
//! This module contains the core types and logic for serializing an IPv6
//! packet-filter ruleset into its restorable text form. It provides:
//!
//! - [`model`]: Read-only snapshot data structures (tables, chains, rules)
//! - [`engine`]: Trait boundary to the ruleset-query engine, plus the
//!   `/proc` table-name source and an in-memory engine
//! - [`ip6t`]: Production engine backed by the `ip6tables` command
//! - [`render`]: Per-rule rendering boundary and the default flag renderer
//! - [`save`]: The save-format writer
//! - [`error`]: Error types for save operations

pub mod engine;
pub mod error;
pub mod ip6t;
pub mod model;
pub mod render;
pub mod save;

#[cfg(test)]
pub mod test_helpers;
