//! ip6save - IPv6 ruleset snapshot tool
//!
//! Serializes the state of an IPv6 packet-filter ruleset into a
//! deterministic, human-readable text format that a companion restore tool
//! can re-ingest.
//!
//! # Architecture
//!
//! - [`core`] - Snapshot model, engine boundary, and the save-format writer
//! - [`config`] - Immutable run configuration built from the command line
//!
//! # Save format
//!
//! One block per table: a timestamped comment header, `*<table>`, every
//! chain declared (`:<chain> <POLICY> [<pcnt>:<bcnt>]`, or `- [0:0]` for
//! user-defined chains) before any rule line, the rules in engine order, a
//! `COMMIT` marker, and a timestamped completion comment. Declaring all
//! chain names ahead of the rules keeps jump targets resolvable when the
//! document is reloaded.

// Allow pedantic clippy warnings that are not worth fixing for this codebase
#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::missing_errors_doc)]

pub mod config;
pub mod core;

// Re-export commonly used types
pub use config::{OutputFormat, SaveConfig};
pub use core::error::{Error, Result};
pub use core::save::SaveWriter;
