//! Boundary to the external ruleset-query engine, abstracted for testability.
//!
//! Defines the [`RulesetEngine`] trait the save-format writer drives, and the
//! [`TableSource`] trait that enumerates which tables exist. Production code
//! uses [`crate::core::ip6t::Ip6tablesEngine`] and [`ProcTableSource`]; tests
//! (and embedders) use the stateful [`MemoryEngine`].

use std::path::PathBuf;

use crate::core::error::{Error, Result};
use crate::core::model::{Table, TABLE_NAME_MAX};

/// Abstraction over the engine that owns tables, chains and rules.
///
/// `open` materializes a full snapshot of one table: chain names in the
/// engine's native iteration order, each chain's builtin status, policy and
/// policy counters, and each chain's rules in native order. Materializing up
/// front makes the writer's two chain passes iterate an identical cached
/// sequence even if the underlying engine cursor is single-direction.
///
/// Engine-held resources must not outlive the call: a successful `open`
/// returns plain data and nothing is left to close.
pub trait RulesetEngine {
    /// Opens a snapshot of the named table.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Engine`] carrying the engine's own error text when
    /// the table cannot be opened. This is fatal for the whole run, not just
    /// for that table.
    fn open(&self, table: &str) -> Result<Table>;
}

/// Source of the table names available for enumeration.
pub trait TableSource {
    /// Lists every table currently registered, in the source's order.
    ///
    /// No sort is imposed; the source's order is authoritative for one run.
    ///
    /// # Errors
    ///
    /// Returns an error when the source is unavailable or malformed. Fatal
    /// for the whole run; no partial output is produced.
    fn table_names(&self) -> Result<Vec<String>>;
}

/// Table-name source backed by the kernel's line-oriented listing at
/// `/proc/net/ip6_tables_names`.
///
/// Every entry must be newline-terminated and at most [`TABLE_NAME_MAX`]
/// bytes; anything else is a malformed listing and fatal.
#[derive(Debug, Clone)]
pub struct ProcTableSource {
    path: PathBuf,
}

impl ProcTableSource {
    pub const DEFAULT_PATH: &'static str = "/proc/net/ip6_tables_names";

    pub fn new() -> Self {
        Self::with_path(Self::DEFAULT_PATH)
    }

    /// Uses an alternate listing path (tests point this at a fixture file)
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Default for ProcTableSource {
    fn default() -> Self {
        Self::new()
    }
}

impl TableSource for ProcTableSource {
    fn table_names(&self) -> Result<Vec<String>> {
        let raw = std::fs::read_to_string(&self.path).map_err(|e| Error::TableListing {
            path: self.path.display().to_string(),
            reason: e.to_string(),
        })?;

        let mut names = Vec::new();
        let mut rest = raw.as_str();
        while !rest.is_empty() {
            let Some((name, tail)) = rest.split_once('\n') else {
                // Trailing entry without its newline terminator
                return Err(Error::MalformedTableName(rest.to_string()));
            };
            if name.is_empty() || name.len() > TABLE_NAME_MAX {
                return Err(Error::MalformedTableName(name.to_string()));
            }
            names.push(name.to_string());
            rest = tail;
        }
        Ok(names)
    }
}

/// Fixed in-memory engine holding pre-built table snapshots.
///
/// Doubles as its own [`TableSource`], enumerating tables in registration
/// order. Used by the test suite as the stateful mock engine, and usable by
/// embedders that already hold a materialized ruleset.
#[derive(Debug, Clone, Default)]
pub struct MemoryEngine {
    tables: Vec<Table>,
}

impl MemoryEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a table; enumeration preserves registration order
    pub fn insert(&mut self, table: Table) {
        self.tables.push(table);
    }

    /// Builder-style registration for test fixtures
    #[must_use]
    pub fn with_table(mut self, table: Table) -> Self {
        self.insert(table);
        self
    }
}

impl RulesetEngine for MemoryEngine {
    fn open(&self, table: &str) -> Result<Table> {
        self.tables
            .iter()
            .find(|t| t.name == table)
            .cloned()
            .ok_or_else(|| Error::Engine {
                message: format!("Table '{table}' does not exist"),
            })
    }
}

impl TableSource for MemoryEngine {
    fn table_names(&self) -> Result<Vec<String>> {
        Ok(self.tables.iter().map(|t| t.name.clone()).collect())
    }
}
