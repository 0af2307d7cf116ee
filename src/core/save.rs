//! Save-format writer: the ruleset traversal and serialization core.
//!
//! Assembles table enumeration, chain walking and rule rendering into the
//! line-oriented save document a companion restore tool re-ingests:
//!
//! ```text
//! # Generated by ip6save v0.9.0 on Thu Aug  6 12:00:00 2026
//! *filter
//! :INPUT ACCEPT [10:840]
//! :LOGDROP - [0:0]
//! -A INPUT -p tcp --dport 80 -j ACCEPT
//! COMMIT
//! # Completed on Thu Aug  6 12:00:00 2026
//! ```
//!
//! Output is streamed to the writer as it is produced, one table block at a
//! time; a failure mid-run leaves already-flushed text in place.

use std::io::Write;

use chrono::Local;
use tracing::{debug, info};

use crate::config::{OutputFormat, SaveConfig};
use crate::core::engine::{RulesetEngine, TableSource};
use crate::core::error::{Error, Result};
use crate::core::model::{ChainKind, Table};
use crate::core::render::RuleRenderer;

/// Generator identity stamped into the header comment
const GENERATOR: &str = concat!("ip6save v", env!("CARGO_PKG_VERSION"));

/// ctime(3)-compatible timestamp layout, e.g. `Thu Aug  6 12:00:00 2026`
const CTIME_FORMAT: &str = "%a %b %e %H:%M:%S %Y";

/// Serializes ruleset state into the save format.
///
/// Holds the collaborating engine and renderer plus the immutable run
/// configuration; one value serves any number of `save` calls.
pub struct SaveWriter<'a> {
    engine: &'a dyn RulesetEngine,
    renderer: &'a dyn RuleRenderer,
    config: &'a SaveConfig,
}

impl<'a> SaveWriter<'a> {
    pub fn new(
        engine: &'a dyn RulesetEngine,
        renderer: &'a dyn RuleRenderer,
        config: &'a SaveConfig,
    ) -> Self {
        Self {
            engine,
            renderer,
            config,
        }
    }

    /// Writes one save document covering the configured table selection.
    ///
    /// With a table requested, exactly that table is serialized; otherwise
    /// every table the source enumerates becomes an independent block, in
    /// enumeration order.
    ///
    /// # Errors
    ///
    /// Fails before emitting anything when binary output is selected or the
    /// table enumeration is unavailable; fails mid-stream when a table
    /// cannot be opened or the output writer reports an error. Nothing is
    /// retried and already-written text is not retracted.
    pub fn save<W: Write>(&self, source: &dyn TableSource, out: &mut W) -> Result<()> {
        if self.config.format == OutputFormat::Binary {
            return Err(Error::BinaryUnsupported);
        }

        let tables = self.enumerate(source)?;
        debug!("serializing {} table(s)", tables.len());

        for name in &tables {
            let table = self.engine.open(name)?;
            self.write_table(&table, out)?;
        }
        out.flush()?;

        info!("saved {} table(s)", tables.len());
        Ok(())
    }

    /// Yields the requested table name unchecked, or every enumerated one.
    ///
    /// Existence of a requested table is validated downstream when it is
    /// opened.
    fn enumerate(&self, source: &dyn TableSource) -> Result<Vec<String>> {
        match &self.config.table {
            Some(name) => Ok(vec![name.clone()]),
            None => source.table_names(),
        }
    }

    /// Emits one complete table block: header, declarations, rules, COMMIT.
    fn write_table<W: Write>(&self, table: &Table, out: &mut W) -> Result<()> {
        let now = Local::now();
        writeln!(
            out,
            "# Generated by {GENERATOR} on {}",
            now.format(CTIME_FORMAT)
        )?;
        writeln!(out, "*{}", table.name)?;

        // Dump out chain names first, thereby preventing dependency
        // conflicts: a rule may jump to a chain the walk has not reached yet.
        for chain in &table.chains {
            match &chain.kind {
                ChainKind::Builtin { policy, counters } => {
                    writeln!(out, ":{} {} {counters}", chain.name, policy.as_str())?;
                }
                // A user-defined chain has no policy, and no policy counters
                // to go with one
                ChainKind::User => writeln!(out, ":{} - [0:0]", chain.name)?,
            }
        }

        // Second pass over the same cached chain order: the rules
        for chain in &table.chains {
            for rule in &chain.rules {
                let line = self
                    .renderer
                    .render(rule, &chain.name, self.config.counters);
                writeln!(out, "{line}")?;
            }
        }

        writeln!(out, "COMMIT")?;
        let done = Local::now();
        writeln!(out, "# Completed on {}", done.format(CTIME_FORMAT))?;
        Ok(())
    }
}
