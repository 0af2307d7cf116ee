//! Production ruleset engine backed by the system `ip6tables` command.
//!
//! Opening a table spawns one `ip6tables -w -t <table> -S -v` listing and
//! parses it into a materialized [`Table`] snapshot: `-P` lines declare
//! built-in chains with their policy and policy counters, `-N` lines declare
//! user-defined chains, and `-A` lines append rules (with their counters
//! trailing as `-c <packets> <bytes>`). The child process is reaped before
//! `open` returns, so the snapshot holds no live engine resource.

use std::path::PathBuf;
use std::process::Command;
use std::str::FromStr;

use tracing::{debug, info};

use crate::core::error::{Error, Result};
use crate::core::model::{Chain, Counters, Policy, Rule, Table};
use crate::core::engine::RulesetEngine;

/// Engine that queries the kernel through the `ip6tables` binary.
#[derive(Debug, Clone)]
pub struct Ip6tablesEngine {
    program: PathBuf,
}

impl Ip6tablesEngine {
    pub fn new() -> Self {
        Self::with_program("ip6tables")
    }

    /// Uses an alternate engine executable (tests point this at a mock)
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for Ip6tablesEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl RulesetEngine for Ip6tablesEngine {
    fn open(&self, table: &str) -> Result<Table> {
        debug!("querying {} for table {table}", self.program.display());

        // -w waits for the xtables lock instead of failing on contention
        let output = Command::new(&self.program)
            .args(["-w", "-t", table, "-S", "-v"])
            .output()
            .map_err(|e| Error::Engine {
                message: format!("failed to run {}: {e}", self.program.display()),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let message = match stderr.trim() {
                "" => format!("{} exited with {}", self.program.display(), output.status),
                text => text.to_string(),
            };
            return Err(Error::Engine { message });
        }

        let listing = String::from_utf8_lossy(&output.stdout);
        let snapshot = parse_listing(table, &listing)?;
        info!(
            "opened table {table}: {} chains, {} rules",
            snapshot.chains.len(),
            snapshot.rule_count()
        );
        Ok(snapshot)
    }
}

/// Parses one `-S -v` listing into a table snapshot.
///
/// The listing declares every chain (`-P`, `-N`) before any rule that lives
/// in it; a rule line naming an undeclared chain means the engine output is
/// inconsistent and the whole open fails.
fn parse_listing(table: &str, listing: &str) -> Result<Table> {
    let mut snapshot = Table::new(table);

    for line in listing.lines() {
        let line = line.trim_end();
        if line.is_empty() {
            continue;
        }

        if let Some(rest) = line.strip_prefix("-P ") {
            snapshot.chains.push(parse_policy_line(line, rest)?);
        } else if let Some(name) = line.strip_prefix("-N ") {
            snapshot.chains.push(Chain::user(name));
        } else if let Some(rest) = line.strip_prefix("-A ") {
            let (chain_name, spec, counters) = parse_rule_line(rest);
            let chain = snapshot
                .chains
                .iter_mut()
                .find(|c| c.name == chain_name)
                .ok_or_else(|| Error::Engine {
                    message: format!("rule references undeclared chain '{chain_name}': {line}"),
                })?;
            chain.rules.push(Rule::new(spec, counters));
        } else {
            return Err(Error::Engine {
                message: format!("unrecognized listing line: {line}"),
            });
        }
    }

    Ok(snapshot)
}

/// Parses `<chain> <POLICY> [-c <packets> <bytes>]` after a `-P` prefix
fn parse_policy_line(line: &str, rest: &str) -> Result<Chain> {
    let mut tokens = rest.split_whitespace();
    let (Some(name), Some(policy)) = (tokens.next(), tokens.next()) else {
        return Err(Error::Engine {
            message: format!("truncated policy line: {line}"),
        });
    };
    let policy = Policy::from_str(policy).map_err(|_| Error::Engine {
        message: format!("unknown chain policy '{policy}': {line}"),
    })?;

    // Policy counters trail as `-c <packets> <bytes>` under verbose listing;
    // a non-verbose engine omits them, which reads as a fresh chain.
    let counters = match (tokens.next(), tokens.next(), tokens.next()) {
        (None, _, _) => Counters::default(),
        (Some("-c"), Some(packets), Some(bytes)) => parse_counters(line, packets, bytes)?,
        _ => {
            return Err(Error::Engine {
                message: format!("malformed policy counters: {line}"),
            });
        }
    };

    Ok(Chain::builtin(name, policy, counters))
}

/// Parses `<chain> <spec...> [-c <packets> <bytes>]` after an `-A` prefix,
/// returning the chain name, the bare rule spec, and its counters
fn parse_rule_line(rest: &str) -> (String, String, Counters) {
    // A rule with no matches and no target lists as a bare `-A <chain>`
    let (chain_name, spec) = rest.split_once(' ').unwrap_or((rest, ""));

    let (spec, counters) =
        split_trailing_counters(spec).unwrap_or((spec, Counters::default()));

    (chain_name.to_string(), spec.to_string(), counters)
}

/// Splits a trailing ` -c <packets> <bytes>` suffix off a rule spec
fn split_trailing_counters(spec: &str) -> Option<(&str, Counters)> {
    // A matchless rule's listing is nothing but its counters
    let (head, tail) = if let Some(at) = spec.rfind(" -c ") {
        (&spec[..at], &spec[at + " -c ".len()..])
    } else if let Some(tail) = spec.strip_prefix("-c ") {
        ("", tail)
    } else {
        return None;
    };
    let mut tokens = tail.split_whitespace();
    let (Some(packets), Some(bytes), None) = (tokens.next(), tokens.next(), tokens.next()) else {
        return None;
    };
    let counters = parse_counters(spec, packets, bytes).ok()?;
    Some((head, counters))
}

fn parse_counters(line: &str, packets: &str, bytes: &str) -> Result<Counters> {
    let parse = |token: &str| {
        token.parse::<u64>().map_err(|_| Error::Engine {
            message: format!("malformed counter '{token}': {line}"),
        })
    };
    Ok(Counters::new(parse(packets)?, parse(bytes)?))
}
