//! Ruleset snapshot data structures
//!
//! This module defines the read-only view of an IPv6 packet-filter ruleset
//! that the save-format writer traverses: tables owning ordered chains,
//! chains owning ordered rules, plus the policy and counter attributes the
//! save format declares.
//!
//! Everything here is plain data materialized by an engine at open time (see
//! [`crate::core::engine`]); nothing holds a live kernel resource.

use std::fmt;

/// Maximum accepted length of a table name, in bytes.
///
/// Matches the kernel's fixed-size table name buffer; listing entries longer
/// than this are malformed.
pub const TABLE_NAME_MAX: usize = 32;

/// Default policy of a built-in chain, applied when traversal falls through.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::AsRefStr,
)]
pub enum Policy {
    /// Let the packet through
    #[strum(serialize = "ACCEPT")]
    Accept,
    /// Discard the packet silently
    #[strum(serialize = "DROP")]
    Drop,
}

impl Policy {
    /// Returns the textual policy name used in chain declarations
    pub const fn as_str(self) -> &'static str {
        match self {
            Policy::Accept => "ACCEPT",
            Policy::Drop => "DROP",
        }
    }
}

/// Cumulative packet and byte counts for a chain policy or a single rule.
///
/// Displays in the save format's bracketed form, e.g. `[10:840]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Counters {
    pub packets: u64,
    pub bytes: u64,
}

impl Counters {
    pub const fn new(packets: u64, bytes: u64) -> Self {
        Self { packets, bytes }
    }
}

impl fmt::Display for Counters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}:{}]", self.packets, self.bytes)
    }
}

/// A single rule: an opaque canonical match/target specification plus its
/// traffic counters.
///
/// The spec text is everything after `-A <chain> ` in the canonical flag
/// syntax, e.g. `-p tcp --dport 80 -j ACCEPT`. It is rendered, never
/// interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub spec: String,
    pub counters: Counters,
}

impl Rule {
    pub fn new(spec: impl Into<String>, counters: Counters) -> Self {
        Self {
            spec: spec.into(),
            counters,
        }
    }
}

/// Whether a chain is built into the table or user-defined.
///
/// Only built-in chains carry a default policy and policy counters; a
/// user-defined chain declares the literal `-` policy with zero counters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChainKind {
    Builtin { policy: Policy, counters: Counters },
    User,
}

/// An ordered list of rules within a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chain {
    pub name: String,
    pub kind: ChainKind,
    pub rules: Vec<Rule>,
}

impl Chain {
    /// Creates a built-in chain with its default policy and policy counters
    pub fn builtin(name: impl Into<String>, policy: Policy, counters: Counters) -> Self {
        Self {
            name: name.into(),
            kind: ChainKind::Builtin { policy, counters },
            rules: Vec::new(),
        }
    }

    /// Creates a user-defined chain
    pub fn user(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ChainKind::User,
            rules: Vec::new(),
        }
    }

    pub fn is_builtin(&self) -> bool {
        matches!(self.kind, ChainKind::Builtin { .. })
    }
}

/// One table's chains, materialized in the engine's native iteration order.
///
/// The order of `chains` is significant: the writer's declaration pass and
/// rule pass both follow it, which is what keeps jump targets declared
/// before any rule that references them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub name: String,
    pub chains: Vec<Chain>,
}

impl Table {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            chains: Vec::new(),
        }
    }

    /// Total number of rules across all chains
    pub fn rule_count(&self) -> usize {
        self.chains.iter().map(|c| c.rules.len()).sum()
    }
}
