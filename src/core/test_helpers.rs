//! Shared test utilities for core module tests
//!
//! Provides common fixture builders to avoid duplication across test suites.
//! This module is only compiled in test mode.

use crate::core::engine::MemoryEngine;
use crate::core::model::{Chain, Counters, Policy, Rule, Table};

/// Creates a rule from its canonical spec text and counters
pub fn rule(spec: &str, packets: u64, bytes: u64) -> Rule {
    Rule::new(spec, Counters::new(packets, bytes))
}

/// Creates a built-in chain with policy counters and rules
pub fn builtin(name: &str, policy: Policy, packets: u64, bytes: u64, rules: Vec<Rule>) -> Chain {
    let mut chain = Chain::builtin(name, policy, Counters::new(packets, bytes));
    chain.rules = rules;
    chain
}

/// Creates a user-defined chain with rules
pub fn user(name: &str, rules: Vec<Rule>) -> Chain {
    let mut chain = Chain::user(name);
    chain.rules = rules;
    chain
}

/// Creates a table from pre-built chains
pub fn table(name: &str, chains: Vec<Chain>) -> Table {
    let mut table = Table::new(name);
    table.chains = chains;
    table
}

/// Creates the canonical test table: a `filter` table with one built-in
/// chain carrying one rule.
///
/// Mirrors the documented example scenario, so tests asserting on its
/// serialized form read against a familiar shape.
pub fn example_filter_table() -> Table {
    table(
        "filter",
        vec![builtin(
            "INPUT",
            Policy::Accept,
            10,
            840,
            vec![rule("-p tcp --dport 80 -j ACCEPT", 3, 204)],
        )],
    )
}

/// Creates an engine holding only [`example_filter_table`]
pub fn example_engine() -> MemoryEngine {
    MemoryEngine::new().with_table(example_filter_table())
}

/// Strips the timestamped comment lines from a save document, leaving the
/// deterministic chain/rule payload
pub fn without_comments(document: &str) -> String {
    document
        .lines()
        .filter(|line| !line.starts_with('#'))
        .collect::<Vec<_>>()
        .join("\n")
}
