//! Per-rule textual rendering boundary.
//!
//! The save-format writer does not interpret rules; it hands each one to a
//! [`RuleRenderer`] and emits whatever comes back as a single line.

use crate::core::model::Rule;

/// Abstraction over per-rule rendering.
pub trait RuleRenderer {
    /// Renders one rule as a single save-format line for the given chain.
    ///
    /// The returned text must not contain a newline; the writer owns line
    /// termination. `include_counters` asks for the rule's packet/byte
    /// counters to be embedded.
    fn render(&self, rule: &Rule, chain: &str, include_counters: bool) -> String;
}

/// Default renderer producing the canonical append form:
/// `-A <chain> <spec>`, prefixed with `[<packets>:<bytes>] ` when counters
/// are requested.
#[derive(Debug, Clone, Copy, Default)]
pub struct FlagRenderer;

impl RuleRenderer for FlagRenderer {
    fn render(&self, rule: &Rule, chain: &str, include_counters: bool) -> String {
        let mut line = String::new();
        if include_counters {
            line.push_str(&rule.counters.to_string());
            line.push(' ');
        }
        line.push_str("-A ");
        line.push_str(chain);
        if !rule.spec.is_empty() {
            line.push(' ');
            line.push_str(&rule.spec);
        }
        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::Counters;

    #[test]
    fn test_render_without_counters() {
        let rule = Rule::new("-p tcp --dport 80 -j ACCEPT", Counters::new(12, 3456));
        let line = FlagRenderer.render(&rule, "INPUT", false);
        assert_eq!(line, "-A INPUT -p tcp --dport 80 -j ACCEPT");
    }

    #[test]
    fn test_render_with_counters_prefix() {
        let rule = Rule::new("-p tcp --dport 80 -j ACCEPT", Counters::new(12, 3456));
        let line = FlagRenderer.render(&rule, "INPUT", true);
        assert_eq!(line, "[12:3456] -A INPUT -p tcp --dport 80 -j ACCEPT");
    }

    #[test]
    fn test_render_matchless_rule_has_no_trailing_space() {
        let rule = Rule::new("", Counters::default());
        assert_eq!(FlagRenderer.render(&rule, "INPUT", false), "-A INPUT");
        assert_eq!(FlagRenderer.render(&rule, "INPUT", true), "[0:0] -A INPUT");
    }
}
