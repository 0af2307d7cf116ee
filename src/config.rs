//! Runtime configuration for a save run.
//!
//! One immutable [`SaveConfig`] value is built from the command line at
//! startup and threaded through the writer's entry point; nothing in the
//! core reads ambient state.

/// Output encoding of the save document.
///
/// `Binary` is recognized for compatibility but unimplemented: selecting it
/// is a distinct fatal error, never a silent fallback to text.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
pub enum OutputFormat {
    #[default]
    #[strum(serialize = "text")]
    Text,
    #[strum(serialize = "binary")]
    Binary,
}

/// Complete configuration of one save run.
#[derive(Debug, Clone, Default)]
pub struct SaveConfig {
    /// Restrict output to this table; `None` serializes every enumerated one
    pub table: Option<String>,
    /// Embed packet/byte counters in rule lines. Chain declaration counters
    /// are always shown regardless.
    pub counters: bool,
    pub format: OutputFormat,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_default_config_is_full_text_save() {
        let config = SaveConfig::default();
        assert_eq!(config.table, None);
        assert!(!config.counters);
        assert_eq!(config.format, OutputFormat::Text);
    }

    #[test]
    fn test_output_format_parses_from_text() {
        assert_eq!(OutputFormat::from_str("text").unwrap(), OutputFormat::Text);
        assert_eq!(
            OutputFormat::from_str("binary").unwrap(),
            OutputFormat::Binary
        );
        assert!(OutputFormat::from_str("xml").is_err());
    }
}
