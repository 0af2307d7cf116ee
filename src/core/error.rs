use thiserror::Error;

/// Core error types for ip6save
///
/// Every failure is fatal for the current run: this is a one-shot snapshot
/// tool, and a partial or inconsistent firewall snapshot is worse than
/// aborting. Errors are returned up to `main`, which performs the actual
/// exit; core code never terminates the process.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O operation failed (output stream, listing file)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The ruleset engine could not be initialized or queried.
    /// Carries the engine's own error text.
    #[error("can't initialize ruleset engine: {message}")]
    Engine { message: String },

    /// The table-name listing could not be read
    #[error("unable to read table listing {path}: {reason}")]
    TableListing { path: String, reason: String },

    /// A table-name listing entry was not newline-terminated, empty, or
    /// longer than the kernel's table name bound
    #[error("badly formed table name `{0}`")]
    MalformedTableName(String),

    /// Binary output mode was requested; it is recognized but unimplemented
    #[error("binary output is not implemented")]
    BinaryUnsupported,
}

pub type Result<T> = std::result::Result<T, Error>;

/// Represents a translated error with helpful context
#[derive(Debug, Clone)]
pub struct ErrorTranslation {
    pub user_message: String,
    pub suggestions: Vec<String>,
}

impl ErrorTranslation {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            user_message: message.into(),
            suggestions: Vec::new(),
        }
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }
}

/// Database of engine error patterns and their translations
pub struct EngineErrorPattern;

impl EngineErrorPattern {
    /// Matches an error message against known patterns and returns a user-friendly translation.
    pub fn match_error(msg: &str) -> ErrorTranslation {
        let lower = msg.to_lowercase();

        // Permission errors
        if lower.contains("permission denied") || lower.contains("operation not permitted") {
            return ErrorTranslation::new("Insufficient permissions to read the ruleset")
                .with_suggestion("Run as root or under sudo")
                .with_suggestion("Check if CAP_NET_ADMIN capability is available");
        }

        // Missing ip6tables binary
        if lower.contains("command not found")
            || (lower.contains("no such file") && lower.contains("ip6tables"))
        {
            return ErrorTranslation::new("ip6tables is not installed or not found in PATH")
                .with_suggestion("Install iptables: sudo apt install iptables  (Debian/Ubuntu)")
                .with_suggestion("Or: sudo dnf install iptables  (Fedora/RHEL)")
                .with_suggestion("Or: sudo pacman -S iptables  (Arch)");
        }

        // Listing file absent, usually because the module never loaded
        if lower.contains("ip6_tables_names") || lower.contains("no such file") {
            return ErrorTranslation::new("The IPv6 ruleset is not registered with the kernel")
                .with_suggestion("Load the module: sudo modprobe ip6_tables")
                .with_suggestion("Check loaded modules: lsmod | grep ip6_tables");
        }

        // xtables lock contention
        if lower.contains("xtables lock") || lower.contains("resource temporarily unavailable") {
            return ErrorTranslation::new("Another process is holding the xtables lock")
                .with_suggestion("Wait for the other ip6tables invocation to finish and retry")
                .with_suggestion("Check for conflicting firewall managers: sudo systemctl status firewalld ufw");
        }

        // Unknown table
        if lower.contains("does not exist") || lower.contains("no chain/target/match") {
            return ErrorTranslation::new("The requested table does not exist")
                .with_suggestion("List available tables: cat /proc/net/ip6_tables_names")
                .with_suggestion("Built-in tables are filter, mangle, raw, security and nat");
        }

        // Generic fallback
        ErrorTranslation::new(format!("Ruleset engine error: {msg}"))
            .with_suggestion("Check the detailed error message for more information")
            .with_suggestion("Verify the engine is working: sudo ip6tables -S")
    }
}
