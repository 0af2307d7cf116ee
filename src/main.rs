//! ip6save - IPv6 ruleset snapshot tool
//!
//! Dumps the current IPv6 packet-filter ruleset to stdout in a restorable
//! text format, one block per table.
//!
//! # Usage
//!
//! ```bash
//! # Snapshot every table
//! ip6save
//!
//! # Snapshot one table, with rule counters
//! ip6save -c -t filter
//!
//! # Redirect into a file a restore tool can reload later
//! ip6save > ruleset.save
//! ```
//!
//! # Exit status
//!
//! 0 on success; 1 on bad usage or on any failure while enumerating,
//! opening, or writing tables. Every failure is fatal for the whole run:
//! a partial firewall snapshot is worse than none, so nothing is retried
//! and no table is silently skipped.

use std::io::{self, Write};
use std::process::ExitCode;

use clap::Parser;
use clap::error::ErrorKind;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use ip6save::config::{OutputFormat, SaveConfig};
use ip6save::core::engine::ProcTableSource;
use ip6save::core::error::{EngineErrorPattern, Error, Result};
use ip6save::core::ip6t::Ip6tablesEngine;
use ip6save::core::render::FlagRenderer;
use ip6save::core::save::SaveWriter;

#[derive(Parser)]
#[command(name = "ip6save")]
#[command(about = "Snapshot the IPv6 packet-filter ruleset as restorable text", long_about = None)]
#[command(version)]
struct Cli {
    /// Output in binary format (unimplemented)
    #[arg(short = 'b', long)]
    binary: bool,

    /// Include packet and byte counters on rule lines
    #[arg(short = 'c', long)]
    counters: bool,

    /// Restrict output to the named table
    #[arg(short = 't', long, value_name = "NAME")]
    table: Option<String>,

    /// Run one snapshot immediately and exit (debugging aid)
    #[arg(short = 'd', long)]
    dump: bool,
}

fn main() -> ExitCode {
    // Logs go to stderr so the save document on stdout stays reloadable
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    // Usage errors must exit with status 1, not clap's default 2
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::FAILURE,
            };
        }
    };

    if !nix::unistd::getuid().is_root() {
        warn!("not running as root; the ruleset query may be refused");
    }

    // -d historically ran the snapshot mid-parse; with declarative parsing
    // it is an alias for the one immediate run both paths perform
    if cli.dump {
        debug!("dump mode: single immediate snapshot");
    }

    let config = SaveConfig {
        table: cli.table,
        counters: cli.counters,
        format: if cli.binary {
            OutputFormat::Binary
        } else {
            OutputFormat::Text
        },
    };

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report_error(&err);
            ExitCode::FAILURE
        }
    }
}

/// Wires the production collaborators together and streams one save
/// document to stdout
fn run(config: &SaveConfig) -> Result<()> {
    let engine = Ip6tablesEngine::new();
    let source = ProcTableSource::new();
    let renderer = FlagRenderer;
    let writer = SaveWriter::new(&engine, &renderer, config);

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    writer.save(&source, &mut out)?;
    out.flush()?;
    Ok(())
}

/// Prints the fatal error, with translated suggestions for engine-class
/// failures
fn report_error(err: &Error) {
    eprintln!("ip6save: {err}");

    if matches!(err, Error::Engine { .. } | Error::TableListing { .. }) {
        let translation = EngineErrorPattern::match_error(&err.to_string());
        eprintln!("{}", translation.user_message);
        for suggestion in &translation.suggestions {
            eprintln!("  - {suggestion}");
        }
    }
}
