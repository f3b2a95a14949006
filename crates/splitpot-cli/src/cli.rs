//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;

/// Replay a scripted operation log against a fresh SplitPot ledger.
#[derive(Parser, Debug, Clone)]
#[command(name = "splitpot")]
#[command(about = "Instantiate a SplitPot ledger and replay an operation script")]
#[command(version)]
pub struct Cli {
    /// Ledger config (JSON: name, first_party, second_party, purchase_modes).
    #[arg(long)]
    pub config: PathBuf,

    /// Operation script (JSON: {"operations": [...]}).
    #[arg(long)]
    pub script: PathBuf,

    /// Stop at the first rejected operation instead of recording it and
    /// continuing.
    #[arg(long)]
    pub fail_fast: bool,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Emit logs as JSON lines.
    #[arg(long)]
    pub json_logs: bool,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
