//! SplitPot replay host.
//!
//! Instantiates a ledger from a JSON config, replays a JSON operation script
//! against it with withdrawals paid into an in-memory rail, and prints the
//! resulting report as JSON on stdout.

mod cli;
mod script;

use anyhow::Context;
use splitpot_ledger::Ledger;
use splitpot_types::{LedgerConfig, constants};
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::script::Script;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse_args();

    // Logs go to stderr so stdout carries only the report.
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr);
    if cli.json_logs {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    tracing::info!("{} replay v{}", constants::ENGINE_NAME, constants::VERSION);

    let config = LedgerConfig::from_json_file(&cli.config)
        .with_context(|| format!("loading config {}", cli.config.display()))?;
    let script = Script::from_json_file(&cli.script)
        .with_context(|| format!("loading script {}", cli.script.display()))?;

    let mut ledger = Ledger::from_config(config);
    let report = script::replay(&mut ledger, &script, cli.fail_fast).context("replay aborted")?;

    let rejected = report.outcomes.iter().filter(|o| o.error.is_some()).count();
    tracing::info!(
        operations = report.outcomes.len(),
        rejected,
        first_pot = report.ledger.pots.first,
        second_pot = report.ledger.pots.second,
        "Replay complete"
    );

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
