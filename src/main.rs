//! Wayback-Robots main entry point
//!
//! This is the command-line interface for the robots.txt history harvester.

use anyhow::Context;
use clap::Parser;
use std::process::ExitCode;
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use wayback_robots::config::{HarvestConfig, DEFAULT_CONCURRENCY, DEFAULT_TIMEOUT_SECS};
use wayback_robots::harvest::harvest;
use wayback_robots::HarvestError;

/// Wayback-Robots: harvest Disallow rules from archived robots.txt files
///
/// Lists every robots.txt capture of a domain in the Wayback Machine, fetches
/// them concurrently and prints each unique Disallow path once. Results go to
/// stdout, diagnostics to stderr.
#[derive(Parser, Debug)]
#[command(name = "wayback-robots")]
#[command(version)]
#[command(about = "Harvest Disallow rules from archived robots.txt files", long_about = None)]
struct Cli {
    /// Target domain
    #[arg(short, long)]
    domain: String,

    /// Number of concurrent snapshot fetches
    #[arg(short, long, default_value_t = DEFAULT_CONCURRENCY)]
    concurrency: usize,

    /// Print raw lines, not only Disallow paths
    #[arg(long)]
    raw: bool,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout: u64,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{:#}", e);
            let code = e
                .downcast_ref::<HarvestError>()
                .map_or(1, HarvestError::exit_code);
            ExitCode::from(code)
        }
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// Logs go to stderr; stdout carries only harvested lines.
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("wayback_robots=info,warn"),
            1 => EnvFilter::new("wayback_robots=debug,info"),
            2 => EnvFilter::new("wayback_robots=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Builds the configuration from CLI flags and runs the harvest
async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = HarvestConfig::new(cli.domain);
    config.concurrency = cli.concurrency;
    config.raw_mode = cli.raw;
    config.archive.timeout = Duration::from_secs(cli.timeout);

    config.validate().context("Invalid arguments")?;

    tracing::debug!(
        "Harvesting {} with {} workers (raw: {})",
        config.domain,
        config.concurrency,
        config.raw_mode
    );

    let domain = config.domain.clone();
    harvest(config)
        .await
        .with_context(|| format!("Harvest of {} failed", domain))?;

    Ok(())
}
