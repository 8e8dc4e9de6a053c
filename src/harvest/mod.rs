//! Concurrent harvesting of archived robots.txt snapshots
//!
//! This module contains the run pipeline, including:
//! - The deduplicating output sink shared by all workers
//! - The fixed-size worker pool draining the snapshot queue
//! - Run statistics
//! - Overall run coordination

mod coordinator;
mod pool;
mod sink;
mod stats;

pub use coordinator::Harvester;
pub use pool::WorkerPool;
pub use sink::EmitSink;
pub use stats::{HarvestReport, SnapshotOutcome};

use crate::config::HarvestConfig;
use crate::HarvestError;
use std::io::{self, BufWriter, Stdout};
use std::sync::Arc;

/// Runs a complete harvest, printing results to standard output
///
/// This is the main entry point for the CLI. It will:
/// 1. Validate the configuration and build the HTTP client
/// 2. List the domain's robots.txt captures
/// 3. Fetch and parse every capture concurrently
/// 4. Print each unique result line to stdout
///
/// # Returns
///
/// * `Ok(HarvestReport)` - Run finished; the report may list zero snapshots
/// * `Err(HarvestError)` - Run aborted
pub async fn harvest(config: HarvestConfig) -> Result<HarvestReport, HarvestError> {
    let harvester = Harvester::new(config)?;
    let sink: Arc<EmitSink<BufWriter<Stdout>>> =
        Arc::new(EmitSink::new(BufWriter::new(io::stdout())));
    harvester.run(sink).await
}
