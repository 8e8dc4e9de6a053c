//! Harvest coordinator - main run orchestration
//!
//! This module wires a run together:
//! - Listing every robots.txt capture for the domain
//! - Handing the full list to the worker pool
//! - Waiting for completion and flushing the output

use crate::archive::{build_http_client, list_snapshots};
use crate::config::HarvestConfig;
use crate::harvest::pool::WorkerPool;
use crate::harvest::sink::EmitSink;
use crate::harvest::stats::HarvestReport;
use crate::HarvestError;
use reqwest::Client;
use std::io::Write;
use std::sync::Arc;
use std::time::Instant;

/// Main harvester structure
pub struct Harvester {
    config: HarvestConfig,
    client: Client,
}

impl Harvester {
    /// Creates a new harvester
    ///
    /// # Arguments
    ///
    /// * `config` - The harvest configuration; validated here
    ///
    /// # Returns
    ///
    /// * `Ok(Harvester)` - Ready to run
    /// * `Err(HarvestError)` - Invalid configuration or HTTP client failure
    pub fn new(config: HarvestConfig) -> Result<Self, HarvestError> {
        config.validate()?;
        let client = build_http_client(&config.archive).map_err(HarvestError::Client)?;

        Ok(Self { config, client })
    }

    /// Runs one harvest, writing results to `sink`
    ///
    /// The index is queried once. If it lists no captures the run ends with an
    /// empty report. Otherwise every capture is processed by the worker pool
    /// and the sink is flushed before returning.
    pub async fn run<W>(&self, sink: Arc<EmitSink<W>>) -> Result<HarvestReport, HarvestError>
    where
        W: Write + Send + 'static,
    {
        let start_time = Instant::now();
        let snapshots =
            list_snapshots(&self.client, &self.config.archive, &self.config.domain).await?;

        if snapshots.is_empty() {
            tracing::info!("Not Found: no robots.txt captures for {}", self.config.domain);
            return Ok(HarvestReport::default());
        }

        tracing::info!("Found {} files", snapshots.len());

        let pool = WorkerPool::new(
            self.client.clone(),
            self.config.archive.snapshot_url.as_str(),
            Arc::clone(&sink),
            self.config.raw_mode,
            self.config.concurrency,
        );
        let report = pool.process(snapshots).await?;
        sink.flush()?;

        tracing::info!(
            "Harvest of {} completed in {:?}: {}",
            self.config.domain,
            start_time.elapsed(),
            report
        );

        Ok(report)
    }
}
