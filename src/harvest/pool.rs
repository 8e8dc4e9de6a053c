//! Worker pool for snapshot processing
//!
//! The queue is an unbounded channel that is filled with every snapshot and
//! sealed by dropping the sender before any worker starts. Workers share the
//! receiver and exit when it reports the queue drained, so joining every
//! worker is the completion barrier for the whole list.

use crate::archive::{fetch_snapshot, snapshot_url, FetchResult, SnapshotRef};
use crate::harvest::sink::EmitSink;
use crate::harvest::stats::{HarvestReport, HarvestStats, SnapshotOutcome};
use crate::robots::{extract_candidates, is_invalid_response};
use crate::HarvestError;
use reqwest::Client;
use std::io::Write;
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinSet;
use tracing::{debug, warn};

type WorkQueue = Arc<Mutex<mpsc::UnboundedReceiver<SnapshotRef>>>;

/// Everything a worker needs to process one snapshot
struct SnapshotWorker<W> {
    client: Client,
    snapshot_base: String,
    sink: Arc<EmitSink<W>>,
    raw_mode: bool,
}

impl<W: Write> SnapshotWorker<W> {
    /// Fetches, classifies and parses one snapshot, emitting its candidates
    async fn process(&self, snapshot: &SnapshotRef) -> Result<SnapshotOutcome, HarvestError> {
        let url = snapshot_url(&self.snapshot_base, snapshot);

        let body = match fetch_snapshot(&self.client, &url).await? {
            FetchResult::Success { status_code, body } => {
                debug!("Fetched {} (HTTP {}, {} bytes)", url, status_code, body.len());
                body
            }
            FetchResult::NetworkError { error } => {
                warn!("Fetch snapshot for {} error: {}", snapshot, error);
                return Ok(SnapshotOutcome::TransportFailed);
            }
        };

        if is_invalid_response(&String::from_utf8_lossy(&body).trim().to_lowercase()) {
            debug!("Skipping archive error page for {}", snapshot);
            return Ok(SnapshotOutcome::Filtered);
        }

        let candidates = extract_candidates(&body, self.raw_mode);
        let emitted = if self.raw_mode {
            self.sink.emit_raw(candidates)?
        } else {
            let mut emitted = 0;
            for candidate in candidates {
                if self.sink.emit(candidate)? {
                    emitted += 1;
                }
            }
            emitted
        };

        Ok(SnapshotOutcome::Parsed { emitted })
    }
}

/// Fixed-size pool of concurrent snapshot workers
pub struct WorkerPool<W> {
    worker: Arc<SnapshotWorker<W>>,
    concurrency: usize,
}

impl<W: Write + Send + 'static> WorkerPool<W> {
    /// Creates a pool of `concurrency` workers writing to `sink`
    ///
    /// A concurrency of zero is treated as one.
    pub fn new(
        client: Client,
        snapshot_base: impl Into<String>,
        sink: Arc<EmitSink<W>>,
        raw_mode: bool,
        concurrency: usize,
    ) -> Self {
        Self {
            worker: Arc::new(SnapshotWorker {
                client,
                snapshot_base: snapshot_base.into(),
                sink,
                raw_mode,
            }),
            concurrency: concurrency.max(1),
        }
    }

    /// Processes every snapshot exactly once and waits for all of them
    ///
    /// Per-snapshot transport failures are logged and counted. The first
    /// fatal error (unreadable body, output write failure, worker panic)
    /// cancels the remaining workers and is returned.
    pub async fn process(
        &self,
        snapshots: Vec<SnapshotRef>,
    ) -> Result<HarvestReport, HarvestError> {
        let queued = snapshots.len();
        let (tx, rx) = mpsc::unbounded_channel();
        for snapshot in snapshots {
            tx.send(snapshot)
                .map_err(|_| HarvestError::Worker("work queue closed early".to_string()))?;
        }
        // Seal the queue
        drop(tx);

        let queue: WorkQueue = Arc::new(Mutex::new(rx));
        let stats = Arc::new(HarvestStats::default());
        let mut workers = JoinSet::new();

        for id in 0..self.concurrency.min(queued.max(1)) {
            workers.spawn(run_worker(
                id,
                Arc::clone(&self.worker),
                Arc::clone(&queue),
                Arc::clone(&stats),
            ));
        }

        while let Some(joined) = workers.join_next().await {
            let result = joined.map_err(|e| HarvestError::Worker(e.to_string()))?;
            if let Err(e) = result {
                workers.abort_all();
                return Err(e);
            }
        }

        let report = stats.report(queued);
        if report.processed != queued {
            return Err(HarvestError::Worker(format!(
                "{} of {} snapshots were processed",
                report.processed, queued
            )));
        }

        Ok(report)
    }
}

/// Drains the shared queue until it is empty and sealed
async fn run_worker<W: Write>(
    id: usize,
    worker: Arc<SnapshotWorker<W>>,
    queue: WorkQueue,
    stats: Arc<HarvestStats>,
) -> Result<(), HarvestError> {
    loop {
        let next = queue.lock().await.recv().await;
        let Some(snapshot) = next else {
            break;
        };

        let outcome = worker.process(&snapshot).await?;
        stats.record(outcome);
    }

    debug!("Worker {} finished, {} snapshots done overall", id, stats.processed());
    Ok(())
}
