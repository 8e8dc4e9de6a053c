//! Per-run harvest statistics

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};

/// What happened to a single snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotOutcome {
    /// Parsed; `emitted` lines were written to the sink
    Parsed { emitted: usize },

    /// Rejected as an archive error page
    Filtered,

    /// The request failed before a response arrived
    TransportFailed,
}

/// Counters shared by the workers of one run
#[derive(Debug, Default)]
pub(crate) struct HarvestStats {
    processed: AtomicUsize,
    transport_failures: AtomicUsize,
    filtered: AtomicUsize,
    emitted: AtomicUsize,
}

impl HarvestStats {
    pub(crate) fn record(&self, outcome: SnapshotOutcome) {
        match outcome {
            SnapshotOutcome::Parsed { emitted } => {
                self.emitted.fetch_add(emitted, Ordering::Relaxed);
            }
            SnapshotOutcome::Filtered => {
                self.filtered.fetch_add(1, Ordering::Relaxed);
            }
            SnapshotOutcome::TransportFailed => {
                self.transport_failures.fetch_add(1, Ordering::Relaxed);
            }
        }
        self.processed.fetch_add(1, Ordering::AcqRel);
    }

    pub(crate) fn processed(&self) -> usize {
        self.processed.load(Ordering::Acquire)
    }

    pub(crate) fn report(&self, snapshots: usize) -> HarvestReport {
        HarvestReport {
            snapshots,
            processed: self.processed(),
            transport_failures: self.transport_failures.load(Ordering::Relaxed),
            filtered: self.filtered.load(Ordering::Relaxed),
            emitted: self.emitted.load(Ordering::Relaxed),
        }
    }
}

/// Summary of a finished harvest run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HarvestReport {
    /// Snapshots listed by the index
    pub snapshots: usize,

    /// Snapshots a worker finished with
    pub processed: usize,

    /// Snapshots skipped because the request failed
    pub transport_failures: usize,

    /// Snapshots rejected as archive error pages
    pub filtered: usize,

    /// Lines written to the output
    pub emitted: usize,
}

impl fmt::Display for HarvestReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{} snapshots processed, {} failed, {} filtered, {} lines emitted",
            self.processed, self.snapshots, self.transport_failures, self.filtered, self.emitted
        )
    }
}
