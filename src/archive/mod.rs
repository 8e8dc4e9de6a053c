//! Wayback Machine access
//!
//! This module contains everything that talks to the archive:
//! - Building the shared HTTP client
//! - Querying the CDX index for robots.txt captures
//! - Fetching individual snapshots

mod client;
mod fetcher;
mod lister;

pub use client::{build_http_client, index_url, snapshot_url};
pub use fetcher::{fetch_snapshot, FetchResult};
pub use lister::{list_snapshots, parse_index};

/// One archived capture of a robots.txt file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotRef {
    /// Capture timestamp, `YYYYMMDDhhmmss`
    pub timestamp: String,

    /// URL as it was originally crawled
    pub original_url: String,
}

impl SnapshotRef {
    pub fn new(timestamp: impl Into<String>, original_url: impl Into<String>) -> Self {
        Self {
            timestamp: timestamp.into(),
            original_url: original_url.into(),
        }
    }
}

impl std::fmt::Display for SnapshotRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{} {}]", self.timestamp, self.original_url)
    }
}
