//! Wayback-Robots: a robots.txt history harvester
//!
//! This crate lists every archived capture of a domain's robots.txt in the
//! Wayback Machine, fetches the captures concurrently, drops archive error
//! pages and prints each unique `Disallow:` path (or every line in raw mode).

pub mod archive;
pub mod config;
pub mod harvest;
pub mod robots;

use thiserror::Error;

/// Main error type for harvest operations
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("Index request {url} returned HTTP {status}")]
    IndexStatus { url: String, status: u16 },

    #[error("JSON decode of index response from {url} failed: {source}")]
    IndexDecode {
        url: String,
        source: serde_json::Error,
    },

    #[error("Domain {domain} has been manually excluded from the Wayback Machine")]
    Excluded { domain: String },

    #[error("Failed to read body from {url}: {source}")]
    BodyRead { url: String, source: reqwest::Error },

    #[error("HTTP client error: {0}")]
    Client(#[source] reqwest::Error),

    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),

    #[error("Worker task failed: {0}")]
    Worker(String),
}

impl HarvestError {
    /// Process exit code for this error
    ///
    /// Exclusion by the archive gets its own code so scripts can tell
    /// "blocked domain" apart from ordinary failures.
    pub fn exit_code(&self) -> u8 {
        match self {
            HarvestError::Excluded { .. } => 3,
            _ => 1,
        }
    }
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for harvest operations
pub type Result<T> = std::result::Result<T, HarvestError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use archive::SnapshotRef;
pub use config::{ArchiveConfig, HarvestConfig};
pub use harvest::{EmitSink, HarvestReport, Harvester};
pub use robots::{extract_candidates, is_invalid_response};
