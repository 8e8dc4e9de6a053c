use std::time::Duration;

/// Default Wayback Machine CDX index endpoint
pub const DEFAULT_CDX_URL: &str = "https://web.archive.org/cdx/search/cdx";

/// Default Wayback Machine snapshot endpoint
pub const DEFAULT_SNAPSHOT_URL: &str = "https://web.archive.org/web";

/// Default number of concurrent snapshot workers
pub const DEFAULT_CONCURRENCY: usize = 10;

/// Default per-request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Settings for a single harvest run
#[derive(Debug, Clone)]
pub struct HarvestConfig {
    /// Target domain, e.g. "example.com"
    pub domain: String,

    /// Number of concurrent snapshot workers
    pub concurrency: usize,

    /// Emit every line instead of only `Disallow:` paths
    pub raw_mode: bool,

    /// Archive endpoints and HTTP settings
    pub archive: ArchiveConfig,
}

impl HarvestConfig {
    /// Creates a config for `domain` with default concurrency and archive settings
    pub fn new(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            concurrency: DEFAULT_CONCURRENCY,
            raw_mode: false,
            archive: ArchiveConfig::default(),
        }
    }
}

/// Archive service endpoints and HTTP client settings
#[derive(Debug, Clone)]
pub struct ArchiveConfig {
    /// Base URL of the CDX capture index
    pub cdx_url: String,

    /// Base URL that snapshots are served under
    pub snapshot_url: String,

    /// Total timeout for every request
    pub timeout: Duration,

    /// User agent sent with every request
    pub user_agent: String,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            cdx_url: DEFAULT_CDX_URL.to_string(),
            snapshot_url: DEFAULT_SNAPSHOT_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
        }
    }
}
