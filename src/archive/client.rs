//! HTTP client construction and archive URL building

use crate::archive::SnapshotRef;
use crate::config::ArchiveConfig;
use reqwest::{redirect::Policy, Client};
use std::time::Duration;
use url::Url;

/// Maximum redirects followed while resolving a snapshot
///
/// The archive redirects a requested timestamp to the nearest stored capture,
/// usually in a single hop.
const MAX_REDIRECTS: usize = 10;

/// Builds the shared HTTP client for index and snapshot requests
///
/// # Arguments
///
/// * `config` - The archive configuration (timeout and user agent)
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```
/// use wayback_robots::archive::build_http_client;
/// use wayback_robots::config::ArchiveConfig;
///
/// let client = build_http_client(&ArchiveConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &ArchiveConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(config.timeout)
        .connect_timeout(Duration::from_secs(10).min(config.timeout))
        .redirect(Policy::limited(MAX_REDIRECTS))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Builds the CDX index query for every archived `<domain>/robots.txt`
///
/// Only HTTP 200 captures are requested, collapsed by content digest, with
/// the `timestamp` and `original` fields as a JSON array of rows.
///
/// # Example
///
/// ```
/// use wayback_robots::archive::index_url;
///
/// let url = index_url("https://web.archive.org/cdx/search/cdx", "example.com").unwrap();
/// assert!(url.as_str().contains("collapse=digest"));
/// ```
pub fn index_url(cdx_base: &str, domain: &str) -> Result<Url, url::ParseError> {
    let mut url = Url::parse(cdx_base)?;
    url.query_pairs_mut()
        .append_pair("url", &format!("{}/robots.txt", domain))
        .append_pair("output", "json")
        .append_pair("fl", "timestamp,original")
        .append_pair("filter", "statuscode:200")
        .append_pair("collapse", "digest");
    Ok(url)
}

/// Builds the URL serving the raw archived bytes of one capture
///
/// The `if_` suffix on the timestamp asks the archive for the original
/// content without its navigation banner.
pub fn snapshot_url(snapshot_base: &str, snapshot: &SnapshotRef) -> String {
    format!(
        "{}/{}if_/{}",
        snapshot_base.trim_end_matches('/'),
        snapshot.timestamp,
        snapshot.original_url
    )
}
