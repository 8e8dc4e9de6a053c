//! Snapshot listing against the CDX capture index

use crate::archive::client::index_url;
use crate::archive::SnapshotRef;
use crate::config::ArchiveConfig;
use crate::{ConfigError, HarvestError};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::{debug, instrument};

/// Marker the archive puts in a 403 body for domains excluded by request
const BLOCKED_SITE_MARKER: &str = "AdministrativeAccessControlException: Blocked Site Error";

/// One `[timestamp, original]` row of the index response
#[derive(Debug, Deserialize)]
struct IndexRow(String, String);

/// Lists every archived capture of `<domain>/robots.txt`
///
/// Issues exactly one index request. Captures come back in the order the
/// index returns them (oldest first); the header row is dropped.
///
/// # Returns
///
/// * `Ok(Vec<SnapshotRef>)` - The captures, possibly empty
/// * `Err(HarvestError::Excluded)` - The archive blocks this domain
/// * `Err(HarvestError)` - The request failed or the response was malformed
#[instrument(skip(client, archive))]
pub async fn list_snapshots(
    client: &Client,
    archive: &ArchiveConfig,
    domain: &str,
) -> Result<Vec<SnapshotRef>, HarvestError> {
    let url = index_url(&archive.cdx_url, domain)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid cdx_url: {}", e)))?;
    let url_str = url.to_string();

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|source| HarvestError::Http {
            url: url_str.clone(),
            source,
        })?;

    let status = response.status();
    let body = response
        .bytes()
        .await
        .map_err(|source| HarvestError::BodyRead {
            url: url_str.clone(),
            source,
        })?;

    debug!("Index responded with HTTP {} ({} bytes)", status, body.len());

    if status == StatusCode::FORBIDDEN
        && String::from_utf8_lossy(&body).contains(BLOCKED_SITE_MARKER)
    {
        return Err(HarvestError::Excluded {
            domain: domain.to_string(),
        });
    }

    if !status.is_success() {
        return Err(HarvestError::IndexStatus {
            url: url_str,
            status: status.as_u16(),
        });
    }

    parse_index(&body).map_err(|source| HarvestError::IndexDecode {
        url: url_str,
        source,
    })
}

/// Decodes an index response body into snapshot references
///
/// The first row is the field header. A body with fewer than two rows has
/// no captures.
pub fn parse_index(body: &[u8]) -> Result<Vec<SnapshotRef>, serde_json::Error> {
    let rows: Vec<IndexRow> = serde_json::from_slice(body)?;

    Ok(rows
        .into_iter()
        .skip(1)
        .map(|IndexRow(timestamp, original_url)| SnapshotRef {
            timestamp,
            original_url,
        })
        .collect())
}
