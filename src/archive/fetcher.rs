//! Snapshot fetcher
//!
//! A snapshot is requested once. Transport failures (including timeouts) are
//! reported back to the worker as a [`FetchResult::NetworkError`] so that one
//! bad capture never stops the run; a body that cannot be read after the
//! response arrived is a hard error.

use crate::HarvestError;
use reqwest::Client;

/// Result of a snapshot fetch
#[derive(Debug)]
pub enum FetchResult {
    /// Response received and body read in full
    Success {
        /// HTTP status code
        status_code: u16,
        /// Response body bytes, untouched
        body: Vec<u8>,
    },

    /// Network error (connection refused, timeout, etc.)
    NetworkError {
        /// Error description
        error: String,
    },
}

/// Fetches one snapshot URL
///
/// The status code is not checked: the archive substitutes its own HTML or
/// JSON error pages, which the response classifier filters out downstream.
///
/// A timeout that fires while the body is still streaming surfaces as
/// `BodyRead` and aborts the run, like any other body read failure.
///
/// # Returns
///
/// * `Ok(FetchResult)` - Body read, or a per-snapshot transport failure
/// * `Err(HarvestError::BodyRead)` - The response body could not be read
pub async fn fetch_snapshot(client: &Client, url: &str) -> Result<FetchResult, HarvestError> {
    let response = match client.get(url).send().await {
        Ok(response) => response,
        Err(e) => {
            let error = if e.is_timeout() {
                "Request timeout".to_string()
            } else if e.is_connect() {
                format!("Connection failed: {}", e)
            } else {
                e.to_string()
            };
            return Ok(FetchResult::NetworkError { error });
        }
    };

    let status_code = response.status().as_u16();
    let bytes = response
        .bytes()
        .await
        .map_err(|source| HarvestError::BodyRead {
            url: url.to_string(),
            source,
        })?;

    Ok(FetchResult::Success {
        status_code,
        body: bytes.to_vec(),
    })
}
