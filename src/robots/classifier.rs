//! Archive error page detection
//!
//! When a capture cannot be served the archive substitutes an HTML page or a
//! JSON error envelope, and the original content type is not reliably exposed.
//! These checks sniff the body instead. A real robots.txt that happens to be
//! wrapped in braces will be rejected, and an HTML page without any of the
//! sniffed tags will get through.

/// Tags that only occur in HTML documents
const HTML_MARKERS: [&str; 3] = ["<!doctype ", "<html", "<body"];

/// Returns true if a snapshot body is an archive error page, not a robots file
///
/// `data_low` must already be lowercased and trimmed.
///
/// # Example
///
/// ```
/// use wayback_robots::is_invalid_response;
///
/// assert!(is_invalid_response("<!doctype html><html></html>"));
/// assert!(!is_invalid_response("user-agent: *\ndisallow: /tmp"));
/// ```
pub fn is_invalid_response(data_low: &str) -> bool {
    // HTML
    if HTML_MARKERS.iter().any(|marker| data_low.contains(marker)) {
        return true;
    }

    // JSON
    (data_low.starts_with('{') && data_low.ends_with('}'))
        || (data_low.starts_with('[') && data_low.ends_with(']'))
}
