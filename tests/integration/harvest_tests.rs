//! Integration tests for the harvester
//!
//! These tests use wiremock to stand in for both the CDX index and the
//! snapshot endpoint, and run full harvests end-to-end.

use std::sync::Arc;
use std::time::Duration;
use wayback_robots::config::{ArchiveConfig, HarvestConfig};
use wayback_robots::harvest::{EmitSink, HarvestReport, Harvester};
use wayback_robots::HarvestError;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const LIST_THREE: &str = r#"[["timestamp","original"],
["20070702231826","http://example.com/robots.txt"],
["20070706061934","http://www.example.com/robots.txt"],
["20090101000000","http://example.com/robots.txt"]]"#;

/// Creates a test configuration pointing both endpoints at the mock server
fn create_test_config(server: &MockServer, raw_mode: bool) -> HarvestConfig {
    HarvestConfig {
        domain: "example.com".to_string(),
        concurrency: 3,
        raw_mode,
        archive: ArchiveConfig {
            cdx_url: format!("{}/cdx/search/cdx", server.uri()),
            snapshot_url: format!("{}/web", server.uri()),
            timeout: Duration::from_secs(1),
            user_agent: "wayback-robots-test/1.0".to_string(),
        },
    }
}

async fn mount_index(server: &MockServer, body: &str) {
    Mock::given(method("GET"))
        .and(path("/cdx/search/cdx"))
        .and(query_param("url", "example.com/robots.txt"))
        .and(query_param("output", "json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "application/json"),
        )
        .expect(1)
        .mount(server)
        .await;
}

async fn mount_snapshot(server: &MockServer, timestamp: &str, original: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(format!("/web/{}if_/{}", timestamp, original)))
        .respond_with(response)
        .mount(server)
        .await;
}

async fn run_harvest(config: HarvestConfig) -> (Result<HarvestReport, HarvestError>, String) {
    let harvester = Harvester::new(config).expect("Failed to create harvester");
    let sink = Arc::new(EmitSink::new(Vec::new()));
    let result = harvester.run(Arc::clone(&sink)).await;
    (result, sink.output())
}

fn sorted_lines(output: &str) -> Vec<&str> {
    let mut lines: Vec<&str> = output.lines().collect();
    lines.sort_unstable();
    lines
}

#[tokio::test]
async fn test_full_harvest_unique_disallows() {
    let server = MockServer::start().await;
    mount_index(&server, LIST_THREE).await;

    mount_snapshot(
        &server,
        "20070702231826",
        "http://example.com/robots.txt",
        ResponseTemplate::new(200).set_body_string("User-agent: *\nDisallow: /a\ndisallow: /b/c\n"),
    )
    .await;
    mount_snapshot(
        &server,
        "20070706061934",
        "http://www.example.com/robots.txt",
        ResponseTemplate::new(200).set_body_string("User-agent: *\nDisallow:/a\nDisallow: /e\n"),
    )
    .await;
    mount_snapshot(
        &server,
        "20090101000000",
        "http://example.com/robots.txt",
        ResponseTemplate::new(200).set_body_string("User-agent: *\nDISALLOW: /b/c\nDisallow:\n"),
    )
    .await;

    let (result, output) = run_harvest(create_test_config(&server, false)).await;
    let report = result.expect("Harvest failed");

    assert_eq!(sorted_lines(&output), vec!["/a", "/b/c", "/e"]);
    assert_eq!(report.snapshots, 3);
    assert_eq!(report.processed, 3);
    assert_eq!(report.emitted, 3);
}

#[tokio::test]
async fn test_transport_failure_does_not_stop_others() {
    let server = MockServer::start().await;
    mount_index(&server, LIST_THREE).await;

    mount_snapshot(
        &server,
        "20070702231826",
        "http://example.com/robots.txt",
        ResponseTemplate::new(200).set_body_string("Disallow: /first\n"),
    )
    .await;
    // Slower than the client timeout
    mount_snapshot(
        &server,
        "20070706061934",
        "http://www.example.com/robots.txt",
        ResponseTemplate::new(200)
            .set_body_string("Disallow: /never\n")
            .set_delay(Duration::from_secs(3)),
    )
    .await;
    mount_snapshot(
        &server,
        "20090101000000",
        "http://example.com/robots.txt",
        ResponseTemplate::new(200).set_body_string("Disallow: /third\n"),
    )
    .await;

    let (result, output) = run_harvest(create_test_config(&server, false)).await;
    let report = result.expect("Harvest failed");

    assert_eq!(sorted_lines(&output), vec!["/first", "/third"]);
    assert_eq!(report.processed, 3);
    assert_eq!(report.transport_failures, 1);
}

#[tokio::test]
async fn test_error_pages_skipped() {
    let server = MockServer::start().await;
    mount_index(&server, LIST_THREE).await;

    mount_snapshot(
        &server,
        "20070702231826",
        "http://example.com/robots.txt",
        ResponseTemplate::new(200).set_body_string(
            "<!doctype html>\n<html><body>Disallow: /from-html</body></html>",
        ),
    )
    .await;
    mount_snapshot(
        &server,
        "20070706061934",
        "http://www.example.com/robots.txt",
        ResponseTemplate::new(200).set_body_string(r#"["Disallow: /from-json"]"#),
    )
    .await;
    mount_snapshot(
        &server,
        "20090101000000",
        "http://example.com/robots.txt",
        ResponseTemplate::new(200).set_body_string("User-agent: *\nDisallow: /real\n"),
    )
    .await;

    let (result, output) = run_harvest(create_test_config(&server, false)).await;
    let report = result.expect("Harvest failed");

    assert_eq!(output, "/real\n");
    assert_eq!(report.filtered, 2);
}

#[tokio::test]
async fn test_raw_mode_prints_lines() {
    let server = MockServer::start().await;
    mount_index(
        &server,
        r#"[["timestamp","original"],["20070702231826","http://example.com/robots.txt"]]"#,
    )
    .await;

    let body = "User-agent: *\nDisallow: /a\n# comment\nDisallow: /a\n";
    mount_snapshot(
        &server,
        "20070702231826",
        "http://example.com/robots.txt",
        ResponseTemplate::new(200).set_body_string(body),
    )
    .await;

    let (result, output) = run_harvest(create_test_config(&server, true)).await;
    result.expect("Harvest failed");

    assert_eq!(output, body);
}

#[tokio::test]
async fn test_no_captures_is_not_an_error() {
    let server = MockServer::start().await;
    mount_index(&server, r#"[["timestamp","original"]]"#).await;

    let (result, output) = run_harvest(create_test_config(&server, false)).await;

    assert_eq!(result.expect("Harvest failed"), HarvestReport::default());
    assert!(output.is_empty());
}

#[tokio::test]
async fn test_excluded_domain_aborts_run() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/cdx/search/cdx"))
        .respond_with(ResponseTemplate::new(403).set_body_string(
            "org.archive.wayback.exception.AdministrativeAccessControlException: Blocked Site Error",
        ))
        .mount(&server)
        .await;

    let (result, output) = run_harvest(create_test_config(&server, false)).await;

    let err = result.expect_err("Expected exclusion error");
    assert!(matches!(err, HarvestError::Excluded { .. }));
    assert_eq!(err.exit_code(), 3);
    assert!(output.is_empty());
}

#[tokio::test]
async fn test_malformed_index_aborts_run() {
    let server = MockServer::start().await;
    mount_index(&server, "<html>Service Unavailable</html>").await;

    let (result, _) = run_harvest(create_test_config(&server, false)).await;

    let err = result.expect_err("Expected decode error");
    assert!(matches!(err, HarvestError::IndexDecode { .. }));
    assert_eq!(err.exit_code(), 1);
}
