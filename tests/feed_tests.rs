//! Integration tests for feed retrieval and normalization.
//!
//! Normalization runs against a recorded feed fixture; HTTP retrieval runs
//! against a one-shot server on the loopback interface.

use loldrivers_scan::{
    FeedSource, FileFeedSource, HttpFeedSource, ScanError,
    feed::{self, FeedClientConfig, normalize, parse_feed},
};
use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::path::Path;
use std::thread;
use std::time::Duration;

// ============================================================================
// Test Fixtures
// ============================================================================

const FIXTURES_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures");

const RTCORE64: &str = "2cdf442da46dea9abe1126d00914baea1093a5b3b0652aabd69f354cfe15cbd6";
const RTCORE32: &str = "60180b1d25cfbad4b83cdabf91372b2de7c2d30a77fdda44a4b128470ce4d545";
const GDRV: &str = "29c2d78f544fbe2600fe5337bfc44c1f661aecc4738a806f9f06ca67f763e60e";

fn fixture_source() -> FileFeedSource {
    FileFeedSource::new(Path::new(FIXTURES_DIR).join("drivers.json"))
}

/// Serve one HTTP response on a loopback port and return its URL.
fn serve_once(status: &'static str, body: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind loopback");
    let addr = listener.local_addr().expect("local addr");

    thread::spawn(move || {
        let Ok((stream, _)) = listener.accept() else {
            return;
        };
        let mut reader = BufReader::new(stream);
        let mut line = String::new();
        while reader.read_line(&mut line).is_ok_and(|n| n > 0) {
            if line == "\r\n" {
                break;
            }
            line.clear();
        }
        let mut stream = reader.into_inner();
        let _ = write!(
            stream,
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        let _ = stream.flush();
    });

    format!("http://{addr}/api/drivers.json")
}

fn http_source(url: String) -> HttpFeedSource {
    HttpFeedSource::new(FeedClientConfig {
        url,
        timeout: Duration::from_secs(10),
        ..FeedClientConfig::default()
    })
}

// ============================================================================
// Normalization
// ============================================================================

mod normalization_tests {
    use super::*;

    #[test]
    fn test_fixture_flattens_to_one_entry_per_sample() {
        let body = fixture_source().fetch().unwrap();
        let normalized = normalize(&parse_feed(&body).unwrap());

        assert_eq!(normalized.stats.records, 4);
        assert_eq!(normalized.stats.samples, 4);
        assert_eq!(normalized.stats.skipped_samples, 2);

        let hashes: Vec<&str> = normalized.drivers.iter().map(|d| d.hash.as_str()).collect();
        assert_eq!(hashes, vec![RTCORE64, RTCORE32, GDRV, RTCORE32]);
    }

    #[test]
    fn test_filename_prefers_original() {
        let drivers = feed::fetch_and_normalize(&fixture_source()).unwrap();

        assert_eq!(drivers[0].filename, "RTCore64.sys");
        // empty OriginalFilename falls back to Filename
        assert_eq!(drivers[1].filename, "rtcore32.sys");
        assert_eq!(drivers[3].filename, "RTCore32.sys");
    }

    #[test]
    fn test_both_cve_fields_merged() {
        let drivers = feed::fetch_and_normalize(&fixture_source()).unwrap();

        assert_eq!(drivers[0].cves, vec!["CVE-2019-16098"]);
        assert_eq!(drivers[2].cves, vec!["CVE-2018-19320", "CVE-2018-19321"]);
        assert!(drivers[3].cves.is_empty());
    }

    #[test]
    fn test_index_keeps_last_entry_for_shared_hash() {
        let index = feed::load_index(&fixture_source()).unwrap();

        assert_eq!(index.len(), 3);
        assert_eq!(index.overwritten(), 1);
        let shared = index.get(RTCORE32).unwrap();
        assert_eq!(shared.id, "f1e2d3c4-b5a6-4978-8a9b-0c1d2e3f4a5b");
        assert!(index.contains(GDRV));
        assert!(index.iter().all(|d| d.path.is_none() && d.status.is_none()));
    }

    #[test]
    fn test_non_array_body_is_parse_error() {
        let err = parse_feed(br#"{"Id": "x"}"#).unwrap_err();
        assert!(matches!(err, ScanError::Parse(_)));
        assert!(err.is_fatal());
    }

    #[test]
    fn test_record_without_samples_list_is_parse_error() {
        for body in [
            r#"[{"Id": "x"}]"#,
            r#"[{"Id": "x", "KnownVulnerableSamples": null}]"#,
        ] {
            let err = parse_feed(body.as_bytes()).unwrap_err();
            assert!(matches!(err, ScanError::Parse(_)), "{body}");
        }
    }
}

// ============================================================================
// Retrieval
// ============================================================================

mod retrieval_tests {
    use super::*;

    #[test]
    fn test_http_fetch_success() {
        let url = serve_once(
            "200 OK",
            r#"[{"Id": "x", "KnownVulnerableSamples": [{"Filename": "x.sys", "SHA256": "AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA"}]}]"#,
        );
        let index = feed::load_index(&http_source(url)).unwrap();

        assert_eq!(index.len(), 1);
        assert_eq!(index.get(&"a".repeat(64)).unwrap().filename, "x.sys");
    }

    #[test]
    fn test_http_error_status_is_fetch_error() {
        let url = serve_once("500 Internal Server Error", "oops");
        let err = http_source(url.clone()).fetch().unwrap_err();

        match err {
            ScanError::Fetch { url: failed, message } => {
                assert_eq!(failed, url);
                assert!(message.contains("500"));
            }
            other => panic!("expected fetch error, got {other:?}"),
        }
    }

    #[test]
    fn test_connection_refused_is_fetch_error() {
        // bind then drop to get a port nobody listens on
        let addr = TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap();
        let err = http_source(format!("http://{addr}/drivers.json"))
            .fetch()
            .unwrap_err();
        assert!(matches!(err, ScanError::Fetch { .. }));
    }

    #[test]
    fn test_malformed_http_body_is_parse_error() {
        let url = serve_once("200 OK", "<html>maintenance</html>");
        let err = feed::load_index(&http_source(url)).unwrap_err();
        assert!(matches!(err, ScanError::Parse(_)));
    }

    #[test]
    fn test_missing_local_feed_is_fetch_error() {
        let err = FileFeedSource::new("/nonexistent/drivers.json")
            .fetch()
            .unwrap_err();
        assert!(matches!(err, ScanError::Fetch { .. }));
    }
}
