//! LOLDrivers feed wire format.
//!
//! The feed is loosely structured: vulnerability identifiers live under either
//! `CVE` or `CVEs`, either of which may be missing, null, a single string or an
//! array, and individual samples are occasionally incomplete. Every record must
//! still carry an `Id` and a `KnownVulnerableSamples` list; inside that list
//! samples are read leniently so that one odd sample does not discard the feed.

use crate::error::{Result, ScanError};
use crate::model::{SHA256_HEX_LEN, is_canonical_hash};
use serde::Deserialize;
use serde_json::Value;

/// Raw record as it appears on the wire.
#[derive(Debug, Deserialize)]
struct FeedRecordWire {
    #[serde(rename = "Id")]
    id: String,
    #[serde(rename = "KnownVulnerableSamples")]
    samples: Vec<Value>,
    #[serde(rename = "CVE", default)]
    cve: Value,
    #[serde(rename = "CVEs", default)]
    cves: Value,
}

/// One driver entry of the feed with its CVE aliases merged.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "FeedRecordWire")]
pub struct FeedRecord {
    /// Driver identifier
    pub id: String,
    /// Well-formed samples, in feed order
    pub samples: Vec<FeedSample>,
    /// `CVEs` entries followed by `CVE` entries, duplicates kept
    pub cves: Vec<String>,
    /// Number of samples dropped as malformed
    pub skipped_samples: usize,
}

impl From<FeedRecordWire> for FeedRecord {
    fn from(wire: FeedRecordWire) -> Self {
        let mut cves = string_list(&wire.cves);
        cves.extend(string_list(&wire.cve));

        let total = wire.samples.len();
        let samples: Vec<FeedSample> = wire
            .samples
            .iter()
            .filter_map(|value| {
                let sample = FeedSample::from_value(value);
                if sample.is_none() {
                    tracing::debug!("Skipping malformed sample in feed record {}", wire.id);
                }
                sample
            })
            .collect();

        Self {
            id: wire.id,
            skipped_samples: total - samples.len(),
            samples,
            cves,
        }
    }
}

/// A concrete file variant of a driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedSample {
    /// Generic filename
    pub filename: String,
    /// Original filename from the PE version resource, may be empty
    pub original_filename: String,
    /// Lowercase hex SHA-256
    pub sha256: String,
}

impl FeedSample {
    /// Extract a sample from its JSON value.
    ///
    /// Returns `None` unless the value is an object whose `SHA256` is a
    /// 64-digit hex string. Missing or non-string filenames read as empty.
    #[must_use]
    pub fn from_value(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        let sha256 = normalize_hash(object.get("SHA256")?.as_str()?)?;
        let text = |key: &str| {
            object
                .get(key)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string()
        };

        Some(Self {
            filename: text("Filename"),
            original_filename: text("OriginalFilename"),
            sha256,
        })
    }

    /// Filename to display: the original filename when present.
    #[must_use]
    pub fn display_filename(&self) -> &str {
        if self.original_filename.is_empty() {
            &self.filename
        } else {
            &self.original_filename
        }
    }
}

/// Parse a complete feed body.
///
/// Fails when the body is not a JSON array of objects that each carry an `Id`
/// and a `KnownVulnerableSamples` array.
pub fn parse_feed(body: &[u8]) -> Result<Vec<FeedRecord>> {
    serde_json::from_slice(body).map_err(ScanError::parse)
}

/// Lowercase and validate a hex SHA-256 value.
fn normalize_hash(raw: &str) -> Option<String> {
    let hash = raw.trim().to_ascii_lowercase();
    (hash.len() == SHA256_HEX_LEN && is_canonical_hash(&hash)).then_some(hash)
}

/// Read a CVE field that may be absent, a string or an array of strings.
fn string_list(value: &Value) -> Vec<String> {
    match value {
        Value::String(s) if !s.is_empty() => vec![s.clone()],
        Value::Array(items) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const HASH: &str = "0123456789abcdef0123456789abcdef0123456789abcdef0123456789abcdef";

    fn record(value: Value) -> FeedRecord {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_cve_aliases_are_merged_secondary_first() {
        let rec = record(json!({
            "Id": "d1",
            "KnownVulnerableSamples": [],
            "CVE": ["CVE-2021-1"],
            "CVEs": ["CVE-2019-2", "CVE-2021-1"]
        }));
        assert_eq!(rec.cves, vec!["CVE-2019-2", "CVE-2021-1", "CVE-2021-1"]);
    }

    #[test]
    fn test_cve_fields_optional_and_lenient() {
        let rec = record(json!({"Id": "d1", "KnownVulnerableSamples": []}));
        assert!(rec.cves.is_empty());

        let rec = record(json!({
            "Id": "d1",
            "KnownVulnerableSamples": [],
            "CVE": "CVE-2022-3",
            "CVEs": [42, "CVE-2020-4", null]
        }));
        assert_eq!(rec.cves, vec!["CVE-2020-4", "CVE-2022-3"]);

        let rec = record(json!({
            "Id": "d1",
            "KnownVulnerableSamples": [],
            "CVE": null,
            "CVEs": {"bad": true}
        }));
        assert!(rec.cves.is_empty());
        assert!(rec.samples.is_empty());
    }

    #[test]
    fn test_sample_hash_is_lowercased() {
        let sample = FeedSample::from_value(&json!({
            "Filename": "a.sys",
            "SHA256": HASH.to_uppercase()
        }))
        .unwrap();
        assert_eq!(sample.sha256, HASH);
        assert_eq!(sample.original_filename, "");
    }

    #[test]
    fn test_malformed_samples_are_skipped() {
        let rec = record(json!({
            "Id": "d1",
            "KnownVulnerableSamples": [
                {"Filename": "ok.sys", "SHA256": HASH},
                {"Filename": "nohash.sys"},
                {"Filename": "short.sys", "SHA256": "deadbeef"},
                {"Filename": "num.sys", "SHA256": 7},
                "not an object"
            ]
        }));
        assert_eq!(rec.samples.len(), 1);
        assert_eq!(rec.skipped_samples, 4);
        assert_eq!(rec.samples[0].filename, "ok.sys");
    }

    #[test]
    fn test_display_filename_prefers_original() {
        let plain = FeedSample {
            filename: "a.sys".to_string(),
            original_filename: String::new(),
            sha256: HASH.to_string(),
        };
        assert_eq!(plain.display_filename(), "a.sys");

        let renamed = FeedSample {
            original_filename: "b.sys".to_string(),
            ..plain
        };
        assert_eq!(renamed.display_filename(), "b.sys");
    }

    #[test]
    fn test_parse_feed_rejects_wrong_shape() {
        assert!(matches!(parse_feed(b"{}"), Err(ScanError::Parse(_))));
        assert!(matches!(parse_feed(b"[{\"KnownVulnerableSamples\": []}]"), Err(ScanError::Parse(_))));
        assert!(matches!(parse_feed(b"not json"), Err(ScanError::Parse(_))));
        assert!(parse_feed(b"[]").unwrap().is_empty());
    }

    #[test]
    fn test_parse_feed_requires_samples_list() {
        assert!(matches!(parse_feed(br#"[{"Id": "x"}]"#), Err(ScanError::Parse(_))));
        assert!(matches!(
            parse_feed(br#"[{"Id": "x", "KnownVulnerableSamples": null}]"#),
            Err(ScanError::Parse(_))
        ));
        assert!(matches!(
            parse_feed(br#"[{"Id": "x", "KnownVulnerableSamples": {}}]"#),
            Err(ScanError::Parse(_))
        ));

        let records = parse_feed(br#"[{"Id": "x", "KnownVulnerableSamples": []}]"#).unwrap();
        assert_eq!(records.len(), 1);
        assert!(records[0].samples.is_empty());
    }
}
