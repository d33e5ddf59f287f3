//! Property-based tests for feed normalization and path resolution.
//!
//! Feeds are generated as JSON so the whole parse → normalize → index path
//! is exercised on arbitrary casing, sample counts and CVE layouts.

use loldrivers_scan::{
    DriverIndex, KnownFolder, PathResolver, Platform, ScanError,
    feed::{normalize, parse_feed},
};
use proptest::prelude::*;
use serde_json::{Value, json};
use std::path::{Path, PathBuf};

fn hex_hash() -> impl Strategy<Value = String> {
    "[0-9a-fA-F]{64}"
}

fn sample() -> impl Strategy<Value = (String, String, String)> {
    ("[a-z]{1,8}\\.sys", prop_oneof![Just(String::new()), "[A-Za-z]{1,8}\\.sys"], hex_hash())
}

fn record_json(id: &str, samples: &[(String, String, String)], cves: &[String], cve: &[String]) -> Value {
    json!({
        "Id": id,
        "CVEs": cves,
        "CVE": cve,
        "KnownVulnerableSamples": samples
            .iter()
            .map(|(filename, original, sha)| json!({
                "Filename": filename,
                "OriginalFilename": original,
                "SHA256": sha,
            }))
            .collect::<Vec<_>>(),
    })
}

struct Fixed;

impl Platform for Fixed {
    fn known_folder(&self, folder: KnownFolder) -> loldrivers_scan::Result<PathBuf> {
        Ok(match folder {
            KnownFolder::System => PathBuf::from("/win/System32"),
            KnownFolder::Windows => PathBuf::from("/win"),
        })
    }

    fn exists(&self, _path: &Path) -> std::io::Result<bool> {
        Ok(true)
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn every_indexed_hash_is_canonical(
        samples in prop::collection::vec(sample(), 0..8),
    ) {
        let body = json!([record_json("r", &samples, &[], &[])]).to_string();
        let feed = normalize(&parse_feed(body.as_bytes()).unwrap());
        let index = DriverIndex::build(feed.drivers);

        for driver in index.iter() {
            prop_assert_eq!(driver.hash.len(), 64);
            prop_assert!(driver.hash.bytes().all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b)));
        }
        for (_, _, sha) in &samples {
            prop_assert!(index.contains(&sha.to_ascii_lowercase()));
        }
    }

    #[test]
    fn n_samples_give_n_entries_with_merged_cves(
        samples in prop::collection::vec(sample(), 0..8),
        cves in prop::collection::vec("CVE-20[0-2][0-9]-[0-9]{4,5}", 0..3),
        cve in prop::collection::vec("CVE-20[0-2][0-9]-[0-9]{4,5}", 0..3),
    ) {
        let body = json!([record_json("r", &samples, &cves, &cve)]).to_string();
        let feed = normalize(&parse_feed(body.as_bytes()).unwrap());

        prop_assert_eq!(feed.drivers.len(), samples.len());
        let merged: Vec<String> = cves.iter().chain(&cve).cloned().collect();
        for driver in &feed.drivers {
            prop_assert_eq!(&driver.cves, &merged);
            prop_assert_eq!(driver.id.as_str(), "r");
        }
    }

    #[test]
    fn filename_prefers_non_empty_original(
        samples in prop::collection::vec(sample(), 1..8),
    ) {
        let body = json!([record_json("r", &samples, &[], &[])]).to_string();
        let feed = normalize(&parse_feed(body.as_bytes()).unwrap());

        for (driver, (filename, original, _)) in feed.drivers.iter().zip(&samples) {
            let expected = if original.is_empty() { filename } else { original };
            prop_assert_eq!(&driver.filename, expected);
        }
    }

    #[test]
    fn paths_without_separator_never_resolve(raw in "[A-Za-z0-9_.?:]{0,40}") {
        let err = PathResolver::new(Fixed).resolve(&raw).unwrap_err();
        let is_unresolvable = matches!(err, ScanError::UnresolvablePath { .. });
        prop_assert!(is_unresolvable);
    }

    #[test]
    fn nt_literal_remainder_is_kept_verbatim(rest in "[A-Za-z]:\\\\[A-Za-z0-9_\\\\]{1,30}\\.sys") {
        let resolved = PathResolver::new(Fixed).resolve(&format!("\\??\\{rest}")).unwrap();
        prop_assert_eq!(resolved, PathBuf::from(rest));
    }
}
