//! Normalized driver records produced from the feed.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Length of a hex-encoded SHA-256 digest.
pub const SHA256_HEX_LEN: usize = 64;

/// One known-vulnerable driver sample, in canonical form.
///
/// `path` and `status` are empty for feed entries and only filled on the
/// copy the matcher hands back for a local hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedDriver {
    /// Driver identifier from the feed
    pub id: String,
    /// Lowercase hex SHA-256 of the sample
    #[serde(rename = "sha256")]
    pub hash: String,
    /// Display filename (original filename when the feed has one)
    pub filename: String,
    /// Associated vulnerability identifiers, in feed order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cves: Vec<String>,
    /// Resolved local path of a matching file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    /// Match status for a local hit
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<MatchStatus>,
}

impl NormalizedDriver {
    /// Create an unannotated feed entry.
    pub fn new(
        id: impl Into<String>,
        hash: impl Into<String>,
        filename: impl Into<String>,
        cves: Vec<String>,
    ) -> Self {
        Self {
            id: id.into(),
            hash: hash.into(),
            filename: filename.into(),
            cves,
            path: None,
            status: None,
        }
    }

    /// Return a copy annotated as a local match at `path`.
    #[must_use]
    pub fn matched_at(&self, path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            status: Some(MatchStatus::MatchFound),
            ..self.clone()
        }
    }

    /// CVE list as a single display string.
    #[must_use]
    pub fn cves_joined(&self) -> String {
        self.cves.join(", ")
    }

    /// Path as a display string, empty when unset.
    #[must_use]
    pub fn path_display(&self) -> String {
        self.path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_default()
    }

    /// Status label, empty when unset.
    #[must_use]
    pub fn status_label(&self) -> &'static str {
        self.status.map_or("", MatchStatus::label)
    }
}

/// Outcome label attached to a matched driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchStatus {
    /// Local file content matches a feed sample
    #[serde(rename = "match found")]
    MatchFound,
}

impl MatchStatus {
    /// Human-readable label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::MatchFound => "match found",
        }
    }
}

impl fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Whether `hash` is a lowercase hex SHA-256 digest.
#[must_use]
pub fn is_canonical_hash(hash: &str) -> bool {
    hash.len() == SHA256_HEX_LEN
        && hash
            .bytes()
            .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
}
