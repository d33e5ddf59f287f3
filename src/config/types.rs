//! Configuration types.

use crate::feed::{FeedClientConfig, FeedSource, FileFeedSource, HttpFeedSource};
use crate::reports::ReportFormat;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use super::defaults::{DEFAULT_TIMEOUT_SECS, default_feed_url, default_user_agent};

// ============================================================================
// Application Configuration
// ============================================================================

/// Complete configuration, as read from `.loldrivers-scan.yaml` and
/// overridden from the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppConfig {
    /// Where the driver feed comes from
    pub feed: FeedConfig,
    /// How candidates are scanned
    pub scan: ScanConfig,
    /// How results are written
    pub output: OutputConfig,
}

// ============================================================================
// Feed Configuration
// ============================================================================

/// Driver feed settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct FeedConfig {
    /// Feed URL (defaults to the public LOLDrivers API)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Request timeout in seconds (default 30)
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(range(min = 1))]
    pub timeout_secs: Option<u64>,
    /// User-Agent header sent with the request
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    /// Read the feed from a local `drivers.json` instead of downloading it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

impl FeedConfig {
    /// Effective feed URL
    #[must_use]
    pub fn url(&self) -> String {
        self.url.clone().unwrap_or_else(default_feed_url)
    }

    /// Effective request timeout
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }

    /// HTTP client settings derived from this section
    #[must_use]
    pub fn client_config(&self) -> FeedClientConfig {
        FeedClientConfig {
            url: self.url(),
            timeout: self.timeout(),
            user_agent: self.user_agent.clone().unwrap_or_else(default_user_agent),
        }
    }

    /// Build the feed source this section describes.
    #[must_use]
    pub fn source(&self) -> Box<dyn FeedSource> {
        match &self.file {
            Some(path) => Box::new(FileFeedSource::new(path)),
            None => Box::new(HttpFeedSource::new(self.client_config())),
        }
    }
}

// ============================================================================
// Scan Configuration
// ============================================================================

/// Scan behavior
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ScanConfig {
    /// Hash candidates in parallel
    pub parallel: bool,
}

// ============================================================================
// Output Configuration
// ============================================================================

/// Output-related configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct OutputConfig {
    /// Output format (default table)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<ReportFormat>,
    /// Output file path (None for stdout)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
    /// Exit with code 2 when a vulnerable driver is found
    pub fail_on_match: bool,
}

impl OutputConfig {
    /// Effective output format
    #[must_use]
    pub fn format(&self) -> ReportFormat {
        self.format.unwrap_or_default()
    }
}
