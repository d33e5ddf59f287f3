//! Feed sources: the LOLDrivers API over HTTPS, or a local copy.

use crate::error::{Result, ScanError};
use std::path::PathBuf;
use std::time::Duration;

/// Default LOLDrivers feed URL
pub const LOLDRIVERS_FEED_URL: &str = "https://www.loldrivers.io/api/drivers.json";

/// Where the raw feed body comes from.
///
/// Implementations fetch once per call and never retry; the caller decides
/// whether a failure is worth another attempt.
pub trait FeedSource {
    /// Retrieve the raw feed body.
    fn fetch(&self) -> Result<Vec<u8>>;

    /// Human-readable location of the feed, for logs.
    fn describe(&self) -> String;
}

/// Feed client configuration
#[derive(Debug, Clone)]
pub struct FeedClientConfig {
    /// Feed URL
    pub url: String,
    /// Request timeout
    pub timeout: Duration,
    /// User-Agent header
    pub user_agent: String,
}

impl Default for FeedClientConfig {
    fn default() -> Self {
        Self {
            url: LOLDRIVERS_FEED_URL.to_string(),
            timeout: Duration::from_secs(30),
            user_agent: concat!("loldrivers-scan/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Downloads the feed with a blocking HTTP client.
#[derive(Debug, Clone, Default)]
pub struct HttpFeedSource {
    config: FeedClientConfig,
}

impl HttpFeedSource {
    /// Create a new HTTP feed source
    #[must_use]
    pub const fn new(config: FeedClientConfig) -> Self {
        Self { config }
    }

    /// Create with default configuration
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(FeedClientConfig::default())
    }

    /// The configured feed URL
    #[must_use]
    pub fn url(&self) -> &str {
        &self.config.url
    }
}

impl FeedSource for HttpFeedSource {
    fn fetch(&self) -> Result<Vec<u8>> {
        let url = &self.config.url;
        let client = reqwest::blocking::Client::builder()
            .timeout(self.config.timeout)
            .user_agent(self.config.user_agent.as_str())
            .build()
            .map_err(|e| ScanError::fetch(url, e))?;

        let response = client
            .get(url)
            .send()
            .map_err(|e| ScanError::fetch(url, e))?;

        if !response.status().is_success() {
            return Err(ScanError::fetch(
                url,
                format!("feed returned status {}", response.status()),
            ));
        }

        let body = response.bytes().map_err(|e| ScanError::fetch(url, e))?;
        tracing::debug!("Downloaded {} bytes from {}", body.len(), url);
        Ok(body.to_vec())
    }

    fn describe(&self) -> String {
        self.config.url.clone()
    }
}

/// Reads a previously downloaded `drivers.json`.
#[derive(Debug, Clone)]
pub struct FileFeedSource {
    path: PathBuf,
}

impl FileFeedSource {
    /// Create a source reading from `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl FeedSource for FileFeedSource {
    fn fetch(&self) -> Result<Vec<u8>> {
        std::fs::read(&self.path).map_err(|e| ScanError::fetch(self.describe(), e))
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config_points_at_loldrivers() {
        let source = HttpFeedSource::with_defaults();
        assert_eq!(source.url(), LOLDRIVERS_FEED_URL);
        assert!(source.describe().starts_with("https://"));
    }

    #[test]
    fn test_file_source_reads_body() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("drivers.json");
        std::fs::write(&path, b"[]").unwrap();

        let source = FileFeedSource::new(&path);
        assert_eq!(source.fetch().unwrap(), b"[]");
    }

    #[test]
    fn test_file_source_missing_is_fetch_error() {
        let temp_dir = TempDir::new().unwrap();
        let source = FileFeedSource::new(temp_dir.path().join("absent.json"));
        assert!(matches!(source.fetch(), Err(ScanError::Fetch { .. })));
    }
}
