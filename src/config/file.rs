//! Configuration file loading and discovery.
//!
//! Supports loading configuration from YAML files with automatic discovery.

use super::types::AppConfig;
use std::path::{Path, PathBuf};

// ============================================================================
// Configuration File Discovery
// ============================================================================

/// Standard config file names to search for.
const CONFIG_FILE_NAMES: &[&str] = &[
    ".loldrivers-scan.yaml",
    ".loldrivers-scan.yml",
    "loldrivers-scan.yaml",
    "loldrivers-scan.yml",
];

/// Discover a config file by searching standard locations.
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Current directory
/// 3. User config directory (~/.config/loldrivers-scan/)
/// 4. Home directory
#[must_use]
pub fn discover_config_file(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path
        && path.exists()
    {
        return Some(path.to_path_buf());
    }

    if let Ok(cwd) = std::env::current_dir()
        && let Some(path) = find_config_in_dir(&cwd)
    {
        return Some(path);
    }

    if let Some(config_dir) = dirs::config_dir()
        && let Some(path) = find_config_in_dir(&config_dir.join("loldrivers-scan"))
    {
        return Some(path);
    }

    if let Some(home) = dirs::home_dir()
        && let Some(path) = find_config_in_dir(&home)
    {
        return Some(path);
    }

    None
}

/// Find a config file in a specific directory.
fn find_config_in_dir(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.exists())
}

// ============================================================================
// Configuration File Loading
// ============================================================================

/// Error type for config file operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigFileError {
    /// File not found
    #[error("Config file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// IO error reading file
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    /// YAML parsing error
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// Load an `AppConfig` from a YAML file.
pub fn load_config_file(path: &Path) -> Result<AppConfig, ConfigFileError> {
    if !path.exists() {
        return Err(ConfigFileError::NotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)?;
    let config: AppConfig = serde_yaml::from_str(&content)?;
    Ok(config)
}

/// Load config from discovered file, or return default.
#[must_use]
pub fn load_or_default(explicit_path: Option<&Path>) -> (AppConfig, Option<PathBuf>) {
    discover_config_file(explicit_path).map_or_else(
        || (AppConfig::default(), None),
        |path| match load_config_file(&path) {
            Ok(config) => (config, Some(path)),
            Err(e) => {
                tracing::warn!("Failed to load config from {}: {}", path.display(), e);
                (AppConfig::default(), None)
            }
        },
    )
}

// ============================================================================
// Configuration Merging
// ============================================================================

impl AppConfig {
    /// Merge another config into this one, with `other` taking precedence.
    ///
    /// Only values `other` actually sets are applied; flags can be switched
    /// on but not off.
    pub fn merge(&mut self, other: &Self) {
        if other.feed.url.is_some() {
            self.feed.url.clone_from(&other.feed.url);
            // an explicit URL beats a local copy named in the file
            self.feed.file = None;
        }
        if other.feed.timeout_secs.is_some() {
            self.feed.timeout_secs = other.feed.timeout_secs;
        }
        if other.feed.user_agent.is_some() {
            self.feed.user_agent.clone_from(&other.feed.user_agent);
        }
        if other.feed.file.is_some() {
            self.feed.file.clone_from(&other.feed.file);
        }

        if other.scan.parallel {
            self.scan.parallel = true;
        }

        if other.output.format.is_some() {
            self.output.format = other.output.format;
        }
        if other.output.file.is_some() {
            self.output.file.clone_from(&other.output.file);
        }
        if other.output.fail_on_match {
            self.output.fail_on_match = true;
        }
    }

    /// Load from file and merge with CLI overrides.
    #[must_use]
    pub fn from_file_with_overrides(
        config_path: Option<&Path>,
        cli_overrides: &Self,
    ) -> (Self, Option<PathBuf>) {
        let (mut config, loaded_from) = load_or_default(config_path);
        config.merge(cli_overrides);
        (config, loaded_from)
    }
}

// ============================================================================
// Example Config Generation
// ============================================================================

/// Generate a commented example config with all options.
#[must_use]
pub fn generate_example_config() -> String {
    r"# loldrivers-scan configuration
# Place this file at .loldrivers-scan.yaml in the working directory or
# ~/.config/loldrivers-scan/loldrivers-scan.yaml for a per-user default.
#
# Command-line flags always override file settings.

feed:
  # Feed URL
  url: https://www.loldrivers.io/api/drivers.json
  # Request timeout in seconds
  timeout_secs: 30
  # Custom User-Agent header
  # user_agent: my-scanner/1.0
  # Read a downloaded drivers.json instead of fetching
  # file: ./drivers.json

scan:
  # Hash candidates in parallel
  parallel: false

output:
  # Format: table, json, csv
  format: table
  # Output file path (omit for stdout)
  # file: report.json
  # Exit with code 2 when a vulnerable driver is found
  fail_on_match: false
"
    .to_string()
}

// ============================================================================
// Tests
// ============================================================================
