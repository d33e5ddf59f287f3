//! Configuration module for loldrivers-scan.
//!
//! This module provides:
//! - Type-safe configuration structures
//! - Validation for configuration values
//! - YAML config file loading and discovery
//! - CLI argument merging
//!
//! # Configuration File
//!
//! Place a `.loldrivers-scan.yaml` file in the working directory or
//! `~/.config/loldrivers-scan/`:
//!
//! ```yaml
//! feed:
//!   timeout_secs: 60
//! scan:
//!   parallel: true
//! output:
//!   format: json
//!   fail_on_match: true
//! ```

mod defaults;
pub mod file;
mod types;
mod validation;

pub use defaults::DEFAULT_TIMEOUT_SECS;
pub use types::{AppConfig, FeedConfig, OutputConfig, ScanConfig};
pub use validation::{ConfigError, Validatable};

pub use file::{
    ConfigFileError, discover_config_file, generate_example_config, load_config_file,
    load_or_default,
};

/// Generate a JSON Schema for the `AppConfig` configuration format.
///
/// Editors can use it to validate and complete `.loldrivers-scan.yaml`.
pub fn generate_json_schema() -> Result<String, serde_json::Error> {
    let schema = schemars::schema_for!(AppConfig);
    serde_json::to_string_pretty(&schema)
}
