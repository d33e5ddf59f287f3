//! Configuration validation for loldrivers-scan.

use super::types::{AppConfig, FeedConfig, OutputConfig};

// ============================================================================
// Configuration Error
// ============================================================================

/// Error type for configuration validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    /// The field that failed validation
    pub field: String,
    /// Description of the validation error
    pub message: String,
}

impl ConfigError {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Validation Trait
// ============================================================================

/// Trait for validatable configuration types.
pub trait Validatable {
    /// Validate the configuration, returning any errors found.
    fn validate(&self) -> Vec<ConfigError>;

    /// Check if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

// ============================================================================
// Validation Implementations
// ============================================================================

impl Validatable for AppConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = self.feed.validate();
        errors.extend(self.output.validate());
        errors
    }
}

impl Validatable for FeedConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if let Some(url) = &self.url {
            match reqwest::Url::parse(url) {
                Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => {}
                Ok(parsed) => errors.push(ConfigError::new(
                    "feed.url",
                    format!("Unsupported scheme '{}', expected http or https", parsed.scheme()),
                )),
                Err(e) => errors.push(ConfigError::new(
                    "feed.url",
                    format!("Invalid URL '{url}': {e}"),
                )),
            }
        }

        if self.timeout_secs == Some(0) {
            errors.push(ConfigError::new(
                "feed.timeout_secs",
                "Timeout must be at least 1 second",
            ));
        }

        if let Some(file) = &self.file
            && !file.is_file()
        {
            errors.push(ConfigError::new(
                "feed.file",
                format!("Feed file does not exist: {}", file.display()),
            ));
        }

        errors
    }
}

impl Validatable for OutputConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if let Some(file_path) = &self.file
            && let Some(parent) = file_path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            errors.push(ConfigError::new(
                "output.file",
                format!("Parent directory does not exist: {}", parent.display()),
            ));
        }

        errors
    }
}
