//! Unified error types for loldrivers-scan.
//!
//! Feed-level errors ([`ScanError::Fetch`], [`ScanError::Parse`]) end the run,
//! since nothing can be matched without the lookup map. Candidate-level errors
//! ([`ScanError::UnresolvablePath`], [`ScanError::NotFound`], [`ScanError::Io`])
//! are collected per candidate by the matcher and reported alongside the hits.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for loldrivers-scan operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ScanError {
    /// Transport-level failure while downloading the feed
    #[error("Failed to fetch driver feed from {url}: {message}")]
    Fetch { url: String, message: String },

    /// Feed body does not have the expected shape
    #[error("Failed to parse driver feed: {0}")]
    Parse(String),

    /// Path has no decomposable or recognised prefix
    #[error("Cannot resolve path '{path}': {reason}")]
    UnresolvablePath { path: String, reason: String },

    /// Resolved path does not exist on this host
    #[error("Resolved path {path:?} does not exist")]
    NotFound { path: PathBuf },

    /// IO errors with context
    #[error("IO error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration errors
    #[error("Invalid configuration: {0}")]
    Config(String),
}

// ============================================================================
// Result type alias
// ============================================================================

/// Convenient Result type for loldrivers-scan operations
pub type Result<T> = std::result::Result<T, ScanError>;

// ============================================================================
// Error construction helpers
// ============================================================================

impl ScanError {
    /// Create a fetch error for the given feed location
    pub fn fetch(url: impl Into<String>, message: impl std::fmt::Display) -> Self {
        Self::Fetch {
            url: url.into(),
            message: message.to_string(),
        }
    }

    /// Create a parse error
    pub fn parse(message: impl std::fmt::Display) -> Self {
        Self::Parse(message.to_string())
    }

    /// Create an unresolvable path error
    pub fn unresolvable(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::UnresolvablePath {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a not-found error for an attempted path
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        Self::NotFound { path: path.into() }
    }

    /// Create an IO error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Whether this error prevents the whole run from continuing.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::Fetch { .. } | Self::Parse(_) | Self::Config(_))
    }

    /// Short machine-readable name of the error kind.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Fetch { .. } => "fetch",
            Self::Parse(_) => "parse",
            Self::UnresolvablePath { .. } => "unresolvable_path",
            Self::NotFound { .. } => "not_found",
            Self::Io { .. } => "io",
            Self::Config(_) => "config",
        }
    }
}

impl From<serde_json::Error> for ScanError {
    fn from(err: serde_json::Error) -> Self {
        Self::parse(err)
    }
}
