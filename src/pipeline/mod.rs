//! Pipeline orchestration for scans.
//!
//! Shared load feed → scan → report steps used by the CLI handlers.

mod feed_stage;
mod output;
mod report_stage;

pub use feed_stage::{load_drivers, load_index};
pub use output::{OutputTarget, write_output};
pub use report_stage::{output_feed_report, output_scan_report};

use crate::error::ScanError;

/// Structured pipeline error types for better diagnostics.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Feed could not be fetched or parsed
    #[error("Feed unavailable from {source_name}: {source}")]
    FeedFailed {
        source_name: String,
        #[source]
        source: ScanError,
    },

    /// Report generation or output failed
    #[error("Report failed: {source}")]
    ReportFailed {
        #[source]
        source: anyhow::Error,
    },
}

/// Exit codes for CI/CD integration
pub mod exit_codes {
    /// Success - scan completed (with no matches, or without --fail-on-match)
    pub const SUCCESS: i32 = 0;
    /// Vulnerable drivers were found and --fail-on-match was set
    pub const MATCHES_FOUND: i32 = 2;
    /// An error occurred
    pub const ERROR: i32 = 3;
}
