//! JSON report generator.

use super::{ReportError, ReportFormat, ReportGenerator};
use crate::matcher::{ScanReport, ScanStats};
use crate::model::NormalizedDriver;
use chrono::Utc;
use serde::Serialize;

/// JSON report generator
pub struct JsonReporter {
    /// Pretty print output
    pretty: bool,
}

impl JsonReporter {
    /// Create a new JSON reporter
    #[must_use]
    pub const fn new() -> Self {
        Self { pretty: true }
    }

    /// Set pretty printing
    #[must_use]
    pub const fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    fn render<T: Serialize>(&self, value: &T) -> Result<String, ReportError> {
        let mut json = if self.pretty {
            serde_json::to_string_pretty(value)?
        } else {
            serde_json::to_string(value)?
        };
        json.push('\n');
        Ok(json)
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for JsonReporter {
    fn generate_scan_report(&self, report: &ScanReport) -> Result<String, ReportError> {
        let json = JsonScanReport {
            tool: ToolInfo::current(),
            generated_at: Utc::now().to_rfc3339(),
            summary: JsonSummary::from(&report.stats),
            matches: &report.matches,
            errors: report
                .errors
                .iter()
                .map(|e| JsonCandidateError {
                    candidate: &e.candidate,
                    kind: e.error.kind(),
                    message: e.error.to_string(),
                })
                .collect(),
        };
        self.render(&json)
    }

    fn generate_feed_report(&self, drivers: &[NormalizedDriver]) -> Result<String, ReportError> {
        let json = JsonFeedReport {
            tool: ToolInfo::current(),
            generated_at: Utc::now().to_rfc3339(),
            count: drivers.len(),
            drivers,
        };
        self.render(&json)
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Json
    }
}

// JSON structures

#[derive(Serialize)]
struct ToolInfo {
    name: &'static str,
    version: &'static str,
}

impl ToolInfo {
    const fn current() -> Self {
        Self {
            name: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
        }
    }
}

#[derive(Serialize)]
struct JsonScanReport<'a> {
    tool: ToolInfo,
    generated_at: String,
    summary: JsonSummary,
    matches: &'a [NormalizedDriver],
    errors: Vec<JsonCandidateError<'a>>,
}

#[derive(Serialize)]
struct JsonSummary {
    candidates: usize,
    matches: usize,
    clean: usize,
    unresolved: usize,
    unreadable: usize,
    duration_ms: u128,
}

impl From<&ScanStats> for JsonSummary {
    fn from(stats: &ScanStats) -> Self {
        Self {
            candidates: stats.candidates,
            matches: stats.matches,
            clean: stats.clean,
            unresolved: stats.unresolved,
            unreadable: stats.unreadable,
            duration_ms: stats.duration.as_millis(),
        }
    }
}

#[derive(Serialize)]
struct JsonCandidateError<'a> {
    candidate: &'a str,
    kind: &'static str,
    message: String,
}

#[derive(Serialize)]
struct JsonFeedReport<'a> {
    tool: ToolInfo,
    generated_at: String,
    count: usize,
    drivers: &'a [NormalizedDriver],
}
