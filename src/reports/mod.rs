//! Report generation for scan results.
//!
//! Three output formats are available:
//! - Table: column-aligned terminal output
//! - JSON: structured data for programmatic integration
//! - CSV: spreadsheet import
//!
//! Every reporter renders two things: the outcome of a scan (hits plus the
//! candidates that could not be checked) and a plain listing of the
//! normalized feed.

mod csv;
mod json;
mod table;
mod types;

pub use csv::CsvReporter;
pub use json::JsonReporter;
pub use table::{TableReporter, render_table};
pub use types::ReportFormat;

use crate::matcher::ScanReport;
use crate::model::NormalizedDriver;
use std::io::Write;
use thiserror::Error;

/// Errors that can occur during report generation
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for ReportError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}

/// Trait for report generators
pub trait ReportGenerator {
    /// Render the outcome of a scan
    fn generate_scan_report(&self, report: &ScanReport) -> Result<String, ReportError>;

    /// Render a listing of normalized feed entries
    fn generate_feed_report(&self, drivers: &[NormalizedDriver]) -> Result<String, ReportError>;

    /// Write a scan report to a writer
    fn write_scan_report(
        &self,
        report: &ScanReport,
        writer: &mut dyn Write,
    ) -> Result<(), ReportError> {
        let rendered = self.generate_scan_report(report)?;
        writer.write_all(rendered.as_bytes())?;
        Ok(())
    }

    /// Get the format this generator produces
    fn format(&self) -> ReportFormat;
}

/// Create a report generator for the given format
#[must_use]
pub fn create_reporter(format: ReportFormat) -> Box<dyn ReportGenerator> {
    match format {
        ReportFormat::Table => Box::new(TableReporter::new()),
        ReportFormat::Json => Box::new(JsonReporter::new()),
        ReportFormat::Csv => Box::new(CsvReporter::new()),
    }
}
