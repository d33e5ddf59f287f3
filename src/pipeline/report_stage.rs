//! Report output stage.

use crate::config::OutputConfig;
use crate::matcher::ScanReport;
use crate::model::NormalizedDriver;
use crate::reports::create_reporter;
use anyhow::Result;

use super::{OutputTarget, PipelineError, write_output};

/// Render a scan report and write it to the configured destination.
pub fn output_scan_report(config: &OutputConfig, report: &ScanReport) -> Result<()> {
    let reporter = create_reporter(config.format());
    let rendered = reporter
        .generate_scan_report(report)
        .map_err(|e| PipelineError::ReportFailed { source: e.into() })?;
    write_output(&rendered, &OutputTarget::from_option(config.file.clone()))
}

/// Render a feed listing and write it to the configured destination.
pub fn output_feed_report(config: &OutputConfig, drivers: &[NormalizedDriver]) -> Result<()> {
    let reporter = create_reporter(config.format());
    let rendered = reporter
        .generate_feed_report(drivers)
        .map_err(|e| PipelineError::ReportFailed { source: e.into() })?;
    write_output(&rendered, &OutputTarget::from_option(config.file.clone()))
}
