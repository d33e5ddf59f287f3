//! Column-aligned table output.

use super::{ReportError, ReportFormat, ReportGenerator};
use crate::matcher::ScanReport;
use crate::model::NormalizedDriver;
use unicode_width::UnicodeWidthStr;

const HEADERS: [&str; 6] = ["Filename", "Path", "Status", "ID", "Sha256", "CVEs"];
const GUTTER: &str = "  ";

/// Table report generator.
pub struct TableReporter;

impl TableReporter {
    /// Create a new table reporter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for TableReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for TableReporter {
    fn generate_scan_report(&self, report: &ScanReport) -> Result<String, ReportError> {
        let mut content = driver_table(&report.matches);

        for failure in &report.errors {
            content.push_str(&format!(
                "error: {}: {}\n",
                failure.candidate, failure.error
            ));
        }

        Ok(content)
    }

    fn generate_feed_report(&self, drivers: &[NormalizedDriver]) -> Result<String, ReportError> {
        Ok(driver_table(drivers))
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Table
    }
}

fn driver_table(drivers: &[NormalizedDriver]) -> String {
    let rows: Vec<Vec<String>> = drivers
        .iter()
        .map(|d| {
            vec![
                d.filename.clone(),
                d.path_display(),
                d.status_label().to_string(),
                d.id.clone(),
                d.hash.clone(),
                d.cves_joined(),
            ]
        })
        .collect();
    render_table(&HEADERS, &rows)
}

/// Render rows under a header and a dash rule.
///
/// Each column is as wide as its widest cell, header included, measured in
/// terminal display columns. Trailing padding is trimmed from every line.
#[must_use]
pub fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.width()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.width());
        }
    }

    let mut out = String::new();
    push_line(&mut out, headers.iter().copied(), &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_line(&mut out, rule.iter().map(String::as_str), &widths);
    for row in rows {
        push_line(&mut out, row.iter().map(String::as_str), &widths);
    }
    out
}

fn push_line<'a>(out: &mut String, cells: impl Iterator<Item = &'a str>, widths: &[usize]) {
    let mut line = String::new();
    for (i, (cell, width)) in cells.zip(widths).enumerate() {
        if i > 0 {
            line.push_str(GUTTER);
        }
        line.push_str(cell);
        line.push_str(&" ".repeat(width.saturating_sub(cell.width())));
    }
    out.push_str(line.trim_end());
    out.push('\n');
}
