//! CSV report generator.
//!
//! Scan reports carry one row per hit and one per failed candidate, told
//! apart by the leading `Result` column. Failed rows put the raw candidate
//! in the `Path` column.

use super::{ReportError, ReportFormat, ReportGenerator};
use crate::matcher::ScanReport;
use crate::model::NormalizedDriver;

/// CSV report generator.
pub struct CsvReporter;

impl CsvReporter {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for CsvReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for CsvReporter {
    fn generate_scan_report(&self, report: &ScanReport) -> Result<String, ReportError> {
        let mut content = String::new();
        content.push_str("Result,Filename,Path,Status,ID,Sha256,CVEs,Error\n");

        for driver in &report.matches {
            content.push_str(&format!(
                "match,\"{}\",\"{}\",\"{}\",\"{}\",{},\"{}\",\n",
                escape_csv(&driver.filename),
                escape_csv(&driver.path_display()),
                driver.status_label(),
                escape_csv(&driver.id),
                driver.hash,
                escape_csv(&driver.cves.join("; ")),
            ));
        }

        for failure in &report.errors {
            content.push_str(&format!(
                "error,,\"{}\",,,,,\"{}\"\n",
                escape_csv(&failure.candidate),
                escape_csv(&failure.error.to_string()),
            ));
        }

        Ok(content)
    }

    fn generate_feed_report(&self, drivers: &[NormalizedDriver]) -> Result<String, ReportError> {
        let mut content = String::new();
        content.push_str("ID,Filename,Sha256,CVEs\n");

        for driver in drivers {
            content.push_str(&format!(
                "\"{}\",\"{}\",{},\"{}\"\n",
                escape_csv(&driver.id),
                escape_csv(&driver.filename),
                driver.hash,
                escape_csv(&driver.cves.join("; ")),
            ));
        }

        Ok(content)
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Csv
    }
}

/// Escape a string for CSV embedding: double-quote escaping per RFC 4180,
/// plus newline flattening since fields are already wrapped in double quotes.
fn escape_csv(s: &str) -> String {
    s.replace('"', "\"\"").replace(['\r', '\n'], " ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScanError;
    use crate::matcher::CandidateOutcome;

    #[test]
    fn test_escape_csv() {
        assert_eq!(escape_csv("say \"hi\""), "say \"\"hi\"\"");
        assert_eq!(escape_csv("a\r\nb"), "a  b");
    }

    #[test]
    fn test_scan_rows() {
        let hit = NormalizedDriver::new(
            "X",
            "a".repeat(64),
            "x.sys",
            vec!["CVE-1".to_string(), "CVE-2".to_string()],
        )
        .matched_at("/drivers/bad.sys");
        let report = ScanReport::from_outcomes(vec![
            ("a", CandidateOutcome::Match(hit)),
            ("bare", CandidateOutcome::Failed(ScanError::unresolvable("bare", "no prefix separator"))),
        ]);

        let out = CsvReporter::new().generate_scan_report(&report).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("match,\"x.sys\",\"/drivers/bad.sys\""));
        assert!(lines[1].contains("\"match found\""));
        assert!(lines[1].contains("\"CVE-1; CVE-2\""));
        assert!(lines[2].starts_with("error,,\"bare\",,,,,"));
        // every row has the same number of fields
        let header_fields = lines[0].split(',').count();
        assert_eq!(lines[2].split(',').count(), header_fields);
    }

    #[test]
    fn test_feed_rows() {
        let drivers = vec![NormalizedDriver::new("Y", "b".repeat(64), "y.sys", vec![])];
        let out = CsvReporter::new().generate_feed_report(&drivers).unwrap();
        assert_eq!(
            out.lines().nth(1).unwrap(),
            format!("\"Y\",\"y.sys\",{},\"\"", "b".repeat(64))
        );
    }
}
