//! Per-candidate outcomes and the aggregated scan report.

use crate::error::ScanError;
use crate::model::NormalizedDriver;
use std::time::Duration;

/// What happened to a single candidate.
#[derive(Debug)]
#[must_use]
pub enum CandidateOutcome {
    /// The file matches a feed sample; carries the annotated copy
    Match(NormalizedDriver),
    /// The file was hashed and is not in the feed
    Clean,
    /// Resolution or hashing failed
    Failed(ScanError),
}

/// A candidate that could not be checked, with the reason.
#[derive(Debug)]
pub struct CandidateError {
    /// The raw candidate path as given
    pub candidate: String,
    /// Why it failed
    pub error: ScanError,
}

/// Counters from a scan.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ScanStats {
    /// Candidates examined
    pub candidates: usize,
    /// Candidates matching a feed sample
    pub matches: usize,
    /// Candidates hashed without a match
    pub clean: usize,
    /// Candidates whose path could not be resolved or did not exist
    pub unresolved: usize,
    /// Candidates that resolved but could not be read
    pub unreadable: usize,
    /// Wall time of the scan
    pub duration: Duration,
}

impl ScanStats {
    /// Total failed candidates
    #[must_use]
    pub const fn errors(&self) -> usize {
        self.unresolved + self.unreadable
    }

    /// Log a summary of the scan
    pub fn log_summary(&self) {
        tracing::info!(
            "Scan complete: {} candidates, {} matches, {} clean, {} unresolved, {} unreadable in {:?}",
            self.candidates,
            self.matches,
            self.clean,
            self.unresolved,
            self.unreadable,
            self.duration
        );
    }
}

/// Everything a scan found, in candidate order.
#[derive(Debug, Default)]
pub struct ScanReport {
    /// Matched drivers annotated with their local path
    pub matches: Vec<NormalizedDriver>,
    /// Candidates that could not be checked
    pub errors: Vec<CandidateError>,
    /// Counters
    pub stats: ScanStats,
}

impl ScanReport {
    /// Fold outcomes, in candidate order, into a report.
    pub fn from_outcomes<S: AsRef<str>>(
        outcomes: impl IntoIterator<Item = (S, CandidateOutcome)>,
    ) -> Self {
        let mut report = Self::default();

        for (candidate, outcome) in outcomes {
            report.stats.candidates += 1;
            match outcome {
                CandidateOutcome::Match(driver) => {
                    report.stats.matches += 1;
                    report.matches.push(driver);
                }
                CandidateOutcome::Clean => report.stats.clean += 1,
                CandidateOutcome::Failed(error) => {
                    if matches!(error, ScanError::Io { .. }) {
                        report.stats.unreadable += 1;
                    } else {
                        report.stats.unresolved += 1;
                    }
                    report.errors.push(CandidateError {
                        candidate: candidate.as_ref().to_string(),
                        error,
                    });
                }
            }
        }

        report
    }

    /// Check if any vulnerable driver was found
    #[must_use]
    pub fn has_matches(&self) -> bool {
        !self.matches.is_empty()
    }

    /// Check if any candidate failed
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}
