//! Matching local driver files against the feed.
//!
//! The matcher is the one place where both halves meet: it resolves each
//! candidate path, hashes the file and looks the digest up in the
//! [`DriverIndex`]. Candidates are independent, so a failure is recorded
//! against its candidate and the batch carries on.
//!
//! # Example
//!
//! ```no_run
//! use loldrivers_scan::feed::{self, HttpFeedSource};
//! use loldrivers_scan::matcher::Matcher;
//! use loldrivers_scan::resolve::PathResolver;
//!
//! let index = feed::load_index(&HttpFeedSource::with_defaults())?;
//! let matcher = Matcher::new(&index, PathResolver::host());
//! let report = matcher.scan(&["\\SystemRoot\\System32\\drivers\\RTCore64.sys"]);
//!
//! for driver in &report.matches {
//!     println!("{} at {}", driver.filename, driver.path_display());
//! }
//! # Ok::<(), loldrivers_scan::ScanError>(())
//! ```

mod outcome;

pub use outcome::{CandidateError, CandidateOutcome, ScanReport, ScanStats};

use crate::model::DriverIndex;
use crate::resolve::{HostPlatform, PathResolver, Platform};
use crate::utils::hash_file;
use rayon::prelude::*;
use std::time::Instant;

/// Resolves, hashes and looks up candidate driver paths.
pub struct Matcher<'a, P: Platform = HostPlatform> {
    index: &'a DriverIndex,
    resolver: PathResolver<P>,
    parallel: bool,
}

impl<'a, P: Platform> Matcher<'a, P> {
    /// Create a sequential matcher over a built index
    pub const fn new(index: &'a DriverIndex, resolver: PathResolver<P>) -> Self {
        Self {
            index,
            resolver,
            parallel: false,
        }
    }

    /// Hash candidates on the rayon pool instead of one at a time.
    #[must_use]
    pub const fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Check one candidate.
    pub fn check(&self, candidate: &str) -> CandidateOutcome {
        let path = match self.resolver.resolve(candidate) {
            Ok(path) => path,
            Err(error) => {
                tracing::warn!("Skipping {}: {}", candidate, error);
                return CandidateOutcome::Failed(error);
            }
        };

        let digest = match hash_file(&path) {
            Ok(digest) => digest,
            Err(error) => {
                tracing::warn!("Cannot hash {}: {}", path.display(), error);
                return CandidateOutcome::Failed(error);
            }
        };

        match self.index.get(&digest) {
            Some(driver) => {
                tracing::debug!("{} matches feed entry {}", path.display(), driver.id);
                CandidateOutcome::Match(driver.matched_at(path))
            }
            None => {
                tracing::debug!("{} ({}) is not in the feed", path.display(), digest);
                CandidateOutcome::Clean
            }
        }
    }

    /// Check every candidate and collect a report in candidate order.
    pub fn scan<S: AsRef<str> + Sync>(&self, candidates: &[S]) -> ScanReport {
        let start = Instant::now();

        let outcomes: Vec<CandidateOutcome> = if self.parallel {
            candidates
                .par_iter()
                .map(|c| self.check(c.as_ref()))
                .collect()
        } else {
            candidates.iter().map(|c| self.check(c.as_ref())).collect()
        };

        let mut report = ScanReport::from_outcomes(
            candidates.iter().map(AsRef::<str>::as_ref).zip(outcomes),
        );
        report.stats.duration = start.elapsed();
        report.stats.log_summary();
        report
    }
}
