//! Flattening of feed records into normalized drivers.

use super::response::FeedRecord;
use crate::model::NormalizedDriver;

/// Counters from a normalization pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct NormalizeStats {
    /// Feed records seen
    pub records: usize,
    /// Well-formed samples turned into drivers
    pub samples: usize,
    /// Samples dropped as malformed
    pub skipped_samples: usize,
}

impl NormalizeStats {
    /// Log a summary of the normalization pass
    pub fn log_summary(&self) {
        tracing::info!(
            "Normalized driver feed: {} records, {} samples ({} malformed samples skipped)",
            self.records,
            self.samples,
            self.skipped_samples
        );
    }
}

/// Result of flattening a feed.
#[derive(Debug, Default, Clone)]
pub struct NormalizedFeed {
    /// One driver per sample, in (record, sample) order
    pub drivers: Vec<NormalizedDriver>,
    /// Counters
    pub stats: NormalizeStats,
}

/// Expand every record into one [`NormalizedDriver`] per sample.
///
/// Order is preserved and samples are never merged, even when they share a
/// hash; collapsing duplicates is left to [`crate::model::DriverIndex`].
#[must_use]
pub fn normalize(records: &[FeedRecord]) -> NormalizedFeed {
    let mut feed = NormalizedFeed::default();

    for record in records {
        feed.stats.records += 1;
        feed.stats.skipped_samples += record.skipped_samples;

        for sample in &record.samples {
            feed.drivers.push(NormalizedDriver::new(
                record.id.clone(),
                sample.sha256.clone(),
                sample.display_filename(),
                record.cves.clone(),
            ));
        }
    }

    feed.stats.samples = feed.drivers.len();
    feed
}
