//! LOLDrivers feed retrieval and normalization.
//!
//! The feed lists known-vulnerable drivers, each with one or more samples.
//! This module downloads it, flattens it to one [`NormalizedDriver`] per
//! sample and builds the hash-keyed [`DriverIndex`] the matcher looks up.
//!
//! # Example
//!
//! ```no_run
//! use loldrivers_scan::feed::{self, HttpFeedSource};
//!
//! let index = feed::load_index(&HttpFeedSource::with_defaults())?;
//! println!("{} known vulnerable samples", index.len());
//! # Ok::<(), loldrivers_scan::ScanError>(())
//! ```

mod client;
mod normalize;
mod response;

pub use client::{FeedClientConfig, FeedSource, FileFeedSource, HttpFeedSource, LOLDRIVERS_FEED_URL};
pub use normalize::{NormalizeStats, NormalizedFeed, normalize};
pub use response::{FeedRecord, FeedSample, parse_feed};

use crate::error::Result;
use crate::model::{DriverIndex, NormalizedDriver};

/// Fetch the feed from `source` and flatten it, keeping feed order.
pub fn fetch_and_normalize(source: &dyn FeedSource) -> Result<Vec<NormalizedDriver>> {
    tracing::info!("Fetching driver feed from {}", source.describe());
    let body = source.fetch()?;
    let records = parse_feed(&body)?;
    let feed = normalize(&records);
    feed.stats.log_summary();
    Ok(feed.drivers)
}

/// Fetch the feed and build the hash lookup table.
pub fn load_index(source: &dyn FeedSource) -> Result<DriverIndex> {
    let index = DriverIndex::build(fetch_and_normalize(source)?);
    tracing::info!("Loaded {} distinct driver hashes", index.len());
    Ok(index)
}
