//! Hash-keyed lookup table over normalized feed entries.
//!
//! The index is built once per run and only read afterwards, so it can be
//! shared by reference across parallel scanning threads.
//!
//! # Example
//!
//! ```
//! use loldrivers_scan::model::{DriverIndex, NormalizedDriver};
//!
//! let hash = "ab".repeat(32);
//! let index = DriverIndex::build(vec![
//!     NormalizedDriver::new("X", hash.clone(), "x.sys", vec![]),
//! ]);
//! assert!(index.get(&hash).is_some());
//! ```

use super::NormalizedDriver;
use indexmap::IndexMap;

/// Lookup table from lowercase SHA-256 to the feed entry carrying it.
///
/// Insertion order follows the feed. When two samples share a hash the later
/// one replaces the earlier (last write wins); replacements are counted in
/// [`DriverIndex::overwritten`].
#[derive(Debug, Clone, Default)]
#[must_use]
pub struct DriverIndex {
    by_hash: IndexMap<String, NormalizedDriver>,
    overwritten: usize,
}

impl DriverIndex {
    /// Create an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the index from normalized drivers in feed order.
    pub fn build(drivers: impl IntoIterator<Item = NormalizedDriver>) -> Self {
        let mut index = Self::new();
        for driver in drivers {
            index.insert(driver);
        }
        if index.overwritten > 0 {
            tracing::debug!(
                "{} feed samples shared a hash with a later sample and were replaced",
                index.overwritten
            );
        }
        index
    }

    /// Insert a driver, replacing any earlier entry with the same hash.
    pub fn insert(&mut self, driver: NormalizedDriver) {
        if self.by_hash.insert(driver.hash.clone(), driver).is_some() {
            self.overwritten += 1;
        }
    }

    /// Look up a driver by digest. The digest is compared case-insensitively.
    #[must_use]
    pub fn get(&self, hash: &str) -> Option<&NormalizedDriver> {
        if let Some(driver) = self.by_hash.get(hash) {
            return Some(driver);
        }
        self.by_hash.get(&hash.trim().to_ascii_lowercase())
    }

    /// Check if a digest is known
    #[must_use]
    pub fn contains(&self, hash: &str) -> bool {
        self.get(hash).is_some()
    }

    /// Iterate over entries in feed order
    pub fn iter(&self) -> impl Iterator<Item = &NormalizedDriver> {
        self.by_hash.values()
    }

    /// Number of distinct hashes
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_hash.len()
    }

    /// Check if the index is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_hash.is_empty()
    }

    /// Number of entries replaced by a later sample with the same hash
    #[must_use]
    pub const fn overwritten(&self) -> usize {
        self.overwritten
    }
}

impl FromIterator<NormalizedDriver> for DriverIndex {
    fn from_iter<I: IntoIterator<Item = NormalizedDriver>>(iter: I) -> Self {
        Self::build(iter)
    }
}
