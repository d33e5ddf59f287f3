//! Canonical data structures shared by the feed, matcher and reports.
//!
//! The feed is flattened into [`NormalizedDriver`] entries, one per sample,
//! and loaded into a [`DriverIndex`] keyed by content hash:
//!
//! ```ignore
//! let drivers = loldrivers_scan::feed::fetch_and_normalize(&source)?;
//! let index = DriverIndex::build(drivers);
//!
//! if let Some(driver) = index.get(&digest) {
//!     println!("{} is {}", path.display(), driver.filename);
//! }
//! ```

mod driver;
mod index;

pub use driver::*;
pub use index::*;
