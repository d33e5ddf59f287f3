//! **Find known-vulnerable kernel drivers on a Windows host.**
//!
//! `loldrivers-scan` checks driver files against the [LOLDrivers] catalogue of
//! signed drivers with known vulnerabilities. Matching is purely by content:
//! every candidate file is hashed with SHA-256 and looked up in a table built
//! from the feed, so a renamed or relocated driver is still caught.
//!
//! [LOLDrivers]: https://www.loldrivers.io
//!
//! ## Core Concepts & Modules
//!
//! - **[`feed`]**: Downloads the feed (or reads a local copy) and flattens it
//!   into one [`NormalizedDriver`] per known sample, keyed by hash in a
//!   [`DriverIndex`].
//! - **[`resolve`]**: Turns the symbolic paths Windows records for drivers
//!   (`\SystemRoot\...`, `System32\...`, `\??\C:\...`) into real paths on this
//!   host via the [`PathResolver`].
//! - **[`matcher`]**: Resolves, hashes and looks up each candidate, collecting
//!   hits and per-candidate failures into a [`ScanReport`].
//! - **[`candidates`]**: Gathers the paths to check from arguments, list files
//!   or the drivers currently loaded by the kernel.
//! - **[`reports`]**: Renders results as a table, JSON or CSV.
//!
//! ## Getting Started
//!
//! ```no_run
//! use loldrivers_scan::{HttpFeedSource, Matcher, PathResolver, feed};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let index = feed::load_index(&HttpFeedSource::with_defaults())?;
//!     let matcher = Matcher::new(&index, PathResolver::host());
//!
//!     let report = matcher.scan(&[
//!         "\\SystemRoot\\System32\\drivers\\RTCore64.sys",
//!         "\\??\\C:\\Windows\\Temp\\gdrv.sys",
//!     ]);
//!
//!     for hit in &report.matches {
//!         println!("{} ({}) at {}", hit.filename, hit.id, hit.path_display());
//!     }
//!     for failure in &report.errors {
//!         eprintln!("{}: {}", failure.candidate, failure.error);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Command-Line Interface (CLI)
//!
//! This documentation is for the library crate. The `loldrivers-scan` binary
//! wraps it with `scan`, `feed`, `resolve` and `config` subcommands.

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

pub mod candidates;
pub mod cli;
pub mod config;
pub mod error;
pub mod feed;
pub mod matcher;
pub mod model;
pub mod pipeline;
pub mod reports;
pub mod resolve;
pub mod utils;

// Re-export main types for convenience
pub use candidates::CandidateSources;
pub use config::{AppConfig, ConfigError, FeedConfig, OutputConfig, ScanConfig, Validatable};
pub use error::{Result, ScanError};
pub use feed::{FeedSource, FileFeedSource, HttpFeedSource};
pub use matcher::{CandidateError, CandidateOutcome, Matcher, ScanReport, ScanStats};
pub use model::{DriverIndex, MatchStatus, NormalizedDriver};
pub use reports::{ReportFormat, ReportGenerator};
pub use resolve::{HostPlatform, KnownFolder, PathResolver, Platform};
pub use utils::{hash_bytes, hash_file};
