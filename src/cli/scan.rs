//! Scan command handler.
//!
//! Implements the `scan` subcommand: load the feed, check every candidate
//! and report the vulnerable drivers found.

use crate::candidates::CandidateSources;
use crate::config::AppConfig;
use crate::matcher::Matcher;
use crate::pipeline::{exit_codes, load_index, output_scan_report};
use crate::resolve::{PathResolver, Platform};
use anyhow::{Context, Result, bail};

/// Run the scan command against the running host, returning the exit code.
pub fn run_scan(config: &AppConfig, sources: &CandidateSources) -> Result<i32> {
    run_scan_with(config, sources, PathResolver::host())
}

/// Run the scan command with a specific resolver.
pub fn run_scan_with<P: Platform>(
    config: &AppConfig,
    sources: &CandidateSources,
    resolver: PathResolver<P>,
) -> Result<i32> {
    super::ensure_valid(config)?;
    if sources.is_empty() {
        bail!("No candidate paths to scan; pass paths, --list or --loaded");
    }

    let candidates = sources
        .collect()
        .context("Failed to collect candidate paths")?;
    if candidates.is_empty() {
        bail!("Candidate sources yielded no paths to scan");
    }
    tracing::info!("Scanning {} candidate paths", candidates.len());

    let index = load_index(&config.feed)?;
    let report = Matcher::new(&index, resolver)
        .parallel(config.scan.parallel)
        .scan(&candidates);

    output_scan_report(&config.output, &report)?;

    if report.has_errors() {
        tracing::warn!("{} candidates could not be checked", report.errors.len());
    }

    if report.has_matches() {
        tracing::warn!("Found {} vulnerable drivers", report.matches.len());
        if config.output.fail_on_match {
            return Ok(exit_codes::MATCHES_FOUND);
        }
    }
    Ok(exit_codes::SUCCESS)
}
