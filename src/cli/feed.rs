//! Feed command handler.
//!
//! Implements the `feed` subcommand, which lists the normalized feed.

use crate::config::AppConfig;
use crate::pipeline::{exit_codes, load_drivers, output_feed_report};
use anyhow::Result;

/// Run the feed command
pub fn run_feed(config: &AppConfig) -> Result<i32> {
    super::ensure_valid(config)?;

    let drivers = load_drivers(&config.feed)?;
    output_feed_report(&config.output, &drivers)?;
    Ok(exit_codes::SUCCESS)
}
