//! CLI command handlers.
//!
//! Testable command handlers invoked by main.rs. Each handler implements
//! one subcommand and returns the process exit code.

mod config;
mod feed;
mod resolve;
mod scan;

pub use config::{ConfigView, run_config};
pub use feed::run_feed;
pub use resolve::{run_resolve, run_resolve_with};
pub use scan::{run_scan, run_scan_with};

use crate::config::{AppConfig, Validatable};
use anyhow::{Result, bail};

/// Refuse to run with an invalid configuration.
fn ensure_valid(config: &AppConfig) -> Result<()> {
    let errors = config.validate();
    if errors.is_empty() {
        return Ok(());
    }
    let details: Vec<String> = errors.iter().map(ToString::to_string).collect();
    bail!("Invalid configuration:\n  {}", details.join("\n  "))
}
