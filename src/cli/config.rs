//! Config command handler.
//!
//! Implements the `config` subcommand: print an example file, the JSON
//! schema, or the effective configuration.

use crate::config::{AppConfig, Validatable, generate_example_config, generate_json_schema};
use crate::pipeline::{OutputTarget, exit_codes, write_output};
use anyhow::{Context, Result};
use std::path::Path;

/// What the config command prints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigView {
    /// Commented example `.loldrivers-scan.yaml`
    Example,
    /// JSON schema of the config file
    Schema,
    /// Configuration in effect after file discovery
    Effective,
}

/// Run the config command
pub fn run_config(
    view: ConfigView,
    explicit_path: Option<&Path>,
    target: &OutputTarget,
) -> Result<i32> {
    let content = render(view, explicit_path)?;
    write_output(&content, target)?;
    Ok(exit_codes::SUCCESS)
}

fn render(view: ConfigView, explicit_path: Option<&Path>) -> Result<String> {
    match view {
        ConfigView::Example => Ok(generate_example_config()),
        ConfigView::Schema => {
            let mut schema = generate_json_schema().context("failed to generate schema")?;
            schema.push('\n');
            Ok(schema)
        }
        ConfigView::Effective => {
            let (config, loaded_from) = crate::config::load_or_default(explicit_path);
            effective_config(&config, loaded_from.as_deref())
        }
    }
}

fn effective_config(config: &AppConfig, loaded_from: Option<&Path>) -> Result<String> {
    let mut out = match loaded_from {
        Some(path) => format!("# Loaded from: {}\n", path.display()),
        None => "# No config file found; showing defaults\n".to_string(),
    };
    for error in config.validate() {
        out.push_str(&format!("# invalid: {error}\n"));
    }
    out.push_str(&serde_yaml::to_string(config).context("failed to serialize config")?);
    Ok(out)
}
