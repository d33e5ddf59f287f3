//! Resolve command handler.
//!
//! Implements the `resolve` subcommand, which shows where each raw driver
//! path lands on this host without consulting the feed.

use crate::pipeline::{OutputTarget, exit_codes, write_output};
use crate::reports::render_table;
use crate::resolve::{PathResolver, Platform};
use crate::utils::hash_file;
use anyhow::Result;

/// Run the resolve command against the running host
pub fn run_resolve(paths: &[String], hash: bool) -> Result<i32> {
    run_resolve_with(&PathResolver::host(), paths, hash, &OutputTarget::Stdout)
}

/// Run the resolve command with a specific resolver and output target.
///
/// Returns the error exit code when any path fails to resolve (or to hash,
/// with `hash` set).
pub fn run_resolve_with<P: Platform>(
    resolver: &PathResolver<P>,
    paths: &[String],
    hash: bool,
    target: &OutputTarget,
) -> Result<i32> {
    let mut failed = 0usize;
    let rows: Vec<Vec<String>> = paths
        .iter()
        .map(|raw| {
            let (resolved, result) = match resolver.resolve(raw) {
                Ok(path) => {
                    let result = if hash {
                        hash_file(&path).unwrap_or_else(|e| {
                            failed += 1;
                            format!("error: {e}")
                        })
                    } else {
                        "exists".to_string()
                    };
                    (path.display().to_string(), result)
                }
                Err(e) => {
                    failed += 1;
                    let attempted = resolver
                        .candidate_path(raw)
                        .map(|p| p.display().to_string())
                        .unwrap_or_default();
                    (attempted, format!("error: {e}"))
                }
            };
            vec![raw.clone(), resolved, result]
        })
        .collect();

    let header = ["Candidate", "Resolved", if hash { "Sha256" } else { "Result" }];
    write_output(&render_table(&header, &rows), target)?;

    if failed > 0 {
        tracing::warn!("{} of {} paths could not be resolved", failed, paths.len());
        return Ok(exit_codes::ERROR);
    }
    Ok(exit_codes::SUCCESS)
}
