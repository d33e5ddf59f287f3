//! Resolution of symbolic driver paths to real files on this host.
//!
//! Driver listings, registry hives and memory images record driver locations
//! relative to abstract OS folders rather than as literal paths, and they may
//! come from another machine. The resolver maps these forms onto the current
//! host's layout before anything is hashed:
//!
//! | Raw path                            | Resolves to                           |
//! |-------------------------------------|---------------------------------------|
//! | `System32\drivers\x.sys`            | `<system folder>\drivers\x.sys`       |
//! | `\SystemRoot\System32\drivers\x.sys`| `<windows folder>\System32\drivers\x.sys` |
//! | `\??\C:\temp\x.sys`                 | `C:\temp\x.sys`                       |
//!
//! Anything else is unresolvable.

mod platform;
mod prefix;

pub use platform::{HostPlatform, KnownFolder, Platform};
pub use prefix::{PathPrefix, SEPARATORS, components, split_prefix};

use crate::error::{Result, ScanError};
use std::path::{Component, Path, PathBuf};

/// Turns raw driver paths into existing local paths.
#[derive(Debug, Clone, Default)]
pub struct PathResolver<P: Platform = HostPlatform> {
    platform: P,
}

impl PathResolver<HostPlatform> {
    /// Resolver backed by the running host
    #[must_use]
    pub const fn host() -> Self {
        Self {
            platform: HostPlatform,
        }
    }
}

impl<P: Platform> PathResolver<P> {
    /// Create a resolver over a specific platform
    pub const fn new(platform: P) -> Self {
        Self { platform }
    }

    /// Compute the path `raw` denotes without checking that it exists.
    pub fn candidate_path(&self, raw: &str) -> Result<PathBuf> {
        let (token, remainder) = split_prefix(raw)
            .ok_or_else(|| ScanError::unresolvable(raw, "no prefix separator"))?;

        let prefix = PathPrefix::parse(token).ok_or_else(|| {
            ScanError::unresolvable(raw, format!("unrecognized prefix '{token}'"))
        })?;

        let folder = match prefix {
            PathPrefix::NtLiteral => return Ok(PathBuf::from(remainder)),
            PathPrefix::System32 => KnownFolder::System,
            PathPrefix::SystemRoot => KnownFolder::Windows,
        };

        let mut path = self
            .platform
            .known_folder(folder)
            .map_err(|e| ScanError::unresolvable(raw, e.to_string()))?;
        for part in components(remainder) {
            match single_component(part) {
                Some(Component::Normal(_)) => path.push(part),
                Some(Component::CurDir) => {}
                _ => {
                    return Err(ScanError::unresolvable(
                        raw,
                        format!("'{part}' escapes the {} folder", folder.name()),
                    ));
                }
            }
        }
        Ok(path)
    }

    /// Resolve `raw` to a path that exists on this host.
    pub fn resolve(&self, raw: &str) -> Result<PathBuf> {
        let path = self.candidate_path(raw)?;
        match self.platform.exists(&path) {
            Ok(true) => {}
            Ok(false) => return Err(ScanError::not_found(path)),
            Err(e) => return Err(ScanError::io(path, e)),
        }
        tracing::debug!("Resolved {} -> {}", raw, path.display());
        Ok(path)
    }
}

/// The only component of `part`, or `None` if it parses as more than one.
///
/// Drive prefixes and roots show up here as `Prefix`/`RootDir`, which must
/// never be pushed onto a known folder: `PathBuf::push` would replace it.
fn single_component(part: &str) -> Option<Component<'_>> {
    let mut parsed = Path::new(part).components();
    let first = parsed.next()?;
    parsed.next().is_none().then_some(first)
}
