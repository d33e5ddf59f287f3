//! Gathering candidate driver paths to scan.
//!
//! Candidates come from command-line arguments, from a list file with one
//! path per line, and on Windows from the set of kernel drivers currently
//! loaded. The loader reports paths like `\SystemRoot\System32\drivers\x.sys`
//! and `\??\C:\...`, which the resolver understands directly.

use crate::error::{Result, ScanError};
use indexmap::IndexSet;
use std::path::{Path, PathBuf};

/// Where to take candidates from.
#[derive(Debug, Clone, Default)]
pub struct CandidateSources {
    /// Paths given directly
    pub paths: Vec<String>,
    /// File listing one path per line
    pub list_file: Option<PathBuf>,
    /// Include drivers currently loaded by the kernel
    pub loaded: bool,
}

impl CandidateSources {
    /// Whether no source was requested
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty() && self.list_file.is_none() && !self.loaded
    }

    /// Collect candidates from every source, dropping repeats.
    ///
    /// Order is arguments, then list file, then loaded drivers; the first
    /// occurrence of a path wins.
    pub fn collect(&self) -> Result<Vec<String>> {
        let mut all = self.paths.clone();

        if let Some(list_file) = &self.list_file {
            let listed = read_list_file(list_file)?;
            tracing::debug!("Read {} candidates from {}", listed.len(), list_file.display());
            all.extend(listed);
        }

        if self.loaded {
            let loaded = loaded_drivers()?;
            tracing::info!("Found {} loaded kernel drivers", loaded.len());
            all.extend(loaded);
        }

        Ok(dedup(all))
    }
}

/// Read a candidate list file.
pub fn read_list_file(path: &Path) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(path).map_err(|e| ScanError::io(path, e))?;
    Ok(parse_list(&content))
}

/// One candidate per line; blank lines and `#` comments are skipped.
#[must_use]
pub fn parse_list(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(String::from)
        .collect()
}

/// Remove repeated candidates, keeping the first occurrence.
#[must_use]
pub fn dedup(candidates: impl IntoIterator<Item = String>) -> Vec<String> {
    candidates
        .into_iter()
        .collect::<IndexSet<String>>()
        .into_iter()
        .collect()
}

/// File names of the kernel drivers currently loaded.
#[cfg(windows)]
pub fn loaded_drivers() -> Result<Vec<String>> {
    use std::ffi::{OsString, c_void};
    use std::os::windows::ffi::OsStringExt;
    use windows_sys::Win32::System::ProcessStatus::{EnumDeviceDrivers, GetDeviceDriverFileNameW};

    const PTR_SIZE: usize = size_of::<*mut c_void>();

    let mut bases: Vec<*mut c_void> = vec![std::ptr::null_mut(); 1024];
    loop {
        let mut needed: u32 = 0;
        let size = u32::try_from(bases.len() * PTR_SIZE).unwrap_or(u32::MAX);
        // SAFETY: bases is a writable buffer of `size` bytes.
        let ok = unsafe { EnumDeviceDrivers(bases.as_mut_ptr(), size, &mut needed) };
        if ok == 0 {
            return Err(ScanError::io(
                "EnumDeviceDrivers",
                std::io::Error::last_os_error(),
            ));
        }

        let count = needed as usize / PTR_SIZE;
        if count <= bases.len() {
            bases.truncate(count);
            break;
        }
        bases.resize(count, std::ptr::null_mut());
    }

    let mut names = Vec::with_capacity(bases.len());
    let mut buffer = [0u16; 1024];
    for base in bases {
        // SAFETY: buffer holds buffer.len() UTF-16 units.
        let len = unsafe {
            GetDeviceDriverFileNameW(base, buffer.as_mut_ptr(), buffer.len() as u32)
        };
        if len == 0 {
            tracing::debug!("No file name for driver at {:p}", base);
            continue;
        }
        let name = OsString::from_wide(&buffer[..len as usize]);
        names.push(name.to_string_lossy().into_owned());
    }

    Ok(names)
}

/// File names of the kernel drivers currently loaded.
#[cfg(not(windows))]
pub fn loaded_drivers() -> Result<Vec<String>> {
    Err(ScanError::config(
        "listing loaded drivers is only supported on Windows",
    ))
}
