//! Host collaborators for path resolution: known folders and existence.

use crate::error::{Result, ScanError};
use std::path::{Path, PathBuf};

/// OS folders that symbolic driver paths are relative to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KnownFolder {
    /// System binaries folder (`%SystemRoot%\System32`)
    System,
    /// OS root folder (`%SystemRoot%`)
    Windows,
}

impl KnownFolder {
    /// Display name of the folder
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::System => "System",
            Self::Windows => "Windows",
        }
    }
}

/// Answers the two questions the resolver needs from the host.
pub trait Platform: Send + Sync {
    /// Real directory for a known folder on this host.
    fn known_folder(&self, folder: KnownFolder) -> Result<PathBuf>;

    /// Whether `path` exists. Errors when existence cannot be determined.
    fn exists(&self, path: &Path) -> std::io::Result<bool>;
}

/// The machine the scanner runs on.
#[derive(Debug, Clone, Copy, Default)]
pub struct HostPlatform;

impl Platform for HostPlatform {
    fn known_folder(&self, folder: KnownFolder) -> Result<PathBuf> {
        known_folder_path(folder)
    }

    fn exists(&self, path: &Path) -> std::io::Result<bool> {
        if path.as_os_str().is_empty() {
            return Ok(false);
        }
        path.try_exists()
    }
}

#[cfg(windows)]
fn known_folder_path(folder: KnownFolder) -> Result<PathBuf> {
    use std::ffi::OsString;
    use std::os::windows::ffi::OsStringExt;
    use windows_sys::Win32::System::Com::CoTaskMemFree;
    use windows_sys::Win32::UI::Shell::{
        FOLDERID_System, FOLDERID_Windows, KF_FLAG_NO_ALIAS, SHGetKnownFolderPath,
    };

    let folder_id = match folder {
        KnownFolder::System => &FOLDERID_System,
        KnownFolder::Windows => &FOLDERID_Windows,
    };

    let mut raw: *mut u16 = std::ptr::null_mut();
    // SAFETY: folder_id points at a static GUID and raw is a valid out pointer.
    let hr = unsafe {
        SHGetKnownFolderPath(folder_id, KF_FLAG_NO_ALIAS as _, std::ptr::null_mut(), &mut raw)
    };

    let result = if hr >= 0 && !raw.is_null() {
        // SAFETY: on success raw is a NUL-terminated UTF-16 string owned by us.
        let wide = unsafe {
            let len = (0..).take_while(|&i| *raw.add(i) != 0).count();
            std::slice::from_raw_parts(raw, len)
        };
        Ok(PathBuf::from(OsString::from_wide(wide)))
    } else {
        Err(ScanError::unresolvable(
            folder.name(),
            format!("SHGetKnownFolderPath failed with HRESULT 0x{hr:08x}"),
        ))
    };

    // SAFETY: the buffer is always released by the caller, even on failure.
    unsafe { CoTaskMemFree(raw as *const std::ffi::c_void) };
    result
}

#[cfg(not(windows))]
fn known_folder_path(folder: KnownFolder) -> Result<PathBuf> {
    Err(ScanError::unresolvable(
        folder.name(),
        "known folders are only available on Windows hosts",
    ))
}
