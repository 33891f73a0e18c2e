//! I/O helper utilities.
//!
//! Turns path strings into native paths and enriches io::Error with the
//! operation, the path, and an actionable hint.
//!
//! Usage:
//!   fs::create_dir_all(dir).map_err(io_error_with_help("create directory", dir))?;

use std::io;
use std::path::{Path, PathBuf};

use crate::errors::SafePathError;
use crate::path::convert_slashes_to_platform;

/// Path string (either separator style) -> native path.
pub fn native_path(path: &str) -> PathBuf {
    PathBuf::from(convert_slashes_to_platform(path))
}

#[cfg(unix)]
fn os_hint(code: i32) -> Option<&'static str> {
    let hint = match code {
        libc::EACCES | libc::EPERM => " (permission denied; check ownership and write permissions)",
        libc::EXDEV => " (cross-filesystem; rename not possible)",
        libc::EBUSY => " (resource busy; another process may hold it)",
        libc::ENOENT => " (path not found; verify it exists)",
        libc::EEXIST => " (already exists; remove the target or pick another name)",
        libc::ENOTEMPTY => " (directory not empty)",
        libc::ENOSPC => " (insufficient space on device)",
        libc::EROFS => " (read-only filesystem)",
        libc::ENAMETOOLONG => " (filename or path too long)",
        libc::EMFILE | libc::ENFILE => " (too many open files)",
        _ => return None,
    };
    Some(hint)
}

#[cfg(windows)]
fn os_hint(code: i32) -> Option<&'static str> {
    let hint = match code {
        5 => " (access denied; check permissions)",          // ERROR_ACCESS_DENIED
        17 => " (not same device; cross-filesystem move)",  // ERROR_NOT_SAME_DEVICE
        32 | 33 => " (file is in use by another process)",  // SHARING / LOCK VIOLATION
        2 | 3 => " (path not found; verify it exists)",     // FILE / PATH NOT FOUND
        80 | 183 => " (already exists)",                     // FILE_EXISTS / ALREADY_EXISTS
        112 => " (insufficient disk space)",                 // ERROR_DISK_FULL
        206 => " (filename or path too long)",               // ERROR_FILENAME_EXCED_RANGE
        _ => return None,
    };
    Some(hint)
}

#[cfg(not(any(unix, windows)))]
fn os_hint(_code: i32) -> Option<&'static str> {
    None
}

fn kind_hint(kind: io::ErrorKind) -> &'static str {
    match kind {
        io::ErrorKind::PermissionDenied => " (permission denied)",
        io::ErrorKind::NotFound => " (path not found)",
        io::ErrorKind::AlreadyExists => " (already exists)",
        io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut => " (busy; retry later)",
        _ => "",
    }
}

fn hint_for(e: &io::Error) -> &'static str {
    e.raw_os_error()
        .and_then(os_hint)
        .unwrap_or_else(|| kind_hint(e.kind()))
}

/// Returns a closure for `.map_err(...)` that wraps an io::Error into
/// `SafePathError::Io` carrying `op`, `path` and a hint.
pub fn io_error_with_help<'a>(
    op: &'static str,
    path: &'a Path,
) -> impl FnOnce(io::Error) -> SafePathError + 'a {
    move |source: io::Error| SafePathError::Io {
        op,
        path: path.to_path_buf(),
        hint: hint_for(&source),
        source,
    }
}
