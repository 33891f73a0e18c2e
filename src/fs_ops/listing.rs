//! Directory listing with glob patterns, plus a few size/emptiness probes.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use globset::{GlobBuilder, GlobMatcher};
use walkdir::WalkDir;

use super::helpers::{io_error_with_help, native_path};
use crate::errors::SafePathError;

/// `*.*` conventionally means "every file", including names without a dot.
fn compile_pattern(pattern: &str) -> Result<GlobMatcher, SafePathError> {
    let effective = match pattern.trim() {
        "" | "*.*" => "*",
        p => p,
    };
    GlobBuilder::new(effective)
        .case_insensitive(true)
        .build()
        .map(|g| g.compile_matcher())
        .map_err(|source| SafePathError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Want {
    Files,
    Directories,
}

fn list(dir: &str, pattern: &str, recursive: bool, want: Want) -> Result<Vec<PathBuf>, SafePathError> {
    let matcher = compile_pattern(pattern)?;
    let root = native_path(dir);
    if !root.is_dir() {
        return Err(io_error_with_help("list directory", &root)(io::Error::from(
            io::ErrorKind::NotFound,
        )));
    }

    let walker = WalkDir::new(&root)
        .min_depth(1)
        .max_depth(if recursive { usize::MAX } else { 1 })
        .sort_by_file_name();

    let mut out = Vec::new();
    for entry in walker {
        let entry = entry.map_err(|e| {
            let at = e.path().unwrap_or(root.as_path()).to_path_buf();
            io_error_with_help("list directory", &at)(io::Error::from(e))
        })?;
        let is_dir = entry.file_type().is_dir();
        let wanted = match want {
            Want::Files => entry.file_type().is_file(),
            Want::Directories => is_dir,
        };
        if wanted && matcher.is_match(entry.file_name()) {
            out.push(entry.into_path());
        }
    }
    Ok(out)
}

/// Files below `dir` whose name matches `pattern` (`*`, `?`, `[..]`; case-insensitive).
pub fn list_files(dir: &str, pattern: &str, recursive: bool) -> Result<Vec<PathBuf>, SafePathError> {
    list(dir, pattern, recursive, Want::Files)
}

pub fn list_directories(
    dir: &str,
    pattern: &str,
    recursive: bool,
) -> Result<Vec<PathBuf>, SafePathError> {
    list(dir, pattern, recursive, Want::Directories)
}

/// True for empty input, a missing directory, or a directory with no entries.
pub fn is_directory_empty(dir: &str) -> bool {
    if dir.is_empty() {
        return true;
    }
    let p = native_path(dir);
    if !p.is_dir() {
        return true;
    }
    dir_has_no_entries(&p)
}

fn dir_has_no_entries(p: &Path) -> bool {
    fs::read_dir(p)
        .map(|mut it| it.next().is_none())
        .unwrap_or(false)
}

/// Size in bytes; 0 for empty input or a missing file.
pub fn file_length(path: &str) -> u64 {
    if path.is_empty() {
        return 0;
    }
    fs::metadata(native_path(path))
        .ok()
        .filter(|m| m.is_file())
        .map_or(0, |m| m.len())
}
