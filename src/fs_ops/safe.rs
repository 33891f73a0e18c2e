//! Error-tolerant file and directory operations.
//!
//! - exists / delete / create helpers never fail: problems are logged and swallowed.
//! - move / copy run under the retry guard and report a single `RetryError`.
//! - A file that cannot be deleted is renamed to `<name>.<unique>.deleted` instead.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};
use walkdir::WalkDir;

use super::helpers::{io_error_with_help, native_path};
use super::meta::clear_read_only;
use crate::errors::SafePathError;
use crate::path::get_directory_path_name_from_file_path;
use crate::platform::temp::deleted_sibling_name;
use crate::retry::{AttemptError, PassThroughExt, RetryError, RetryPolicy, protect};

/// False for an empty string; never errors.
pub fn safe_file_exists(path: &str) -> bool {
    !path.is_empty() && native_path(path).is_file()
}

pub fn safe_directory_exists(path: &str) -> bool {
    !path.is_empty() && native_path(path).is_dir()
}

/// Delete a file, clearing the read-only flag first. If deletion fails the file
/// is renamed aside; if that fails too, the failure is only logged.
pub fn safe_delete_file(path: &str) {
    if !safe_file_exists(path) {
        debug!(path, "not deleting file: does not exist");
        return;
    }
    delete_file_at(&native_path(path));
}

pub(crate) fn delete_file_at(p: &Path) {
    let removed = clear_read_only(p).and_then(|()| fs::remove_file(p));

    match removed {
        Ok(()) => debug!(path = %p.display(), "deleted file"),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => park_undeletable(p, &e),
    }
}

/// Delete a directory tree, renaming it aside on failure.
pub fn safe_delete_directory(path: &str) {
    if !safe_directory_exists(path) {
        debug!(path, "not deleting directory: does not exist");
        return;
    }

    let p = native_path(path);
    match fs::remove_dir_all(&p) {
        Ok(()) => debug!(path = %p.display(), "deleted directory"),
        Err(e) => park_undeletable(&p, &e),
    }
}

fn park_undeletable(p: &Path, cause: &io::Error) {
    let parked = deleted_sibling_name(p);
    warn!(
        path = %p.display(),
        parked = %parked.display(),
        error = %cause,
        "delete failed; renaming aside"
    );
    if let Err(e) = fs::rename(p, &parked) {
        warn!(path = %p.display(), error = %e, "rename after failed delete also failed; ignoring");
    }
}

/// Delete everything below `path` but keep `path` itself. Child directories
/// are removed once they are empty.
pub fn safe_delete_directory_contents(path: &str) {
    if !safe_directory_exists(path) {
        return;
    }
    delete_contents_at(&native_path(path));
}

fn delete_contents_at(dir: &Path) {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            warn!(path = %dir.display(), error = %e, "cannot list directory; skipping");
            return;
        }
    };

    for entry in entries.flatten() {
        let child = entry.path();
        let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
        if !is_dir {
            delete_file_at(&child);
            continue;
        }

        delete_contents_at(&child);
        let empty = fs::read_dir(&child)
            .map(|mut it| it.next().is_none())
            .unwrap_or(false);
        if empty {
            if let Err(e) = fs::remove_dir(&child) {
                warn!(path = %child.display(), error = %e, "failed to remove emptied directory");
            }
        }
    }
}

/// Create the directory (and parents) if missing; failures are logged only.
pub fn safe_check_create_directory(path: &str) {
    if path.is_empty() || safe_directory_exists(path) {
        return;
    }

    let p = native_path(path);
    match fs::create_dir_all(&p) {
        Ok(()) => debug!(path = %p.display(), "created directory"),
        Err(e) => warn!(path = %p.display(), error = %e, "failed to create directory"),
    }
}

fn ensure_parent_of(dst: &str) -> Result<(), SafePathError> {
    let dir = get_directory_path_name_from_file_path(dst);
    if dir.is_empty() {
        return Ok(());
    }
    let dir = native_path(&dir);
    if !dir.is_dir() {
        fs::create_dir_all(&dir).map_err(io_error_with_help("create destination directory", &dir))?;
    }
    Ok(())
}

/// True when both paths name the same existing file.
#[cfg(unix)]
fn is_same_file(a: &Path, b: &Path) -> bool {
    use std::os::unix::fs::MetadataExt;

    match (fs::metadata(a), fs::metadata(b)) {
        (Ok(a), Ok(b)) => a.dev() == b.dev() && a.ino() == b.ino(),
        _ => false,
    }
}

#[cfg(not(unix))]
fn is_same_file(a: &Path, b: &Path) -> bool {
    crate::path::are_same_file_paths(&a.to_string_lossy(), &b.to_string_lossy())
}

/// Move a file, replacing an existing destination file.
///
/// Empty paths and a move onto the same file are a no-op. A missing source or
/// a destination that is a directory is reported immediately as
/// `RetryError::PassThrough`; I/O failures are retried.
pub fn safe_move_file(src: &str, dst: &str, policy: &RetryPolicy) -> Result<(), RetryError> {
    if src.is_empty() || dst.is_empty() {
        warn!(src, dst, "source or destination path is empty; not moving");
        return Ok(());
    }

    let (src_p, dst_p) = (native_path(src), native_path(dst));
    if is_same_file(&src_p, &dst_p) {
        debug!(src, dst, "source and destination are the same file; not moving");
        return Ok(());
    }

    protect(policy, || {
        if !src_p.is_file() {
            return Err(SafePathError::SourceNotFound(src_p.clone())).pass_through();
        }
        if dst_p.is_dir() {
            return Err(SafePathError::DestinationIsDirectory(dst_p.clone())).pass_through();
        }
        if dst_p.is_file() {
            delete_file_at(&dst_p);
        }
        ensure_parent_of(dst)?;
        rename_or_copy(&src_p, &dst_p)?;
        Ok(())
    })?;

    info!(src = %src_p.display(), dst = %dst_p.display(), "moved file");
    Ok(())
}

/// Rename; across filesystems fall back to copy + delete.
fn rename_or_copy(src: &Path, dst: &Path) -> Result<(), SafePathError> {
    let Err(e) = fs::rename(src, dst) else {
        return Ok(());
    };

    #[cfg(unix)]
    let cross_device = e.raw_os_error() == Some(libc::EXDEV);
    #[cfg(not(unix))]
    let cross_device = e.raw_os_error() == Some(17); // ERROR_NOT_SAME_DEVICE

    if !cross_device {
        return Err(io_error_with_help("move file", src)(e));
    }

    debug!(src = %src.display(), dst = %dst.display(), "cross-device rename; copying instead");
    fs::copy(src, dst).map_err(io_error_with_help("copy file", src))?;
    fs::remove_file(src).map_err(io_error_with_help("remove original file", src))?;
    Ok(())
}

/// Copy a file. Copying a file onto itself is a no-op.
///
/// With `overwrite == false` an existing destination is reported immediately
/// as `RetryError::PassThrough(DestinationExists)` rather than retried. A
/// destination that is a directory is never replaced.
pub fn safe_copy_file(
    src: &str,
    dst: &str,
    overwrite: bool,
    policy: &RetryPolicy,
) -> Result<(), RetryError> {
    if src.is_empty() || dst.is_empty() {
        warn!(src, dst, "source or destination path is empty; not copying");
        return Ok(());
    }
    let (src_p, dst_p) = (native_path(src), native_path(dst));
    if is_same_file(&src_p, &dst_p) {
        debug!(src, dst, "source and destination are the same file; not copying");
        return Ok(());
    }

    protect(policy, || {
        copy_one(&src_p, &dst_p, overwrite, || ensure_parent_of(dst))
    })?;

    info!(src = %src_p.display(), dst = %dst_p.display(), overwrite, "copied file");
    Ok(())
}

fn copy_one(
    src: &Path,
    dst: &Path,
    overwrite: bool,
    ensure_parent: impl Fn() -> Result<(), SafePathError>,
) -> Result<(), AttemptError> {
    if !src.is_file() {
        return Err(SafePathError::SourceNotFound(src.to_path_buf())).pass_through();
    }
    if dst.is_dir() {
        return Err(SafePathError::DestinationIsDirectory(dst.to_path_buf())).pass_through();
    }
    if dst.is_file() {
        if !overwrite {
            return Err(SafePathError::DestinationExists(dst.to_path_buf())).pass_through();
        }
        delete_file_at(dst);
    }
    ensure_parent()?;
    fs::copy(src, dst).map_err(io_error_with_help("copy file", src))?;
    Ok(())
}

/// Canonical form of `p`, resolving the longest existing prefix so that a
/// destination which does not exist yet still compares against real paths.
fn resolve_existing_prefix(p: &Path) -> PathBuf {
    let abs = std::path::absolute(p).unwrap_or_else(|_| p.to_path_buf());
    let mut tail = Vec::new();
    let mut cur = abs.as_path();
    loop {
        if let Ok(real) = fs::canonicalize(cur) {
            return tail.iter().rev().fold(real, |acc, part| acc.join(part));
        }
        match (cur.parent(), cur.file_name()) {
            (Some(parent), Some(name)) => {
                tail.push(name.to_os_string());
                cur = parent;
            }
            _ => return abs,
        }
    }
}

/// Recursively copy a directory tree; every file copy is guarded on its own.
/// Returns the number of files copied. `dst` must not lie inside `src`.
pub fn safe_copy_directory(src: &str, dst: &str, policy: &RetryPolicy) -> Result<usize, RetryError> {
    let (src_root, dst_root) = (native_path(src), native_path(dst));
    if !src_root.is_dir() {
        return Err(RetryError::PassThrough(
            SafePathError::SourceNotFound(src_root).into(),
        ));
    }
    if resolve_existing_prefix(&dst_root).starts_with(resolve_existing_prefix(&src_root)) {
        return Err(RetryError::PassThrough(
            SafePathError::DestinationInsideSource {
                src: src_root,
                dst: dst_root,
            }
            .into(),
        ));
    }

    let mut copied = 0usize;
    for entry in WalkDir::new(&src_root).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            let at = e.path().unwrap_or(src_root.as_path()).to_path_buf();
            RetryError::PassThrough(
                io_error_with_help("walk directory", &at)(io::Error::from(e)).into(),
            )
        })?;

        let Ok(rel) = entry.path().strip_prefix(&src_root) else {
            continue;
        };
        let target = dst_root.join(rel);

        if entry.file_type().is_dir() {
            protect(policy, || {
                fs::create_dir_all(&target).map_err(io_error_with_help("create directory", &target))?;
                Ok(())
            })?;
            continue;
        }

        protect(policy, || {
            copy_one(entry.path(), &target, true, || match target.parent() {
                Some(parent) if !parent.is_dir() => fs::create_dir_all(parent)
                    .map_err(io_error_with_help("create destination directory", parent)),
                _ => Ok(()),
            })
        })?;
        copied += 1;
    }

    info!(src = %src_root.display(), dst = %dst_root.display(), files = copied, "copied directory");
    Ok(copied)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tempfile::tempdir;

    fn fast() -> RetryPolicy {
        RetryPolicy::new().with_delay(Duration::ZERO).with_max_retries(1)
    }

    fn s(p: &Path) -> String {
        p.to_string_lossy().into_owned()
    }

    #[test]
    fn exists_helpers_reject_empty() {
        assert!(!safe_file_exists(""));
        assert!(!safe_directory_exists(""));
        let dir = tempdir().unwrap();
        assert!(safe_directory_exists(&s(dir.path())));
        assert!(!safe_file_exists(&s(dir.path())));
    }

    #[test]
    fn delete_missing_is_noop() {
        let dir = tempdir().unwrap();
        safe_delete_file(&s(&dir.path().join("nope.txt")));
        safe_delete_directory(&s(&dir.path().join("nope")));
        safe_delete_file("");
    }

    #[test]
    fn copy_onto_itself_is_noop() {
        let dir = tempdir().unwrap();
        let f = dir.path().join("a.txt");
        fs::write(&f, b"x").unwrap();
        safe_copy_file(&s(&f), &s(&f), true, &fast()).unwrap();
        assert_eq!(fs::read(&f).unwrap(), b"x");
    }

    #[test]
    fn move_onto_itself_keeps_the_file() {
        let dir = tempdir().unwrap();
        let f = dir.path().join("a.txt");
        fs::write(&f, b"keep").unwrap();
        let dotted = dir.path().join(".").join("a.txt");
        safe_move_file(&s(&f), &s(&dotted), &fast()).unwrap();
        assert_eq!(fs::read(&f).unwrap(), b"keep");
    }

    #[test]
    fn existing_prefix_resolution_handles_missing_tail() {
        let dir = tempdir().unwrap();
        let real = fs::canonicalize(dir.path()).unwrap();
        let resolved = resolve_existing_prefix(&dir.path().join("x").join("y"));
        assert_eq!(resolved, real.join("x").join("y"));
    }

    #[test]
    fn move_creates_destination_directory() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("a.txt");
        let dst = dir.path().join("x").join("y").join("b.txt");
        fs::write(&src, b"payload").unwrap();

        safe_move_file(&s(&src), &s(&dst), &fast()).unwrap();
        assert!(!src.exists());
        assert_eq!(fs::read(&dst).unwrap(), b"payload");
    }

    #[test]
    fn empty_arguments_are_ignored() {
        assert!(safe_move_file("", "x", &fast()).is_ok());
        assert!(safe_copy_file("x", "", true, &fast()).is_ok());
    }
}
