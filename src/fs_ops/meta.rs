//! Timestamps and the read-only attribute.
//! - Access/modification times are read via std and written via filetime.
//! - Creation time is read where the platform reports it; it is never written.

use std::fs;
use std::io;
use std::path::Path;
use std::time::SystemTime;

use filetime::{FileTime, set_file_times};
use tracing::{debug, trace};

use super::helpers::{io_error_with_help, native_path};
use crate::errors::SafePathError;
use crate::platform;

/// The three timestamps of a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileDates {
    /// `None` where the platform/filesystem does not record a birth time.
    pub created: Option<SystemTime>,
    pub modified: SystemTime,
    pub accessed: SystemTime,
}

pub fn get_file_dates(path: &str) -> Result<FileDates, SafePathError> {
    let p = native_path(path);
    let meta = fs::metadata(&p).map_err(io_error_with_help("stat", &p))?;
    Ok(FileDates {
        created: meta.created().ok(),
        modified: meta.modified().map_err(io_error_with_help("read modification time", &p))?,
        accessed: meta.accessed().map_err(io_error_with_help("read access time", &p))?,
    })
}

/// Apply access and modification time. `created` is ignored.
pub fn set_file_dates(path: &str, dates: &FileDates) -> Result<(), SafePathError> {
    let p = native_path(path);
    set_times_at(&p, dates.accessed, dates.modified)
}

fn set_times_at(p: &Path, accessed: SystemTime, modified: SystemTime) -> Result<(), SafePathError> {
    set_file_times(
        p,
        FileTime::from_system_time(accessed),
        FileTime::from_system_time(modified),
    )
    .map_err(io_error_with_help("set file times", p))?;
    trace!(path = %p.display(), "set atime/mtime");
    Ok(())
}

/// Copy a file and give the copy the source's access/modification times.
pub fn copy_file_exact(src: &str, dst: &str, overwrite: bool) -> Result<(), SafePathError> {
    let (src_p, dst_p) = (native_path(src), native_path(dst));
    if !src_p.is_file() {
        return Err(SafePathError::SourceNotFound(src_p));
    }
    if !overwrite && dst_p.exists() {
        return Err(SafePathError::DestinationExists(dst_p));
    }

    fs::copy(&src_p, &dst_p).map_err(io_error_with_help("copy file", &src_p))?;
    let dates = get_file_dates(src)?;
    set_times_at(&dst_p, dates.accessed, dates.modified)?;
    debug!(src = %src_p.display(), dst = %dst_p.display(), "copied file with dates");
    Ok(())
}

/// Set access and modification time to now. The file must exist.
pub fn touch(path: &str) -> Result<(), SafePathError> {
    let p = native_path(path);
    let now = FileTime::now();
    set_file_times(&p, now, now).map_err(io_error_with_help("touch", &p))?;
    Ok(())
}

pub fn is_read_only(path: &str) -> Result<bool, SafePathError> {
    let p = native_path(path);
    let meta = fs::metadata(&p).map_err(io_error_with_help("stat", &p))?;
    Ok(meta.permissions().readonly())
}

pub fn set_read_only(path: &str, read_only: bool) -> Result<(), SafePathError> {
    let p = native_path(path);
    platform::set_read_only(&p, read_only).map_err(io_error_with_help("change read-only flag", &p))
}

/// Make `p` writable if it is read-only; missing files are fine.
pub(crate) fn clear_read_only(p: &Path) -> io::Result<()> {
    match fs::metadata(p) {
        Ok(meta) if meta.permissions().readonly() => platform::set_read_only(p, false),
        Ok(_) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tempfile::tempdir;

    #[test]
    fn set_and_get_dates() {
        let dir = tempdir().unwrap();
        let f = dir.path().join("a.txt");
        fs::write(&f, b"x").unwrap();
        let f = f.to_string_lossy().into_owned();

        let when = SystemTime::UNIX_EPOCH + Duration::from_secs(1_000_000_000);
        set_file_dates(
            &f,
            &FileDates {
                created: None,
                modified: when,
                accessed: when,
            },
        )
        .unwrap();

        let dates = get_file_dates(&f).unwrap();
        assert_eq!(dates.modified, when);
        assert_eq!(dates.accessed, when);
    }

    #[test]
    fn touch_missing_file_fails() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("none.txt");
        let err = touch(&missing.to_string_lossy()).unwrap_err();
        assert_eq!(err.io_kind(), Some(io::ErrorKind::NotFound));
    }

    #[test]
    fn read_only_round_trip() {
        let dir = tempdir().unwrap();
        let f = dir.path().join("ro.txt");
        fs::write(&f, b"x").unwrap();
        let f = f.to_string_lossy().into_owned();

        assert!(!is_read_only(&f).unwrap());
        set_read_only(&f, true).unwrap();
        assert!(is_read_only(&f).unwrap());
        clear_read_only(Path::new(&f)).unwrap();
        assert!(!is_read_only(&f).unwrap());
    }
}
