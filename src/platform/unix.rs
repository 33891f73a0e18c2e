//! Unix implementations of platform helpers.

use super::common_unix::atomic_write_0600;
use anyhow::Result;
use std::fs::{self, File, OpenOptions};
use std::io;
use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};
use std::path::Path;

fn chmod(path: &Path, mode: u32) -> io::Result<()> {
    fs::set_permissions(path, fs::Permissions::from_mode(mode))
}

/// Append-mode log file. A new file is created 0600; an existing file keeps
/// whatever mode an administrator gave it.
pub fn open_log_file_secure_append(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    let created = !path.exists();
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .mode(0o600)
        .open(path)?;
    if created {
        // umask may have narrowed or widened the create mode
        let _ = chmod(path, 0o600);
    }
    Ok(file)
}

/// Write a new config file (0600): temp file + fsync + link + fsync dir. Never replaces.
pub fn write_config_secure_new_0600(path: &Path, contents: &[u8]) -> Result<()> {
    atomic_write_0600(path, contents)
}

pub fn set_dir_mode_0700(path: &Path) -> io::Result<()> {
    chmod(path, 0o700)
}

pub fn set_file_mode_0600(path: &Path) -> io::Result<()> {
    chmod(path, 0o600)
}

/// Clear every write bit, or give the owner write access back.
/// Group/other write bits are never added.
pub fn set_read_only(path: &Path, read_only: bool) -> io::Result<()> {
    let mode = fs::metadata(path)?.permissions().mode();
    let new_mode = if read_only { mode & !0o222 } else { mode | 0o200 };
    if new_mode != mode {
        chmod(path, new_mode)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn mode_of(path: &Path) -> u32 {
        fs::metadata(path).unwrap().permissions().mode() & 0o777
    }

    #[test]
    fn log_file_mode_only_set_on_create() {
        let dir = tempdir().unwrap();
        let fresh = dir.path().join("fresh.log");
        drop(open_log_file_secure_append(&fresh).unwrap());
        assert_eq!(mode_of(&fresh), 0o600);

        let shared = dir.path().join("shared.log");
        fs::write(&shared, b"old line\n").unwrap();
        chmod(&shared, 0o640).unwrap();
        drop(open_log_file_secure_append(&shared).unwrap());
        assert_eq!(mode_of(&shared), 0o640);
    }

    #[test]
    fn config_write_is_0600_and_leaves_no_temp() {
        let dir = tempdir().unwrap();
        let cfg = dir.path().join("config.xml");
        write_config_secure_new_0600(&cfg, b"<config/>").unwrap();
        assert_eq!(fs::read(&cfg).unwrap(), b"<config/>");
        assert_eq!(mode_of(&cfg), 0o600);

        let names: Vec<String> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, ["config.xml"]);
    }

    #[test]
    fn read_only_toggles_owner_write_bit() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("f.txt");
        fs::write(&path, b"x").unwrap();
        chmod(&path, 0o664).unwrap();

        set_read_only(&path, true).unwrap();
        assert_eq!(mode_of(&path), 0o444);

        set_read_only(&path, false).unwrap();
        assert_eq!(mode_of(&path), 0o644);
    }
}
