//! Default path helpers and symlink checks.
//! Determines OS-appropriate config/log paths and detects symlinked ancestors for safety.

use dirs::{config_dir, data_dir};
use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::{APP_DIR_NAME, CONFIG_FILE_NAME, ENV_CONFIG, LOG_FILE_NAME};

/// `$SAFE_PATH_OPS_CONFIG` if set, else the OS-appropriate default config path.
pub fn default_config_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os(ENV_CONFIG).filter(|p| !p.is_empty()) {
        return Some(PathBuf::from(p));
    }

    if let Some(mut base) = config_dir() {
        base.push(APP_DIR_NAME);
        base.push(CONFIG_FILE_NAME);
        Some(base)
    } else {
        env::var("HOME").ok().map(|h| {
            PathBuf::from(h)
                .join(".config")
                .join(APP_DIR_NAME)
                .join(CONFIG_FILE_NAME)
        })
    }
}

/// Suggested log file path.
/// Colocated with the config file when `$SAFE_PATH_OPS_CONFIG` is set, else in the data dir.
pub fn default_log_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os(ENV_CONFIG).filter(|p| !p.is_empty()) {
        let parent = Path::new(&p).parent().unwrap_or_else(|| Path::new("."));
        return Some(parent.join(LOG_FILE_NAME));
    }

    if let Some(mut base) = data_dir() {
        base.push(APP_DIR_NAME);
        base.push(LOG_FILE_NAME);
        Some(base)
    } else {
        env::var("HOME").ok().map(|h| {
            PathBuf::from(h)
                .join(".local")
                .join("share")
                .join(APP_DIR_NAME)
                .join(LOG_FILE_NAME)
        })
    }
}

/// Return true if any existing ancestor of `path` is a symlink.
pub fn path_has_symlink_ancestor(path: &Path) -> io::Result<bool> {
    let mut p = path.parent();
    while let Some(anc) = p {
        if anc.exists() {
            let meta = fs::symlink_metadata(anc)?;
            if meta.file_type().is_symlink() {
                return Ok(true);
            }
        }
        p = anc.parent();
    }
    Ok(false)
}
