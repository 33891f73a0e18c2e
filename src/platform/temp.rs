//! Unique sibling names for atomic writes and for files that could not be deleted.
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

static COUNTER: AtomicU64 = AtomicU64::new(0);

fn unique_suffix() -> String {
    let pid = std::process::id();
    let nanos = SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.as_nanos()).unwrap_or(0);
    let seq = COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("{pid}.{nanos}.{seq}")
}

/// Hidden sibling temp name for config atomic writes.
/// Pattern: .safe_path_ops.config.tmp.<pid>.<nanos>.<seq>
pub fn tmp_config_sibling_name(target: &Path) -> PathBuf {
    let name = format!(".safe_path_ops.config.tmp.{}", unique_suffix());
    target.parent().unwrap_or_else(|| Path::new(".")).join(name)
}

/// Where an undeletable file is parked.
/// Pattern: <file name>.<pid>.<nanos>.<seq>.deleted, in the same directory.
pub fn deleted_sibling_name(target: &Path) -> PathBuf {
    let base = target
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = format!("{base}.{}.deleted", unique_suffix());
    target.with_file_name(name)
}
