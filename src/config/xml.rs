//! XML configuration support.
//! - Loads settings from config.xml (quick_xml + serde).
//! - Writes a commented template on request (`init-config`).
//!
//! Notes:
//! - Unknown XML elements are rejected so typos surface early.
//! - Empty or unparsable numeric values fall back to the defaults.

use anyhow::{Context, Result, bail};
use quick_xml::de::from_str as from_xml_str;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use super::paths::{default_log_path, path_has_symlink_ancestor};
use super::types::{Config, LogLevel};
use crate::platform::{set_dir_mode_0700, set_file_mode_0600, write_config_secure_new_0600};
use crate::retry::{DEFAULT_RETRY_COUNT, DEFAULT_SLEEP_DELAY_SECONDS};

/// Struct mirroring the XML config for deserialization.
#[derive(Debug, Deserialize)]
#[serde(rename = "config")]
#[serde(deny_unknown_fields)]
struct XmlConfig {
    #[serde(default, deserialize_with = "de_trimmed_opt")]
    retry_count: Option<u32>,
    #[serde(default, deserialize_with = "de_trimmed_opt")]
    sleep_delay_seconds: Option<u64>,
    #[serde(default, deserialize_with = "de_trimmed_opt")]
    release_memory_before_sleep: Option<bool>,
    log_level: Option<String>,
    log_file: Option<String>,
}

// Trims surrounding whitespace and treats unparsable text as absent.
fn de_trimmed_opt<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: std::str::FromStr,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    Ok(opt.and_then(|s| s.trim().parse::<T>().ok()))
}

// Map XmlConfig -> Config
fn xml_to_config(parsed: XmlConfig) -> Config {
    let mut cfg = Config::default();

    if let Some(n) = parsed.retry_count {
        cfg.retry_count = n;
    }
    if let Some(n) = parsed.sleep_delay_seconds {
        cfg.sleep_delay_seconds = n;
    }
    if let Some(b) = parsed.release_memory_before_sleep {
        cfg.release_memory_before_sleep = b;
    }
    if let Some(level) = parsed.log_level.as_deref().and_then(LogLevel::parse) {
        cfg.log_level = level;
    }
    if let Some(s) = parsed.log_file.as_deref() {
        let trimmed = s.trim();
        if !trimmed.is_empty() {
            cfg.log_file = Some(PathBuf::from(trimmed));
        }
    }

    cfg
}

/// Load a Config from a specific XML file path. Env overrides are not applied.
pub fn load_config_from_xml_path(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("read config xml '{}'", path.display()))?;
    let parsed: XmlConfig = from_xml_str(&contents)
        .with_context(|| format!("parse config xml '{}'", path.display()))?;
    Ok(xml_to_config(parsed))
}

/// Create a commented template config file and its parent directory.
/// Refuses to write through a symlinked ancestor or over an existing file.
pub fn create_template_config(path: &Path) -> Result<()> {
    if path.exists() {
        bail!("Config file already exists: {}", path.display());
    }
    if path_has_symlink_ancestor(path)? {
        bail!(
            "Refusing to create config: ancestor of {} is a symlink",
            path.display()
        );
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("create config dir '{}'", parent.display()))?;
        let _ = set_dir_mode_0700(parent);
    }

    let suggested_log = default_log_path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "/path/to/safe_path_ops.log".into());

    let content = format!(
        "<!--\n  safe_path_ops configuration (XML)\n\n  retry_count                  -> retries after the first failed attempt\n  sleep_delay_seconds          -> pause between attempts\n  release_memory_before_sleep  -> run the memory-release hook before pausing (true/false)\n  log_level                    -> quiet | normal | info | debug\n  log_file                     -> path to log file (optional; leave empty to disable)\n\n  Notes:\n    - SAFE_PATH_OPS_RETRY_COUNT / SAFE_PATH_OPS_SLEEP_DELAY_SECONDS override the values below.\n    - CLI flags override both.\n-->\n<config>\n  <retry_count>{}</retry_count>\n  <sleep_delay_seconds>{}</sleep_delay_seconds>\n  <release_memory_before_sleep>true</release_memory_before_sleep>\n  <log_level>normal</log_level>\n  <log_file>{}</log_file>\n</config>\n",
        DEFAULT_RETRY_COUNT, DEFAULT_SLEEP_DELAY_SECONDS, suggested_log
    );

    write_config_secure_new_0600(path, content.as_bytes())?;
    let _ = set_file_mode_0600(path);

    info!(path = %path.display(), "created template config");
    Ok(())
}
