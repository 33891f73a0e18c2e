//! Core configuration types.
//! - Config holds the retry defaults and logging settings.
//! - LogLevel represents verbosity with simple parsing helpers.

use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::Result;
use tracing::{debug, warn};

use super::paths::default_config_path;
use super::xml::load_config_from_xml_path;
use super::{ENV_RETRY_COUNT, ENV_SLEEP_DELAY_SECONDS};
use crate::retry::{DEFAULT_RETRY_COUNT, DEFAULT_SLEEP_DELAY_SECONDS};

/// Program-defined verbosity levels exposed to users/config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Only errors
    Quiet,
    /// Warnings and errors (default)
    #[default]
    Normal,
    /// Plus informational events
    Info,
    /// Everything, including per-attempt retry details
    Debug,
}

impl LogLevel {
    /// Parse common string names into our LogLevel (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "quiet" | "error" | "none" => Some(LogLevel::Quiet),
            "normal" | "warn" => Some(LogLevel::Normal),
            "info" | "verbose" | "detailed" => Some(LogLevel::Info),
            "debug" | "trace" => Some(LogLevel::Debug),
            _ => None,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LogLevel::Quiet => "quiet",
            LogLevel::Normal => "normal",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        };
        f.write_str(s)
    }
}

impl FromStr for LogLevel {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("invalid log level: '{s}'"))
    }
}

/// Runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Retries after the first failed attempt
    pub retry_count: u32,
    /// Pause between attempts
    pub sleep_delay_seconds: u64,
    /// Run the memory-release hook before each pause
    pub release_memory_before_sleep: bool,
    /// Console verbosity
    pub log_level: LogLevel,
    /// Optional path to a log file
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            retry_count: DEFAULT_RETRY_COUNT,
            sleep_delay_seconds: DEFAULT_SLEEP_DELAY_SECONDS,
            release_memory_before_sleep: true,
            log_level: LogLevel::Normal,
            log_file: None,
        }
    }
}

impl Config {
    /// Load config.xml (if it exists) and apply environment overrides.
    /// A missing file is not an error; the fallback values are used instead.
    pub fn load() -> Result<Self> {
        let mut cfg = match default_config_path() {
            Some(path) if path.exists() => load_config_from_xml_path(&path)?,
            Some(path) => {
                debug!(path = %path.display(), "no config file; using defaults");
                Config::default()
            }
            None => Config::default(),
        };
        cfg.apply_env_overrides();
        Ok(cfg)
    }

    /// Apply `SAFE_PATH_OPS_RETRY_COUNT` / `SAFE_PATH_OPS_SLEEP_DELAY_SECONDS`.
    pub fn apply_env_overrides(&mut self) {
        if let Some(n) = env_number::<u32>(ENV_RETRY_COUNT) {
            self.retry_count = n;
        }
        if let Some(n) = env_number::<u64>(ENV_SLEEP_DELAY_SECONDS) {
            self.sleep_delay_seconds = n;
        }
    }
}

fn env_number<T: FromStr>(key: &str) -> Option<T> {
    let raw = env::var(key).ok()?;
    match raw.trim().parse::<T>() {
        Ok(v) => Some(v),
        Err(_) => {
            warn!(key, value = %raw, "ignoring invalid environment override");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_use_fallback_constants() {
        let cfg = Config::default();
        assert_eq!(cfg.retry_count, 3);
        assert_eq!(cfg.sleep_delay_seconds, 2);
        assert!(cfg.release_memory_before_sleep);
        assert_eq!(cfg.log_level, LogLevel::Normal);
        assert!(cfg.log_file.is_none());
    }

    #[test]
    fn log_level_trims_and_ignores_case() {
        assert_eq!(LogLevel::parse("  Debug "), Some(LogLevel::Debug));
        assert_eq!(LogLevel::parse("WARN"), Some(LogLevel::Normal));
        assert_eq!(LogLevel::parse("loud"), None);
    }
}
