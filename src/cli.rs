//! CLI definition and parsing.
//! Defines Args (global flags + subcommands) and provides parse().
//!
//! Notes:
//! - Global flags override config values (XML, then environment).
//! - --debug is a shorthand for --log-level debug.
//! - Path arguments are plain strings: the path commands never touch the filesystem.

use clap::{Parser, Subcommand, ValueHint};
use std::path::PathBuf;

use crate::config::types::{Config, LogLevel};

/// Path arithmetic and retry-tolerant file operations.
#[derive(Parser, Debug, Clone)]
#[command(
    author,
    version,
    about = "Path arithmetic and retry-tolerant file operations"
)]
pub struct Args {
    /// Retries after the first failed attempt (overrides config).
    #[arg(long, global = true, value_name = "N")]
    pub retries: Option<u32>,

    /// Seconds to sleep between attempts (overrides config).
    #[arg(long, global = true, value_name = "SECONDS")]
    pub delay: Option<u64>,

    /// Enable debug logging (equivalent to `--log-level debug`).
    #[arg(
        short = 'd',
        long,
        global = true,
        help = "Enable debug logging (shorthand for --log-level debug)"
    )]
    pub debug: bool,

    /// Set log level. One of: quiet, normal, info, debug.
    #[arg(long, global = true, help = "Set log level: quiet, normal, info, debug")]
    pub log_level: Option<String>,

    /// Also write logs to this file.
    #[arg(long, global = true, value_hint = ValueHint::FilePath)]
    pub log_file: Option<PathBuf>,

    /// Emit logs in structured JSON (includes timestamp, level, and structured fields).
    #[arg(long, global = true, help = "Emit logs in structured JSON")]
    pub json: bool,

    /// Print where safe_path_ops looks for its config file, then exit.
    #[arg(long, help = "Print the config file location and exit")]
    pub print_config: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Express TO relative to the directory FROM.
    Relative { from: String, to: String },
    /// Resolve a relative PATH against the directory BASE.
    Absolute { path: String, base: String },
    /// Join path fragments.
    Combine {
        #[arg(required = true, num_args = 1..)]
        parts: Vec<String>,
        /// Join with forward slashes (virtual/URL-style paths).
        #[arg(long = "virtual")]
        virtual_path: bool,
    },
    /// Decompose a path into drive/share, directory, name and extension.
    Split { path: String },
    /// Copy a file (or a directory tree) under the retry policy.
    Copy {
        #[arg(value_hint = ValueHint::AnyPath)]
        src: String,
        #[arg(value_hint = ValueHint::AnyPath)]
        dst: String,
        /// Fail instead of replacing an existing destination file.
        #[arg(long)]
        no_overwrite: bool,
    },
    /// Move a file under the retry policy, replacing the destination.
    Move {
        #[arg(value_hint = ValueHint::FilePath)]
        src: String,
        #[arg(value_hint = ValueHint::FilePath)]
        dst: String,
    },
    /// Delete a file or directory; undeletable entries are renamed aside.
    Delete {
        #[arg(value_hint = ValueHint::AnyPath)]
        path: String,
    },
    /// Create a directory and its parents if missing.
    Mkdir {
        #[arg(value_hint = ValueHint::DirPath)]
        path: String,
    },
    /// Write a commented config template at the config location.
    InitConfig,
}

impl Command {
    /// Whether the command touches the filesystem (and therefore needs the retry policy).
    pub fn uses_filesystem(&self) -> bool {
        !matches!(
            self,
            Command::Relative { .. }
                | Command::Absolute { .. }
                | Command::Combine { .. }
                | Command::Split { .. }
        )
    }
}

impl Args {
    /// Effective log level derived from flags.
    /// Precedence: --debug > --log-level value > None (use config default).
    pub fn effective_log_level(&self) -> Option<LogLevel> {
        if self.debug {
            return Some(LogLevel::Debug);
        }
        self.log_level.as_deref().and_then(LogLevel::parse)
    }

    /// Apply CLI overrides to a loaded Config (in-place). No-ops for unset flags.
    pub fn apply_overrides(&self, cfg: &mut Config) {
        if let Some(n) = self.retries {
            cfg.retry_count = n;
        }
        if let Some(secs) = self.delay {
            cfg.sleep_delay_seconds = secs;
        }
        if let Some(level) = self.effective_log_level() {
            cfg.log_level = level;
        }
        if let Some(file) = &self.log_file {
            cfg.log_file = Some(file.clone());
        }
    }
}

pub fn parse() -> Args {
    Args::parse()
}
