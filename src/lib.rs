//! Core library for `safe_path_ops`.
//!
//! Two halves:
//! - `path`: pure string arithmetic on Windows-style and UNC paths (no I/O).
//! - `retry` + `fs_ops`: filesystem operations that tolerate transient failures
//!   by re-running them under a bounded retry policy.
//!
//! `entity` wraps a path that may be a file or a directory; `config` supplies the
//! retry defaults from XML and the environment.

pub mod cli;
pub mod config;
pub mod entity;
pub mod errors;
pub mod fs_ops;
pub mod output;
pub mod path;
pub mod platform;
pub mod retry;

pub use config::{
    Config, LogLevel, default_config_path, default_log_path, load_config_from_xml_path,
    path_has_symlink_ancestor,
};
pub use entity::{FileOrDirectory, PreferredKind};
pub use errors::SafePathError;
pub use path::SplitPath;
pub use retry::{AttemptError, RetryError, RetryPolicy, protect, protect_with};
