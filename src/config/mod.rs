//! Configuration (XML file + environment overrides).
//! - `Config::load()` reads config.xml if present, then applies env overrides.
//! - No process-wide state: callers pass the loaded `Config` where it is needed.

pub mod paths;
pub mod types;
pub mod xml;

pub use paths::{default_config_path, default_log_path, path_has_symlink_ancestor};
pub use types::{Config, LogLevel};
pub use xml::{create_template_config, load_config_from_xml_path};

/// Overrides the location of config.xml.
pub const ENV_CONFIG: &str = "SAFE_PATH_OPS_CONFIG";
/// Overrides `retry_count` (non-negative integer; invalid values are ignored).
pub const ENV_RETRY_COUNT: &str = "SAFE_PATH_OPS_RETRY_COUNT";
/// Overrides `sleep_delay_seconds` (non-negative integer; invalid values are ignored).
pub const ENV_SLEEP_DELAY_SECONDS: &str = "SAFE_PATH_OPS_SLEEP_DELAY_SECONDS";

/// Directory / file names below the platform config and data dirs.
pub(crate) const APP_DIR_NAME: &str = "safe_path_ops";
pub(crate) const CONFIG_FILE_NAME: &str = "config.xml";
pub(crate) const LOG_FILE_NAME: &str = "safe_path_ops.log";
