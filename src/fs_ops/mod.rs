//! Filesystem operations the retry guard wraps.
//! - Inputs are path strings with either separator style.
//! - `safe_*` helpers degrade gracefully; move/copy report a single `RetryError`.

mod helpers;
mod listing;
mod meta;
mod safe;

pub use helpers::{io_error_with_help, native_path};
pub use listing::{file_length, is_directory_empty, list_directories, list_files};
pub use meta::{
    FileDates, copy_file_exact, get_file_dates, is_read_only, set_file_dates, set_read_only, touch,
};
pub use safe::{
    safe_check_create_directory, safe_copy_directory, safe_copy_file, safe_delete_directory,
    safe_delete_directory_contents, safe_delete_file, safe_directory_exists, safe_file_exists,
    safe_move_file,
};
