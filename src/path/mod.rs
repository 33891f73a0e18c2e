//! String-level path arithmetic.
//! - Pure functions: no filesystem access, no current directory.
//! - Accepts `/` and `\`; results are normalized to `\` unless stated otherwise.
//! - Malformed input never errors; it yields an empty string or the input itself.

mod combine;
mod parts;
mod relative;
mod split;

pub(crate) use combine::is_separator;

pub use combine::{
    combine, combine_all, combine_virtual, combine_virtual_all,
    convert_back_slashes_to_forward_slashes, convert_forward_slashes_to_back_slashes,
    convert_slashes_to_platform, set_back_slash_begin, set_back_slash_end,
    set_forward_slash_begin, set_forward_slash_end,
};
pub use parts::{
    change_extension, change_file_name, change_file_name_without_extension, get_directory,
    get_directory_name_only_from_file_path, get_directory_path_name_from_file_path, get_drive,
    get_drive_or_share, get_extension, get_file_name_from_file_path,
    get_file_name_without_extension, get_path_root, get_share, is_absolute_path,
    is_drive_letter_path, is_unc_path,
};
pub use relative::{
    are_same_file_paths, are_same_folder_paths, get_absolute_path, get_parent_path,
    get_relative_path, resolve_dots,
};
pub use split::{SplitPath, split_path};
