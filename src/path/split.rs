use std::fmt;

use super::combine::{combine, combine_all};
use super::parts::{
    get_directory, get_drive, get_drive_or_share, get_extension, get_file_name_from_file_path,
    get_file_name_without_extension, get_share,
};

/// Read-only decomposition of a path string.
///
/// `combine(drive_or_share, directory, name_without_extension + extension)`
/// gives back the original path, modulo separator style.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SplitPath {
    full_path: String,
    drive: String,
    share: String,
    drive_or_share: String,
    directory: String,
    name_with_extension: String,
    name_without_extension: String,
    extension: String,
}

impl SplitPath {
    pub fn new(path: &str) -> Self {
        Self {
            full_path: path.to_string(),
            drive: get_drive(path),
            share: get_share(path),
            drive_or_share: get_drive_or_share(path),
            directory: get_directory(path),
            name_with_extension: get_file_name_from_file_path(path),
            name_without_extension: get_file_name_without_extension(path),
            extension: get_extension(path),
        }
    }

    pub fn full_path(&self) -> &str {
        &self.full_path
    }

    pub fn drive(&self) -> &str {
        &self.drive
    }

    pub fn share(&self) -> &str {
        &self.share
    }

    pub fn drive_or_share(&self) -> &str {
        &self.drive_or_share
    }

    /// Directory below the drive or share, e.g. `\a\b`.
    pub fn directory(&self) -> &str {
        &self.directory
    }

    pub fn name_with_extension(&self) -> &str {
        &self.name_with_extension
    }

    pub fn name_without_extension(&self) -> &str {
        &self.name_without_extension
    }

    /// Extension including the leading dot, or empty.
    pub fn extension(&self) -> &str {
        &self.extension
    }

    pub fn is_empty(&self) -> bool {
        self.full_path.is_empty()
    }

    pub fn drive_or_share_and_directory(&self) -> String {
        combine(&self.drive_or_share, &self.directory)
    }

    pub fn drive_or_share_and_directory_and_name_without_extension(&self) -> String {
        combine(
            &self.drive_or_share_and_directory(),
            &self.name_without_extension,
        )
    }

    pub fn directory_and_name_with_extension(&self) -> String {
        combine(&self.directory, &self.name_with_extension)
    }

    /// Reassemble the parts into a backslash-normalized path.
    pub fn recombine(&self) -> String {
        let name = format!("{}{}", self.name_without_extension, self.extension);
        combine_all([
            self.drive_or_share.as_str(),
            self.directory.as_str(),
            name.as_str(),
        ])
    }
}

impl From<&str> for SplitPath {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

impl fmt::Display for SplitPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full_path)
    }
}

pub fn split_path(path: &str) -> SplitPath {
    SplitPath::new(path)
}
