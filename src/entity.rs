//! A path that may name a file or a directory.
//!
//! The kind is a hint: it is either supplied by the caller or probed once from
//! the filesystem (`lookup_type`). Everything else is value semantics; `combine`
//! and `clone` produce new instances.

use std::cmp::Ordering;
use std::fmt;
use std::path::Path;

use crate::fs_ops::{safe_directory_exists, safe_file_exists};
use crate::path::{
    SplitPath, combine, get_directory_name_only_from_file_path,
    get_directory_path_name_from_file_path, get_file_name_from_file_path, is_separator,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PreferredKind {
    #[default]
    Unspecified,
    File,
    Directory,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileOrDirectory {
    full_path: String,
    original_path: String,
    kind: PreferredKind,
}

impl FileOrDirectory {
    pub fn new(path: impl Into<String>) -> Self {
        Self::with_kind(path, PreferredKind::Unspecified)
    }

    pub fn with_kind(path: impl Into<String>, kind: PreferredKind) -> Self {
        let path = path.into();
        Self {
            original_path: path.clone(),
            full_path: path,
            kind,
        }
    }

    /// Kind probed from the filesystem right away (unspecified if nothing exists).
    pub fn detect(path: impl Into<String>) -> Self {
        let mut entry = Self::new(path);
        entry.lookup_type();
        entry
    }

    /// A known file; the full path is made absolute against the current directory.
    pub fn from_file(path: &Path) -> Self {
        Self::from_known(path, PreferredKind::File)
    }

    pub fn from_directory(path: &Path) -> Self {
        Self::from_known(path, PreferredKind::Directory)
    }

    fn from_known(path: &Path, kind: PreferredKind) -> Self {
        let full = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
        Self {
            full_path: full.to_string_lossy().into_owned(),
            original_path: path.to_string_lossy().into_owned(),
            kind,
        }
    }

    pub fn full_name(&self) -> &str {
        &self.full_path
    }

    pub fn original_path(&self) -> &str {
        &self.original_path
    }

    pub fn kind(&self) -> PreferredKind {
        self.kind
    }

    pub fn is_empty(&self) -> bool {
        self.full_path.is_empty()
    }

    pub fn is_file(&self) -> bool {
        safe_file_exists(&self.full_path)
    }

    pub fn is_directory(&self) -> bool {
        safe_directory_exists(&self.full_path)
    }

    pub fn exists(&self) -> bool {
        !self.is_empty() && (self.is_file() || self.is_directory())
    }

    /// Resolve an unspecified kind from the filesystem. A kind that is
    /// already set is left alone.
    pub fn lookup_type(&mut self) {
        if self.kind != PreferredKind::Unspecified {
            return;
        }
        self.kind = if self.is_file() {
            PreferredKind::File
        } else if self.is_directory() {
            PreferredKind::Directory
        } else {
            PreferredKind::Unspecified
        };
    }

    /// The directory this entry lives in (file) or is (directory).
    /// An unspecified kind is resolved by probing, without caching the result.
    pub fn effective_directory(&self) -> String {
        let parent = || get_directory_path_name_from_file_path(&self.full_path);
        match self.kind {
            PreferredKind::File => parent(),
            PreferredKind::Directory => self.full_path.clone(),
            PreferredKind::Unspecified => {
                if !self.is_directory() && self.is_file() {
                    parent()
                } else {
                    self.full_path.clone()
                }
            }
        }
    }

    /// `path` joined onto the effective directory, as a new unspecified entry.
    pub fn combine(&self, path: &str) -> Self {
        Self::new(combine(&self.effective_directory(), path))
    }

    pub fn combine_entry(&self, other: &FileOrDirectory) -> Self {
        self.combine(&other.full_path)
    }

    /// Last component: the file name for files, the directory name otherwise.
    pub fn name(&self) -> String {
        if self.is_file() {
            get_file_name_from_file_path(&self.full_path)
        } else {
            get_directory_name_only_from_file_path(&self.full_path)
        }
    }

    pub fn split(&self) -> SplitPath {
        SplitPath::new(&self.full_path)
    }

    /// Case-insensitive ordering of the full paths; trailing separators are ignored.
    pub fn compare(&self, other: &str) -> Ordering {
        comparable(&self.full_path).cmp(&comparable(other))
    }

    pub fn compare_entry(&self, other: &FileOrDirectory) -> Ordering {
        self.compare(&other.full_path)
    }
}

fn comparable(path: &str) -> String {
    path.trim_end_matches(is_separator).to_lowercase()
}

impl fmt::Display for FileOrDirectory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.original_path.is_empty() {
            f.write_str(&self.full_path)
        } else {
            f.write_str(&self.original_path)
        }
    }
}

impl From<&str> for FileOrDirectory {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}
