//! Joining and slash normalization.
//! - `combine` joins with exactly one backslash and normalizes both sides.
//! - `combine_virtual` is the forward-slash variant for URL-like strings.
//! - The `set_*_slash_*` helpers are idempotent edits of the first/last char.

use std::path::MAIN_SEPARATOR;

/// True for either path separator.
#[inline]
pub(crate) fn is_separator(c: char) -> bool {
    c == '\\' || c == '/'
}

/// Join two path segments with a single backslash.
///
/// If either side is empty, the other is returned unchanged. Otherwise trailing
/// separators of `path1` and leading separators of `path2` are trimmed and both
/// sides are converted to backslash form.
///
/// ```
/// use safe_path_ops::path::combine;
///
/// assert_eq!(combine(r"c:\a\", r"\b/c.txt"), r"c:\a\b\c.txt");
/// assert_eq!(combine("", "b"), "b");
/// ```
pub fn combine(path1: &str, path2: &str) -> String {
    if path1.is_empty() {
        return path2.to_string();
    }
    if path2.is_empty() {
        return path1.to_string();
    }

    let left = path1.trim_end_matches(is_separator).replace('/', "\\");
    let right = path2.trim_start_matches(is_separator).replace('/', "\\");
    format!("{left}\\{right}")
}

/// Fold `combine` over any number of segments, left to right.
pub fn combine_all<I, S>(parts: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    parts
        .into_iter()
        .fold(String::new(), |acc, part| combine(&acc, part.as_ref()))
}

/// A forward-slash combine for URL-like or protocol-prefixed strings.
///
/// Never collapses the slashes already present in `path1`, so `file://` stays
/// intact, and keeps a leading slash on `path2` when it introduces a drive
/// (`/C:/...`), which yields the `file:///C:/...` form.
pub fn combine_virtual(path1: &str, path2: &str) -> String {
    if path1.is_empty() {
        return path2.to_string();
    }
    if path2.is_empty() {
        return path1.to_string();
    }

    let mut left = path1.replace('\\', "/");
    if !left.ends_with('/') {
        left.push('/');
    }

    let right = path2.replace('\\', "/");
    let head: Vec<char> = right.chars().take(3).collect();
    let drive_after_slash =
        head.len() == 3 && head[0] == '/' && head[1].is_alphabetic() && head[2] == ':';

    if drive_after_slash {
        left.push_str(&right);
    } else {
        left.push_str(right.trim_start_matches(is_separator));
    }
    left
}

/// Fold `combine_virtual` over any number of segments, left to right.
pub fn combine_virtual_all<I, S>(parts: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    parts
        .into_iter()
        .fold(String::new(), |acc, part| combine_virtual(&acc, part.as_ref()))
}

pub fn convert_back_slashes_to_forward_slashes(text: &str) -> String {
    text.replace('\\', "/")
}

pub fn convert_forward_slashes_to_back_slashes(text: &str) -> String {
    text.replace('/', "\\")
}

/// Rewrite both separator styles to the separator of the host platform.
pub fn convert_slashes_to_platform(text: &str) -> String {
    let foreign = if MAIN_SEPARATOR == '\\' { '/' } else { '\\' };
    text.replace(foreign, &MAIN_SEPARATOR.to_string())
}

pub fn set_back_slash_end(path: &str, set_slash: bool) -> String {
    set_slash_end(path, set_slash, '\\')
}

pub fn set_forward_slash_end(path: &str, set_slash: bool) -> String {
    set_slash_end(path, set_slash, '/')
}

pub fn set_back_slash_begin(path: &str, set_slash: bool) -> String {
    set_slash_begin(path, set_slash, '\\')
}

pub fn set_forward_slash_begin(path: &str, set_slash: bool) -> String {
    set_slash_begin(path, set_slash, '/')
}

fn set_slash_begin(path: &str, set_slash: bool, separator: char) -> String {
    match (set_slash, path.starts_with(separator)) {
        (true, true) | (false, false) => path.to_string(),
        (true, false) => format!("{separator}{path}"),
        (false, true) => path[separator.len_utf8()..].to_string(),
    }
}

fn set_slash_end(path: &str, set_slash: bool, separator: char) -> String {
    match (set_slash, path.ends_with(separator)) {
        (true, true) | (false, false) => path.to_string(),
        (true, false) => format!("{path}{separator}"),
        (false, true) => path[..path.len() - separator.len_utf8()].to_string(),
    }
}
