//! Dot resolution, absolute/relative conversion and path equality.
//!
//! Resolution is purely textual: the current directory and the filesystem are
//! never consulted, so `..` above a rooted path is dropped and `..` at the start
//! of a relative path is kept.

use super::combine::{combine, is_separator};
use super::parts::{get_drive, get_drive_or_share, get_share, is_absolute_path};

/// Split a backslash-normalized path into (root, remainder, rooted).
fn split_root(s: &str) -> (String, &str, bool) {
    let drive = get_drive(s);
    if !drive.is_empty() {
        let rest = &s[drive.len()..];
        return match rest.strip_prefix('\\') {
            Some(rest) => (format!("{drive}\\"), rest, true),
            None => (drive, rest, true),
        };
    }

    let share = get_share(s);
    if !share.is_empty() {
        let rest = &s[share.len()..];
        return (format!("{share}\\"), rest.strip_prefix('\\').unwrap_or(rest), true);
    }

    if let Some(rest) = s.strip_prefix(r"\\") {
        (r"\\".to_string(), rest, true)
    } else if let Some(rest) = s.strip_prefix('\\') {
        (r"\".to_string(), rest, true)
    } else {
        (String::new(), s, false)
    }
}

/// Collapse `.` and `..` segments and duplicate separators.
///
/// ```
/// use safe_path_ops::path::resolve_dots;
///
/// assert_eq!(resolve_dots(r"c:\a\.\b\..\c"), r"c:\a\c");
/// assert_eq!(resolve_dots(r"..\a\..\..\b"), r"..\..\b");
/// ```
pub fn resolve_dots(path: &str) -> String {
    if path.is_empty() {
        return String::new();
    }

    let s = path.replace('/', "\\");
    let (root, rest, rooted) = split_root(&s);

    let mut stack: Vec<&str> = Vec::new();
    for segment in rest.split('\\') {
        match segment {
            "" | "." => {}
            ".." => match stack.last() {
                Some(&last) if last != ".." => {
                    stack.pop();
                }
                _ if rooted => {}
                _ => stack.push(".."),
            },
            other => stack.push(other),
        }
    }

    let mut out = root;
    out.push_str(&stack.join("\\"));
    if !stack.is_empty() && rest.ends_with('\\') {
        out.push('\\');
    }
    out
}

/// `path` as-is when it is already absolute, otherwise joined onto `base`
/// with dot segments resolved.
pub fn get_absolute_path(path: &str, base: &str) -> String {
    if is_absolute_path(path) {
        return path.to_string();
    }
    resolve_dots(&combine(base, path))
}

pub fn get_parent_path(path: &str) -> String {
    if path.is_empty() {
        return String::new();
    }
    resolve_dots(&combine(path, ".."))
}

fn fold_case(s: &str) -> Vec<char> {
    s.chars()
        .map(|c| c.to_lowercase().next().unwrap_or(c))
        .collect()
}

/// Path that leads from directory `from` to `to`.
///
/// Returns `to` unchanged when either side is empty, when the drive or share
/// differs, or when the two share nothing beyond their root. Comparison is
/// case-insensitive; the returned suffix keeps the casing of `to`.
///
/// ```
/// use safe_path_ops::path::get_relative_path;
///
/// assert_eq!(get_relative_path(r"c:\a\b\", r"c:\a\c\file.txt"), r"..\c\file.txt");
/// assert_eq!(get_relative_path(r"c:\a", r"d:\a"), r"d:\a");
/// ```
pub fn get_relative_path(from: &str, to: &str) -> String {
    if from.is_empty() || to.is_empty() {
        return to.to_string();
    }

    let from_lower: String = fold_case(from).into_iter().collect();
    let from_lower = from_lower.replace('/', "\\");
    let from_lower = from_lower.trim_end_matches('\\');
    let to_lower: String = fold_case(to).into_iter().collect();
    let to_lower = to_lower.replace('/', "\\");

    let from_root = get_drive_or_share(from_lower);
    let to_root = get_drive_or_share(&to_lower);
    if from_root.trim_matches(is_separator) != to_root.trim_matches(is_separator) {
        return to.to_string();
    }
    let root_len = from_root.chars().count();

    let o: Vec<char> = from_lower.chars().collect();
    let t: Vec<char> = to_lower.chars().collect();

    let mut pos = o.iter().zip(t.iter()).take_while(|(a, b)| a == b).count();
    let at_boundary = |v: &[char], i: usize| i == v.len() || v[i] == '\\';
    if !(at_boundary(&o, pos) && at_boundary(&t, pos)) {
        pos = o[..pos].iter().rposition(|&c| c == '\\').unwrap_or(0);
    }
    if pos == 0 || pos <= root_len {
        return to.to_string();
    }

    let ups = o[pos..]
        .split(|&c| c == '\\')
        .filter(|segment| !segment.is_empty())
        .count();

    let suffix: String = to.chars().skip(pos).collect();
    let mut out = "..\\".repeat(ups);
    out.push_str(suffix.trim_matches(is_separator));
    out
}

fn comparable(path: &str) -> String {
    resolve_dots(path)
        .trim_end_matches('\\')
        .to_lowercase()
}

/// Case-insensitive equality after dot resolution; a trailing separator is ignored.
pub fn are_same_folder_paths(folder1: &str, folder2: &str) -> bool {
    comparable(folder1) == comparable(folder2)
}

pub fn are_same_file_paths(file1: &str, file2: &str) -> bool {
    comparable(file1) == comparable(file2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_dots_rooted() {
        assert_eq!(resolve_dots(r"c:\a\b\..\..\..\x"), r"c:\x");
        assert_eq!(resolve_dots(r"c:\a\\b\"), r"c:\a\b\");
        assert_eq!(resolve_dots(r"c:\.."), r"c:\");
        assert_eq!(resolve_dots("c:/a/./b"), r"c:\a\b");
        assert_eq!(resolve_dots(r"\\srv\sh\a\..\b"), r"\\srv\sh\b");
        assert_eq!(resolve_dots(r"\\srv\sh\.."), r"\\srv\sh\");
        assert_eq!(resolve_dots(r"\a\..\b"), r"\b");
    }

    #[test]
    fn resolve_dots_relative() {
        assert_eq!(resolve_dots(r"a\b\..\c"), r"a\c");
        assert_eq!(resolve_dots(r"a\.."), "");
        assert_eq!(resolve_dots(r"..\..\a"), r"..\..\a");
        assert_eq!(resolve_dots(""), "");
    }

    #[test]
    fn absolute_path() {
        assert_eq!(get_absolute_path(r"..\c\f.txt", r"c:\a\b"), r"c:\a\c\f.txt");
        assert_eq!(get_absolute_path(r"d:\x", r"c:\a"), r"d:\x");
        assert_eq!(get_absolute_path(r"\\s\h\x", r"c:\a"), r"\\s\h\x");
        assert_eq!(get_absolute_path("f.txt", r"c:\a\"), r"c:\a\f.txt");
    }

    #[test]
    fn parent_path() {
        assert_eq!(get_parent_path(r"c:\a\b"), r"c:\a");
        assert_eq!(get_parent_path(r"c:\a\b\"), r"c:\a");
        assert_eq!(get_parent_path(r"c:\"), r"c:\");
        assert_eq!(get_parent_path(""), "");
    }

    #[test]
    fn relative_path_basic() {
        assert_eq!(get_relative_path(r"c:\a\b\", r"c:\a\c\file.txt"), r"..\c\file.txt");
        assert_eq!(get_relative_path(r"c:\a", r"c:\a\b\f.txt"), r"b\f.txt");
        assert_eq!(get_relative_path(r"c:\a\b\c", r"c:\a"), r"..\..\");
        assert_eq!(get_relative_path(r"C:\A\B", r"c:\a\b\Mixed.TXT"), "Mixed.TXT");
    }

    #[test]
    fn relative_path_backs_up_to_segment_boundary() {
        assert_eq!(get_relative_path(r"c:\a\b", r"c:\a\bc\f.txt"), r"..\bc\f.txt");
        assert_eq!(get_relative_path(r"c:\a\bc", r"c:\a\b\f.txt"), r"..\b\f.txt");
        assert_eq!(get_relative_path(r"rel\x", r"rel\y"), r"..\y");
    }

    #[test]
    fn relative_path_without_common_root_returns_target() {
        assert_eq!(get_relative_path(r"c:\a", r"d:\a\b"), r"d:\a\b");
        assert_eq!(get_relative_path(r"c:\a", r"c:\b"), r"c:\b");
        assert_eq!(get_relative_path(r"\\s\h\a\", r"\\t\h\a\x"), r"\\t\h\a\x");
        assert_eq!(get_relative_path("", r"c:\x"), r"c:\x");
        assert_eq!(get_relative_path("ab", "ac"), "ac");
    }

    #[test]
    fn relative_path_on_shares() {
        assert_eq!(
            get_relative_path(r"\\srv\sh\a\b\", r"\\SRV\sh\a\c\f.txt"),
            r"..\c\f.txt"
        );
    }

    #[test]
    fn same_paths() {
        assert!(are_same_folder_paths(r"c:\A\b\", r"C:\a\B"));
        assert!(are_same_folder_paths(r"c:\a\x\..\b", "c:/a/b"));
        assert!(!are_same_folder_paths(r"c:\a", r"c:\b"));
        assert!(are_same_file_paths(r"c:\a\F.txt", r"C:\A\.\f.TXT"));
    }
}
