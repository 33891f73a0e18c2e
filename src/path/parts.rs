//! Decomposition of path strings into drive/share, directory, name and extension.
//!
//! Everything here is substring search from either end of the string. Malformed
//! input degrades to an empty string or is passed through; nothing panics.

use super::combine::{combine, is_separator};

/// Separators plus the volume separator, as used for file-name scanning.
#[inline]
fn is_name_boundary(c: char) -> bool {
    is_separator(c) || c == ':'
}

/// The last path component, or the whole input when no separator is present.
pub fn get_file_name_from_file_path(file_path: &str) -> String {
    match file_path.rfind(is_name_boundary) {
        Some(i) => file_path[i + 1..].to_string(),
        None => file_path.to_string(),
    }
}

pub fn get_file_name_without_extension(file_path: &str) -> String {
    let name = get_file_name_from_file_path(file_path);
    match name.rfind('.') {
        Some(i) => name[..i].to_string(),
        None => name,
    }
}

/// Extension of the last component including the dot (`.exe`), or empty.
///
/// ```
/// use safe_path_ops::path::get_extension;
///
/// assert_eq!(get_extension(r"c:\x\notepad.exe"), ".exe");
/// assert_eq!(get_extension(r"c:\x\file"), "");
/// ```
pub fn get_extension(path: &str) -> String {
    let last = path.rsplit(is_name_boundary).next().unwrap_or_default();
    match last.rfind('.') {
        Some(i) => last[i..].to_string(),
        None => String::new(),
    }
}

/// Everything before the last separator, in backslash form.
/// A bare drive (`c:`) gets its root separator back (`c:\`).
pub fn get_directory_path_name_from_file_path(file_path: &str) -> String {
    let Some(i) = file_path.rfind(is_separator) else {
        return String::new();
    };

    let mut dir = file_path[..i].replace('/', "\\");
    if dir.ends_with(':') {
        dir.push('\\');
    }
    dir
}

/// Name of the directory a path points at (`c:\a\b\` -> `b`).
/// Short rooted inputs such as `c:\` are returned as-is.
pub fn get_directory_name_only_from_file_path(file_path: &str) -> String {
    if file_path.chars().count() <= 3 {
        return file_path.to_string();
    }

    let trimmed = file_path
        .strip_suffix(is_separator)
        .unwrap_or(file_path);
    get_file_name_from_file_path(trimmed)
}

/// Replace (or with `None`, remove) the extension of the last component.
pub fn change_extension(path: &str, extension: Option<&str>) -> String {
    let mut text = path.to_string();
    for (i, c) in path.char_indices().rev() {
        if c == '.' {
            text = path[..i].to_string();
            break;
        }
        if is_name_boundary(c) {
            break;
        }
    }

    let Some(ext) = extension else {
        return text;
    };
    if path.is_empty() {
        return text;
    }
    if !ext.starts_with('.') {
        text.push('.');
    }
    text.push_str(ext);
    text
}

pub fn change_file_name(path: &str, file_name: &str) -> String {
    combine(&get_directory_path_name_from_file_path(path), file_name)
}

pub fn change_file_name_without_extension(path: &str, file_name_without_extension: &str) -> String {
    let ext = get_extension(path);
    combine(
        &get_directory_path_name_from_file_path(path),
        &format!("{file_name_without_extension}{ext}"),
    )
}

/// `X:` when a colon appears before any separator, otherwise empty.
pub fn get_drive(path: &str) -> String {
    let normalized = path.replace('/', "\\");
    match normalized.find(':') {
        None | Some(0) => String::new(),
        Some(colon) => match normalized.find('\\') {
            Some(slash) if slash < colon => String::new(),
            _ => normalized[..=colon].to_string(),
        },
    }
}

/// `\\server\share` for UNC-shaped input, otherwise empty.
///
/// The input must begin with exactly two separators, followed by a non-empty
/// server segment and a non-empty share segment that is itself terminated by a
/// separator. `\\server\share` without that final separator is not recognized.
pub fn get_share(path: &str) -> String {
    let normalized = path.replace('/', "\\");
    let Some(rest) = normalized.strip_prefix("\\\\") else {
        return String::new();
    };
    if rest.starts_with('\\') {
        return String::new();
    }

    let Some((server, after_server)) = rest.split_once('\\') else {
        return String::new();
    };
    match after_server.split_once('\\') {
        Some((share, _)) if !share.is_empty() => format!("\\\\{server}\\{share}"),
        _ => String::new(),
    }
}

/// Drive if present, else share if present, else empty.
pub fn get_drive_or_share(path: &str) -> String {
    let drive = get_drive(path);
    if !drive.is_empty() {
        return drive;
    }
    get_share(path)
}

/// Alias kept for readers coming from `std::path` terminology.
pub fn get_path_root(path: &str) -> String {
    get_drive_or_share(path)
}

/// Directory part without the drive or share (`c:\a\b\f.txt` -> `\a\b`).
pub fn get_directory(path: &str) -> String {
    if path.is_empty() {
        return String::new();
    }

    let root = get_drive_or_share(path);
    let dir = get_directory_path_name_from_file_path(path);
    match dir.strip_prefix(root.as_str()) {
        Some(rest) if !root.is_empty() => rest.to_string(),
        _ => dir,
    }
}

pub fn is_drive_letter_path(file_path: &str) -> bool {
    file_path.chars().position(|c| c == ':') == Some(1)
}

/// UNC shape check. Long-path prefixes are only accepted in their `\\?\UNC\` form.
pub fn is_unc_path(file_path: &str) -> bool {
    let s = file_path.replace('/', "\\");
    if !s.starts_with(r"\\") {
        return false;
    }
    if s.starts_with(r"\\?\") && !s.starts_with(r"\\?\UNC\") {
        return false;
    }
    !get_share(&s).is_empty()
}

/// Syntactic check only; the filesystem is never consulted.
pub fn is_absolute_path(path: &str) -> bool {
    let s = path.replace('/', "\\");
    let mut chars = s.chars();
    let (Some(first), Some(second)) = (chars.next(), chars.next()) else {
        return false;
    };

    if first == '\\' && second == '\\' {
        is_unc_path(&s)
    } else if second == ':' {
        is_drive_letter_path(&s)
    } else {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_name_parts() {
        assert_eq!(get_file_name_from_file_path(r"c:\f1\f2\file1.txt"), "file1.txt");
        assert_eq!(get_file_name_from_file_path("/suchen.html"), "suchen.html");
        assert_eq!(get_file_name_from_file_path("file1."), "file1.");
        assert_eq!(get_file_name_from_file_path("c:file"), "file");
        assert_eq!(get_file_name_without_extension(r"c:\a\notepad.exe"), "notepad");
        assert_eq!(get_file_name_without_extension(r"\\nas\data\x\lalala-123.txt"), "lalala-123");
        assert_eq!(get_file_name_without_extension("lalala-123"), "lalala-123");
        assert_eq!(get_file_name_without_extension(r"\\?\C:\S\scratch_file."), "scratch_file");
    }

    #[test]
    fn extension_uses_last_dot_of_last_component() {
        assert_eq!(get_extension(r"c:\ablage\..\windows\notepad.file.exe"), ".exe");
        assert_eq!(get_extension(r"c:\dir.d\file"), "");
        assert_eq!(get_extension(""), "");
        assert_eq!(get_extension("file."), ".");
    }

    #[test]
    fn directory_path_name() {
        assert_eq!(get_directory_path_name_from_file_path(r"c:\ablage\sitemap.xml"), r"c:\ablage");
        assert_eq!(get_directory_path_name_from_file_path("c:/ablage/sitemap.xml"), r"c:\ablage");
        assert_eq!(get_directory_path_name_from_file_path(r"c:\ablage\"), r"c:\ablage");
        assert_eq!(get_directory_path_name_from_file_path(r"c:\ablage"), r"c:\");
        assert_eq!(get_directory_path_name_from_file_path("sitemap.xml"), "");
    }

    #[test]
    fn directory_name_only() {
        assert_eq!(get_directory_name_only_from_file_path(r"c:\a\b\"), "b");
        assert_eq!(get_directory_name_only_from_file_path(r"c:\a\b"), "b");
        assert_eq!(get_directory_name_only_from_file_path(r"c:\"), r"c:\");
    }

    #[test]
    fn change_extension_variants() {
        let p = r"c:\ablage\..\windows\notepad.exe";
        assert_eq!(change_extension(p, Some(".com")), r"c:\ablage\..\windows\notepad.com");
        assert_eq!(change_extension(p, Some("com")), r"c:\ablage\..\windows\notepad.com");
        assert_eq!(change_extension(p, None), r"c:\ablage\..\windows\notepad");
        assert_eq!(change_extension(r"c:\dir.d\file", Some(".txt")), r"c:\dir.d\file.txt");
        assert_eq!(change_extension("", Some(".txt")), "");
    }

    #[test]
    fn change_file_name_keeps_directory() {
        let p = r"c:\folder1\folder2\folder3\file1.txt";
        assert_eq!(
            change_file_name_without_extension(p, "file2"),
            r"c:\folder1\folder2\folder3\file2.txt"
        );
        assert_eq!(change_file_name(p, "file2.md"), r"c:\folder1\folder2\folder3\file2.md");
    }

    #[test]
    fn drive_detection() {
        assert_eq!(get_drive(r"c:\x"), "c:");
        assert_eq!(get_drive("D:/x/y"), "D:");
        assert_eq!(get_drive(r"\x\c:"), "");
        assert_eq!(get_drive(":x"), "");
        assert_eq!(get_drive("relative"), "");
    }

    #[test]
    fn share_detection() {
        assert_eq!(get_share(r"\\Server\C\Team\Test.Txt"), r"\\Server\C");
        assert_eq!(get_share("//server/share/x"), r"\\server\share");
        assert_eq!(get_share(r"\\\server\share\x"), "");
        assert_eq!(get_share(r"\\server\\x"), "");
        assert_eq!(get_share(r"\\server"), "");
        assert_eq!(get_share(r"c:\x\y"), "");
    }

    // Open question carried over as-is: a share without a terminating
    // separator is not recognized, even though the shape looks valid.
    #[test]
    fn share_without_trailing_separator_is_not_recognized() {
        assert_eq!(get_share(r"\\server\share"), "");
        assert!(!is_absolute_path(r"\\server\share"));
        assert_eq!(get_share(r"\\server\share\"), r"\\server\share");
    }

    #[test]
    fn directory_strips_root() {
        assert_eq!(get_directory(r"c:\Team\Text\Test.Txt"), r"\Team\Text");
        assert_eq!(get_directory(r"\\srv\sh\dir\f.txt"), r"\dir");
        assert_eq!(get_directory(r"c:\f.txt"), r"\");
        assert_eq!(get_directory(r"rel\f.txt"), "rel");
    }

    #[test]
    fn absolute_and_unc_checks() {
        assert!(is_absolute_path(r"\\server\share\x"));
        assert!(is_absolute_path(r"c:\x"));
        assert!(is_absolute_path("c:/x"));
        assert!(!is_absolute_path(r"relative\x"));
        assert!(!is_absolute_path(""));
        assert!(!is_absolute_path("c"));
        assert!(is_unc_path(r"\\?\UNC\server\share\x"));
        assert!(!is_unc_path(r"\\?\C:\x"));
        assert!(is_drive_letter_path(r"c:\x"));
        assert!(!is_drive_letter_path(r"x\c:"));
    }
}
