use assert_fs::TempDir;
use assert_fs::prelude::*;
use safe_path_ops::fs_ops::{list_directories, list_files};

fn names(paths: &[std::path::PathBuf]) -> Vec<String> {
    paths
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect()
}

fn fixture() -> TempDir {
    let tmp = TempDir::new().unwrap();
    tmp.child("a.txt").write_str("").unwrap();
    tmp.child("B.TXT").write_str("").unwrap();
    tmp.child("README").write_str("").unwrap();
    tmp.child("docs/c.txt").write_str("").unwrap();
    tmp.child("docs/img/d.png").write_str("").unwrap();
    tmp
}

#[test]
fn pattern_is_case_insensitive_and_shallow_by_default() {
    let tmp = fixture();
    let dir = tmp.path().to_string_lossy().into_owned();
    let found = list_files(&dir, "*.txt", false).unwrap();
    let mut got = names(&found);
    got.sort();
    assert_eq!(got, ["B.TXT", "a.txt"]);
}

#[test]
fn star_dot_star_lists_everything_recursively() {
    let tmp = fixture();
    let dir = tmp.path().to_string_lossy().into_owned();
    let found = list_files(&dir, "*.*", true).unwrap();
    assert_eq!(found.len(), 5);
    assert!(names(&found).contains(&"README".to_string()));
}

#[test]
fn directories_only() {
    let tmp = fixture();
    let dir = tmp.path().to_string_lossy().into_owned();
    let mut got = names(&list_directories(&dir, "*", true).unwrap());
    got.sort();
    assert_eq!(got, ["docs", "img"]);
    assert_eq!(names(&list_directories(&dir, "*", false).unwrap()), ["docs"]);
}

#[test]
fn listing_a_missing_directory_is_an_error() {
    let tmp = TempDir::new().unwrap();
    let missing = tmp.path().join("nope").to_string_lossy().into_owned();
    assert!(list_files(&missing, "*", false).is_err());
}
