//! Tests for atomic writes and directory removal

use mirror_fs::io;
use tempfile::tempdir;

#[test]
fn read_text_nonexistent_file_returns_error() {
    let dir = tempdir().unwrap();
    let result = io::read_text(&dir.path().join("does_not_exist.txt"));
    assert!(result.is_err(), "Reading non-existent file should fail");
}

#[test]
fn write_text_creates_missing_parents() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("a").join("b").join("config.toml");

    io::write_text(&path, "deep content").unwrap();

    assert_eq!(io::read_text(&path).unwrap(), "deep content");
}

#[test]
fn write_atomic_replaces_existing_content() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");

    io::write_text(&path, "first").unwrap();
    io::write_text(&path, "second").unwrap();

    assert_eq!(io::read_text(&path).unwrap(), "second");
}

#[test]
fn write_atomic_cleans_up_temp_file_on_success() {
    let dir = tempdir().unwrap();
    io::write_text(&dir.path().join("target.txt"), "content").unwrap();

    let leftovers: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
        .collect();

    assert!(leftovers.is_empty(), "temp files left behind: {leftovers:?}");
}

#[test]
fn remove_dir_deletes_tree() {
    let dir = tempdir().unwrap();
    let target = dir.path().join("mirror");
    std::fs::create_dir_all(target.join(".git").join("objects")).unwrap();
    std::fs::write(target.join("main.tex"), "\\documentclass{article}").unwrap();

    io::remove_dir(&target).unwrap();

    assert!(!target.exists());
}

#[test]
fn remove_dir_missing_is_ok() {
    let dir = tempdir().unwrap();
    assert!(io::remove_dir(&dir.path().join("never-created")).is_ok());
}
