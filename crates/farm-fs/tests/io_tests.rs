use farm_fs::io;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_write_atomic_creates_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("index-v4.yaml");

    io::write_atomic(&path, b"distributions: {}\n").unwrap();

    let content = fs::read_to_string(&path).unwrap();
    assert_eq!(content, "distributions: {}\n");
}

#[test]
fn test_write_atomic_creates_missing_parents() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("cache").join("nested").join("base.yaml");

    io::write_atomic(&path, b"cmake: {}\n").unwrap();

    assert!(path.exists());
}

#[test]
fn test_write_atomic_overwrites_existing() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("Makefile");
    fs::write(&path, "original").unwrap();

    io::write_atomic(&path, b"updated").unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "updated");
}

#[test]
fn test_write_atomic_leaves_no_temp_files() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("Dockerfile");

    io::write_atomic(&path, b"FROM ubuntu:jammy\n").unwrap();

    let names: Vec<String> = fs::read_dir(temp.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["Dockerfile".to_string()]);
}

#[test]
fn test_read_text_nonexistent_file() {
    let temp = TempDir::new().unwrap();
    let result = io::read_text(&temp.path().join("missing.yaml"));
    assert!(matches!(result, Err(farm_fs::Error::Io { .. })));
}

#[test]
fn test_write_text_then_read_text() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("rosdep.yaml");

    io::write_text(&path, "roscpp:\n  ubuntu: ros-noetic-roscpp\n").unwrap();

    let content = io::read_text(&path).unwrap();
    assert!(content.contains("ros-noetic-roscpp"));
}
