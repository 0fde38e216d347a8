use super::*;
use std::fs::File;
use std::io::ErrorKind;
use tempfile::tempdir;

#[test]
fn test_read_write_text() {
    let dir = tempdir().unwrap();
    let file_path = dir.path().join("test.txt");

    let provider = LocalFileProvider::new();

    provider.write_text(&file_path, "¡Hola, año!").unwrap();
    let content = provider.read_text(&file_path).unwrap();
    assert_eq!(content, "¡Hola, año!");
}

#[test]
fn test_write_keeps_text_byte_for_byte() {
    let dir = tempdir().unwrap();
    let file_path = dir.path().join("exact.txt");

    let provider = LocalFileProvider::new();
    provider.write_text(&file_path, "no trailing newline").unwrap();

    assert_eq!(fs::read(&file_path).unwrap(), b"no trailing newline");
}

#[test]
fn test_read_missing_file_is_read_error() {
    let dir = tempdir().unwrap();
    let provider = LocalFileProvider::new();

    let err = provider.read_text(&dir.path().join("missing.txt")).unwrap_err();
    assert!(matches!(err, FileError::Read { .. }));
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[test]
fn test_read_invalid_utf8_is_read_error() {
    let dir = tempdir().unwrap();
    let file_path = dir.path().join("latin1.txt");
    fs::write(&file_path, [0x61, 0xff, 0x62]).unwrap();

    let err = LocalFileProvider::new().read_text(&file_path).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidData);
}

#[test]
fn test_write_into_missing_dir_is_write_error() {
    let dir = tempdir().unwrap();
    let file_path = dir.path().join("nope").join("a.txt");

    let err = LocalFileProvider::new()
        .write_text(&file_path, "x")
        .unwrap_err();
    assert!(matches!(err, FileError::Write { .. }));
    assert_eq!(err.path(), file_path.as_path());
}

#[test]
fn test_read_dir_lists_dirs_first() {
    let dir = tempdir().unwrap();

    fs::create_dir(dir.path().join("subdir")).unwrap();
    File::create(dir.path().join("b.txt")).unwrap();
    File::create(dir.path().join("A.py")).unwrap();

    let provider = LocalFileProvider::new();
    let entries = provider.read_dir(dir.path()).unwrap();

    let names: Vec<_> = entries.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["subdir", "A.py", "b.txt"]);
    assert!(entries[0].is_dir);
    assert!(provider.is_dir(&entries[0].path));
}
