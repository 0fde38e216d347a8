use super::*;
use crate::kernel::services::ports::TEXT_FILE_FILTERS;
use std::fs;
use tempfile::tempdir;

fn fixture() -> tempfile::TempDir {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("notes.txt"), "").unwrap();
    fs::write(dir.path().join("notebook.txt"), "").unwrap();
    fs::write(dir.path().join("script.py"), "").unwrap();
    fs::write(dir.path().join("image.png"), "").unwrap();
    fs::write(dir.path().join(".hidden.txt"), "").unwrap();
    fs::create_dir(dir.path().join("projects")).unwrap();
    dir
}

fn base(dir: &tempfile::TempDir) -> String {
    format!("{}/", dir.path().display())
}

const TEXT_ONLY: &[FileFilter] = &[FileFilter::new("Text files", "*.txt")];

#[test]
fn unique_file_match_completes_fully() {
    let dir = fixture();
    let provider = LocalFileProvider::new();
    let input = format!("{}sc", base(&dir));

    let completion = complete_path(&input, Path::new("."), TEXT_FILE_FILTERS, &provider);
    assert_eq!(completion.value, format!("{}script.py", base(&dir)));
    assert!(completion.candidates.is_empty());
}

#[test]
fn directory_match_gets_trailing_separator() {
    let dir = fixture();
    let provider = LocalFileProvider::new();
    let input = format!("{}pro", base(&dir));

    let completion = complete_path(&input, Path::new("."), TEXT_ONLY, &provider);
    assert_eq!(completion.value, format!("{}projects/", base(&dir)));
}

#[test]
fn ambiguous_match_extends_common_prefix() {
    let dir = fixture();
    let provider = LocalFileProvider::new();
    let input = format!("{}n", base(&dir));

    let completion = complete_path(&input, Path::new("."), TEXT_ONLY, &provider);
    assert_eq!(completion.value, format!("{}note", base(&dir)));
    assert_eq!(completion.candidates, vec!["notebook.txt", "notes.txt"]);
}

#[test]
fn filters_hide_non_matching_files() {
    let dir = fixture();
    let provider = LocalFileProvider::new();

    let completion = complete_path(&base(&dir), Path::new("."), TEXT_ONLY, &provider);
    assert_eq!(
        completion.candidates,
        vec!["projects/", "notebook.txt", "notes.txt"]
    );
}

#[test]
fn hidden_files_need_a_dot_prefix() {
    let dir = fixture();
    let provider = LocalFileProvider::new();
    let input = format!("{}.h", base(&dir));

    let completion = complete_path(&input, Path::new("."), TEXT_ONLY, &provider);
    assert_eq!(completion.value, format!("{}.hidden.txt", base(&dir)));
}

#[test]
fn no_match_leaves_input_alone() {
    let dir = fixture();
    let provider = LocalFileProvider::new();
    let input = format!("{}zzz", base(&dir));

    let completion = complete_path(&input, Path::new("."), TEXT_FILE_FILTERS, &provider);
    assert_eq!(completion, Completion {
        value: input,
        candidates: Vec::new(),
    });
}

#[test]
fn unreadable_directory_leaves_input_alone() {
    let provider = LocalFileProvider::new();
    let completion = complete_path(
        "/definitely/not/here/x",
        Path::new("."),
        TEXT_FILE_FILTERS,
        &provider,
    );
    assert_eq!(completion.value, "/definitely/not/here/x");
}

#[test]
fn relative_input_is_listed_under_base() {
    let dir = fixture();
    let provider = LocalFileProvider::new();

    let completion = complete_path("sc", dir.path(), TEXT_FILE_FILTERS, &provider);
    assert_eq!(completion.value, "script.py");

    let completion = complete_path("pro", dir.path(), TEXT_ONLY, &provider);
    assert_eq!(completion.value, "projects/");
}

#[test]
fn common_prefix_handles_multibyte_names() {
    assert_eq!(common_prefix(["añob", "añoc"].into_iter()), "año");
    assert_eq!(common_prefix(["abc", "ab"].into_iter()), "ab");
    assert_eq!(common_prefix(std::iter::empty()), "");
}
