use super::*;
use tempfile::tempdir;

#[test]
fn missing_file_yields_defaults() {
    let dir = tempdir().unwrap();
    let settings = load_settings_from(&dir.path().join("settings.json"));
    assert_eq!(settings.editor.tab_size, 4);
    assert!(settings.keybindings.is_empty());
}

#[test]
fn malformed_file_yields_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");
    std::fs::write(&path, "{ not json").unwrap();

    let settings = load_settings_from(&path);
    assert_eq!(settings.editor.status_duration_ms, 3000);
}

#[test]
fn partial_file_overrides_only_given_fields() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");
    std::fs::write(
        &path,
        r#"{
            "editor": { "show_line_numbers": true },
            "keybindings": [{ "key": "ctrl+w", "command": "quit" }]
        }"#,
    )
    .unwrap();

    let settings = load_settings_from(&path);
    assert!(settings.editor.show_line_numbers);
    assert_eq!(settings.editor.default_extension, "txt");
    assert_eq!(settings.keybindings[0].command, "quit");
    assert_eq!(settings.theme.menu_bg.as_deref(), Some("dark_gray"));
}

#[test]
fn default_file_is_written_once_and_round_trips() {
    let dir = tempdir().unwrap();
    let path = dir.path().join(".blockedit").join("settings.json");

    write_default_settings(&path).unwrap();
    std::fs::write(&path, r#"{"editor":{"tab_size":8}}"#).unwrap();
    write_default_settings(&path).unwrap();

    assert_eq!(load_settings_from(&path).editor.tab_size, 8);
}
