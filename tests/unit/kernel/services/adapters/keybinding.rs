use super::*;

#[test]
fn file_commands_use_ctrl_bindings() {
    let service = KeybindingService::new();
    assert_eq!(
        service.resolve(&Key::ctrl(KeyCode::Char('n'))),
        Some(&Command::NewFile)
    );
    assert_eq!(
        service.resolve(&Key::ctrl(KeyCode::Char('o'))),
        Some(&Command::OpenFile)
    );
    assert_eq!(
        service.resolve(&Key::ctrl(KeyCode::Char('s'))),
        Some(&Command::Save)
    );
    assert_eq!(
        service.resolve(&Key::ctrl_shift(KeyCode::Char('s'))),
        Some(&Command::SaveAs)
    );
}

#[test]
fn shift_does_not_disable_editing_keys() {
    let service = KeybindingService::new();
    let cases = [
        (Key::shift(KeyCode::Enter), Command::InsertNewline),
        (Key::shift(KeyCode::Tab), Command::InsertTab),
        (Key::shift(KeyCode::BackTab), Command::InsertTab),
        (Key::shift(KeyCode::Backspace), Command::DeleteBackward),
        (Key::shift(KeyCode::Delete), Command::DeleteForward),
    ];
    for (key, command) in cases {
        assert_eq!(service.resolve(&key), Some(&command), "{}", format_key(&key));
    }
    assert_eq!(
        service.key_for(&Command::InsertNewline),
        Some(Key::simple(KeyCode::Enter))
    );
}

#[test]
fn editor_has_cursor_bindings() {
    let service = KeybindingService::new();
    assert_eq!(
        service.resolve(&Key::simple(KeyCode::Left)),
        Some(&Command::CursorLeft)
    );
    assert_eq!(
        service.resolve(&Key::ctrl(KeyCode::End)),
        Some(&Command::CursorFileEnd)
    );
}

#[test]
fn parse_keybinding_handles_modifiers_and_case() {
    assert_eq!(
        parse_keybinding("ctrl+shift+s"),
        Some(Key::ctrl_shift(KeyCode::Char('s')))
    );
    assert_eq!(
        parse_keybinding("Ctrl+S"),
        Some(Key::ctrl_shift(KeyCode::Char('s')))
    );
    assert_eq!(parse_keybinding("f10"), Some(Key::simple(KeyCode::F(10))));
    assert_eq!(parse_keybinding("f"), Some(Key::simple(KeyCode::Char('f'))));
    assert_eq!(parse_keybinding("ctrl+"), None);
    assert_eq!(parse_keybinding("ctrl+nope"), None);
}

#[test]
fn rules_override_defaults_and_skip_invalid_ones() {
    let rules = vec![
        KeybindingRule {
            key: "ctrl+w".to_string(),
            command: "quit".to_string(),
        },
        KeybindingRule {
            key: "ctrl+n".to_string(),
            command: "saveAs".to_string(),
        },
        KeybindingRule {
            key: "ctrl+k".to_string(),
            command: "doesNotExist".to_string(),
        },
    ];
    let service = KeybindingService::with_rules(&rules);

    assert_eq!(
        service.resolve(&Key::ctrl(KeyCode::Char('w'))),
        Some(&Command::Quit)
    );
    assert_eq!(
        service.resolve(&Key::ctrl(KeyCode::Char('n'))),
        Some(&Command::SaveAs)
    );
    assert_eq!(service.resolve(&Key::ctrl(KeyCode::Char('k'))), None);
}

#[test]
fn key_for_prefers_plain_ctrl_chords() {
    let service = KeybindingService::new();
    assert_eq!(
        service.key_for(&Command::Redo),
        Some(Key::ctrl(KeyCode::Char('y')))
    );
    assert_eq!(
        service.key_for(&Command::SaveAs),
        Some(Key::ctrl_shift(KeyCode::Char('s')))
    );
    assert_eq!(service.key_for(&Command::InsertChar('x')), None);
}

#[test]
fn format_key_is_readable() {
    assert_eq!(format_key(&Key::ctrl(KeyCode::Char('n'))), "Ctrl+N");
    assert_eq!(
        format_key(&Key::ctrl_shift(KeyCode::Char('s'))),
        "Ctrl+Shift+S"
    );
    assert_eq!(format_key(&Key::simple(KeyCode::F(10))), "F10");
}
