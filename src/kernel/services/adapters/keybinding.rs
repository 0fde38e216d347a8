//! 快捷键：按键 → 命令

use crate::core::event::Key;
use crate::core::Command;
use crate::kernel::services::ports::settings::KeybindingRule;
use crossterm::event::{KeyCode, KeyModifiers};
use rustc_hash::FxHashMap;

pub struct KeybindingService {
    bindings: FxHashMap<Key, Command>,
}

impl KeybindingService {
    pub fn new() -> Self {
        Self::with_defaults()
    }

    pub fn with_defaults() -> Self {
        Self {
            bindings: default_keybindings(),
        }
    }

    /// Defaults overridden by user rules. Rules that fail to parse are
    /// skipped with a warning.
    pub fn with_rules(rules: &[KeybindingRule]) -> Self {
        let mut service = Self::with_defaults();
        service.apply_rules(rules);
        service
    }

    pub fn apply_rules(&mut self, rules: &[KeybindingRule]) {
        for rule in rules {
            let Some(key) = parse_keybinding(&rule.key) else {
                tracing::warn!(key = %rule.key, "invalid keybinding key");
                continue;
            };
            let Some(command) = Command::from_name(&rule.command) else {
                tracing::warn!(command = %rule.command, "unknown keybinding command");
                continue;
            };
            self.bind(key, command);
        }
    }

    pub fn resolve(&self, key: &Key) -> Option<&Command> {
        self.bindings.get(key)
    }

    pub fn bind(&mut self, key: Key, command: Command) {
        self.bindings.insert(key, command);
    }

    pub fn unbind(&mut self, key: &Key) -> Option<Command> {
        self.bindings.remove(key)
    }

    /// The key shown next to a menu item. Ctrl chords win over other keys so
    /// the label is stable.
    pub fn key_for(&self, command: &Command) -> Option<Key> {
        let mut best: Option<Key> = None;
        for (key, bound) in &self.bindings {
            if bound != command {
                continue;
            }
            let better = match best {
                None => true,
                Some(current) => key_rank(key) < key_rank(&current),
            };
            if better {
                best = Some(*key);
            }
        }
        best
    }
}

impl Default for KeybindingService {
    fn default() -> Self {
        Self::new()
    }
}

fn key_rank(key: &Key) -> (u8, u8, String) {
    let group = if key.modifiers == KeyModifiers::CONTROL {
        0
    } else if key.modifiers.contains(KeyModifiers::CONTROL) {
        1
    } else {
        2
    };
    (group, key.modifiers.bits(), format_key(key))
}

fn default_keybindings() -> FxHashMap<Key, Command> {
    let mut bindings = FxHashMap::default();
    bindings.reserve(40);

    bindings.insert(Key::ctrl(KeyCode::Char('n')), Command::NewFile);
    bindings.insert(Key::ctrl(KeyCode::Char('o')), Command::OpenFile);
    bindings.insert(Key::ctrl(KeyCode::Char('s')), Command::Save);
    bindings.insert(Key::ctrl_shift(KeyCode::Char('s')), Command::SaveAs);
    bindings.insert(Key::ctrl(KeyCode::Char('q')), Command::Quit);

    bindings.insert(Key::simple(KeyCode::F(10)), Command::OpenMenu);
    bindings.insert(Key::alt(KeyCode::Char('f')), Command::OpenMenu);
    bindings.insert(Key::simple(KeyCode::Esc), Command::Escape);

    bindings.insert(Key::simple(KeyCode::Left), Command::CursorLeft);
    bindings.insert(Key::simple(KeyCode::Right), Command::CursorRight);
    bindings.insert(Key::simple(KeyCode::Up), Command::CursorUp);
    bindings.insert(Key::simple(KeyCode::Down), Command::CursorDown);
    bindings.insert(Key::simple(KeyCode::Home), Command::CursorLineStart);
    bindings.insert(Key::simple(KeyCode::End), Command::CursorLineEnd);
    bindings.insert(Key::ctrl(KeyCode::Home), Command::CursorFileStart);
    bindings.insert(Key::ctrl(KeyCode::End), Command::CursorFileEnd);
    bindings.insert(Key::simple(KeyCode::PageUp), Command::PageUp);
    bindings.insert(Key::simple(KeyCode::PageDown), Command::PageDown);
    bindings.insert(Key::ctrl(KeyCode::Up), Command::ScrollUp);
    bindings.insert(Key::ctrl(KeyCode::Down), Command::ScrollDown);

    bindings.insert(Key::simple(KeyCode::Enter), Command::InsertNewline);
    bindings.insert(Key::simple(KeyCode::Tab), Command::InsertTab);
    bindings.insert(Key::simple(KeyCode::Backspace), Command::DeleteBackward);
    bindings.insert(Key::simple(KeyCode::Delete), Command::DeleteForward);
    // Shift held over an editing key edits the same way.
    bindings.insert(Key::shift(KeyCode::Enter), Command::InsertNewline);
    bindings.insert(Key::shift(KeyCode::Tab), Command::InsertTab);
    bindings.insert(Key::simple(KeyCode::BackTab), Command::InsertTab);
    bindings.insert(Key::shift(KeyCode::BackTab), Command::InsertTab);
    bindings.insert(Key::shift(KeyCode::Backspace), Command::DeleteBackward);
    bindings.insert(Key::shift(KeyCode::Delete), Command::DeleteForward);
    bindings.insert(Key::ctrl(KeyCode::Char('z')), Command::Undo);
    bindings.insert(Key::ctrl(KeyCode::Char('y')), Command::Redo);
    bindings.insert(Key::ctrl_shift(KeyCode::Char('z')), Command::Redo);

    bindings
}

pub fn parse_keybinding(value: &str) -> Option<Key> {
    let mut modifiers = KeyModifiers::NONE;
    let mut key_part: Option<&str> = None;
    for part in value.split('+').map(str::trim).filter(|p| !p.is_empty()) {
        match part.to_ascii_lowercase().as_str() {
            "ctrl" | "control" => modifiers |= KeyModifiers::CONTROL,
            "shift" => modifiers |= KeyModifiers::SHIFT,
            "alt" | "option" => modifiers |= KeyModifiers::ALT,
            "super" | "meta" | "cmd" | "command" => modifiers |= KeyModifiers::SUPER,
            _ => key_part = Some(part),
        }
    }
    let key_part = key_part?;
    let mut code = parse_key_code(key_part)?;
    if let KeyCode::Char(ch) = code {
        if ch.is_ascii_uppercase() {
            code = KeyCode::Char(ch.to_ascii_lowercase());
            modifiers |= KeyModifiers::SHIFT;
        }
    }
    Some(Key::new(code, modifiers))
}

fn parse_key_code(value: &str) -> Option<KeyCode> {
    let v = value.trim();
    if v.is_empty() {
        return None;
    }

    let v_lc = v.to_ascii_lowercase();
    let code = match v_lc.as_str() {
        "enter" => KeyCode::Enter,
        "tab" => KeyCode::Tab,
        "backtab" => KeyCode::BackTab,
        "esc" | "escape" => KeyCode::Esc,
        "backspace" => KeyCode::Backspace,
        "delete" | "del" => KeyCode::Delete,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "pageup" => KeyCode::PageUp,
        "pagedown" => KeyCode::PageDown,
        "space" => KeyCode::Char(' '),
        _ if v_lc.len() > 1 && v_lc.starts_with('f') => {
            let n = v_lc.strip_prefix('f')?.parse::<u8>().ok()?;
            KeyCode::F(n)
        }
        _ => {
            let mut chars = v.chars();
            let ch = chars.next()?;
            if chars.next().is_some() {
                return None;
            }
            KeyCode::Char(ch)
        }
    };

    Some(code)
}

/// Human readable chord, e.g. `Ctrl+Shift+S`.
pub fn format_key(key: &Key) -> String {
    let mut parts: Vec<String> = Vec::new();
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        parts.push("Ctrl".to_string());
    }
    if key.modifiers.contains(KeyModifiers::ALT) {
        parts.push("Alt".to_string());
    }
    if key.modifiers.contains(KeyModifiers::SUPER) {
        parts.push("Super".to_string());
    }
    if key.modifiers.contains(KeyModifiers::SHIFT) {
        parts.push("Shift".to_string());
    }
    let code = match key.code {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(ch) => ch.to_uppercase().to_string(),
        KeyCode::F(n) => format!("F{}", n),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::BackTab => "BackTab".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Backspace => "Backspace".to_string(),
        KeyCode::Delete => "Del".to_string(),
        KeyCode::Up => "Up".to_string(),
        KeyCode::Down => "Down".to_string(),
        KeyCode::Left => "Left".to_string(),
        KeyCode::Right => "Right".to_string(),
        KeyCode::Home => "Home".to_string(),
        KeyCode::End => "End".to_string(),
        KeyCode::PageUp => "PageUp".to_string(),
        KeyCode::PageDown => "PageDown".to_string(),
        _ => "?".to_string(),
    };
    parts.push(code);
    parts.join("+")
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/keybinding.rs"]
mod tests;
