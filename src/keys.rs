use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::config::KeyConfig;
use crate::history::CommandHistory;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Step to an older entry (Up).
    Older,
    /// Step to a newer entry, eventually back to the typed text (Down).
    Newer,
    /// Abandon the browsing session, e.g. on Escape or focus loss.
    Cancel,
}

/// Maps key events to history actions using the configured bindings.
pub struct KeyHandler {
    config: KeyConfig,
}

impl KeyHandler {
    pub fn new(config: KeyConfig) -> Self {
        Self { config }
    }

    pub fn action_for(&self, key: KeyEvent) -> Option<Action> {
        let key_str = key_to_string(&key);

        if self
            .config
            .older
            .iter()
            .any(|k| matches_key(k, &key_str, &key))
        {
            return Some(Action::Older);
        }
        if self
            .config
            .newer
            .iter()
            .any(|k| matches_key(k, &key_str, &key))
        {
            return Some(Action::Newer);
        }
        if self
            .config
            .cancel
            .iter()
            .any(|k| matches_key(k, &key_str, &key))
        {
            return Some(Action::Cancel);
        }

        None
    }
}

/// Drives the history from an input widget. `current_input` is whatever
/// is in the text field right now; the return value, when present, is
/// the text the widget should display next.
pub fn apply(
    action: Action,
    history: &mut CommandHistory,
    current_input: &str,
) -> Option<String> {
    match action {
        Action::Older => {
            history.begin_navigation(current_input);
            history.up()
        }
        Action::Newer => {
            history.begin_navigation(current_input);
            history.down()
        }
        Action::Cancel => {
            history.reset_nav();
            None
        }
    }
}

fn key_to_string(key: &KeyEvent) -> String {
    let mut s = String::new();

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        s.push_str("Ctrl-");
    }
    if key.modifiers.contains(KeyModifiers::ALT) {
        s.push_str("Alt-");
    }

    match key.code {
        KeyCode::Char(c) => s.push(c),
        KeyCode::Esc => s.push_str("Escape"),
        KeyCode::Enter => s.push_str("Enter"),
        KeyCode::Up => s.push_str("Up"),
        KeyCode::Down => s.push_str("Down"),
        KeyCode::PageUp => s.push_str("PageUp"),
        KeyCode::PageDown => s.push_str("PageDown"),
        _ => s.push_str("Unknown"),
    }

    s
}

fn matches_key(pattern: &str, key_str: &str, key: &KeyEvent) -> bool {
    if pattern == key_str {
        return true;
    }

    match pattern {
        "Escape" | "Esc" => key.code == KeyCode::Esc,
        _ if pattern.starts_with("Ctrl-") => {
            let char_part = &pattern[5..];
            if let KeyCode::Char(c) = key.code {
                key.modifiers.contains(KeyModifiers::CONTROL)
                    && c.to_ascii_lowercase().to_string() == char_part.to_lowercase()
            } else {
                false
            }
        }
        _ => pattern.to_lowercase() == key_str.to_lowercase(),
    }
}
