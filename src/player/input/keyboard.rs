//! Keyboard input handling for the presenter view.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::player::state::InputResult;

/// Map a key press to a navigation step.
pub fn handle_key_event(key: KeyEvent) -> InputResult {
    // some platforms also report releases
    if key.kind == KeyEventKind::Release {
        return InputResult::Continue;
    }

    match key.code {
        // === Quit ===
        KeyCode::Char('q') => InputResult::Quit,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => InputResult::Quit,

        // === Navigation ===
        KeyCode::Right | KeyCode::PageDown => InputResult::Next,
        KeyCode::Left | KeyCode::PageUp => InputResult::Prev,

        _ => InputResult::Continue,
    }
}
