//! Keyboard bindings for the interactive player.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Action {
    Quit,
    TogglePause,
    Faster,
    Slower,
    NextTheme,
    PrevTheme,
    ToggleStats,
    TogglePackMode,
    ResetScene,
}

/// Map a key press to a player action.
pub fn handle_key_event(key: KeyEvent) -> Option<Action> {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Some(Action::Quit);
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(Action::Quit),
        KeyCode::Char(' ') => Some(Action::TogglePause),

        KeyCode::Char('+') | KeyCode::Char('=') => Some(Action::Faster),
        KeyCode::Char('-') | KeyCode::Char('_') => Some(Action::Slower),

        KeyCode::Char('t') | KeyCode::Char('T') => Some(Action::NextTheme),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(Action::PrevTheme),

        KeyCode::Char('s') | KeyCode::Char('S') => Some(Action::ToggleStats),
        KeyCode::Char('b') | KeyCode::Char('B') => Some(Action::TogglePackMode),
        KeyCode::Char('x') | KeyCode::Char('X') => Some(Action::ResetScene),

        _ => None,
    }
}
