//! Key bindings (arrows plus vim-style) and the input source the session polls.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Player action from a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    MoveLeft,
    MoveRight,
    SoftDrop,
    Rotate,
    Pause,
    Quit,
}

/// Non-blocking key source. `Ok(None)` means nothing was pressed this frame.
pub trait InputSource {
    fn poll_key(&mut self) -> anyhow::Result<Option<KeyEvent>>;
}

/// Map a key event to a game action. Releases, repeats from other kinds and
/// unbound keys give `None`.
pub fn key_to_action(key: KeyEvent) -> Option<Action> {
    let KeyEvent {
        code,
        modifiers,
        kind,
        ..
    } = key;
    if kind != KeyEventKind::Press {
        return None;
    }
    if modifiers == KeyModifiers::CONTROL && code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }
    if !(modifiers.is_empty() || modifiers == KeyModifiers::SHIFT) {
        return None;
    }
    match code {
        KeyCode::Char('q' | 'Q') | KeyCode::Esc => Some(Action::Quit),
        KeyCode::Char('p' | 'P') => Some(Action::Pause),
        KeyCode::Left | KeyCode::Char('h') => Some(Action::MoveLeft),
        KeyCode::Right | KeyCode::Char('l') => Some(Action::MoveRight),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::SoftDrop),
        KeyCode::Up | KeyCode::Char('k' | 'r' | 'R') => Some(Action::Rotate),
        _ => None,
    }
}
