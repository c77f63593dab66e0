//! Key mapping from terminal events to game actions.

use crate::types::GameAction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map a key press to a game action. Letters are case-insensitive.
///
/// The soft-drop key is not an action on press; see [`is_soft_drop_key`].
pub fn handle_key_event(key: KeyEvent) -> Option<GameAction> {
    match key.code {
        KeyCode::Left => Some(GameAction::MoveLeft),
        KeyCode::Right => Some(GameAction::MoveRight),
        KeyCode::Up => Some(GameAction::Rotate),
        KeyCode::Char(c) => match c.to_ascii_lowercase() {
            'a' | 'h' => Some(GameAction::MoveLeft),
            'd' | 'l' => Some(GameAction::MoveRight),
            'w' | 'k' => Some(GameAction::Rotate),
            'p' => Some(GameAction::Pause),
            'r' => Some(GameAction::Restart),
            _ => None,
        },
        _ => None,
    }
}

/// Keys that start/stop the soft-drop hold.
pub fn is_soft_drop_key(code: KeyCode) -> bool {
    match code {
        KeyCode::Down => true,
        KeyCode::Char(c) => matches!(c.to_ascii_lowercase(), 's' | 'j'),
        _ => false,
    }
}

/// `q`, or Ctrl-C (raw mode swallows the signal).
pub fn should_quit(key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        KeyCode::Char(c) => c.eq_ignore_ascii_case(&'q'),
        _ => false,
    }
}
