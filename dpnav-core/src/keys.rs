//! Decoded key codes and the flat key-to-action table.
//!
//! Modifier combinations are distinct codes (`ShiftUp`, `CtrlC`, ...), so the
//! table below is a single `match` with no modifier logic. The terminal
//! adapter in the binary is responsible for producing these codes.

use crate::session::Motion;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Char(char),
    CtrlC,
    Tab,
    Enter,
    Esc,
    Backspace,
    Delete,
    Left,
    Right,
    Up,
    Down,
    PageUp,
    PageDown,
    Home,
    End,
    ShiftUp,
    ShiftDown,
    ShiftPageUp,
    ShiftPageDown,
    ShiftHome,
    ShiftEnd,
    /// Anything the table does not care about.
    Other,
}

/// What a key does outside the dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    ToggleSide,
    Enter,
    ToggleMark,
    Move(Motion),
    /// Move and toggle the mark of every row left behind.
    SelectThrough(Motion),
    Reload,
}

/// Looks up the action bound to `key`, if any.
pub fn action_for(key: KeyCode) -> Option<Action> {
    use Action::*;
    let action = match key {
        KeyCode::Char('q') | KeyCode::CtrlC => Quit,
        KeyCode::Tab => ToggleSide,
        KeyCode::Enter => Enter,
        KeyCode::Char(' ') => ToggleMark,
        KeyCode::Char('r') => Reload,

        KeyCode::Up | KeyCode::Char('i') => Move(Motion::Up),
        KeyCode::Down | KeyCode::Char('k') => Move(Motion::Down),
        KeyCode::PageUp | KeyCode::Char('u') => Move(Motion::PageUp),
        KeyCode::PageDown | KeyCode::Char('o') => Move(Motion::PageDown),
        KeyCode::Home | KeyCode::Char('a') => Move(Motion::Top),
        KeyCode::End | KeyCode::Char('z') => Move(Motion::Bottom),

        KeyCode::ShiftUp | KeyCode::Char('I') => SelectThrough(Motion::Up),
        KeyCode::ShiftDown | KeyCode::Char('K') => SelectThrough(Motion::Down),
        KeyCode::ShiftPageUp | KeyCode::Char('U') => SelectThrough(Motion::PageUp),
        KeyCode::ShiftPageDown | KeyCode::Char('O') => SelectThrough(Motion::PageDown),
        KeyCode::ShiftHome | KeyCode::Char('A') => SelectThrough(Motion::Top),
        KeyCode::ShiftEnd | KeyCode::Char('Z') => SelectThrough(Motion::Bottom),

        _ => return None,
    };
    Some(action)
}
