//! Input thread: decodes crossterm events into [`InputEvent`]s.
//!
//! The queue to the coordinator has a single slot, so this thread blocks on
//! `send` while the coordinator is busy (for example during a slow appliance
//! request). Keys are never dropped, only delayed.

use crossbeam_channel::Sender;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind, KeyModifiers};
use dpnav_core::keys::KeyCode;
use dpnav_core::InputEvent;

/// Spawns the input reader. The thread ends when the coordinator drops its
/// receiver or the terminal stops producing events.
pub fn spawn_input_thread(tx: Sender<InputEvent>) -> std::io::Result<()> {
    std::thread::Builder::new()
        .name("dpnav-input".into())
        .spawn(move || loop {
            let event = match event::read() {
                Ok(event) => event,
                Err(e) => {
                    tracing::error!(error = %e, "terminal input failed");
                    return;
                }
            };
            let Some(input) = decode(event) else {
                continue;
            };
            if tx.send(input).is_err() {
                tracing::debug!("coordinator gone, input thread exiting");
                return;
            }
        })?;
    Ok(())
}

/// Maps a terminal event to an input event. Key releases and repeats are
/// ignored: Windows reports both press and release for every keystroke.
fn decode(event: Event) -> Option<InputEvent> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => Some(InputEvent::Key(key_code(key))),
        Event::Resize(cols, rows) => Some(InputEvent::Resize { cols, rows }),
        _ => None,
    }
}

/// Folds modifiers into distinct codes.
pub fn key_code(key: KeyEvent) -> KeyCode {
    use crossterm::event::KeyCode as K;

    let shift = key.modifiers.contains(KeyModifiers::SHIFT);
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            K::Char('c') | K::Char('C') => KeyCode::CtrlC,
            _ => KeyCode::Other,
        };
    }
    match key.code {
        K::Char(c) => KeyCode::Char(c),
        K::Tab => KeyCode::Tab,
        K::Enter => KeyCode::Enter,
        K::Esc => KeyCode::Esc,
        K::Backspace => KeyCode::Backspace,
        K::Delete => KeyCode::Delete,
        K::Left => KeyCode::Left,
        K::Right => KeyCode::Right,
        K::Up if shift => KeyCode::ShiftUp,
        K::Up => KeyCode::Up,
        K::Down if shift => KeyCode::ShiftDown,
        K::Down => KeyCode::Down,
        K::PageUp if shift => KeyCode::ShiftPageUp,
        K::PageUp => KeyCode::PageUp,
        K::PageDown if shift => KeyCode::ShiftPageDown,
        K::PageDown => KeyCode::PageDown,
        K::Home if shift => KeyCode::ShiftHome,
        K::Home => KeyCode::Home,
        K::End if shift => KeyCode::ShiftEnd,
        K::End => KeyCode::End,
        _ => KeyCode::Other,
    }
}
