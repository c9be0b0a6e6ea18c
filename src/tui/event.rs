use std::time::Duration;

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEventKind,
};
use log::{debug, warn};

use crate::core::action::{Action, Key, MouseKind};

/// Poll for an event with timeout (blocks up to `timeout`).
pub fn poll_event_timeout(timeout: Duration) -> Option<Action> {
    match event::poll(timeout) {
        Ok(true) => match event::read() {
            Ok(event) => translate(event),
            Err(e) => {
                warn!("Failed to read terminal event: {}", e);
                None
            }
        },
        Ok(false) => None,
        Err(e) => {
            warn!("Failed to poll terminal events: {}", e);
            None
        }
    }
}

/// Poll for an event without blocking (returns immediately)
pub fn poll_event_immediate() -> Option<Action> {
    poll_event_timeout(Duration::ZERO)
}

/// Map a crossterm event onto the controller's vocabulary. Events the
/// controller has no use for (key releases, clicks, focus) give `None`.
pub fn translate(event: Event) -> Option<Action> {
    match event {
        Event::Key(key_event) => {
            debug!(
                "Key event: {:?} with modifiers {:?}",
                key_event.code, key_event.modifiers
            );
            translate_key(key_event).map(Action::Key)
        }
        Event::Mouse(mouse_event) => match mouse_event.kind {
            MouseEventKind::ScrollUp => Some(Action::Mouse(MouseKind::WheelUp)),
            MouseEventKind::ScrollDown => Some(Action::Mouse(MouseKind::WheelDown)),
            _ => None,
        },
        Event::Resize(width, height) => Some(Action::Resize { width, height }),
        _ => None,
    }
}

fn translate_key(key_event: KeyEvent) -> Option<Key> {
    if key_event.kind != KeyEventKind::Press {
        return None;
    }
    match (key_event.modifiers, key_event.code) {
        (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(Key::CtrlC),
        // Other control chords have no binding
        (m, KeyCode::Char(_)) if m.contains(KeyModifiers::CONTROL) => None,
        (_, KeyCode::Char(c)) => Some(Key::Char(c)),
        (_, KeyCode::Up) => Some(Key::Up),
        (_, KeyCode::Down) => Some(Key::Down),
        (_, KeyCode::Left) => Some(Key::Left),
        (_, KeyCode::Right) => Some(Key::Right),
        (_, KeyCode::Enter) => Some(Key::Enter),
        (_, KeyCode::Esc) => Some(Key::Esc),
        (_, KeyCode::Tab) => Some(Key::Tab),
        (_, KeyCode::Backspace) => Some(Key::Backspace),
        (_, KeyCode::Delete) => Some(Key::Delete),
        (_, KeyCode::Home) => Some(Key::Home),
        (_, KeyCode::End) => Some(Key::End),
        _ => None,
    }
}
