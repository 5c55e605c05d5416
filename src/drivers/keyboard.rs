use crossterm::event::{Event, KeyCode, KeyEventKind, KeyModifiers};

/// Smooths over terminal differences before key events reach the desktop:
/// Shift+Tab becomes BackTab, and release events are dropped (Windows also
/// reports repeats, which are dropped too).
#[derive(Debug, Default)]
pub struct KeyboardNormalizer;

impl KeyboardNormalizer {
    pub fn new() -> Self {
        Self
    }

    pub fn normalize(&mut self, evt: Event) -> Option<Event> {
        let Event::Key(mut key) = evt else {
            return Some(evt);
        };
        match key.kind {
            KeyEventKind::Release => return None,
            KeyEventKind::Repeat if cfg!(windows) => return None,
            _ => {}
        }
        if key.code == KeyCode::Tab && key.modifiers.contains(KeyModifiers::SHIFT) {
            key.code = KeyCode::BackTab;
            key.modifiers.remove(KeyModifiers::SHIFT);
        }
        Some(Event::Key(key))
    }
}
