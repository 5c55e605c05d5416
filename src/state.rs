use crate::constants::DARK_MODE_KEY;
use crate::storage::KeyValueStore;

/// Desktop-wide flags that are not part of the window layout.
///
/// Changes are recorded as dirty flags and drained by the runner (mouse
/// capture) or written to the store (dark mode) on the next tick.
#[derive(Debug, Default, Clone, Copy)]
pub struct AppState {
    mouse_capture_enabled: bool,
    mouse_capture_dirty: bool,
    dark_mode: bool,
    dark_mode_dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            mouse_capture_enabled: true,
            ..Self::default()
        }
    }

    pub fn load(store: &impl KeyValueStore) -> Self {
        Self {
            dark_mode: parse_dark_mode(store.get(DARK_MODE_KEY).as_deref()),
            ..Self::new()
        }
    }

    pub fn mouse_capture_enabled(&self) -> bool {
        self.mouse_capture_enabled
    }

    pub fn set_mouse_capture_enabled(&mut self, enabled: bool) {
        if self.mouse_capture_enabled == enabled {
            return;
        }
        self.mouse_capture_enabled = enabled;
        self.mouse_capture_dirty = true;
    }

    pub fn take_mouse_capture_change(&mut self) -> Option<bool> {
        if self.mouse_capture_dirty {
            self.mouse_capture_dirty = false;
            Some(self.mouse_capture_enabled)
        } else {
            None
        }
    }

    pub fn dark_mode(&self) -> bool {
        self.dark_mode
    }

    pub fn set_dark_mode(&mut self, enabled: bool) {
        if self.dark_mode == enabled {
            return;
        }
        self.dark_mode = enabled;
        self.dark_mode_dirty = true;
    }

    pub fn toggle_dark_mode(&mut self) {
        let enabled = !self.dark_mode;
        self.set_dark_mode(enabled);
    }

    pub fn take_dark_mode_change(&mut self) -> Option<bool> {
        if self.dark_mode_dirty {
            self.dark_mode_dirty = false;
            Some(self.dark_mode)
        } else {
            None
        }
    }

    /// Write a pending dark-mode change to `store`. Failures are logged.
    pub fn persist_dark_mode(&mut self, store: &mut impl KeyValueStore) {
        let Some(enabled) = self.take_dark_mode_change() else {
            return;
        };
        if let Err(err) = store.set(DARK_MODE_KEY, enabled.to_string()) {
            tracing::warn!(error = %err, "failed to persist dark mode");
        }
    }
}

/// Only the literal `true` enables dark mode.
pub fn parse_dark_mode(raw: Option<&str>) -> bool {
    matches!(raw, Some("true"))
}
