use std::collections::HashMap;
use std::fmt;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::window::WindowIdentifier;

/// Desktop-level commands. Keys that match none of these go to the active
/// window's panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Quit,
    ToggleDarkMode,
    ToggleWindow(WindowIdentifier),
    CycleWindow,
    MoveLeft,
    MoveRight,
    MoveUp,
    MoveDown,
    GrowWidth,
    ShrinkWidth,
    GrowHeight,
    ShrinkHeight,
}

impl Action {
    /// One-cell step in (columns, rows) for move and resize actions.
    pub fn geometry_step(self) -> Option<(i32, i32)> {
        match self {
            Action::MoveLeft | Action::ShrinkWidth => Some((-1, 0)),
            Action::MoveRight | Action::GrowWidth => Some((1, 0)),
            Action::MoveUp | Action::ShrinkHeight => Some((0, -1)),
            Action::MoveDown | Action::GrowHeight => Some((0, 1)),
            _ => None,
        }
    }

    pub fn is_resize(self) -> bool {
        matches!(
            self,
            Action::GrowWidth | Action::ShrinkWidth | Action::GrowHeight | Action::ShrinkHeight
        )
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Quit => write!(f, "Quit"),
            Action::ToggleDarkMode => write!(f, "Toggle dark mode"),
            Action::ToggleWindow(id) => write!(f, "Toggle {}", id.title()),
            Action::CycleWindow => write!(f, "Cycle windows"),
            Action::MoveLeft => write!(f, "Move window left"),
            Action::MoveRight => write!(f, "Move window right"),
            Action::MoveUp => write!(f, "Move window up"),
            Action::MoveDown => write!(f, "Move window down"),
            Action::GrowWidth => write!(f, "Widen window"),
            Action::ShrinkWidth => write!(f, "Narrow window"),
            Action::GrowHeight => write!(f, "Heighten window"),
            Action::ShrinkHeight => write!(f, "Shorten window"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyCombo {
    pub code: KeyCode,
    pub mods: KeyModifiers,
}

impl KeyCombo {
    pub fn new(code: KeyCode, mods: KeyModifiers) -> Self {
        Self { code, mods }
    }

    pub fn matches(&self, key: &KeyEvent) -> bool {
        key.code == self.code && key.modifiers == self.mods
    }

    pub fn display(&self) -> String {
        let mut parts = Vec::new();
        if self.mods.contains(KeyModifiers::CONTROL) {
            parts.push("Ctrl".to_string());
        }
        if self.mods.contains(KeyModifiers::ALT) {
            parts.push("Alt".to_string());
        }
        if self.mods.contains(KeyModifiers::SHIFT) {
            parts.push("Shift".to_string());
        }
        let code = match self.code {
            KeyCode::Char(c) => c.to_ascii_uppercase().to_string(),
            KeyCode::F(n) => format!("F{n}"),
            KeyCode::Left => "Left".to_string(),
            KeyCode::Right => "Right".to_string(),
            KeyCode::Up => "Up".to_string(),
            KeyCode::Down => "Down".to_string(),
            other => format!("{other:?}"),
        };
        parts.push(code);
        parts.join("+")
    }
}

impl fmt::Display for KeyCombo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

#[derive(Debug, Clone)]
pub struct KeyBindings {
    map: HashMap<Action, Vec<KeyCombo>>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        use Action::*;
        let ctrl = KeyModifiers::CONTROL;
        let alt = KeyModifiers::ALT;
        let alt_shift = KeyModifiers::ALT | KeyModifiers::SHIFT;
        let mut kb = Self::new();
        kb.add(Quit, KeyCombo::new(KeyCode::Char('q'), ctrl));
        kb.add(ToggleDarkMode, KeyCombo::new(KeyCode::Char('d'), ctrl));
        for (n, id) in (1u8..).zip(WindowIdentifier::ALL) {
            kb.add(ToggleWindow(id), KeyCombo::new(KeyCode::F(n), KeyModifiers::NONE));
        }
        kb.add(CycleWindow, KeyCombo::new(KeyCode::F(4), KeyModifiers::NONE));
        kb.add(MoveLeft, KeyCombo::new(KeyCode::Left, alt));
        kb.add(MoveRight, KeyCombo::new(KeyCode::Right, alt));
        kb.add(MoveUp, KeyCombo::new(KeyCode::Up, alt));
        kb.add(MoveDown, KeyCombo::new(KeyCode::Down, alt));
        kb.add(ShrinkWidth, KeyCombo::new(KeyCode::Left, alt_shift));
        kb.add(GrowWidth, KeyCombo::new(KeyCode::Right, alt_shift));
        kb.add(ShrinkHeight, KeyCombo::new(KeyCode::Up, alt_shift));
        kb.add(GrowHeight, KeyCombo::new(KeyCode::Down, alt_shift));
        kb
    }
}

impl KeyBindings {
    pub fn new() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    pub fn add(&mut self, action: Action, combo: KeyCombo) {
        self.map.entry(action).or_default().push(combo);
    }

    pub fn matches(&self, action: Action, key: &KeyEvent) -> bool {
        self.map
            .get(&action)
            .is_some_and(|list| list.iter().any(|c| c.matches(key)))
    }

    pub fn action_for_key(&self, key: &KeyEvent) -> Option<Action> {
        self.map
            .iter()
            .find(|(_, list)| list.iter().any(|c| c.matches(key)))
            .map(|(action, _)| *action)
    }

    /// Display strings for every combo bound to `action`.
    pub fn combos_for(&self, action: Action) -> Vec<String> {
        self.map
            .get(&action)
            .map(|list| list.iter().map(KeyCombo::display).collect())
            .unwrap_or_default()
    }
}
