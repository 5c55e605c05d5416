//! Window layout state: which windows are open, where they sit, and how they
//! stack.
//!
//! [`LayoutStateManager`] is the single owner of this state. Presentation
//! code reads geometry from it and reports finished drags/resizes back to
//! it; every mutation is written through to the key-value store straight
//! away.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use super::Geometry;
use crate::constants::{FALLBACK_WINDOW_TITLE, WINDOWS_LAYOUT_KEY};
use crate::storage::KeyValueStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WindowIdentifier {
    About,
    Projects,
    Contact,
}

impl WindowIdentifier {
    pub const ALL: [WindowIdentifier; 3] = [
        WindowIdentifier::About,
        WindowIdentifier::Projects,
        WindowIdentifier::Contact,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            WindowIdentifier::About => "about",
            WindowIdentifier::Projects => "projects",
            WindowIdentifier::Contact => "contact",
        }
    }

    /// Label shown in the dock.
    pub const fn label(self) -> &'static str {
        match self {
            WindowIdentifier::About => "About",
            WindowIdentifier::Projects => "Projects",
            WindowIdentifier::Contact => "Contact",
        }
    }

    /// Title shown in the window header.
    pub const fn title(self) -> &'static str {
        match self {
            WindowIdentifier::About => "About Me",
            WindowIdentifier::Projects => "Projects",
            WindowIdentifier::Contact => "Contact",
        }
    }

    const fn default_state(self) -> WindowState {
        match self {
            WindowIdentifier::About => WindowState::new(true, 100, 80, 800, 600, 1),
            WindowIdentifier::Projects => WindowState::new(false, 140, 120, 800, 600, 0),
            WindowIdentifier::Contact => WindowState::new(false, 180, 160, 800, 600, 0),
        }
    }
}

impl fmt::Display for WindowIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown window identifier: {0}")]
pub struct UnknownWindow(pub String);

impl FromStr for WindowIdentifier {
    type Err = UnknownWindow;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WindowIdentifier::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| UnknownWindow(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowState {
    pub is_open: bool,
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
    pub z_index: u64,
}

impl WindowState {
    pub const fn new(is_open: bool, x: i32, y: i32, width: u32, height: u32, z_index: u64) -> Self {
        Self {
            is_open,
            x,
            y,
            width,
            height,
            z_index,
        }
    }

    pub fn geometry(&self) -> Geometry {
        Geometry::new(self.x, self.y, self.width, self.height)
    }

    fn is_well_formed(&self) -> bool {
        self.width > 0 && self.height > 0
    }
}

#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("layout is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("window {0} has an empty size")]
    EmptyWindow(WindowIdentifier),
}

/// Every window's state, keyed by identifier. Always holds all identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct WindowsLayout {
    windows: BTreeMap<WindowIdentifier, WindowState>,
}

impl Default for WindowsLayout {
    fn default() -> Self {
        Self {
            windows: WindowIdentifier::ALL
                .into_iter()
                .map(|id| (id, id.default_state()))
                .collect(),
        }
    }
}

impl WindowsLayout {
    pub fn window(&self, id: WindowIdentifier) -> WindowState {
        self.windows
            .get(&id)
            .copied()
            .unwrap_or_else(|| id.default_state())
    }

    fn window_mut(&mut self, id: WindowIdentifier) -> &mut WindowState {
        self.windows.entry(id).or_insert_with(|| id.default_state())
    }

    pub fn iter(&self) -> impl Iterator<Item = (WindowIdentifier, WindowState)> + '_ {
        self.windows.iter().map(|(id, state)| (*id, *state))
    }

    pub fn max_z_index(&self) -> u64 {
        self.windows.values().map(|w| w.z_index).max().unwrap_or(0)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Strict parse: unknown identifiers, wrong types and empty sizes are
    /// errors. Identifiers missing from `raw` take their defaults.
    pub fn parse(raw: &str) -> Result<Self, LayoutError> {
        let parsed: BTreeMap<WindowIdentifier, WindowState> = serde_json::from_str(raw)?;
        let mut layout = Self::default();
        for (id, state) in parsed {
            if !state.is_well_formed() {
                return Err(LayoutError::EmptyWindow(id));
            }
            layout.windows.insert(id, state);
        }
        Ok(layout)
    }

    /// Lenient load of a persisted layout.
    ///
    /// Anything that is not a JSON object yields the default layout. Inside
    /// an object each known window is checked on its own: malformed entries
    /// are replaced by that window's default and unknown keys are dropped.
    pub fn hydrate(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return Self::default();
        };
        let object = match serde_json::from_str::<Value>(raw) {
            Ok(Value::Object(object)) => object,
            Ok(_) => {
                tracing::warn!("persisted layout is not an object; using defaults");
                return Self::default();
            }
            Err(err) => {
                tracing::warn!(error = %err, "persisted layout unparseable; using defaults");
                return Self::default();
            }
        };

        let mut layout = Self::default();
        for (key, value) in object {
            let Ok(id) = key.parse::<WindowIdentifier>() else {
                tracing::warn!(key = %key, "dropping unknown window from persisted layout");
                continue;
            };
            match serde_json::from_value::<WindowState>(value) {
                Ok(state) if state.is_well_formed() => {
                    layout.windows.insert(id, state);
                }
                Ok(_) => {
                    tracing::warn!(window = %id, "persisted window has no size; using default");
                }
                Err(err) => {
                    tracing::warn!(
                        window = %id,
                        error = %err,
                        "persisted window malformed; using default"
                    );
                }
            }
        }
        layout
    }
}

pub struct LayoutStateManager<S: KeyValueStore> {
    layout: WindowsLayout,
    store: S,
}

impl<S: KeyValueStore> LayoutStateManager<S> {
    pub fn load(store: S) -> Self {
        let raw = store.get(WINDOWS_LAYOUT_KEY);
        let layout = WindowsLayout::hydrate(raw.as_deref());
        Self { layout, store }
    }

    pub fn layout(&self) -> &WindowsLayout {
        &self.layout
    }

    pub fn window(&self, id: WindowIdentifier) -> WindowState {
        self.layout.window(id)
    }

    #[cfg(test)]
    pub(crate) fn store(&self) -> &S {
        &self.store
    }

    pub fn toggle(&mut self, id: WindowIdentifier) {
        let z_index = self.next_z_index();
        let window = self.layout.window_mut(id);
        window.is_open = !window.is_open;
        window.z_index = z_index;
        tracing::debug!(window = %id, open = window.is_open, z_index, "toggled window");
        self.persist();
    }

    pub fn close(&mut self, id: WindowIdentifier) {
        self.layout.window_mut(id).is_open = false;
        tracing::debug!(window = %id, "closed window");
        self.persist();
    }

    pub fn bring_to_front(&mut self, id: WindowIdentifier) {
        let z_index = self.next_z_index();
        self.layout.window_mut(id).z_index = z_index;
        tracing::trace!(window = %id, z_index, "raised window");
        self.persist();
    }

    /// Overwrite a window's geometry verbatim; nothing is checked against
    /// the viewport.
    pub fn update_position_size(
        &mut self,
        id: WindowIdentifier,
        x: i32,
        y: i32,
        width: u32,
        height: u32,
    ) {
        let window = self.layout.window_mut(id);
        window.x = x;
        window.y = y;
        window.width = width;
        window.height = height;
        tracing::debug!(window = %id, x, y, width, height, "updated window geometry");
        self.persist();
    }

    pub fn set_geometry(&mut self, id: WindowIdentifier, geometry: Geometry) {
        self.update_position_size(id, geometry.x, geometry.y, geometry.width, geometry.height);
    }

    /// Restore the compiled-in layout.
    pub fn reset(&mut self) {
        self.layout = WindowsLayout::default();
        tracing::info!("window layout reset to defaults");
        self.persist();
    }

    /// Open window drawn on top, if any. Equal z-indices resolve to the
    /// later identifier.
    pub fn active_window(&self) -> Option<WindowIdentifier> {
        self.open_windows().last().copied()
    }

    pub fn active_window_title(&self) -> &'static str {
        self.active_window()
            .map(WindowIdentifier::as_str)
            .unwrap_or(FALLBACK_WINDOW_TITLE)
    }

    /// Open windows from bottom to top.
    pub fn open_windows(&self) -> Vec<WindowIdentifier> {
        let mut open: Vec<(WindowIdentifier, u64)> = self
            .layout
            .iter()
            .filter(|(_, state)| state.is_open)
            .map(|(id, state)| (id, state.z_index))
            .collect();
        open.sort_by_key(|&(id, z_index)| (z_index, id));
        open.into_iter().map(|(id, _)| id).collect()
    }

    fn next_z_index(&self) -> u64 {
        self.layout.max_z_index().saturating_add(1)
    }

    fn persist(&mut self) {
        match self.layout.to_json() {
            Ok(json) => {
                if let Err(err) = self.store.set(WINDOWS_LAYOUT_KEY, json) {
                    tracing::warn!(error = %err, "failed to persist window layout");
                }
            }
            Err(err) => tracing::warn!(error = %err, "failed to encode window layout"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryKeyValueStore;

    fn manager() -> LayoutStateManager<MemoryKeyValueStore> {
        LayoutStateManager::load(MemoryKeyValueStore::new())
    }

    #[test]
    fn empty_storage_opens_only_about_at_default_geometry() {
        let m = manager();
        let about = m.window(WindowIdentifier::About);
        assert_eq!(about, WindowState::new(true, 100, 80, 800, 600, 1));
        assert!(!m.window(WindowIdentifier::Projects).is_open);
        assert!(!m.window(WindowIdentifier::Contact).is_open);
        assert_eq!(m.open_windows(), vec![WindowIdentifier::About]);
    }

    #[test]
    fn double_toggle_restores_open_flag_and_raises_twice() {
        for id in WindowIdentifier::ALL {
            let mut m = manager();
            let before = m.window(id);
            m.toggle(id);
            let first = m.window(id);
            m.toggle(id);
            let second = m.window(id);
            assert_eq!(second.is_open, before.is_open, "{id}");
            assert!(first.z_index > before.z_index, "{id}");
            assert!(second.z_index > first.z_index, "{id}");
        }
    }

    #[test]
    fn bring_to_front_leaves_open_state_and_geometry_alone() {
        let mut m = manager();
        m.update_position_size(WindowIdentifier::Contact, -40, 7, 640, 480);
        let before = m.window(WindowIdentifier::Contact);
        m.bring_to_front(WindowIdentifier::Contact);
        let after = m.window(WindowIdentifier::Contact);
        assert_eq!(after.is_open, before.is_open);
        assert_eq!(after.geometry(), before.geometry());
        assert!(after.z_index > before.z_index);
    }

    #[test]
    fn last_toggled_window_is_active() {
        let mut m = manager();
        m.toggle(WindowIdentifier::Projects);
        m.toggle(WindowIdentifier::Contact);
        let projects = m.window(WindowIdentifier::Projects);
        let contact = m.window(WindowIdentifier::Contact);
        assert!(projects.is_open && contact.is_open);
        assert!(contact.z_index > projects.z_index);
        assert_eq!(m.active_window_title(), "contact");
    }

    #[test]
    fn close_preserves_geometry_and_z_index() {
        let mut m = manager();
        let before = m.window(WindowIdentifier::About);
        m.close(WindowIdentifier::About);
        let after = m.window(WindowIdentifier::About);
        assert!(!after.is_open);
        assert_eq!(after.geometry(), before.geometry());
        assert_eq!(after.z_index, before.z_index);
        assert_eq!(m.active_window_title(), FALLBACK_WINDOW_TITLE);
    }

    #[test]
    fn every_mutation_is_written_through() {
        let mut m = manager();
        assert!(m.store().get(WINDOWS_LAYOUT_KEY).is_none());
        m.update_position_size(WindowIdentifier::About, 1, 2, 3, 4);
        let raw = m.store().get(WINDOWS_LAYOUT_KEY).unwrap();
        let persisted = WindowsLayout::parse(&raw).unwrap();
        assert_eq!(&persisted, m.layout());
        assert_eq!(
            persisted.window(WindowIdentifier::About).geometry(),
            Geometry::new(1, 2, 3, 4)
        );
    }

    #[test]
    fn serialization_round_trips() {
        let mut m = manager();
        m.toggle(WindowIdentifier::Projects);
        m.update_position_size(WindowIdentifier::Projects, -300, 5000, 1, 99_999);
        let layout = m.layout().clone();
        let json = layout.to_json().unwrap();
        assert_eq!(WindowsLayout::parse(&json).unwrap(), layout);
    }

    #[test]
    fn serialized_form_uses_camel_case_fields() {
        let json = WindowsLayout::default().to_json().unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["about"]["isOpen"], true);
        assert_eq!(value["about"]["zIndex"], 1);
        assert_eq!(value["contact"]["width"], 800);
    }

    #[test]
    fn unparseable_storage_yields_exact_defaults() {
        for raw in ["", "not json", "[1,2,3]", "42", "{\"about\": "] {
            let store = MemoryKeyValueStore::new().with_entry(WINDOWS_LAYOUT_KEY, raw);
            let m = LayoutStateManager::load(store);
            assert_eq!(m.layout(), &WindowsLayout::default(), "{raw:?}");
        }
    }

    #[test]
    fn malformed_entries_are_repaired_individually() {
        let raw = r#"{
            "about": {"isOpen": false, "x": 5, "y": 6, "width": 700, "height": 500, "zIndex": 9},
            "projects": {"isOpen": "yes"},
            "contact": {"isOpen": true, "x": 0, "y": 0, "width": 0, "height": 10, "zIndex": 2},
            "resume": {"isOpen": true, "x": 0, "y": 0, "width": 10, "height": 10, "zIndex": 3}
        }"#;
        let layout = WindowsLayout::hydrate(Some(raw));
        assert_eq!(
            layout.window(WindowIdentifier::About),
            WindowState::new(false, 5, 6, 700, 500, 9)
        );
        assert_eq!(
            layout.window(WindowIdentifier::Projects),
            WindowsLayout::default().window(WindowIdentifier::Projects)
        );
        assert_eq!(
            layout.window(WindowIdentifier::Contact),
            WindowsLayout::default().window(WindowIdentifier::Contact)
        );
        assert_eq!(layout.iter().count(), 3);
    }

    #[test]
    fn strict_parse_rejects_what_hydrate_repairs() {
        assert!(WindowsLayout::parse(r#"{"resume": {}}"#).is_err());
        let empty = r#"{"about": {"isOpen": true, "x": 0, "y": 0, "width": 0, "height": 1, "zIndex": 1}}"#;
        assert!(matches!(
            WindowsLayout::parse(empty),
            Err(LayoutError::EmptyWindow(WindowIdentifier::About))
        ));
    }

    #[test]
    fn reset_restores_defaults() {
        let mut m = manager();
        m.toggle(WindowIdentifier::Contact);
        m.close(WindowIdentifier::About);
        m.reset();
        assert_eq!(m.layout(), &WindowsLayout::default());
    }

    #[test]
    fn identifiers_parse_from_their_names() {
        for id in WindowIdentifier::ALL {
            assert_eq!(id.as_str().parse::<WindowIdentifier>(), Ok(id));
        }
        assert!("Finder".parse::<WindowIdentifier>().is_err());
    }
}
