//! Shared component rendering context
//!
//! `ComponentContext` carries UI metadata that components may need during
//! rendering and event handling: focus and the active palette. Components
//! never reach for global theme state.

use crate::theme::Palette;

#[derive(Debug, Clone, Copy)]
pub struct ComponentContext {
    focused: bool,
    palette: Palette,
}

impl ComponentContext {
    pub const fn new(focused: bool, palette: Palette) -> Self {
        Self { focused, palette }
    }

    pub const fn focused(&self) -> bool {
        self.focused
    }

    pub const fn palette(&self) -> &Palette {
        &self.palette
    }
}

impl Default for ComponentContext {
    fn default() -> Self {
        Self::new(false, Palette::default())
    }
}
