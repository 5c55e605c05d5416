pub mod floating;

pub use floating::*;

use ratatui::prelude::Rect;

pub fn rect_contains(rect: Rect, column: u16, row: u16) -> bool {
    column >= rect.x
        && column < rect.x.saturating_add(rect.width)
        && row >= rect.y
        && row < rect.y.saturating_add(rect.height)
}

/// Split the screen into menu bar, desktop and dock rows.
pub fn desktop_areas(screen: Rect, menu_height: u16, dock_height: u16) -> (Rect, Rect, Rect) {
    let menu_height = menu_height.min(screen.height);
    let dock_height = dock_height.min(screen.height.saturating_sub(menu_height));
    let menu = Rect {
        height: menu_height,
        ..screen
    };
    let dock = Rect {
        y: screen.y + screen.height - dock_height,
        height: dock_height,
        ..screen
    };
    let desktop = Rect {
        y: screen.y + menu_height,
        height: screen.height - menu_height - dock_height,
        ..screen
    };
    (menu, desktop, dock)
}
