pub mod decorator;
pub mod frame;
pub mod layout_state;

use ratatui::prelude::Rect;

pub use frame::{FrameEvent, FrameInteraction, WindowFrame};
pub use layout_state::{
    LayoutError, LayoutStateManager, WindowIdentifier, WindowState, WindowsLayout,
};

/// Signed cell rectangle: windows may hang off any edge of the desktop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FloatRect {
    pub x: i32,
    pub y: i32,
    pub width: u16,
    pub height: u16,
}

impl FloatRect {
    pub const fn new(x: i32, y: i32, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn contains(&self, column: u16, row: u16) -> bool {
        if self.width == 0 || self.height == 0 {
            return false;
        }
        let (col, row) = (i64::from(column), i64::from(row));
        let (x, y) = (i64::from(self.x), i64::from(self.y));
        col >= x && col < x + i64::from(self.width) && row >= y && row < y + i64::from(self.height)
    }

    /// Part of the rectangle that lies inside `bounds`, if any.
    pub fn visible_in(&self, bounds: Rect) -> Option<Rect> {
        let (x, y) = (i64::from(self.x), i64::from(self.y));
        let left = x.max(i64::from(bounds.x));
        let top = y.max(i64::from(bounds.y));
        let right = (x + i64::from(self.width)).min(i64::from(bounds.right()));
        let bottom = (y + i64::from(self.height)).min(i64::from(bounds.bottom()));
        if right <= left || bottom <= top {
            return None;
        }
        Some(Rect {
            x: left as u16,
            y: top as u16,
            width: (right - left) as u16,
            height: (bottom - top) as u16,
        })
    }
}

/// Cell coordinates produced by [`CellMetrics::to_cells`] stay within this
/// distance of the origin, far outside any terminal, so that adding a width
/// or subtracting a pointer column never leaves the `i32` range.
const CELL_COORD_LIMIT: i64 = 1 << 30;

/// Window position and size in logical pixels, as persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Geometry {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Geometry {
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Logical pixels covered by one terminal cell.
///
/// Geometry stays in pixels so layouts keep their meaning when the metrics
/// change; only rendering and pointer deltas go through this conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellMetrics {
    cell_width: u16,
    cell_height: u16,
}

impl Default for CellMetrics {
    fn default() -> Self {
        Self::new(
            crate::constants::DEFAULT_CELL_WIDTH,
            crate::constants::DEFAULT_CELL_HEIGHT,
        )
    }
}

impl CellMetrics {
    pub fn new(cell_width: u16, cell_height: u16) -> Self {
        Self {
            cell_width: cell_width.max(1),
            cell_height: cell_height.max(1),
        }
    }

    pub fn cell_width(&self) -> u16 {
        self.cell_width
    }

    pub fn cell_height(&self) -> u16 {
        self.cell_height
    }

    /// Cell rectangle for `geometry` on a desktop whose top-left cell is
    /// `origin`.
    pub fn to_cells(&self, geometry: Geometry, origin: Rect) -> FloatRect {
        let cw = self.cell_width as i64;
        let ch = self.cell_height as i64;
        let width = (geometry.width as i64 + cw - 1) / cw;
        let height = (geometry.height as i64 + ch - 1) / ch;
        let place = |origin: u16, px: i32, cell: i64| {
            (i64::from(origin) + i64::from(px).div_euclid(cell))
                .clamp(-CELL_COORD_LIMIT, CELL_COORD_LIMIT) as i32
        };
        FloatRect {
            x: place(origin.x, geometry.x, cw),
            y: place(origin.y, geometry.y, ch),
            width: width.clamp(1, u16::MAX as i64) as u16,
            height: height.clamp(1, u16::MAX as i64) as u16,
        }
    }

    /// Geometry covering exactly `area` on a desktop whose top-left cell is
    /// `origin`.
    pub fn to_geometry(&self, area: Rect, origin: Rect) -> Geometry {
        Geometry {
            x: self.columns_to_px(area.x as i32 - origin.x as i32),
            y: self.rows_to_px(area.y as i32 - origin.y as i32),
            width: (area.width as u32).saturating_mul(self.cell_width as u32),
            height: (area.height as u32).saturating_mul(self.cell_height as u32),
        }
    }

    pub fn columns_to_px(&self, columns: i32) -> i32 {
        columns.saturating_mul(self.cell_width as i32)
    }

    pub fn rows_to_px(&self, rows: i32) -> i32 {
        rows.saturating_mul(self.cell_height as i32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_window_maps_to_cells() {
        let metrics = CellMetrics::new(10, 20);
        let origin = Rect {
            x: 0,
            y: 1,
            width: 120,
            height: 40,
        };
        let rect = metrics.to_cells(Geometry::new(100, 80, 800, 600), origin);
        assert_eq!(
            rect,
            FloatRect {
                x: 10,
                y: 5,
                width: 80,
                height: 30
            }
        );
    }

    #[test]
    fn negative_positions_round_towards_negative_infinity() {
        let metrics = CellMetrics::new(10, 20);
        let rect = metrics.to_cells(Geometry::new(-15, -1, 95, 41), Rect::default());
        assert_eq!(rect.x, -2);
        assert_eq!(rect.y, -1);
        assert_eq!(rect.width, 10);
        assert_eq!(rect.height, 3);
    }

    #[test]
    fn visible_part_is_clipped_to_bounds() {
        let rect = FloatRect {
            x: -3,
            y: 2,
            width: 10,
            height: 4,
        };
        let bounds = Rect {
            x: 0,
            y: 1,
            width: 5,
            height: 3,
        };
        assert_eq!(
            rect.visible_in(bounds),
            Some(Rect {
                x: 0,
                y: 2,
                width: 5,
                height: 2
            })
        );
        assert!(rect.contains(0, 2));
        assert!(!rect.contains(7, 2));
    }

    #[test]
    fn extreme_positions_with_unit_cells_stay_far_off_screen() {
        let metrics = CellMetrics::new(1, 1);
        let desktop = Rect::new(0, 1, 120, 36);
        let low = metrics.to_cells(Geometry::new(i32::MIN, i32::MAX, 800, 600), desktop);
        assert!(low.x < 0 && low.y > 120);
        assert_eq!(low.visible_in(desktop), None);
        assert!(!low.contains(0, 1));

        let edge = FloatRect::new(i32::MAX, i32::MAX, u16::MAX, u16::MAX);
        assert_eq!(edge.visible_in(desktop), None);
        assert!(!edge.contains(u16::MAX, u16::MAX));
    }

    #[test]
    fn geometry_of_an_area_round_trips() {
        let metrics = CellMetrics::new(8, 16);
        let origin = Rect {
            x: 0,
            y: 1,
            width: 100,
            height: 30,
        };
        let area = Rect {
            x: 0,
            y: 1,
            width: 100,
            height: 30,
        };
        let geometry = metrics.to_geometry(area, origin);
        assert_eq!(geometry, Geometry::new(0, 0, 800, 480));
        let back = metrics.to_cells(geometry, origin);
        assert_eq!(back.visible_in(origin), Some(area));
    }
}
