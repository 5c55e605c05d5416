use ratatui::prelude::Rect;
use ratatui::style::Style;

use crate::ui::UiFrame;
use crate::window::{FloatRect, Geometry};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeEdge {
    Left,
    Right,
    Top,
    Bottom,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl ResizeEdge {
    fn moves_left(self) -> bool {
        matches!(
            self,
            ResizeEdge::Left | ResizeEdge::TopLeft | ResizeEdge::BottomLeft
        )
    }

    fn moves_right(self) -> bool {
        matches!(
            self,
            ResizeEdge::Right | ResizeEdge::TopRight | ResizeEdge::BottomRight
        )
    }

    fn moves_top(self) -> bool {
        matches!(
            self,
            ResizeEdge::Top | ResizeEdge::TopLeft | ResizeEdge::TopRight
        )
    }

    fn moves_bottom(self) -> bool {
        matches!(
            self,
            ResizeEdge::Bottom | ResizeEdge::BottomLeft | ResizeEdge::BottomRight
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeHandle {
    pub rect: FloatRect,
    pub edge: ResizeEdge,
}

/// Border cells of a window that start a resize, corners first so they win
/// hit-testing over the edges they touch.
pub fn resize_handles(rect: FloatRect) -> Vec<ResizeHandle> {
    let mut handles = Vec::new();
    if rect.width == 0 || rect.height == 0 {
        return handles;
    }
    let right = rect.x + rect.width as i32 - 1;
    let bottom = rect.y + rect.height as i32 - 1;
    let cell = |x: i32, y: i32| FloatRect {
        x,
        y,
        width: 1,
        height: 1,
    };
    handles.push(ResizeHandle {
        rect: cell(rect.x, rect.y),
        edge: ResizeEdge::TopLeft,
    });
    handles.push(ResizeHandle {
        rect: cell(right, rect.y),
        edge: ResizeEdge::TopRight,
    });
    handles.push(ResizeHandle {
        rect: cell(rect.x, bottom),
        edge: ResizeEdge::BottomLeft,
    });
    handles.push(ResizeHandle {
        rect: cell(right, bottom),
        edge: ResizeEdge::BottomRight,
    });
    if rect.width > 2 {
        let inner_width = rect.width - 2;
        handles.push(ResizeHandle {
            rect: FloatRect {
                x: rect.x + 1,
                y: rect.y,
                width: inner_width,
                height: 1,
            },
            edge: ResizeEdge::Top,
        });
        handles.push(ResizeHandle {
            rect: FloatRect {
                x: rect.x + 1,
                y: bottom,
                width: inner_width,
                height: 1,
            },
            edge: ResizeEdge::Bottom,
        });
    }
    if rect.height > 2 {
        let inner_height = rect.height - 2;
        handles.push(ResizeHandle {
            rect: FloatRect {
                x: rect.x,
                y: rect.y + 1,
                width: 1,
                height: inner_height,
            },
            edge: ResizeEdge::Left,
        });
        handles.push(ResizeHandle {
            rect: FloatRect {
                x: right,
                y: rect.y + 1,
                width: 1,
                height: inner_height,
            },
            edge: ResizeEdge::Right,
        });
    }
    handles
}

pub fn resize_edge_at(rect: FloatRect, column: u16, row: u16) -> Option<ResizeEdge> {
    resize_handles(rect)
        .into_iter()
        .find(|handle| handle.rect.contains(column, row))
        .map(|handle| handle.edge)
}

/// Header row between the side borders; the row a drag starts from.
pub fn header_handle(rect: FloatRect) -> Option<FloatRect> {
    if rect.width < 3 || rect.height < 3 {
        return None;
    }
    Some(FloatRect {
        x: rect.x + 1,
        y: rect.y + 1,
        width: rect.width - 2,
        height: 1,
    })
}

pub fn apply_move(start: Geometry, dx: i32, dy: i32) -> Geometry {
    Geometry {
        x: start.x.saturating_add(dx),
        y: start.y.saturating_add(dy),
        ..start
    }
}

/// Resize `start` by a pointer delta in pixels on the given edge.
///
/// Width and height never drop below the minimum; when an edge that moves
/// the origin hits the minimum, the opposite edge stays put. Nothing is
/// clamped to the viewport.
pub fn apply_resize(
    start: Geometry,
    edge: ResizeEdge,
    dx: i32,
    dy: i32,
    min_width: u32,
    min_height: u32,
) -> Geometry {
    let mut x = start.x as i64;
    let mut y = start.y as i64;
    let mut width = start.width as i64;
    let mut height = start.height as i64;
    let (dx, dy) = (dx as i64, dy as i64);

    if edge.moves_left() {
        x += dx;
        width -= dx;
    } else if edge.moves_right() {
        width += dx;
    }
    if edge.moves_top() {
        y += dy;
        height -= dy;
    } else if edge.moves_bottom() {
        height += dy;
    }

    let min_w = min_width.max(1) as i64;
    let min_h = min_height.max(1) as i64;
    if width < min_w {
        if edge.moves_left() {
            x -= min_w - width;
        }
        width = min_w;
    }
    if height < min_h {
        if edge.moves_top() {
            y -= min_h - height;
        }
        height = min_h;
    }

    Geometry {
        x: x.clamp(i32::MIN as i64, i32::MAX as i64) as i32,
        y: y.clamp(i32::MIN as i64, i32::MAX as i64) as i32,
        width: width.min(u32::MAX as i64) as u32,
        height: height.min(u32::MAX as i64) as u32,
    }
}

/// Double-line outline showing where a dragged or resized window will land.
pub fn render_resize_outline(frame: &mut UiFrame<'_>, rect: FloatRect, bounds: Rect, style: Style) {
    if rect.width < 2 || rect.height < 2 {
        return;
    }
    let Some(visible) = rect.visible_in(bounds) else {
        return;
    };
    let right = rect.x + rect.width as i32 - 1;
    let bottom = rect.y + rect.height as i32 - 1;
    let buffer = frame.buffer_mut();
    for y in visible.y..visible.y + visible.height {
        for x in visible.x..visible.x + visible.width {
            let (cx, cy) = (x as i32, y as i32);
            let on_left = cx == rect.x;
            let on_right = cx == right;
            let on_top = cy == rect.y;
            let on_bottom = cy == bottom;
            let symbol = match (on_left, on_right, on_top, on_bottom) {
                (true, _, true, _) => "╔",
                (_, true, true, _) => "╗",
                (true, _, _, true) => "╚",
                (_, true, _, true) => "╝",
                (_, _, true, _) | (_, _, _, true) => "═",
                (true, _, _, _) | (_, true, _, _) => "║",
                _ => continue,
            };
            if let Some(cell) = buffer.cell_mut((x, y)) {
                cell.set_symbol(symbol);
                cell.set_style(style);
            }
        }
    }
}
