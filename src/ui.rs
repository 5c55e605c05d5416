//! Clipped drawing surface shared by the desktop chrome and window contents.
//!
//! Window geometry is persisted in pixels and may put a window partly off
//! screen, so every draw call here is clamped to the frame area instead of
//! trusting the caller's rectangle.

use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::Widget;

use crate::window::FloatRect;

pub struct UiFrame<'a> {
    area: Rect,
    buffer: &'a mut Buffer,
}

impl<'a> UiFrame<'a> {
    pub fn new(frame: &'a mut Frame<'_>) -> Self {
        let area = frame.area();
        let buffer = frame.buffer_mut();
        Self { area, buffer }
    }

    /// Draw into `buffer` restricted to `area`; used for offscreen windows
    /// and for the desktop region between the menu bar and the dock.
    pub fn from_parts(area: Rect, buffer: &'a mut Buffer) -> Self {
        Self { area, buffer }
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    pub fn buffer_mut(&mut self) -> &mut Buffer {
        self.buffer
    }

    fn clip_rect(&self, rect: Rect) -> Option<Rect> {
        let clipped = rect.intersection(self.area);
        (clipped.width > 0 && clipped.height > 0).then_some(clipped)
    }

    pub fn render_widget<W: Widget>(&mut self, widget: W, area: Rect) {
        if let Some(clipped) = self.clip_rect(area) {
            widget.render(clipped, self.buffer);
        }
    }

    /// Paint every visible cell of `area` blank in `style`.
    pub fn fill(&mut self, area: Rect, style: Style) {
        let Some(clipped) = self.clip_rect(area) else {
            return;
        };
        for y in clipped.top()..clipped.bottom() {
            for x in clipped.left()..clipped.right() {
                if let Some(cell) = self.buffer.cell_mut((x, y)) {
                    cell.reset();
                    cell.set_symbol(" ");
                    cell.set_style(style);
                }
            }
        }
    }

    /// Copy `src` (anchored at 0,0) to `dest`, which may start at negative
    /// coordinates or hang past the frame edge.
    pub fn blit_from_signed(&mut self, src: &Buffer, dest: FloatRect) {
        let Some(visible) = dest.visible_in(self.area) else {
            return;
        };
        let (ox, oy) = (i64::from(dest.x), i64::from(dest.y));
        for dy in visible.top()..visible.bottom() {
            let sy = i64::from(dy) - oy;
            for dx in visible.left()..visible.right() {
                let sx = i64::from(dx) - ox;
                if let (Some(src_cell), Some(dst_cell)) = (
                    src.cell((sx as u16, sy as u16)),
                    self.buffer.cell_mut((dx, dy)),
                ) {
                    *dst_cell = src_cell.clone();
                }
            }
        }
    }
}

/// `Buffer::set_string` that silently drops anything outside `bounds`.
pub(crate) fn safe_set_string(
    buffer: &mut Buffer,
    bounds: Rect,
    x: u16,
    y: u16,
    text: &str,
    style: Style,
) {
    if x < bounds.left() || x >= bounds.right() || y < bounds.top() || y >= bounds.bottom() {
        return;
    }
    let available = bounds.right() - x;
    buffer.set_string(x, y, truncate_to_width(text, available as usize), style);
}

pub(crate) fn truncate_to_width(value: &str, width: usize) -> String {
    value.chars().take(width).collect()
}
