use crossterm::event::{Event, KeyCode, KeyEvent, MouseEventKind};
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Text};
use ratatui::widgets::{Paragraph, Wrap};

use crate::components::{Component, ComponentContext};
use crate::ui::UiFrame;

const WHEEL_STEP: usize = 3;

/// Scrollable, wrapped text with a one-column scrollbar when it overflows.
#[derive(Debug)]
pub struct TextViewComponent {
    text: Text<'static>,
    offset: usize,
    view: usize,
    total: usize,
    content_width: u16,
}

impl Component for TextViewComponent {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, ctx: &ComponentContext) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let view = area.height as usize;
        let mut content_width = area.width;
        let mut total = compute_display_lines(&self.text, content_width);
        let scrollbar = total > view && content_width > 1;
        if scrollbar {
            content_width -= 1;
            total = compute_display_lines(&self.text, content_width);
        }
        self.view = view;
        self.total = total;
        self.content_width = content_width;
        self.offset = self.offset.min(self.max_offset());

        let paragraph = Paragraph::new(self.text.clone())
            .style(ctx.palette().window_style())
            .wrap(Wrap { trim: false })
            .scroll((self.offset.min(u16::MAX as usize) as u16, 0));
        frame.render_widget(
            paragraph,
            Rect {
                width: content_width,
                ..area
            },
        );
        if scrollbar {
            let track = Rect {
                x: area.x + content_width,
                width: 1,
                ..area
            };
            render_scrollbar(frame, track, self.offset, total, view, ctx);
        }
    }

    fn handle_event(&mut self, event: &Event, _ctx: &ComponentContext) -> bool {
        match event {
            Event::Key(key) => self.handle_key_event(key),
            Event::Mouse(mouse) => match mouse.kind {
                MouseEventKind::ScrollUp => {
                    self.scroll_by(-(WHEEL_STEP as isize));
                    true
                }
                MouseEventKind::ScrollDown => {
                    self.scroll_by(WHEEL_STEP as isize);
                    true
                }
                _ => false,
            },
            _ => false,
        }
    }
}

impl TextViewComponent {
    pub fn new() -> Self {
        Self {
            text: Text::from(vec![Line::from(String::new())]),
            offset: 0,
            view: 0,
            total: 0,
            content_width: 0,
        }
    }

    pub fn set_text(&mut self, text: Text<'static>) {
        self.text = text;
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Set the first visible display line. Clamped on the next render, once
    /// the wrapped height is known.
    pub fn set_offset(&mut self, offset: usize) {
        self.offset = offset;
        if self.total > 0 {
            self.offset = self.offset.min(self.max_offset());
        }
    }

    pub fn view(&self) -> usize {
        self.view
    }

    fn max_offset(&self) -> usize {
        self.total.saturating_sub(self.view)
    }

    pub fn scroll_by(&mut self, delta: isize) {
        let next = if delta.is_negative() {
            self.offset.saturating_sub(delta.unsigned_abs())
        } else {
            self.offset.saturating_add(delta as usize)
        };
        self.set_offset(next);
    }

    /// Scroll the least amount that makes display lines `start..end` visible.
    pub fn ensure_visible(&mut self, start: usize, end: usize) {
        if self.view == 0 {
            return;
        }
        if start < self.offset {
            self.offset = start;
        } else if end > self.offset + self.view {
            self.offset = end.saturating_sub(self.view).min(start);
        }
    }

    /// Display rows covered by logical lines `start..end` at the last
    /// rendered width.
    pub fn display_range(&self, start: usize, end: usize) -> (usize, usize) {
        let width = self.content_width.max(1);
        let heights = self.text.lines.iter().map(|line| display_height(line, width));
        let first: usize = heights.clone().take(start).sum();
        let span: usize = heights.skip(start).take(end.saturating_sub(start)).sum();
        (first, first + span)
    }

    /// Logical line shown on visible row `row` (0 = top of the view).
    pub fn line_at(&self, row: usize) -> Option<usize> {
        let target = self.offset + row;
        let width = self.content_width.max(1);
        let mut seen = 0;
        for (idx, line) in self.text.lines.iter().enumerate() {
            seen += display_height(line, width);
            if target < seen {
                return Some(idx);
            }
        }
        None
    }

    pub fn handle_key_event(&mut self, key: &KeyEvent) -> bool {
        let page = self.view.max(1) as isize;
        match key.code {
            KeyCode::Up => self.scroll_by(-1),
            KeyCode::Down => self.scroll_by(1),
            KeyCode::PageUp => self.scroll_by(-page),
            KeyCode::PageDown => self.scroll_by(page),
            KeyCode::Home => self.set_offset(0),
            KeyCode::End => self.set_offset(usize::MAX),
            _ => return false,
        }
        true
    }

    pub fn rendered_lines(&self) -> Vec<String> {
        self.text
            .lines
            .iter()
            .map(|line| {
                line.spans
                    .iter()
                    .map(|span| span.content.to_string())
                    .collect::<String>()
            })
            .collect()
    }
}

impl Default for TextViewComponent {
    fn default() -> Self {
        Self::new()
    }
}

pub fn compute_display_lines(text: &Text<'_>, width: u16) -> usize {
    text.lines
        .iter()
        .map(|line| display_height(line, width))
        .sum::<usize>()
        .max(1)
}

pub fn display_height(line: &Line<'_>, width: u16) -> usize {
    let usable = width.max(1) as usize;
    let w = line.width();
    if w == 0 { 1 } else { w.div_ceil(usable) }
}

fn render_scrollbar(
    frame: &mut UiFrame<'_>,
    track: Rect,
    offset: usize,
    total: usize,
    view: usize,
    ctx: &ComponentContext,
) {
    let height = track.height as usize;
    if height == 0 || total == 0 {
        return;
    }
    let thumb_len = (view * height / total).clamp(1, height);
    let max_offset = total.saturating_sub(view).max(1);
    let thumb_start = (offset * (height - thumb_len)) / max_offset;
    let palette = ctx.palette();
    let buffer = frame.buffer_mut();
    for i in 0..height {
        let y = track.y + i as u16;
        let in_thumb = i >= thumb_start && i < thumb_start + thumb_len;
        if let Some(cell) = buffer.cell_mut((track.x, y)) {
            cell.set_symbol(if in_thumb { "█" } else { "│" });
            cell.set_style(Style::default().fg(palette.border).bg(palette.window_bg));
        }
    }
}
