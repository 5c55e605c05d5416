use ratatui::prelude::Rect;
use ratatui::style::{Modifier, Style};

use crate::theme::{self, Palette};
use crate::ui::{UiFrame, safe_set_string};
use crate::window::FloatRect;

/// What a press on the window chrome asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderAction {
    Close,
    Minimize,
    Maximize,
    Drag,
}

pub trait WindowDecorator: std::fmt::Debug {
    /// Draw border and header into `rect`, usually the whole offscreen
    /// buffer of one window.
    fn render_window(
        &self,
        frame: &mut UiFrame<'_>,
        rect: Rect,
        title: &str,
        focused: bool,
        palette: &Palette,
    );

    /// Area left for window content inside `rect`.
    fn content_area(&self, rect: Rect) -> Rect;

    fn header_action(&self, rect: FloatRect, column: u16, row: u16) -> Option<HeaderAction>;
}

/// Rounded border with a header row carrying three "traffic light" buttons
/// on the left and a centered title.
#[derive(Debug, Default)]
pub struct TrafficLightDecorator;

const BUTTON_OFFSETS: [(i32, HeaderAction); 3] = [
    (2, HeaderAction::Close),
    (4, HeaderAction::Minimize),
    (6, HeaderAction::Maximize),
];

impl TrafficLightDecorator {
    fn button_color(action: HeaderAction) -> ratatui::style::Color {
        match action {
            HeaderAction::Close => theme::traffic_red(),
            HeaderAction::Minimize => theme::traffic_yellow(),
            HeaderAction::Maximize | HeaderAction::Drag => theme::traffic_green(),
        }
    }
}

impl WindowDecorator for TrafficLightDecorator {
    fn render_window(
        &self,
        frame: &mut UiFrame<'_>,
        rect: Rect,
        title: &str,
        focused: bool,
        palette: &Palette,
    ) {
        if rect.width < 2 || rect.height < 2 {
            return;
        }
        let bounds = frame.area();
        let buffer = frame.buffer_mut();
        let border_style = Style::default().fg(palette.border).bg(palette.window_bg);
        let header_bg = if focused {
            palette.header_bg
        } else {
            palette.header_inactive_bg
        };
        let header_style = Style::default().bg(header_bg).fg(palette.header_fg);

        let left = rect.x;
        let top = rect.y;
        let right = rect.x + rect.width - 1;
        let bottom = rect.y + rect.height - 1;

        for x in left..=right {
            let (top_symbol, bottom_symbol) = if x == left {
                ("╭", "╰")
            } else if x == right {
                ("╮", "╯")
            } else {
                ("─", "─")
            };
            if let Some(cell) = buffer.cell_mut((x, top)) {
                cell.set_symbol(top_symbol);
                cell.set_style(border_style);
            }
            if let Some(cell) = buffer.cell_mut((x, bottom)) {
                cell.set_symbol(bottom_symbol);
                cell.set_style(border_style);
            }
        }
        for y in top + 1..bottom {
            for x in [left, right] {
                if let Some(cell) = buffer.cell_mut((x, y)) {
                    cell.set_symbol("│");
                    cell.set_style(border_style);
                }
            }
        }

        let header_y = top + 1;
        if header_y >= bottom {
            return;
        }
        for x in left + 1..right {
            if let Some(cell) = buffer.cell_mut((x, header_y)) {
                cell.set_symbol(" ");
                cell.set_style(header_style);
            }
        }
        for (offset, action) in BUTTON_OFFSETS {
            let x = left + offset as u16;
            if x < right {
                let style = header_style.fg(Self::button_color(action));
                safe_set_string(buffer, bounds, x, header_y, "●", style);
            }
        }

        let header_width = rect.width.saturating_sub(2);
        let title_width = title.chars().count() as u16;
        // Keep the title clear of the buttons.
        let reserved = 8;
        if title_width + reserved <= header_width {
            let start = left + 1 + (header_width - title_width) / 2;
            let start = start.max(left + 1 + reserved);
            let style = if focused {
                header_style.add_modifier(Modifier::BOLD)
            } else {
                header_style
            };
            safe_set_string(buffer, bounds, start, header_y, title, style);
        }
    }

    fn content_area(&self, rect: Rect) -> Rect {
        Rect {
            x: rect.x.saturating_add(1),
            y: rect.y.saturating_add(2),
            width: rect.width.saturating_sub(2),
            height: rect.height.saturating_sub(3),
        }
    }

    fn header_action(&self, rect: FloatRect, column: u16, row: u16) -> Option<HeaderAction> {
        let header = crate::layout::header_handle(rect)?;
        if !header.contains(column, row) {
            return None;
        }
        let offset = column as i32 - rect.x;
        let right = rect.width as i32 - 1;
        BUTTON_OFFSETS
            .iter()
            .find(|(button, _)| *button == offset && *button < right)
            .map(|(_, action)| *action)
            .or(Some(HeaderAction::Drag))
    }
}
