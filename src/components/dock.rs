use crossterm::event::{Event, MouseEventKind};
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};

use crate::components::{Component, ComponentContext};
use crate::layout::rect_contains;
use crate::ui::{UiFrame, safe_set_string};
use crate::window::WindowIdentifier;

#[derive(Debug, Clone, Copy)]
struct DockHit {
    id: WindowIdentifier,
    rect: Rect,
}

/// Launcher row at the bottom of the screen: one item per window, with a
/// dot under the ones that are open.
#[derive(Debug, Default)]
pub struct Dock {
    open: Vec<WindowIdentifier>,
    active: Option<WindowIdentifier>,
    hits: Vec<DockHit>,
}

impl Dock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_open(&mut self, open: Vec<WindowIdentifier>) {
        self.open = open;
    }

    pub fn set_active(&mut self, active: Option<WindowIdentifier>) {
        self.active = active;
    }

    fn item_label(id: WindowIdentifier) -> String {
        format!(" F{} {} ", id_key(id), id.label())
    }

    pub fn hit_test(&self, event: &Event) -> Option<WindowIdentifier> {
        let Event::Mouse(mouse) = event else {
            return None;
        };
        if !matches!(mouse.kind, MouseEventKind::Down(_)) {
            return None;
        }
        self.hits
            .iter()
            .find(|hit| rect_contains(hit.rect, mouse.column, mouse.row))
            .map(|hit| hit.id)
    }
}

/// Function key that toggles `id`.
pub fn id_key(id: WindowIdentifier) -> u8 {
    match id {
        WindowIdentifier::About => 1,
        WindowIdentifier::Projects => 2,
        WindowIdentifier::Contact => 3,
    }
}

impl Component for Dock {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, ctx: &ComponentContext) {
        self.hits.clear();
        if area.width == 0 || area.height == 0 {
            return;
        }
        let palette = ctx.palette();
        let style = Style::default().bg(palette.dock_bg).fg(palette.dock_fg);
        let buffer = frame.buffer_mut();
        let bounds = area.intersection(buffer.area);
        if bounds.width == 0 || bounds.height == 0 {
            return;
        }
        buffer.set_style(bounds, style);

        let labels: Vec<(WindowIdentifier, String)> = WindowIdentifier::ALL
            .into_iter()
            .map(|id| (id, Self::item_label(id)))
            .collect();
        let gap = 2u16;
        let total: u16 = labels
            .iter()
            .map(|(_, label)| label.chars().count() as u16)
            .sum::<u16>()
            + gap * (labels.len() as u16).saturating_sub(1);
        let label_row = area.y + area.height.min(3) / 2;
        let indicator_row = label_row + 1;
        let mut x = area.x + area.width.saturating_sub(total) / 2;

        for (id, label) in labels {
            let width = label.chars().count() as u16;
            let is_open = self.open.contains(&id);
            let item_style = if self.active == Some(id) {
                style
                    .bg(palette.selected_bg)
                    .add_modifier(Modifier::BOLD)
            } else if is_open {
                style.add_modifier(Modifier::BOLD)
            } else {
                style
            };
            safe_set_string(buffer, bounds, x, label_row, &label, item_style);
            if is_open && indicator_row < area.y + area.height {
                let dot_x = x + width / 2;
                safe_set_string(
                    buffer,
                    bounds,
                    dot_x,
                    indicator_row,
                    "•",
                    style.fg(palette.dock_indicator),
                );
            }
            let hit = Rect {
                x,
                y: area.y,
                width,
                height: area.height,
            }
            .intersection(bounds);
            if hit.width > 0 {
                self.hits.push(DockHit { id, rect: hit });
            }
            x = x.saturating_add(width + gap);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyModifiers, MouseButton, MouseEvent};
    use ratatui::buffer::Buffer;

    fn event(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    fn rendered(dock: &mut Dock, area: Rect) -> Buffer {
        let mut buffer = Buffer::empty(area);
        let mut frame = UiFrame::from_parts(area, &mut buffer);
        dock.render(&mut frame, area, &ComponentContext::default());
        buffer
    }

    fn row(buffer: &Buffer, y: u16) -> String {
        (0..buffer.area.width)
            .map(|x| buffer.cell((x, y)).unwrap().symbol().to_string())
            .collect()
    }

    #[test]
    fn every_window_is_clickable() {
        let mut dock = Dock::new();
        let area = Rect::new(0, 10, 60, 3);
        let buffer = rendered(&mut dock, area);
        let labels = row(&buffer, 11);
        for id in WindowIdentifier::ALL {
            let col = labels.find(id.label()).unwrap() as u16;
            let down = event(MouseEventKind::Down(MouseButton::Left), col, 12);
            assert_eq!(dock.hit_test(&down), Some(id));
        }
        assert_eq!(
            dock.hit_test(&event(MouseEventKind::Down(MouseButton::Left), 0, 11)),
            None
        );
        assert_eq!(
            dock.hit_test(&event(MouseEventKind::Up(MouseButton::Left), 20, 11)),
            None
        );
    }

    #[test]
    fn open_windows_get_an_indicator() {
        let mut dock = Dock::new();
        dock.set_open(vec![WindowIdentifier::Projects]);
        let buffer = rendered(&mut dock, Rect::new(0, 0, 60, 3));
        let labels = row(&buffer, 1);
        let indicators = row(&buffer, 2);
        let start = labels.find("F2 Projects").unwrap();
        let dot = indicators.find('•').unwrap();
        assert!(dot >= start && dot < start + " F2 Projects ".len());
        assert_eq!(indicators.matches('•').count(), 1);
    }
}
