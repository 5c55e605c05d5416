use std::time::{Duration, Instant};

use crossterm::event::{Event, MouseEventKind};
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};

use crate::components::{Component, ComponentContext};
use crate::constants::CLOCK_REFRESH_INTERVAL;
use crate::layout::rect_contains;
use crate::ui::{UiFrame, safe_set_string, truncate_to_width};

/// Wall clock text that only re-reads the time once per refresh interval.
#[derive(Debug)]
pub struct Clock {
    text: String,
    refreshed_at: Option<Instant>,
    interval: Duration,
}

impl Clock {
    pub fn new(interval: Duration) -> Self {
        Self {
            text: String::new(),
            refreshed_at: None,
            interval,
        }
    }

    /// Re-read the time through `read` when the interval elapsed. Returns
    /// whether the text was refreshed.
    pub fn tick_with(&mut self, now: Instant, read: impl FnOnce() -> String) -> bool {
        let due = self
            .refreshed_at
            .is_none_or(|at| now.saturating_duration_since(at) >= self.interval);
        if due {
            self.text = read();
            self.refreshed_at = Some(now);
        }
        due
    }

    pub fn tick(&mut self, now: Instant) -> bool {
        self.tick_with(now, || chrono::Local::now().format("%H:%M").to_string())
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Top bar: active window title on the left, clock and the dark-mode
/// toggle on the right.
#[derive(Debug)]
pub struct MenuBar {
    title: String,
    dark_mode: bool,
    clock: Clock,
    toggle_rect: Option<Rect>,
}

impl MenuBar {
    pub fn new() -> Self {
        Self {
            title: String::new(),
            dark_mode: false,
            clock: Clock::new(CLOCK_REFRESH_INTERVAL),
            toggle_rect: None,
        }
    }

    /// Set the title from a window identifier string, capitalizing it.
    pub fn set_title(&mut self, title: &str) {
        self.title = capitalize(title);
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_dark_mode(&mut self, dark_mode: bool) {
        self.dark_mode = dark_mode;
    }

    pub fn clock_mut(&mut self) -> &mut Clock {
        &mut self.clock
    }

    fn toggle_label(&self) -> &'static str {
        if self.dark_mode { "[☾ dark]" } else { "[☀ light]" }
    }

    pub fn hit_test_dark_mode(&self, event: &Event) -> bool {
        let Event::Mouse(mouse) = event else {
            return false;
        };
        if !matches!(mouse.kind, MouseEventKind::Down(_)) {
            return false;
        }
        self.toggle_rect
            .is_some_and(|rect| rect_contains(rect, mouse.column, mouse.row))
    }
}

impl Default for MenuBar {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for MenuBar {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, ctx: &ComponentContext) {
        self.toggle_rect = None;
        if area.height == 0 || area.width == 0 {
            return;
        }
        let palette = ctx.palette();
        let style = Style::default().bg(palette.menu_bg).fg(palette.menu_fg);
        let buffer = frame.buffer_mut();
        let bounds = area.intersection(buffer.area);
        if bounds.width == 0 || bounds.height == 0 {
            return;
        }
        buffer.set_style(Rect { height: 1, ..bounds }, style);

        let (x, y) = (area.x, area.y);
        let width = area.width as usize;
        let right = format!("{}  {} ", self.clock.text(), self.toggle_label());
        let right_width = right.chars().count();
        let left_room = width.saturating_sub(right_width + 1);

        let left = truncate_to_width(&format!(" {}", self.title), left_room);
        safe_set_string(buffer, bounds, x, y, &left, style.add_modifier(Modifier::BOLD));

        if right_width < width {
            let start_x = x + (width - right_width) as u16;
            safe_set_string(buffer, bounds, start_x, y, &right, style);
            let label_width = self.toggle_label().chars().count() as u16;
            self.toggle_rect = Some(Rect {
                x: start_x + (right_width as u16 - 1 - label_width),
                y,
                width: label_width,
                height: 1,
            });
        }
    }
}

pub fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyModifiers, MouseButton, MouseEvent};
    use ratatui::buffer::Buffer;

    fn click(column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    fn row_text(buffer: &Buffer, y: u16) -> String {
        (0..buffer.area.width)
            .map(|x| buffer.cell((x, y)).unwrap().symbol().to_string())
            .collect()
    }

    #[test]
    fn title_is_capitalized() {
        let mut bar = MenuBar::new();
        bar.set_title("contact");
        assert_eq!(bar.title(), "Contact");
        bar.set_title("Portfolio");
        assert_eq!(bar.title(), "Portfolio");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn clock_refreshes_only_after_interval() {
        let mut clock = Clock::new(Duration::from_secs(10));
        let start = Instant::now();
        assert!(clock.tick_with(start, || "09:00".into()));
        assert!(!clock.tick_with(start + Duration::from_secs(9), || "09:01".into()));
        assert_eq!(clock.text(), "09:00");
        assert!(clock.tick_with(start + Duration::from_secs(10), || "09:01".into()));
        assert_eq!(clock.text(), "09:01");
    }

    #[test]
    fn renders_title_clock_and_clickable_toggle() {
        let mut bar = MenuBar::new();
        bar.set_title("projects");
        bar.clock_mut().tick_with(Instant::now(), || "12:34".into());
        let area = Rect::new(0, 0, 60, 1);
        let mut buffer = Buffer::empty(area);
        let mut frame = UiFrame::from_parts(area, &mut buffer);
        bar.render(&mut frame, area, &ComponentContext::default());

        let row = row_text(&buffer, 0);
        assert!(row.starts_with(" Projects"));
        assert!(row.contains("12:34"));
        assert!(row.trim_end().ends_with("[☀ light]"));

        let label_start = row.find('[').map(|i| row[..i].chars().count()).unwrap() as u16;
        assert!(bar.hit_test_dark_mode(&click(label_start, 0)));
        assert!(!bar.hit_test_dark_mode(&click(2, 0)));
    }
}
