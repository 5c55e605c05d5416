//! Per-window chrome and pointer interaction.
//!
//! A `WindowFrame` never owns layout. It is handed the committed geometry
//! each frame, keeps a transient preview while the pointer drags its header
//! or border, and reports the finished geometry as a [`FrameEvent`].

use crossterm::event::{Event, MouseButton, MouseEvent, MouseEventKind};
use ratatui::buffer::Buffer;
use ratatui::prelude::Rect;
use ratatui::style::Style;

use super::decorator::{HeaderAction, WindowDecorator};
use super::{CellMetrics, FloatRect, Geometry, WindowIdentifier};
use crate::components::{Component, ComponentContext};
use crate::constants::{MIN_WINDOW_HEIGHT, MIN_WINDOW_WIDTH};
use crate::layout::{ResizeEdge, apply_move, apply_resize, render_resize_outline, resize_edge_at};
use crate::theme;
use crate::ui::UiFrame;

/// Offscreen buffers are capped so absurd persisted sizes stay cheap.
const MAX_OFFSCREEN_CELLS: u16 = 512;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameEvent {
    /// Pointer pressed anywhere on the window.
    Pressed,
    Close,
    Minimize,
    Maximize,
    Moved(Geometry),
    Resized(Geometry),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FrameInteraction {
    #[default]
    Idle,
    Dragging {
        start: Geometry,
        start_col: u16,
        start_row: u16,
        preview: Geometry,
    },
    Resizing {
        edge: ResizeEdge,
        start: Geometry,
        start_col: u16,
        start_row: u16,
        preview: Geometry,
    },
}

/// Where a window currently sits: committed geometry and the desktop it is
/// mapped onto.
#[derive(Debug, Clone, Copy)]
pub struct FramePlacement {
    pub geometry: Geometry,
    pub desktop: Rect,
    pub metrics: CellMetrics,
}

impl FramePlacement {
    pub fn rect(&self) -> FloatRect {
        self.metrics.to_cells(self.geometry, self.desktop)
    }
}

#[derive(Debug)]
pub struct WindowFrame {
    id: WindowIdentifier,
    interaction: FrameInteraction,
}

impl WindowFrame {
    pub fn new(id: WindowIdentifier) -> Self {
        Self {
            id,
            interaction: FrameInteraction::Idle,
        }
    }

    pub fn is_interacting(&self) -> bool {
        self.interaction != FrameInteraction::Idle
    }

    /// Geometry to draw: the preview while interacting, else `committed`.
    pub fn display_geometry(&self, committed: Geometry) -> Geometry {
        match self.interaction {
            FrameInteraction::Idle => committed,
            FrameInteraction::Dragging { preview, .. }
            | FrameInteraction::Resizing { preview, .. } => preview,
        }
    }

    /// Handle a press on this window. The caller has already decided the
    /// window is the topmost one under the pointer.
    pub fn press(
        &mut self,
        mouse: &MouseEvent,
        placement: &FramePlacement,
        decorator: &dyn WindowDecorator,
    ) -> FrameEvent {
        let rect = placement.rect();
        let (column, row) = (mouse.column, mouse.row);
        if let Some(edge) = resize_edge_at(rect, column, row) {
            self.interaction = FrameInteraction::Resizing {
                edge,
                start: placement.geometry,
                start_col: column,
                start_row: row,
                preview: placement.geometry,
            };
            return FrameEvent::Pressed;
        }
        match decorator.header_action(rect, column, row) {
            Some(HeaderAction::Close) => FrameEvent::Close,
            Some(HeaderAction::Minimize) => FrameEvent::Minimize,
            Some(HeaderAction::Maximize) => FrameEvent::Maximize,
            Some(HeaderAction::Drag) => {
                self.interaction = FrameInteraction::Dragging {
                    start: placement.geometry,
                    start_col: column,
                    start_row: row,
                    preview: placement.geometry,
                };
                FrameEvent::Pressed
            }
            None => FrameEvent::Pressed,
        }
    }

    /// Continue or finish an interaction started by [`WindowFrame::press`].
    /// Returns the committed geometry on release when it changed.
    pub fn track(&mut self, mouse: &MouseEvent, metrics: CellMetrics) -> Option<FrameEvent> {
        match mouse.kind {
            MouseEventKind::Drag(MouseButton::Left) => {
                self.update_preview(mouse.column, mouse.row, metrics);
                None
            }
            MouseEventKind::Up(_) => {
                self.update_preview(mouse.column, mouse.row, metrics);
                let finished = std::mem::take(&mut self.interaction);
                match finished {
                    FrameInteraction::Dragging { start, preview, .. } if preview != start => {
                        Some(FrameEvent::Moved(preview))
                    }
                    FrameInteraction::Resizing { start, preview, .. } if preview != start => {
                        Some(FrameEvent::Resized(preview))
                    }
                    _ => None,
                }
            }
            _ => None,
        }
    }

    fn update_preview(&mut self, column: u16, row: u16, metrics: CellMetrics) {
        match &mut self.interaction {
            FrameInteraction::Idle => {}
            FrameInteraction::Dragging {
                start,
                start_col,
                start_row,
                preview,
            } => {
                let dx = metrics.columns_to_px(column as i32 - *start_col as i32);
                let dy = metrics.rows_to_px(row as i32 - *start_row as i32);
                *preview = apply_move(*start, dx, dy);
            }
            FrameInteraction::Resizing {
                edge,
                start,
                start_col,
                start_row,
                preview,
            } => {
                let dx = metrics.columns_to_px(column as i32 - *start_col as i32);
                let dy = metrics.rows_to_px(row as i32 - *start_row as i32);
                *preview = apply_resize(*start, *edge, dx, dy, MIN_WINDOW_WIDTH, MIN_WINDOW_HEIGHT);
            }
        }
    }

    /// Translate a mouse event into window-local cells for the content
    /// component, if it lands inside the content area.
    pub fn content_event(
        &self,
        mouse: &MouseEvent,
        placement: &FramePlacement,
        decorator: &dyn WindowDecorator,
    ) -> Option<Event> {
        let rect = placement.rect();
        let local_col = mouse.column as i32 - rect.x;
        let local_row = mouse.row as i32 - rect.y;
        if local_col < 0 || local_row < 0 {
            return None;
        }
        let (local_col, local_row) = (local_col as u16, local_row as u16);
        let content = decorator.content_area(Rect::new(0, 0, rect.width, rect.height));
        if !crate::layout::rect_contains(content, local_col, local_row) {
            return None;
        }
        Some(Event::Mouse(MouseEvent {
            column: local_col,
            row: local_row,
            ..*mouse
        }))
    }

    /// Draw chrome and `content` offscreen, then composite onto the desktop.
    pub fn render<C: Component + ?Sized>(
        &self,
        frame: &mut UiFrame<'_>,
        placement: &FramePlacement,
        decorator: &dyn WindowDecorator,
        content: &mut C,
        ctx: &ComponentContext,
    ) {
        let geometry = self.display_geometry(placement.geometry);
        let rect = placement.metrics.to_cells(geometry, placement.desktop);
        if rect.visible_in(placement.desktop).is_none() {
            return;
        }
        let local = Rect::new(
            0,
            0,
            rect.width.min(MAX_OFFSCREEN_CELLS),
            rect.height.min(MAX_OFFSCREEN_CELLS),
        );
        let mut buffer = Buffer::empty(local);
        buffer.set_style(local, ctx.palette().window_style());
        {
            let mut offscreen = UiFrame::from_parts(local, &mut buffer);
            decorator.render_window(
                &mut offscreen,
                local,
                self.id.title(),
                ctx.focused(),
                ctx.palette(),
            );
            let content_area = decorator.content_area(local);
            if content_area.width > 0 && content_area.height > 0 {
                content.render(&mut offscreen, content_area, ctx);
            }
        }

        let mut desktop = UiFrame::from_parts(placement.desktop, frame.buffer_mut());
        desktop.blit_from_signed(&buffer, rect);
        if matches!(self.interaction, FrameInteraction::Resizing { .. }) {
            let style = Style::default().fg(theme::accent()).bg(ctx.palette().window_bg);
            render_resize_outline(&mut desktop, rect, placement.desktop, style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::window::decorator::TrafficLightDecorator;
    use crossterm::event::KeyModifiers;

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn placement() -> FramePlacement {
        FramePlacement {
            geometry: Geometry::new(100, 80, 800, 600),
            desktop: Rect::new(0, 1, 120, 36),
            metrics: CellMetrics::new(10, 20),
        }
    }

    #[test]
    fn header_drag_commits_pixel_delta_on_release() {
        let mut frame = WindowFrame::new(WindowIdentifier::About);
        let p = placement();
        // Window occupies columns 10..90, rows 5..35; header row is 6.
        let down = mouse(MouseEventKind::Down(MouseButton::Left), 40, 6);
        assert_eq!(frame.press(&down, &p, &TrafficLightDecorator), FrameEvent::Pressed);
        assert!(frame.is_interacting());

        let drag = mouse(MouseEventKind::Drag(MouseButton::Left), 43, 8);
        assert_eq!(frame.track(&drag, p.metrics), None);
        assert_eq!(
            frame.display_geometry(p.geometry),
            Geometry::new(130, 120, 800, 600)
        );

        let up = mouse(MouseEventKind::Up(MouseButton::Left), 45, 8);
        assert_eq!(
            frame.track(&up, p.metrics),
            Some(FrameEvent::Moved(Geometry::new(150, 120, 800, 600)))
        );
        assert!(!frame.is_interacting());
    }

    #[test]
    fn click_without_movement_commits_nothing() {
        let mut frame = WindowFrame::new(WindowIdentifier::About);
        let p = placement();
        let down = mouse(MouseEventKind::Down(MouseButton::Left), 40, 6);
        frame.press(&down, &p, &TrafficLightDecorator);
        let up = mouse(MouseEventKind::Up(MouseButton::Left), 40, 6);
        assert_eq!(frame.track(&up, p.metrics), None);
    }

    #[test]
    fn border_resize_respects_minimum() {
        let mut frame = WindowFrame::new(WindowIdentifier::Projects);
        let p = placement();
        // Bottom-right corner cell.
        let down = mouse(MouseEventKind::Down(MouseButton::Left), 89, 34);
        frame.press(&down, &p, &TrafficLightDecorator);
        let up = mouse(MouseEventKind::Up(MouseButton::Left), 20, 10);
        assert_eq!(
            frame.track(&up, p.metrics),
            Some(FrameEvent::Resized(Geometry::new(100, 80, 400, 300)))
        );
    }

    #[test]
    fn traffic_lights_map_to_events() {
        let mut frame = WindowFrame::new(WindowIdentifier::Contact);
        let p = placement();
        let press = |frame: &mut WindowFrame, column| {
            frame.press(
                &mouse(MouseEventKind::Down(MouseButton::Left), column, 6),
                &p,
                &TrafficLightDecorator,
            )
        };
        assert_eq!(press(&mut frame, 12), FrameEvent::Close);
        assert_eq!(press(&mut frame, 14), FrameEvent::Minimize);
        assert_eq!(press(&mut frame, 16), FrameEvent::Maximize);
        assert!(!frame.is_interacting());
    }

    #[test]
    fn content_events_are_window_local() {
        let frame = WindowFrame::new(WindowIdentifier::About);
        let p = placement();
        let scroll = mouse(MouseEventKind::ScrollDown, 20, 10);
        let Some(Event::Mouse(local)) = frame.content_event(&scroll, &p, &TrafficLightDecorator)
        else {
            panic!("expected content event");
        };
        assert_eq!((local.column, local.row), (10, 5));
        let header = mouse(MouseEventKind::ScrollDown, 20, 6);
        assert!(frame.content_event(&header, &p, &TrafficLightDecorator).is_none());
    }
}
