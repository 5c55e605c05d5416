use crossterm::event::Event;
use ratatui::layout::Rect;

use crate::ui::UiFrame;

pub mod contact_form;
pub mod dock;
pub mod markdown_viewer;
pub mod menu_bar;
pub mod text_view;

pub use contact_form::{ContactForm, FormField, SubmitStatus};
pub use dock::Dock;
pub use markdown_viewer::MarkdownViewerComponent;
pub use menu_bar::{Clock, MenuBar};
pub use text_view::TextViewComponent;

pub use crate::component_context::ComponentContext;

pub trait Component {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, ctx: &ComponentContext);

    /// Returns true when the event was consumed.
    fn handle_event(&mut self, _event: &Event, _ctx: &ComponentContext) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::buffer::Buffer;

    struct Stamp;

    impl Component for Stamp {
        fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, ctx: &ComponentContext) {
            frame.fill(area, ctx.palette().window_style());
            frame.buffer_mut()[(area.x, area.y)].set_symbol("*");
        }
    }

    #[test]
    fn default_handler_ignores_events() {
        let mut stamp = Stamp;
        let ctx = ComponentContext::default();
        assert!(!stamp.handle_event(&Event::FocusGained, &ctx));

        let area = Rect::new(0, 0, 2, 1);
        let mut buffer = Buffer::empty(area);
        stamp.render(&mut UiFrame::from_parts(area, &mut buffer), area, &ctx);
        assert_eq!(buffer[(0, 0)].symbol(), "*");
    }
}
