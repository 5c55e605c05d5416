use crossterm::event::Event;
use ratatui::layout::Rect;

use crate::assets;
use crate::components::{Component, ComponentContext, MarkdownViewerComponent};
use crate::panels::Panel;
use crate::ui::UiFrame;

#[derive(Debug)]
pub struct AboutPanel {
    viewer: MarkdownViewerComponent,
}

impl AboutPanel {
    pub fn new() -> Self {
        Self::from_markdown(assets::about_markdown(), assets::about_updated().as_deref())
    }

    pub fn from_markdown(markdown: &str, updated: Option<&str>) -> Self {
        let document = match updated {
            Some(date) => format!("{markdown}\n\n---\n\n_Last updated {date}_\n"),
            None => markdown.to_string(),
        };
        Self {
            viewer: MarkdownViewerComponent::from_markdown(&document),
        }
    }

    pub fn rendered_lines(&self) -> Vec<String> {
        self.viewer.rendered_lines()
    }
}

impl Default for AboutPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for AboutPanel {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, ctx: &ComponentContext) {
        self.viewer.render(frame, area, ctx);
    }

    fn handle_event(&mut self, event: &Event, ctx: &ComponentContext) -> bool {
        self.viewer.handle_event(event, ctx)
    }
}

impl Panel for AboutPanel {}
