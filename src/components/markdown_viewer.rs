use crossterm::event::Event;
use pulldown_cmark::{Event as MdEvent, HeadingLevel, Options, Parser, Tag, TagEnd};
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span, Text};

use crate::components::{Component, ComponentContext, TextViewComponent};
use crate::theme;
use crate::ui::UiFrame;

/// Read-only Markdown document in a scrollable view.
#[derive(Debug, Default)]
pub struct MarkdownViewerComponent {
    view: TextViewComponent,
}

impl Component for MarkdownViewerComponent {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, ctx: &ComponentContext) {
        self.view.render(frame, area, ctx);
    }

    fn handle_event(&mut self, event: &Event, ctx: &ComponentContext) -> bool {
        self.view.handle_event(event, ctx)
    }
}

impl MarkdownViewerComponent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_markdown(raw: &str) -> Self {
        let mut viewer = Self::new();
        viewer.set_markdown(raw);
        viewer
    }

    pub fn set_markdown(&mut self, raw: &str) {
        self.view.set_text(parse_markdown(raw));
        self.view.set_offset(0);
    }

    pub fn rendered_lines(&self) -> Vec<String> {
        self.view.rendered_lines()
    }

    pub fn offset(&self) -> usize {
        self.view.offset()
    }
}

#[derive(Default)]
struct MarkdownWriter {
    lines: Vec<Line<'static>>,
    current: Vec<Span<'static>>,
    bold: usize,
    italic: usize,
    heading: Option<HeadingLevel>,
    code_block: bool,
    link: Option<String>,
    // `None` for bullet lists, `Some(next number)` for ordered ones.
    lists: Vec<Option<u64>>,
    item_depth: usize,
}

impl MarkdownWriter {
    fn style(&self) -> Style {
        let mut style = Style::default();
        if self.bold > 0 || self.heading.is_some() {
            style = style.add_modifier(Modifier::BOLD);
        }
        if self.italic > 0 {
            style = style.add_modifier(Modifier::ITALIC);
        }
        if self.heading == Some(HeadingLevel::H1) {
            style = style.add_modifier(Modifier::UNDERLINED);
        }
        if self.link.is_some() {
            style = style.fg(theme::accent()).add_modifier(Modifier::UNDERLINED);
        }
        if self.code_block {
            style = Style::default().fg(theme::accent());
        }
        style
    }

    fn flush_line(&mut self) {
        self.lines.push(Line::from(std::mem::take(&mut self.current)));
    }

    fn blank_line(&mut self) {
        if self.lines.last().is_some_and(|line| line.width() > 0) {
            self.lines.push(Line::default());
        }
    }

    fn start(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Strong => self.bold += 1,
            Tag::Emphasis => self.italic += 1,
            Tag::Heading { level, .. } => self.heading = Some(level),
            Tag::CodeBlock(_) => self.code_block = true,
            Tag::Link { dest_url, .. } => self.link = Some(dest_url.to_string()),
            Tag::List(start) => self.lists.push(start),
            Tag::Item => {
                self.item_depth += 1;
                let indent = "  ".repeat(self.lists.len().saturating_sub(1));
                let bullet = match self.lists.last_mut() {
                    Some(Some(next)) => {
                        let label = format!("{indent}{next}. ");
                        *next += 1;
                        label
                    }
                    _ => format!("{indent}• "),
                };
                self.current.push(Span::raw(bullet));
            }
            _ => {}
        }
    }

    fn end(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Strong => self.bold = self.bold.saturating_sub(1),
            TagEnd::Emphasis => self.italic = self.italic.saturating_sub(1),
            TagEnd::Heading(_) => {
                self.heading = None;
                self.flush_line();
                self.lines.push(Line::default());
            }
            TagEnd::CodeBlock => {
                self.code_block = false;
                if !self.current.is_empty() {
                    self.flush_line();
                }
                self.blank_line();
            }
            TagEnd::Link => {
                // Terminals cannot follow inline links; show the target.
                if let Some(url) = self.link.take()
                    && !url.starts_with('#')
                {
                    let style = Style::default().fg(theme::accent());
                    self.current.push(Span::styled(format!(" <{url}>"), style));
                }
            }
            TagEnd::Item => {
                self.item_depth = self.item_depth.saturating_sub(1);
                if !self.current.is_empty() {
                    self.flush_line();
                }
            }
            TagEnd::List(_) => {
                self.lists.pop();
                if self.item_depth == 0 {
                    self.blank_line();
                }
            }
            TagEnd::Paragraph => {
                self.flush_line();
                if self.item_depth == 0 {
                    self.lines.push(Line::default());
                }
            }
            _ => {}
        }
    }

    fn text(&mut self, text: &str) {
        if self.code_block {
            let mut parts = text.split('\n').peekable();
            while let Some(part) = parts.next() {
                if !part.is_empty() {
                    self.current.push(Span::styled(format!("  {part}"), self.style()));
                }
                if parts.peek().is_some() {
                    self.flush_line();
                }
            }
        } else {
            self.current.push(Span::styled(text.to_string(), self.style()));
        }
    }

    fn finish(mut self) -> Text<'static> {
        if !self.current.is_empty() {
            self.flush_line();
        }
        while self.lines.last().is_some_and(|line| line.width() == 0) {
            self.lines.pop();
        }
        if self.lines.is_empty() {
            self.lines.push(Line::default());
        }
        Text::from(self.lines)
    }
}

pub fn parse_markdown(raw: &str) -> Text<'static> {
    let mut writer = MarkdownWriter::default();
    for event in Parser::new_ext(raw, Options::all()) {
        match event {
            MdEvent::Start(tag) => writer.start(tag),
            MdEvent::End(tag) => writer.end(tag),
            MdEvent::Text(text) => writer.text(&text),
            MdEvent::Code(code) => writer
                .current
                .push(Span::styled(code.to_string(), Style::default().fg(theme::accent()))),
            MdEvent::SoftBreak => writer.current.push(Span::raw(" ")),
            MdEvent::HardBreak => writer.flush_line(),
            MdEvent::Rule => {
                writer.lines.push(Line::from("────────"));
                writer.lines.push(Line::default());
            }
            _ => {}
        }
    }
    writer.finish()
}
