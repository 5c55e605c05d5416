//! Contact form: three text fields, a send button and a submission status.
//!
//! Status moves idle → sending → success | error. Only one submission can be
//! in flight; a successful one clears the fields, a failed one keeps them so
//! the visitor can retry by hand.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEventKind};
use folio_store::{ContactMessage, DocumentId, StoreResult};
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};

use crate::components::{Component, ComponentContext};
use crate::layout::rect_contains;
use crate::remote::{PendingSubmission, SubmissionWorker};
use crate::ui::{UiFrame, safe_set_string, truncate_to_width};

const MESSAGE_ROWS: u16 = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitStatus {
    Idle,
    Sending,
    Success,
    Error(String),
}

impl SubmitStatus {
    fn message(&self) -> Option<&'static str> {
        match self {
            SubmitStatus::Idle => None,
            SubmitStatus::Sending => Some("Sending..."),
            SubmitStatus::Success => Some("Message sent successfully!"),
            SubmitStatus::Error(_) => Some("Failed to send message. Try again."),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Email,
    Message,
    Send,
}

impl FormField {
    const ORDER: [FormField; 4] = [
        FormField::Name,
        FormField::Email,
        FormField::Message,
        FormField::Send,
    ];

    fn next(self) -> Self {
        let idx = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        Self::ORDER[(idx + 1) % Self::ORDER.len()]
    }

    fn prev(self) -> Self {
        let idx = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        Self::ORDER[(idx + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }

    fn placeholder(self) -> &'static str {
        match self {
            FormField::Name => "Your Name",
            FormField::Email => "Your Email",
            FormField::Message => "Your Message",
            FormField::Send => "",
        }
    }
}

#[derive(Debug)]
pub struct ContactForm {
    name: String,
    email: String,
    message: String,
    focus: FormField,
    status: SubmitStatus,
    worker: SubmissionWorker,
    pending: Option<PendingSubmission>,
    field_rects: Vec<(FormField, Rect)>,
}

impl ContactForm {
    pub fn new(worker: SubmissionWorker) -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            message: String::new(),
            focus: FormField::Name,
            status: SubmitStatus::Idle,
            worker,
            pending: None,
            field_rects: Vec::new(),
        }
    }

    pub fn status(&self) -> &SubmitStatus {
        &self.status
    }

    pub fn focus(&self) -> FormField {
        self.focus
    }

    pub fn set_focus(&mut self, focus: FormField) {
        self.focus = focus;
    }

    pub fn fields(&self) -> (&str, &str, &str) {
        (&self.name, &self.email, &self.message)
    }

    pub fn set_fields(
        &mut self,
        name: impl Into<String>,
        email: impl Into<String>,
        message: impl Into<String>,
    ) {
        self.name = name.into();
        self.email = email.into();
        self.message = message.into();
    }

    fn field_mut(&mut self, field: FormField) -> Option<&mut String> {
        match field {
            FormField::Name => Some(&mut self.name),
            FormField::Email => Some(&mut self.email),
            FormField::Message => Some(&mut self.message),
            FormField::Send => None,
        }
    }

    fn field(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Email => &self.email,
            FormField::Message => &self.message,
            FormField::Send => "",
        }
    }

    /// Start a submission with the current fields. Returns false while a
    /// previous submission is still in flight.
    pub fn submit(&mut self) -> bool {
        if self.status == SubmitStatus::Sending {
            tracing::debug!("ignoring submit while a message is being sent");
            return false;
        }
        let message = ContactMessage::new(&self.name, &self.email, &self.message);
        self.pending = Some(self.worker.submit(message));
        self.status = SubmitStatus::Sending;
        true
    }

    /// Pick up a finished submission. Returns true when the status changed.
    pub fn poll(&mut self) -> bool {
        let Some(result) = self.pending.as_ref().and_then(PendingSubmission::try_take) else {
            return false;
        };
        self.pending = None;
        self.complete(result);
        true
    }

    /// Block until the in-flight submission finishes.
    #[cfg(test)]
    pub(crate) fn wait(&mut self) {
        if let Some(pending) = self.pending.take() {
            let result = pending.wait();
            self.complete(result);
        }
    }

    fn complete(&mut self, result: StoreResult<DocumentId>) {
        match result {
            Ok(_) => {
                self.status = SubmitStatus::Success;
                self.name.clear();
                self.email.clear();
                self.message.clear();
                self.focus = FormField::Name;
            }
            Err(err) => {
                self.status = SubmitStatus::Error(err.to_string());
            }
        }
    }

    pub fn handle_key_event(&mut self, key: &KeyEvent) -> bool {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('s') => {
                    self.submit();
                    true
                }
                _ => false,
            };
        }
        match key.code {
            KeyCode::Tab => self.focus = self.focus.next(),
            KeyCode::BackTab => self.focus = self.focus.prev(),
            KeyCode::Enter => match self.focus {
                FormField::Message => self.message.push('\n'),
                FormField::Send => {
                    self.submit();
                }
                _ => self.focus = self.focus.next(),
            },
            KeyCode::Backspace => {
                let focus = self.focus;
                if let Some(value) = self.field_mut(focus) {
                    value.pop();
                }
            }
            KeyCode::Char(ch) => {
                let focus = self.focus;
                match self.field_mut(focus) {
                    Some(value) => value.push(ch),
                    None if ch == ' ' => {
                        self.submit();
                    }
                    None => return false,
                }
            }
            _ => return false,
        }
        true
    }

    fn handle_click(&mut self, column: u16, row: u16) -> bool {
        let Some(field) = self
            .field_rects
            .iter()
            .find(|(_, rect)| rect_contains(*rect, column, row))
            .map(|(field, _)| *field)
        else {
            return false;
        };
        self.focus = field;
        if field == FormField::Send {
            self.submit();
        }
        true
    }

    /// Rows the form occupies when rendered.
    pub fn height() -> u16 {
        // name, email, message, gap, button, status
        2 + 2 + (1 + MESSAGE_ROWS) + 1 + 1 + 1
    }

    fn render_input(
        &mut self,
        buffer: &mut ratatui::buffer::Buffer,
        bounds: Rect,
        field: FormField,
        rect: Rect,
        ctx: &ComponentContext,
    ) {
        let palette = ctx.palette();
        let focused = ctx.focused() && self.focus == field;
        let mut style = Style::default().bg(palette.input_bg).fg(palette.window_fg);
        if focused {
            style = style.add_modifier(Modifier::UNDERLINED);
        }
        buffer.set_style(rect.intersection(bounds), style);
        let value = self.field(field).to_string();
        let width = rect.width as usize;
        if value.is_empty() {
            let placeholder = truncate_to_width(field.placeholder(), width);
            let muted = style.fg(palette.muted_fg);
            safe_set_string(buffer, bounds, rect.x, rect.y, &placeholder, muted);
        } else {
            let lines: Vec<&str> = value.split('\n').collect();
            let rows = rect.height as usize;
            let skip = lines.len().saturating_sub(rows);
            for (i, line) in lines.iter().skip(skip).enumerate() {
                // Keep the tail of long lines visible while typing.
                let count = line.chars().count();
                let skip = count.saturating_sub(width.saturating_sub(1));
                let visible: String = line.chars().skip(skip).collect();
                safe_set_string(buffer, bounds, rect.x, rect.y + i as u16, &visible, style);
            }
        }
        self.field_rects.push((field, rect));
    }
}

impl Component for ContactForm {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, ctx: &ComponentContext) {
        self.field_rects.clear();
        if area.width < 4 || area.height == 0 {
            return;
        }
        let palette = *ctx.palette();
        let bounds = frame.area().intersection(area);
        let buffer = frame.buffer_mut();
        let label_style = palette.window_style().add_modifier(Modifier::BOLD);
        let width = area.width;
        let mut y = area.y;

        for (field, label, rows) in [
            (FormField::Name, "Name", 1),
            (FormField::Email, "Email", 1),
            (FormField::Message, "Message", MESSAGE_ROWS),
        ] {
            safe_set_string(buffer, bounds, area.x, y, label, label_style);
            y += 1;
            let rect = Rect::new(area.x, y, width, rows);
            self.render_input(buffer, bounds, field, rect, ctx);
            y += rows;
        }

        y += 1;
        let sending = self.status == SubmitStatus::Sending;
        let label = if sending { "[ Sending... ]" } else { "[ Send ]" };
        let mut button_style = Style::default()
            .bg(crate::theme::accent())
            .fg(ratatui::style::Color::White);
        if sending {
            button_style = button_style.add_modifier(Modifier::DIM);
        }
        if ctx.focused() && self.focus == FormField::Send {
            button_style = button_style.add_modifier(Modifier::BOLD | Modifier::REVERSED);
        }
        safe_set_string(buffer, bounds, area.x, y, label, button_style);
        self.field_rects.push((
            FormField::Send,
            Rect::new(area.x, y, label.chars().count() as u16, 1),
        ));

        y += 1;
        if let Some(text) = self.status.message()
            && !sending
        {
            let fg = match self.status {
                SubmitStatus::Success => palette.success_fg,
                _ => palette.error_fg,
            };
            safe_set_string(buffer, bounds, area.x, y, text, palette.window_style().fg(fg));
        }
    }

    fn handle_event(&mut self, event: &Event, _ctx: &ComponentContext) -> bool {
        match event {
            Event::Key(key) => self.handle_key_event(key),
            Event::Mouse(mouse)
                if matches!(mouse.kind, MouseEventKind::Down(MouseButton::Left)) =>
            {
                self.handle_click(mouse.column, mouse.row)
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_store::MemoryStore;
    use std::sync::Arc;

    fn form() -> (ContactForm, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        (ContactForm::new(SubmissionWorker::new(store.clone())), store)
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(form: &mut ContactForm, text: &str) {
        for ch in text.chars() {
            form.handle_key_event(&key(KeyCode::Char(ch)));
        }
    }

    #[test]
    fn successful_submission_clears_fields() {
        let (mut form, store) = form();
        form.set_fields("Ada", "ada@example.com", "Hello there");
        assert!(form.submit());
        assert_eq!(form.status(), &SubmitStatus::Sending);
        form.wait();
        assert_eq!(form.status(), &SubmitStatus::Success);
        assert_eq!(form.fields(), ("", "", ""));
        let stored = store.contact_messages().unwrap();
        assert_eq!(stored[0].message.name, "Ada");
    }

    #[test]
    fn rejected_submission_keeps_fields() {
        let (mut form, store) = form();
        form.set_fields("Ada", "not-an-email", "Hello");
        form.submit();
        form.wait();
        assert!(matches!(form.status(), SubmitStatus::Error(_)));
        assert_eq!(form.fields(), ("Ada", "not-an-email", "Hello"));
        assert!(store.contact_messages().unwrap().is_empty());
    }

    #[test]
    fn second_submit_is_ignored_while_sending() {
        let (mut form, store) = form();
        form.set_fields("Ada", "ada@example.com", "Hello");
        assert!(form.submit());
        assert!(!form.submit());
        form.wait();
        assert_eq!(store.contact_messages().unwrap().len(), 1);
    }

    #[test]
    fn poll_eventually_completes() {
        let (mut form, _store) = form();
        form.set_fields("Ada", "ada@example.com", "Hello");
        form.submit();
        let deadline = std::time::Instant::now() + std::time::Duration::from_secs(5);
        while !form.poll() {
            assert!(std::time::Instant::now() < deadline, "submission never finished");
            std::thread::sleep(std::time::Duration::from_millis(5));
        }
        assert_eq!(form.status(), &SubmitStatus::Success);
        assert!(!form.poll());
    }

    #[test]
    fn keyboard_fills_fields_and_submits() {
        let (mut form, store) = form();
        type_text(&mut form, "Ada");
        form.handle_key_event(&key(KeyCode::Enter));
        type_text(&mut form, "ada@example.com");
        form.handle_key_event(&key(KeyCode::Tab));
        type_text(&mut form, "line one");
        form.handle_key_event(&key(KeyCode::Enter));
        type_text(&mut form, "line two!");
        form.handle_key_event(&key(KeyCode::Backspace));
        assert_eq!(form.fields(), ("Ada", "ada@example.com", "line one\nline two"));

        form.handle_key_event(&KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL));
        form.wait();
        assert_eq!(form.status(), &SubmitStatus::Success);
        assert_eq!(store.contact_messages().unwrap()[0].message.message, "line one\nline two");
    }

    #[test]
    fn focus_cycles_in_both_directions() {
        let (mut form, _) = form();
        form.handle_key_event(&key(KeyCode::BackTab));
        assert_eq!(form.focus(), FormField::Send);
        form.handle_key_event(&key(KeyCode::Tab));
        assert_eq!(form.focus(), FormField::Name);
    }
}
