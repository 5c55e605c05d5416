use crossterm::event::{Event, KeyCode, KeyModifiers, MouseButton, MouseEventKind};
use ratatui::layout::Rect;
use ratatui::style::Modifier;

use crate::components::{Component, ComponentContext, ContactForm, SubmitStatus};
use crate::constants::{CONTACT_EMAIL, SOCIAL_LINKS};
use crate::icons;
use crate::layout::rect_contains;
use crate::panels::{Panel, PanelRequest};
use crate::remote::SubmissionWorker;
use crate::ui::{UiFrame, safe_set_string, truncate_to_width};

/// Heading, email address, the contact form and social links, top to bottom.
#[derive(Debug)]
pub struct ContactPanel {
    form: ContactForm,
    link_rects: Vec<(String, Rect)>,
    requests: Vec<PanelRequest>,
}

impl ContactPanel {
    pub fn new(worker: SubmissionWorker) -> Self {
        Self {
            form: ContactForm::new(worker),
            link_rects: Vec::new(),
            requests: Vec::new(),
        }
    }

    pub fn form(&self) -> &ContactForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut ContactForm {
        &mut self.form
    }

    pub fn status(&self) -> &SubmitStatus {
        self.form.status()
    }
}

impl Component for ContactPanel {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, ctx: &ComponentContext) {
        self.link_rects.clear();
        if area.width == 0 || area.height == 0 {
            return;
        }
        let palette = *ctx.palette();
        let bounds = frame.area().intersection(area);
        let width = area.width as usize;
        let bottom = area.y.saturating_add(area.height);
        let mut y = area.y;

        {
            let buffer = frame.buffer_mut();
            safe_set_string(buffer, bounds, area.x, y, "Get in Touch", palette.heading_style());
            y += 2;
            let email = truncate_to_width(&format!("✉ {CONTACT_EMAIL}"), width);
            safe_set_string(buffer, bounds, area.x, y, &email, palette.link_style());
            self.link_rects.push((
                format!("mailto:{CONTACT_EMAIL}"),
                Rect::new(area.x, y, email.chars().count() as u16, 1),
            ));
            let hint = "  (Ctrl+E copies)";
            let hint_x = area.x + email.chars().count() as u16;
            if email.chars().count() + hint.len() <= width {
                safe_set_string(buffer, bounds, hint_x, y, hint, palette.muted_style());
            }
            y += 2;
        }

        if y < bottom {
            let form_area = Rect::new(area.x, y, area.width, ContactForm::height().min(bottom - y));
            self.form.render(frame, form_area, ctx);
            y = y.saturating_add(ContactForm::height() + 1);
        }

        let buffer = frame.buffer_mut();
        for (icon_name, handle, url) in SOCIAL_LINKS {
            if y >= bottom {
                break;
            }
            let Some(icon) = icons::lookup(icon_name) else {
                continue;
            };
            let label = format!("{} {}  {handle}", icon.glyph, icon.label);
            let label = truncate_to_width(&label, width);
            safe_set_string(
                buffer,
                bounds,
                area.x,
                y,
                &label,
                palette.link_style().remove_modifier(Modifier::UNDERLINED),
            );
            self.link_rects
                .push((url.to_string(), Rect::new(area.x, y, label.chars().count() as u16, 1)));
            y += 1;
        }
    }

    fn handle_event(&mut self, event: &Event, ctx: &ComponentContext) -> bool {
        match event {
            Event::Key(key)
                if key.modifiers.contains(KeyModifiers::CONTROL)
                    && key.code == KeyCode::Char('e') =>
            {
                self.requests
                    .push(PanelRequest::CopyText(CONTACT_EMAIL.to_string()));
                true
            }
            Event::Mouse(mouse)
                if matches!(mouse.kind, MouseEventKind::Down(MouseButton::Left)) =>
            {
                if let Some((url, _)) = self
                    .link_rects
                    .iter()
                    .find(|(_, rect)| rect_contains(*rect, mouse.column, mouse.row))
                {
                    self.requests.push(PanelRequest::OpenUrl(url.clone()));
                    return true;
                }
                self.form.handle_event(event, ctx)
            }
            _ => self.form.handle_event(event, ctx),
        }
    }
}

impl Panel for ContactPanel {
    fn tick(&mut self) -> bool {
        self.form.poll()
    }

    fn take_requests(&mut self) -> Vec<PanelRequest> {
        std::mem::take(&mut self.requests)
    }
}
