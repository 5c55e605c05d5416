use std::collections::BTreeSet;
use std::sync::Arc;

use crossterm::event::{Event, KeyCode, KeyModifiers, MouseButton, MouseEventKind};
use folio_store::{DataService, Project};
use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::text::{Line, Span, Text};

use crate::components::{Component, ComponentContext, TextViewComponent};
use crate::constants::PERSONAL_PROJECTS_HEADING;
use crate::icons::{self, Icon};
use crate::panels::{Panel, PanelRequest};
use crate::theme::Palette;
use crate::ui::UiFrame;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLink {
    pub icon: Icon,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectCard {
    pub title: String,
    pub description: String,
    pub links: Vec<ProjectLink>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectGroup {
    pub client: String,
    pub cards: Vec<ProjectCard>,
}

/// Group projects by client in order of first appearance, keeping stored
/// order inside each group. Link icons that do not resolve are returned
/// separately and left off the card.
pub fn group_by_client(projects: Vec<Project>) -> (Vec<ProjectGroup>, Vec<String>) {
    let mut groups: Vec<ProjectGroup> = Vec::new();
    let mut missing = Vec::new();
    for project in projects {
        let client = project
            .client
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| PERSONAL_PROJECTS_HEADING.to_string());
        let mut links = Vec::new();
        for (name, url) in project.links {
            match icons::lookup(&name) {
                Some(icon) => links.push(ProjectLink { icon, url }),
                None => missing.push(name),
            }
        }
        let card = ProjectCard {
            title: project.title,
            description: project.description,
            links,
        };
        match groups.iter_mut().find(|g| g.client == client) {
            Some(group) => group.cards.push(card),
            None => groups.push(ProjectGroup {
                client,
                cards: vec![card],
            }),
        }
    }
    (groups, missing)
}

/// What a rendered line belongs to, for mouse hits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineTarget {
    None,
    Card(usize),
    Link(usize, usize),
}

pub struct ProjectsPanel {
    service: Arc<dyn DataService>,
    groups: Vec<ProjectGroup>,
    error: Option<String>,
    selected: usize,
    view: TextViewComponent,
    targets: Vec<LineTarget>,
    card_lines: Vec<(usize, usize)>,
    warned_icons: BTreeSet<String>,
    follow_selection: bool,
    area: Rect,
    requests: Vec<PanelRequest>,
}

impl std::fmt::Debug for ProjectsPanel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProjectsPanel")
            .field("groups", &self.groups.len())
            .field("selected", &self.selected)
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}

impl ProjectsPanel {
    pub fn new(service: Arc<dyn DataService>) -> Self {
        let mut panel = Self {
            service,
            groups: Vec::new(),
            error: None,
            selected: 0,
            view: TextViewComponent::new(),
            targets: Vec::new(),
            card_lines: Vec::new(),
            warned_icons: BTreeSet::new(),
            follow_selection: false,
            area: Rect::default(),
            requests: Vec::new(),
        };
        panel.reload();
        panel
    }

    /// Query the store again.
    pub fn reload(&mut self) {
        match self.service.list_projects() {
            Ok(projects) => {
                let (groups, missing) = group_by_client(projects);
                for name in missing {
                    if self.warned_icons.insert(name.clone()) {
                        tracing::warn!(icon = %name, "unknown link icon; link hidden");
                    }
                }
                tracing::debug!(groups = groups.len(), "projects loaded");
                self.groups = groups;
                self.error = None;
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to list projects");
                self.groups.clear();
                self.error = Some(err.to_string());
            }
        }
        self.selected = self.selected.min(self.card_count().saturating_sub(1));
    }

    pub fn groups(&self) -> &[ProjectGroup] {
        &self.groups
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    fn card_count(&self) -> usize {
        self.groups.iter().map(|g| g.cards.len()).sum()
    }

    fn card(&self, index: usize) -> Option<&ProjectCard> {
        self.groups.iter().flat_map(|g| g.cards.iter()).nth(index)
    }

    fn select(&mut self, index: usize) {
        self.selected = index.min(self.card_count().saturating_sub(1));
        self.follow_selection = true;
    }

    fn open_link(&mut self, card: usize, link: usize) -> bool {
        let Some(url) = self
            .card(card)
            .and_then(|c| c.links.get(link))
            .map(|l| l.url.clone())
        else {
            return false;
        };
        self.requests.push(PanelRequest::OpenUrl(url));
        true
    }

    fn build_text(&mut self, palette: &Palette) -> Text<'static> {
        let mut rows: Vec<(Line<'static>, LineTarget)> = Vec::new();
        self.card_lines.clear();

        if let Some(err) = &self.error {
            rows.push((
                Line::styled("Projects are unavailable right now.", palette.heading_style()),
                LineTarget::None,
            ));
            rows.push((Line::styled(err.clone(), palette.muted_style()), LineTarget::None));
        } else if self.groups.is_empty() {
            rows.push((
                Line::styled("No projects yet.", palette.muted_style()),
                LineTarget::None,
            ));
        }

        let accent = crate::theme::accent();
        let mut index = 0;
        for (group_idx, group) in self.groups.iter().enumerate() {
            if group_idx > 0 {
                rows.push((Line::default(), LineTarget::None));
            }
            rows.push((
                Line::styled(
                    group.client.clone(),
                    palette.heading_style().add_modifier(Modifier::UNDERLINED),
                ),
                LineTarget::None,
            ));
            for card in &group.cards {
                let selected = index == self.selected;
                let base = if selected {
                    palette.window_style().bg(palette.selected_bg)
                } else {
                    palette.window_style()
                };
                let marker = if selected { "▌ " } else { "  " };
                rows.push((Line::default(), LineTarget::None));
                let start = rows.len();
                rows.push((
                    Line::from(vec![
                        Span::styled(marker, base.fg(accent)),
                        Span::styled(
                            card.title.clone(),
                            base.fg(accent).add_modifier(Modifier::BOLD),
                        ),
                    ]),
                    LineTarget::Card(index),
                ));
                rows.push((
                    Line::styled(format!("  {}", card.description), base),
                    LineTarget::Card(index),
                ));
                let link_bg = base.bg.unwrap_or(palette.window_bg);
                for (link_idx, link) in card.links.iter().enumerate() {
                    let icon = link.icon;
                    let label = format!("  {} {} {} ", link_idx + 1, icon.glyph, icon.label);
                    rows.push((
                        Line::from(vec![
                            Span::styled(label, base),
                            Span::styled(link.url.clone(), palette.link_style().bg(link_bg)),
                        ]),
                        LineTarget::Link(index, link_idx),
                    ));
                }
                self.card_lines.push((start, rows.len()));
                index += 1;
            }
        }

        let (lines, targets): (Vec<_>, Vec<_>) = rows.into_iter().unzip();
        self.targets = targets;
        Text::from(lines)
    }

    fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> bool {
        if modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
            return false;
        }
        match code {
            KeyCode::Up => {
                self.select(self.selected.saturating_sub(1));
                true
            }
            KeyCode::Down => {
                self.select(self.selected + 1);
                true
            }
            KeyCode::Enter => self.open_link(self.selected, 0),
            KeyCode::Char('r') => {
                self.reload();
                true
            }
            KeyCode::Char(ch @ '1'..='9') => {
                let link = ch as usize - '1' as usize;
                self.open_link(self.selected, link)
            }
            _ => false,
        }
    }
}

impl Component for ProjectsPanel {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, ctx: &ComponentContext) {
        self.area = area;
        let text = self.build_text(ctx.palette());
        self.view.set_text(text);
        if self.follow_selection
            && let Some(&(start, end)) = self.card_lines.get(self.selected)
        {
            // Wrapping depends on the width, so measure after a layout pass.
            self.view.render(frame, area, ctx);
            let (first, last) = self.view.display_range(start, end);
            self.view.ensure_visible(first, last);
            self.follow_selection = false;
        }
        self.view.render(frame, area, ctx);
    }

    fn handle_event(&mut self, event: &Event, ctx: &ComponentContext) -> bool {
        match event {
            Event::Key(key) => {
                self.handle_key(key.code, key.modifiers) || self.view.handle_event(event, ctx)
            }
            Event::Mouse(mouse)
                if matches!(mouse.kind, MouseEventKind::Down(MouseButton::Left)) =>
            {
                let Some(row) = mouse.row.checked_sub(self.area.y).map(usize::from) else {
                    return false;
                };
                match self.view.line_at(row).and_then(|l| self.targets.get(l).copied()) {
                    Some(LineTarget::Card(card)) => {
                        self.select(card);
                        true
                    }
                    Some(LineTarget::Link(card, link)) => {
                        self.select(card);
                        self.open_link(card, link)
                    }
                    _ => false,
                }
            }
            Event::Mouse(_) => self.view.handle_event(event, ctx),
            _ => false,
        }
    }
}

impl Panel for ProjectsPanel {
    fn take_requests(&mut self) -> Vec<PanelRequest> {
        std::mem::take(&mut self.requests)
    }
}
