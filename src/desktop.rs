//! The desktop controller: owns layout and preference state, routes input to
//! windows and chrome, and composes a frame.
//!
//! Components never mutate layout themselves. Window frames report
//! [`FrameEvent`]s, the dock and menu bar report hits, panels return
//! [`PanelRequest`]s; all of them are applied here.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;

use crossterm::event::{Event, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};
use folio_store::DataService;
use ratatui::layout::Rect;

use crate::clipboard;
use crate::components::{Component, ComponentContext, Dock, MenuBar};
use crate::constants::{DOCK_HEIGHT, MENU_BAR_HEIGHT, MIN_WINDOW_HEIGHT, MIN_WINDOW_WIDTH};
use crate::event_loop::ControlFlow;
use crate::keybindings::{Action, KeyBindings};
use crate::layout::{ResizeEdge, apply_move, apply_resize, desktop_areas, rect_contains};
use crate::panels::{AboutPanel, ContactPanel, Panel, PanelRequest, ProjectsPanel};
use crate::remote::SubmissionWorker;
use crate::state::AppState;
use crate::storage::KeyValueStore;
use crate::theme::Palette;
use crate::ui::UiFrame;
use crate::window::decorator::{TrafficLightDecorator, WindowDecorator};
use crate::window::frame::FramePlacement;
use crate::window::{
    CellMetrics, FloatRect, FrameEvent, Geometry, LayoutStateManager, WindowFrame,
    WindowIdentifier,
};

/// Side effects that leave the process.
pub trait Platform {
    fn open_url(&mut self, url: &str);
    fn copy_text(&mut self, text: &str);
}

/// Opens links in the default browser and copies to the system clipboard.
#[derive(Debug, Default)]
pub struct SystemPlatform;

impl Platform for SystemPlatform {
    fn open_url(&mut self, url: &str) {
        match webbrowser::open(url) {
            Ok(()) => tracing::info!(%url, "opened link"),
            Err(err) => tracing::warn!(%url, error = %err, "failed to open link"),
        }
    }

    fn copy_text(&mut self, text: &str) {
        clipboard::copy_or_warn(text);
    }
}

pub struct Desktop<S: KeyValueStore + Clone> {
    layout: LayoutStateManager<S>,
    store: S,
    state: AppState,
    menu_bar: MenuBar,
    dock: Dock,
    frames: BTreeMap<WindowIdentifier, WindowFrame>,
    panels: BTreeMap<WindowIdentifier, Box<dyn Panel>>,
    decorator: Box<dyn WindowDecorator>,
    metrics: CellMetrics,
    keybindings: KeyBindings,
    platform: Box<dyn Platform>,
    /// Geometry to return to when a maximized window is maximized again.
    restore: BTreeMap<WindowIdentifier, Geometry>,
    /// Window that owns the pointer until the button is released.
    grab: Option<WindowIdentifier>,
    screen: Rect,
}

impl<S: KeyValueStore + Clone> Desktop<S> {
    pub fn new(
        store: S,
        service: Arc<dyn DataService>,
        metrics: CellMetrics,
        platform: Box<dyn Platform>,
    ) -> Self {
        let layout = LayoutStateManager::load(store.clone());
        let state = AppState::load(&store);
        let mut panels: BTreeMap<WindowIdentifier, Box<dyn Panel>> = BTreeMap::new();
        panels.insert(WindowIdentifier::About, Box::new(AboutPanel::new()));
        panels.insert(
            WindowIdentifier::Projects,
            Box::new(ProjectsPanel::new(Arc::clone(&service))),
        );
        panels.insert(
            WindowIdentifier::Contact,
            Box::new(ContactPanel::new(SubmissionWorker::new(service))),
        );
        let frames = WindowIdentifier::ALL
            .into_iter()
            .map(|id| (id, WindowFrame::new(id)))
            .collect();
        tracing::debug!(
            open = ?layout.open_windows(),
            dark_mode = state.dark_mode(),
            "desktop loaded"
        );
        Self {
            layout,
            store,
            state,
            menu_bar: MenuBar::new(),
            dock: Dock::new(),
            frames,
            panels,
            decorator: Box::new(TrafficLightDecorator),
            metrics,
            keybindings: KeyBindings::default(),
            platform,
            restore: BTreeMap::new(),
            grab: None,
            screen: Rect::default(),
        }
    }

    pub fn layout(&self) -> &LayoutStateManager<S> {
        &self.layout
    }

    pub fn layout_mut(&mut self) -> &mut LayoutStateManager<S> {
        &mut self.layout
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut AppState {
        &mut self.state
    }

    pub fn dark_mode(&self) -> bool {
        self.state.dark_mode()
    }

    pub fn menu_title(&self) -> &str {
        self.menu_bar.title()
    }

    /// (menu bar, desktop, dock) for the current screen.
    pub fn areas(&self) -> (Rect, Rect, Rect) {
        desktop_areas(self.screen, MENU_BAR_HEIGHT, DOCK_HEIGHT)
    }

    fn placement(&self, id: WindowIdentifier) -> FramePlacement {
        FramePlacement {
            geometry: self.layout.window(id).geometry(),
            desktop: self.areas().1,
            metrics: self.metrics,
        }
    }

    /// Cells `id` covers on screen at its committed geometry.
    pub fn window_rect(&self, id: WindowIdentifier) -> FloatRect {
        self.placement(id).rect()
    }

    pub fn handle_event(&mut self, event: &Event) -> ControlFlow {
        let flow = match event {
            Event::Resize(width, height) => {
                self.screen = Rect::new(0, 0, *width, *height);
                ControlFlow::Continue
            }
            Event::Key(key) => self.handle_key(key),
            Event::Mouse(mouse) => {
                if self.state.mouse_capture_enabled() {
                    self.handle_mouse(event, mouse);
                }
                ControlFlow::Continue
            }
            _ => ControlFlow::Continue,
        };
        self.drain_requests();
        self.sync_chrome();
        flow
    }

    fn handle_key(&mut self, key: &KeyEvent) -> ControlFlow {
        if key.kind == KeyEventKind::Release {
            return ControlFlow::Continue;
        }
        if let Some(action) = self.keybindings.action_for_key(key) {
            tracing::debug!(%action, "key action");
            return self.apply_action(action);
        }
        if let Some(id) = self.layout.active_window()
            && let Some(panel) = self.panels.get_mut(&id)
        {
            let ctx = ComponentContext::new(true, Palette::for_mode(self.state.dark_mode()));
            panel.handle_event(&Event::Key(*key), &ctx);
        }
        ControlFlow::Continue
    }

    pub fn apply_action(&mut self, action: Action) -> ControlFlow {
        match action {
            Action::Quit => return ControlFlow::Quit,
            Action::ToggleDarkMode => self.toggle_dark_mode(),
            Action::ToggleWindow(id) => self.toggle_window(id),
            Action::CycleWindow => {
                // Raising the bottom-most window rotates the stack by one.
                let open = self.layout.open_windows();
                if open.len() > 1 {
                    self.layout.bring_to_front(open[0]);
                }
            }
            _ => {
                if let Some(step) = action.geometry_step() {
                    self.step_active_window(step, action.is_resize());
                }
            }
        }
        ControlFlow::Continue
    }

    fn step_active_window(&mut self, (columns, rows): (i32, i32), resize: bool) {
        let Some(id) = self.layout.active_window() else {
            return;
        };
        let current = self.layout.window(id).geometry();
        let dx = self.metrics.columns_to_px(columns);
        let dy = self.metrics.rows_to_px(rows);
        let next = if resize {
            apply_resize(
                current,
                ResizeEdge::BottomRight,
                dx,
                dy,
                MIN_WINDOW_WIDTH,
                MIN_WINDOW_HEIGHT,
            )
        } else {
            apply_move(current, dx, dy)
        };
        if next != current {
            self.commit_geometry(id, next);
        }
    }

    pub fn toggle_window(&mut self, id: WindowIdentifier) {
        self.layout.toggle(id);
        tracing::info!(window = %id, open = self.layout.window(id).is_open, "toggled window");
    }

    pub fn toggle_dark_mode(&mut self) {
        self.state.toggle_dark_mode();
        self.state.persist_dark_mode(&mut self.store);
        tracing::info!(dark_mode = self.state.dark_mode(), "toggled dark mode");
    }

    /// Maximize `id` to the desktop area, or restore the geometry it had
    /// before it was maximized.
    pub fn toggle_maximize(&mut self, id: WindowIdentifier) {
        let geometry = match self.restore.remove(&id) {
            Some(previous) => previous,
            None => {
                let desktop = self.areas().1;
                self.restore.insert(id, self.layout.window(id).geometry());
                self.metrics.to_geometry(desktop, desktop)
            }
        };
        self.layout.set_geometry(id, geometry);
    }

    fn commit_geometry(&mut self, id: WindowIdentifier, geometry: Geometry) {
        self.restore.remove(&id);
        self.layout.update_position_size(
            id,
            geometry.x,
            geometry.y,
            geometry.width,
            geometry.height,
        );
    }

    fn raise(&mut self, id: WindowIdentifier) {
        if self.layout.active_window() != Some(id) {
            self.layout.bring_to_front(id);
        }
    }

    /// Topmost open window covering the cell, if any.
    fn window_at(&self, column: u16, row: u16) -> Option<WindowIdentifier> {
        let desktop = self.areas().1;
        if !rect_contains(desktop, column, row) {
            return None;
        }
        self.layout
            .open_windows()
            .into_iter()
            .rev()
            .find(|id| self.window_rect(*id).contains(column, row))
    }

    fn handle_mouse(&mut self, event: &Event, mouse: &MouseEvent) {
        if let Some(id) = self.grab {
            if let Some(frame) = self.frames.get_mut(&id) {
                match frame.track(mouse, self.metrics) {
                    Some(FrameEvent::Moved(geometry)) | Some(FrameEvent::Resized(geometry)) => {
                        tracing::debug!(window = %id, ?geometry, "window geometry committed");
                        self.commit_geometry(id, geometry);
                    }
                    _ => {}
                }
                if frame_released(mouse) {
                    self.grab = None;
                }
            } else {
                self.grab = None;
            }
            return;
        }

        if matches!(mouse.kind, MouseEventKind::Down(MouseButton::Left)) {
            if self.menu_bar.hit_test_dark_mode(event) {
                self.toggle_dark_mode();
                return;
            }
            if let Some(id) = self.dock.hit_test(event) {
                self.toggle_window(id);
                return;
            }
        }

        let Some(id) = self.window_at(mouse.column, mouse.row) else {
            return;
        };
        let placement = self.placement(id);
        if matches!(mouse.kind, MouseEventKind::Down(MouseButton::Left)) {
            let Some(frame) = self.frames.get_mut(&id) else {
                return;
            };
            let pressed = frame.press(mouse, &placement, self.decorator.as_ref());
            let interacting = frame.is_interacting();
            match pressed {
                FrameEvent::Close | FrameEvent::Minimize => {
                    self.layout.close(id);
                    return;
                }
                FrameEvent::Maximize => {
                    self.raise(id);
                    self.toggle_maximize(id);
                    return;
                }
                _ => {}
            }
            self.raise(id);
            if interacting {
                self.grab = Some(id);
                return;
            }
        }
        self.forward_to_content(id, mouse, &placement);
    }

    fn forward_to_content(
        &mut self,
        id: WindowIdentifier,
        mouse: &MouseEvent,
        placement: &FramePlacement,
    ) {
        let Some(frame) = self.frames.get(&id) else {
            return;
        };
        let Some(local) = frame.content_event(mouse, placement, self.decorator.as_ref()) else {
            return;
        };
        let focused = self.layout.active_window() == Some(id);
        let ctx = ComponentContext::new(focused, Palette::for_mode(self.state.dark_mode()));
        if let Some(panel) = self.panels.get_mut(&id) {
            panel.handle_event(&local, &ctx);
        }
    }

    /// Per-frame housekeeping: clock refresh and background results.
    /// Returns true when something visible changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let mut changed = self.menu_bar.clock_mut().tick(now);
        for panel in self.panels.values_mut() {
            changed |= panel.tick();
        }
        self.drain_requests();
        self.sync_chrome();
        changed
    }

    fn drain_requests(&mut self) {
        let requests: Vec<PanelRequest> = self
            .panels
            .values_mut()
            .flat_map(|panel| panel.take_requests())
            .collect();
        for request in requests {
            match request {
                PanelRequest::OpenUrl(url) => self.platform.open_url(&url),
                PanelRequest::CopyText(text) => self.platform.copy_text(&text),
            }
        }
    }

    fn sync_chrome(&mut self) {
        self.menu_bar.set_title(self.layout.active_window_title());
        self.menu_bar.set_dark_mode(self.state.dark_mode());
        self.dock.set_open(self.layout.open_windows());
        self.dock.set_active(self.layout.active_window());
    }

    pub fn render(&mut self, frame: &mut UiFrame<'_>) {
        self.screen = frame.area();
        self.sync_chrome();
        let palette = Palette::for_mode(self.state.dark_mode());
        let (menu, desktop, dock) = self.areas();
        frame.fill(desktop, ratatui::style::Style::default().bg(palette.desktop_bg));

        let active = self.layout.active_window();
        for id in self.layout.open_windows() {
            let placement = FramePlacement {
                geometry: self.layout.window(id).geometry(),
                desktop,
                metrics: self.metrics,
            };
            let (Some(window), Some(panel)) = (self.frames.get(&id), self.panels.get_mut(&id))
            else {
                continue;
            };
            let ctx = ComponentContext::new(active == Some(id), palette);
            window.render(frame, &placement, self.decorator.as_ref(), panel.as_mut(), &ctx);
        }

        let chrome = ComponentContext::new(false, palette);
        self.menu_bar.render(frame, menu, &chrome);
        self.dock.render(frame, dock, &chrome);
    }
}

fn frame_released(mouse: &MouseEvent) -> bool {
    matches!(mouse.kind, MouseEventKind::Up(_))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{DARK_MODE_KEY, WINDOWS_LAYOUT_KEY};
    use crate::storage::MemoryKeyValueStore;
    use crossterm::event::{KeyCode, KeyModifiers};
    use folio_store::MemoryStore;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Debug, Default, Clone)]
    struct Recorder(Rc<RefCell<Vec<PanelRequest>>>);

    impl Platform for Recorder {
        fn open_url(&mut self, url: &str) {
            self.0.borrow_mut().push(PanelRequest::OpenUrl(url.to_string()));
        }

        fn copy_text(&mut self, text: &str) {
            self.0.borrow_mut().push(PanelRequest::CopyText(text.to_string()));
        }
    }

    type Store = Rc<RefCell<MemoryKeyValueStore>>;

    fn desktop() -> (Desktop<Store>, Store, Recorder) {
        let store: Store = Rc::new(RefCell::new(MemoryKeyValueStore::new()));
        let recorder = Recorder::default();
        let mut desktop = Desktop::new(
            store.clone(),
            Arc::new(MemoryStore::new()),
            CellMetrics::default(),
            Box::new(recorder.clone()),
        );
        desktop.handle_event(&Event::Resize(160, 50));
        (desktop, store, recorder)
    }

    fn key(code: KeyCode, modifiers: KeyModifiers) -> Event {
        Event::Key(KeyEvent::new(code, modifiers))
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn function_keys_toggle_windows_and_title_follows() {
        let (mut desktop, _, _) = desktop();
        desktop.handle_event(&key(KeyCode::F(2), KeyModifiers::NONE));
        desktop.handle_event(&key(KeyCode::F(3), KeyModifiers::NONE));
        assert_eq!(desktop.layout().active_window(), Some(WindowIdentifier::Contact));
        assert_eq!(desktop.menu_title(), "Contact");

        desktop.handle_event(&key(KeyCode::F(3), KeyModifiers::NONE));
        assert_eq!(desktop.menu_title(), "Projects");
    }

    #[test]
    fn ctrl_d_persists_dark_mode() {
        let (mut desktop, store, _) = desktop();
        desktop.handle_event(&key(KeyCode::Char('d'), KeyModifiers::CONTROL));
        assert!(desktop.dark_mode());
        assert_eq!(store.get(DARK_MODE_KEY).as_deref(), Some("true"));
    }

    #[test]
    fn ctrl_q_quits() {
        let (mut desktop, _, _) = desktop();
        let flow = desktop.handle_event(&key(KeyCode::Char('q'), KeyModifiers::CONTROL));
        assert!(matches!(flow, ControlFlow::Quit));
    }

    #[test]
    fn alt_arrows_move_and_resize_by_one_cell() {
        let (mut desktop, _, _) = desktop();
        desktop.handle_event(&key(KeyCode::Right, KeyModifiers::ALT));
        desktop.handle_event(&key(KeyCode::Down, KeyModifiers::ALT | KeyModifiers::SHIFT));
        let about = desktop.layout().window(WindowIdentifier::About);
        assert_eq!((about.x, about.y, about.width, about.height), (110, 80, 800, 620));
    }

    #[test]
    fn maximize_then_restore() {
        let (mut desktop, store, _) = desktop();
        desktop.toggle_maximize(WindowIdentifier::About);
        let about = desktop.layout().window(WindowIdentifier::About);
        // 160 columns by 46 desktop rows.
        assert_eq!((about.x, about.y, about.width, about.height), (0, 0, 1600, 920));
        desktop.toggle_maximize(WindowIdentifier::About);
        let about = desktop.layout().window(WindowIdentifier::About);
        assert_eq!((about.x, about.y, about.width, about.height), (100, 80, 800, 600));
        assert!(store.get(WINDOWS_LAYOUT_KEY).is_some());
    }

    #[test]
    fn red_button_closes_and_keeps_geometry() {
        let (mut desktop, _, _) = desktop();
        let rect = desktop.window_rect(WindowIdentifier::About);
        let header_row = (rect.y + 1) as u16;
        desktop.handle_event(&mouse(
            MouseEventKind::Down(MouseButton::Left),
            (rect.x + 2) as u16,
            header_row,
        ));
        let about = desktop.layout().window(WindowIdentifier::About);
        assert!(!about.is_open);
        assert_eq!((about.x, about.y), (100, 80));
        assert_eq!(desktop.menu_title(), "Portfolio");
    }

    #[test]
    fn pressing_a_background_window_raises_it() {
        let (mut desktop, _, _) = desktop();
        desktop.handle_event(&key(KeyCode::F(2), KeyModifiers::NONE));
        let before = desktop.layout().window(WindowIdentifier::Projects).z_index;
        // About sits at cells (10, 5); Projects starts at (14, 7), so the
        // left column of About stays uncovered.
        let about = desktop.window_rect(WindowIdentifier::About);
        desktop.handle_event(&mouse(
            MouseEventKind::Down(MouseButton::Left),
            (about.x + 1) as u16,
            (about.y + 3) as u16,
        ));
        assert_eq!(desktop.layout().active_window(), Some(WindowIdentifier::About));

        // Pressing the frontmost window again does not bump its z-index.
        let z = desktop.layout().window(WindowIdentifier::About).z_index;
        let about = desktop.window_rect(WindowIdentifier::About);
        desktop.handle_event(&mouse(
            MouseEventKind::Down(MouseButton::Left),
            (about.x + 1) as u16,
            (about.y + 3) as u16,
        ));
        assert_eq!(desktop.layout().window(WindowIdentifier::About).z_index, z);
        assert!(z > before);
    }

    #[test]
    fn f4_cycles_open_windows() {
        let (mut desktop, _, _) = desktop();
        desktop.handle_event(&key(KeyCode::F(2), KeyModifiers::NONE));
        desktop.handle_event(&key(KeyCode::F(4), KeyModifiers::NONE));
        assert_eq!(desktop.layout().active_window(), Some(WindowIdentifier::About));
        desktop.handle_event(&key(KeyCode::F(4), KeyModifiers::NONE));
        assert_eq!(desktop.layout().active_window(), Some(WindowIdentifier::Projects));
    }

    #[test]
    fn far_away_persisted_window_renders_without_overflow() {
        let raw = r#"{"about":{"isOpen":true,"x":-2147483648,"y":2147483647,"width":800,"height":600,"zIndex":1}}"#;
        let store: Store = Rc::new(RefCell::new(
            MemoryKeyValueStore::new().with_entry(WINDOWS_LAYOUT_KEY, raw),
        ));
        let mut desktop = Desktop::new(
            store,
            Arc::new(MemoryStore::new()),
            CellMetrics::new(1, 1),
            Box::new(Recorder::default()),
        );
        let area = Rect::new(0, 0, 80, 24);
        let mut buffer = ratatui::buffer::Buffer::empty(area);
        desktop.render(&mut UiFrame::from_parts(area, &mut buffer));

        assert_eq!(desktop.layout().window(WindowIdentifier::About).y, i32::MAX);
        assert!(desktop.window_rect(WindowIdentifier::About).visible_in(area).is_none());
        desktop.handle_event(&mouse(MouseEventKind::Down(MouseButton::Left), 10, 10));
        assert_eq!(desktop.layout().window(WindowIdentifier::About).x, i32::MIN);
    }

    #[test]
    fn panel_requests_reach_the_platform() {
        let (mut desktop, _, recorder) = desktop();
        desktop.handle_event(&key(KeyCode::F(3), KeyModifiers::NONE));
        desktop.handle_event(&key(KeyCode::Char('e'), KeyModifiers::CONTROL));
        assert_eq!(
            recorder.0.borrow().as_slice(),
            &[PanelRequest::CopyText(crate::constants::CONTACT_EMAIL.to_string())]
        );
    }
}
