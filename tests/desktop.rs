use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use folio_store::{MemoryStore, Project};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use term_folio::constants::{DARK_MODE_KEY, WINDOWS_LAYOUT_KEY};
use term_folio::desktop::{Desktop, Platform};
use term_folio::storage::{KeyValueStore, MemoryKeyValueStore};
use term_folio::ui::UiFrame;
use term_folio::window::{CellMetrics, WindowIdentifier, WindowsLayout};

#[derive(Clone, Default)]
struct Opened(Rc<RefCell<Vec<String>>>);

impl Platform for Opened {
    fn open_url(&mut self, url: &str) {
        self.0.borrow_mut().push(url.to_string());
    }

    fn copy_text(&mut self, _text: &str) {}
}

type Store = Rc<RefCell<MemoryKeyValueStore>>;

struct Harness {
    desktop: Desktop<Store>,
    store: Store,
    opened: Opened,
    buffer: Buffer,
}

impl Harness {
    fn new(projects: Vec<Project>) -> Self {
        let store: Store = Rc::new(RefCell::new(MemoryKeyValueStore::new()));
        let opened = Opened::default();
        let desktop = Desktop::new(
            store.clone(),
            Arc::new(MemoryStore::with_projects(projects)),
            CellMetrics::default(),
            Box::new(opened.clone()),
        );
        let mut harness = Self {
            desktop,
            store,
            opened,
            buffer: Buffer::empty(Rect::new(0, 0, 120, 40)),
        };
        harness.draw();
        harness
    }

    fn draw(&mut self) {
        let area = self.buffer.area;
        let mut frame = UiFrame::from_parts(area, &mut self.buffer);
        self.desktop.render(&mut frame);
    }

    fn send(&mut self, event: Event) {
        self.desktop.handle_event(&event);
        self.draw();
    }

    fn mouse(&mut self, kind: MouseEventKind, column: u16, row: u16) {
        self.send(Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }));
    }

    fn click(&mut self, column: u16, row: u16) {
        self.mouse(MouseEventKind::Down(MouseButton::Left), column, row);
        self.mouse(MouseEventKind::Up(MouseButton::Left), column, row);
    }

    fn key(&mut self, code: KeyCode) {
        self.send(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)));
    }

    fn row(&self, y: u16) -> String {
        (0..self.buffer.area.width)
            .map(|x| self.buffer[(x, y)].symbol().to_string())
            .collect()
    }

    /// First (column, row) where `needle` is drawn.
    fn find(&self, needle: &str) -> Option<(u16, u16)> {
        (0..self.buffer.area.height).find_map(|y| {
            let row = self.row(y);
            row.find(needle)
                .map(|byte| (row[..byte].chars().count() as u16, y))
        })
    }

    fn persisted_layout(&self) -> WindowsLayout {
        let raw = self.store.get(WINDOWS_LAYOUT_KEY).expect("layout persisted");
        WindowsLayout::parse(&raw).expect("persisted layout parses")
    }
}

fn project(title: &str, client: Option<&str>, links: &[(&str, &str)]) -> Project {
    Project {
        title: title.to_string(),
        description: format!("About {title}"),
        client: client.map(str::to_string),
        links: links
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
    }
}

#[test]
fn dragging_the_header_commits_geometry_on_release() {
    let mut h = Harness::new(Vec::new());
    // About: 800x600 at (100, 80) is columns 10..90, rows 5..35; header row 6.
    h.mouse(MouseEventKind::Down(MouseButton::Left), 40, 6);
    h.mouse(MouseEventKind::Drag(MouseButton::Left), 45, 9);
    assert_eq!(
        h.desktop.layout().window(WindowIdentifier::About).x,
        100,
        "geometry only commits on release"
    );
    h.mouse(MouseEventKind::Up(MouseButton::Left), 45, 9);

    let about = h.desktop.layout().window(WindowIdentifier::About);
    assert_eq!((about.x, about.y, about.width, about.height), (150, 140, 800, 600));
    assert_eq!(h.persisted_layout().window(WindowIdentifier::About), about);
}

#[test]
fn resizing_from_the_corner_stops_at_the_minimum() {
    let mut h = Harness::new(Vec::new());
    // Bottom-right corner of About is (89, 34).
    h.mouse(MouseEventKind::Down(MouseButton::Left), 89, 34);
    h.mouse(MouseEventKind::Up(MouseButton::Left), 20, 10);
    let about = h.desktop.layout().window(WindowIdentifier::About);
    assert_eq!((about.x, about.y, about.width, about.height), (100, 80, 400, 300));
}

#[test]
fn dock_clicks_toggle_windows() {
    let mut h = Harness::new(Vec::new());
    let (col, row) = h.find("F3 Contact").expect("dock item drawn");
    h.click(col, row);
    assert!(h.desktop.layout().window(WindowIdentifier::Contact).is_open);
    assert_eq!(h.desktop.menu_title(), "Contact");
    assert!(h.row(0).starts_with(" Contact"));

    h.click(col, row);
    assert!(!h.desktop.layout().window(WindowIdentifier::Contact).is_open);
    assert_eq!(h.desktop.menu_title(), "About");
}

#[test]
fn menu_toggle_switches_and_persists_dark_mode() {
    let mut h = Harness::new(Vec::new());
    let (col, row) = h.find("[☀ light]").expect("toggle drawn");
    h.click(col + 1, row);
    assert!(h.desktop.dark_mode());
    assert_eq!(h.store.get(DARK_MODE_KEY).as_deref(), Some("true"));
    assert!(h.find("[☾ dark]").is_some());
}

#[test]
fn clicking_a_project_link_opens_it() {
    let mut h = Harness::new(vec![
        project("Portfolio", Some("Acme"), &[("FaGithub", "https://github.com/acme/site")]),
        project("Todo App", None, &[("FaGlobe", "https://todo.example")]),
    ]);
    h.key(KeyCode::F(2));
    assert!(h.find("Acme").is_some());
    assert!(h.find("Personal").is_some());

    let (col, row) = h.find("https://todo.example").expect("link drawn");
    h.click(col, row);
    assert_eq!(h.opened.0.borrow().as_slice(), &["https://todo.example".to_string()]);

    h.key(KeyCode::Up);
    h.key(KeyCode::Enter);
    assert_eq!(
        h.opened.0.borrow().last().map(String::as_str),
        Some("https://github.com/acme/site")
    );
}

#[test]
fn contact_form_submits_from_the_keyboard() {
    let store = Arc::new(MemoryStore::new());
    let kv: Store = Rc::new(RefCell::new(MemoryKeyValueStore::new()));
    let mut desktop = Desktop::new(
        kv,
        store.clone(),
        CellMetrics::default(),
        Box::new(Opened::default()),
    );
    desktop.handle_event(&Event::Resize(120, 40));
    desktop.handle_event(&Event::Key(KeyEvent::new(KeyCode::F(3), KeyModifiers::NONE)));

    let type_text = |desktop: &mut Desktop<Store>, text: &str| {
        for ch in text.chars() {
            desktop.handle_event(&Event::Key(KeyEvent::new(KeyCode::Char(ch), KeyModifiers::NONE)));
        }
    };
    type_text(&mut desktop, "Ada");
    desktop.handle_event(&Event::Key(KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE)));
    type_text(&mut desktop, "ada@example.com");
    desktop.handle_event(&Event::Key(KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE)));
    type_text(&mut desktop, "Hello!");
    desktop.handle_event(&Event::Key(KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL)));

    let deadline = std::time::Instant::now() + std::time::Duration::from_secs(5);
    while store.contact_messages().unwrap().is_empty() {
        assert!(std::time::Instant::now() < deadline, "message never stored");
        std::thread::sleep(std::time::Duration::from_millis(5));
    }
    let stored = &store.contact_messages().unwrap()[0];
    assert_eq!(stored.message.name, "Ada");
    assert_eq!(stored.message.email, "ada@example.com");
    assert_eq!(stored.message.message, "Hello!");
}
