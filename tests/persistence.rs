use std::cell::RefCell;
use std::fs;
use std::path::Path;
use std::rc::Rc;
use std::sync::Arc;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use folio_store::{DataService, JsonFileStore};
use term_folio::assets;
use term_folio::desktop::{Desktop, Platform};
use term_folio::storage::FileKeyValueStore;
use term_folio::window::{CellMetrics, WindowIdentifier};

struct NoPlatform;

impl Platform for NoPlatform {
    fn open_url(&mut self, _url: &str) {}
    fn copy_text(&mut self, _text: &str) {}
}

fn open_desktop(path: &Path) -> FileDesktop {
    let store = Rc::new(RefCell::new(FileKeyValueStore::open(path)));
    let service: Arc<dyn DataService> = Arc::new(folio_store::MemoryStore::new());
    let mut desktop = Desktop::new(store, service, CellMetrics::default(), Box::new(NoPlatform));
    desktop.handle_event(&Event::Resize(120, 40));
    desktop
}

type FileDesktop = Desktop<Rc<RefCell<FileKeyValueStore>>>;

fn press(desktop: &mut FileDesktop, code: KeyCode, modifiers: KeyModifiers) {
    desktop.handle_event(&Event::Key(KeyEvent::new(code, modifiers)));
}

#[test]
fn layout_and_dark_mode_survive_a_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state").join("storage.json");

    {
        let mut desktop = open_desktop(&path);
        press(&mut desktop, KeyCode::F(3), KeyModifiers::NONE);
        press(&mut desktop, KeyCode::Left, KeyModifiers::ALT);
        press(&mut desktop, KeyCode::Char('d'), KeyModifiers::CONTROL);
    }

    let desktop = open_desktop(&path);
    assert!(desktop.dark_mode());
    let contact = desktop.layout().window(WindowIdentifier::Contact);
    assert!(contact.is_open);
    assert_eq!((contact.x, contact.y), (170, 160));
    assert_eq!(desktop.layout().active_window(), Some(WindowIdentifier::Contact));
    assert_eq!(desktop.menu_title(), "Contact");
}

#[test]
fn corrupt_storage_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storage.json");
    fs::write(&path, "{ not json").unwrap();

    let desktop = open_desktop(&path);
    assert!(!desktop.dark_mode());
    assert_eq!(desktop.layout().open_windows(), vec![WindowIdentifier::About]);
}

#[test]
fn malformed_layout_entry_is_replaced_by_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storage.json");
    fs::write(&path, r#"{"windowsLayout": "[1, 2, 3]", "darkMode": "true"}"#).unwrap();

    let desktop = open_desktop(&path);
    assert!(desktop.dark_mode());
    let about = desktop.layout().window(WindowIdentifier::About);
    assert_eq!((about.x, about.y, about.width, about.height), (100, 80, 800, 600));
}

#[test]
fn seeded_data_directory_serves_bundled_projects() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::open(dir.path(), &assets::seed_projects()).unwrap();
    let projects = store.list_projects().unwrap();
    assert!(!projects.is_empty());
    assert_eq!(projects, assets::seed_projects());

    let reopened = JsonFileStore::open(dir.path(), &[]).unwrap();
    assert_eq!(reopened.list_projects().unwrap(), projects);
}
