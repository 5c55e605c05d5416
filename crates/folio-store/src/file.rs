use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{StoreError, StoreResult};
use crate::model::{ContactMessage, DocumentId, Project, StoredContactMessage};
use crate::service::{CONTACT_MESSAGES_TABLE, DataService, now_millis, validate_contact_message};

const PROJECTS_FILE: &str = "projects.json";
const CONTACT_MESSAGES_FILE: &str = "contact_messages.json";

/// Store keeping each table as a JSON array file inside one directory.
///
/// Reads go to disk on every call so edits to `projects.json` show up on the
/// next query. Writes are serialized through `write_lock` and land via a
/// temp file plus rename so a crash never leaves a truncated table behind.
#[derive(Debug)]
pub struct JsonFileStore {
    dir: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    /// Open (creating if needed) the store in `dir`. When the projects table
    /// does not exist yet it is seeded with `seed`.
    pub fn open(dir: impl Into<PathBuf>, seed: &[Project]) -> StoreResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|err| StoreError::io(&dir, err))?;
        let store = Self {
            dir,
            write_lock: Mutex::new(()),
        };
        let projects = store.projects_path();
        if !projects.exists() {
            tracing::info!(
                path = %projects.display(),
                count = seed.len(),
                "seeding projects table"
            );
            write_table(&projects, seed)?;
        }
        Ok(store)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn projects_path(&self) -> PathBuf {
        self.dir.join(PROJECTS_FILE)
    }

    pub fn contact_messages_path(&self) -> PathBuf {
        self.dir.join(CONTACT_MESSAGES_FILE)
    }

    pub fn contact_messages(&self) -> StoreResult<Vec<StoredContactMessage>> {
        read_table(&self.contact_messages_path())
    }
}

impl DataService for JsonFileStore {
    fn list_projects(&self) -> StoreResult<Vec<Project>> {
        read_table(&self.projects_path())
    }

    fn add_contact_message(&self, message: ContactMessage) -> StoreResult<DocumentId> {
        validate_contact_message(&message)?;
        let _guard = self.write_lock.lock().map_err(|_| StoreError::Poisoned)?;
        let path = self.contact_messages_path();
        let mut messages: Vec<StoredContactMessage> = read_table(&path)?;
        let id = DocumentId::new(CONTACT_MESSAGES_TABLE, messages.len() as u64 + 1);
        messages.push(StoredContactMessage {
            id: id.clone(),
            creation_time: now_millis(),
            message,
        });
        write_table(&path, &messages)?;
        tracing::info!(id = %id, "stored contact message");
        Ok(id)
    }
}

/// A missing table reads as empty.
fn read_table<T: DeserializeOwned>(path: &Path) -> StoreResult<Vec<T>> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(err) => return Err(StoreError::io(path, err)),
    };
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(&raw).map_err(|err| StoreError::json(path, err))
}

fn write_table<T: Serialize>(path: &Path, rows: &[T]) -> StoreResult<()> {
    let body = serde_json::to_string_pretty(rows).map_err(|err| StoreError::json(path, err))?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, body).map_err(|err| StoreError::io(&tmp, err))?;
    fs::rename(&tmp, path).map_err(|err| StoreError::io(path, err))
}
