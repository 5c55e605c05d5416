use std::sync::Mutex;

use crate::error::{StoreError, StoreResult};
use crate::model::{ContactMessage, DocumentId, Project, StoredContactMessage};
use crate::service::{CONTACT_MESSAGES_TABLE, DataService, now_millis, validate_contact_message};

#[derive(Debug, Default)]
struct Tables {
    projects: Vec<Project>,
    contact_messages: Vec<StoredContactMessage>,
}

/// In-process store for tests and embedding; nothing is written to disk.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_projects(projects: Vec<Project>) -> Self {
        Self {
            tables: Mutex::new(Tables {
                projects,
                contact_messages: Vec::new(),
            }),
        }
    }

    pub fn contact_messages(&self) -> StoreResult<Vec<StoredContactMessage>> {
        let tables = self.tables.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(tables.contact_messages.clone())
    }
}

impl DataService for MemoryStore {
    fn list_projects(&self) -> StoreResult<Vec<Project>> {
        let tables = self.tables.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(tables.projects.clone())
    }

    fn add_contact_message(&self, message: ContactMessage) -> StoreResult<DocumentId> {
        validate_contact_message(&message)?;
        let mut tables = self.tables.lock().map_err(|_| StoreError::Poisoned)?;
        let id = DocumentId::new(
            CONTACT_MESSAGES_TABLE,
            tables.contact_messages.len() as u64 + 1,
        );
        tables.contact_messages.push(StoredContactMessage {
            id: id.clone(),
            creation_time: now_millis(),
            message,
        });
        tracing::debug!(id = %id, "stored contact message");
        Ok(id)
    }
}
