use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::{StoreError, StoreResult};
use crate::model::{ContactMessage, DocumentId, Project};

pub(crate) const CONTACT_MESSAGES_TABLE: &str = "contactMessages";

/// The query/mutation surface the desktop talks to.
///
/// Implementations are shared with the background submission thread, hence
/// the `Send + Sync` bound.
pub trait DataService: Send + Sync {
    /// All projects, in the order they are stored.
    fn list_projects(&self) -> StoreResult<Vec<Project>>;

    /// Insert a contact message and return its identifier. Fails on invalid
    /// arguments as well as on storage errors.
    fn add_contact_message(&self, message: ContactMessage) -> StoreResult<DocumentId>;
}

/// Argument validation shared by every store implementation.
pub fn validate_contact_message(message: &ContactMessage) -> StoreResult<()> {
    if message.name.trim().is_empty() {
        return Err(StoreError::Validation {
            field: "name",
            reason: "must not be empty",
        });
    }
    let email = message.email.trim();
    if email.is_empty() {
        return Err(StoreError::Validation {
            field: "email",
            reason: "must not be empty",
        });
    }
    let valid_email = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && !email.chars().any(char::is_whitespace)
        }
        None => false,
    };
    if !valid_email {
        return Err(StoreError::Validation {
            field: "email",
            reason: "must look like name@domain",
        });
    }
    if message.message.trim().is_empty() {
        return Err(StoreError::Validation {
            field: "message",
            reason: "must not be empty",
        });
    }
    Ok(())
}

pub(crate) fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
