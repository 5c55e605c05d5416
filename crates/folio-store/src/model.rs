use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A portfolio entry. `links` maps an icon name (for example `FaGithub`) to
/// the URL the icon points at, in the order the document lists them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client: Option<String>,
    #[serde(default)]
    pub links: IndexMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactMessage {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            message: message.into(),
        }
    }
}

/// Opaque identifier handed back by inserts.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(String);

impl DocumentId {
    pub(crate) fn new(table: &str, sequence: u64) -> Self {
        Self(format!("{table}:{sequence:06}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A contact message as persisted, with its system fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredContactMessage {
    #[serde(rename = "_id")]
    pub id: DocumentId,
    #[serde(rename = "_creationTime")]
    pub creation_time: u64,
    #[serde(flatten)]
    pub message: ContactMessage,
}
