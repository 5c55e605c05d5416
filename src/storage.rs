//! String-keyed, string-valued persistent storage.
//!
//! The desktop keeps two blobs here (see [`crate::constants::DARK_MODE_KEY`]
//! and [`crate::constants::WINDOWS_LAYOUT_KEY`]). The on-disk flavour stores
//! every key in one JSON object file; callers treat writes as fire-and-forget
//! and only log failures.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to encode storage: {0}")]
    Encode(#[from] serde_json::Error),
}

pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: String) -> Result<(), StorageError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &mut T {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StorageError> {
        (**self).set(key, value)
    }
}

/// Lets several owners on the UI thread share one store.
impl<T: KeyValueStore + ?Sized> KeyValueStore for Rc<RefCell<T>> {
    fn get(&self, key: &str) -> Option<String> {
        self.borrow().get(key)
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StorageError> {
        self.borrow_mut().set(key, value)
    }
}

#[derive(Debug, Default, Clone)]
pub struct MemoryKeyValueStore {
    entries: BTreeMap<String, String>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(mut self, key: &str, value: impl Into<String>) -> Self {
        self.entries.insert(key.to_string(), value.into());
        self
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }
}

/// Key-value store persisted as a single JSON object file.
#[derive(Debug)]
pub struct FileKeyValueStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileKeyValueStore {
    /// Load `path`. A missing or unreadable file starts an empty store; the
    /// file is (re)created on the first write.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|err| {
                tracing::warn!(
                    path = %path.display(),
                    error = %err,
                    "ignoring unparseable storage file"
                );
                BTreeMap::new()
            }),
            Err(err) if err.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "storage file unreadable");
                BTreeMap::new()
            }
        };
        Self { path, entries }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<(), StorageError> {
        let body = serde_json::to_string_pretty(&self.entries)?;
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| StorageError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, body).map_err(|source| StorageError::Write {
            path: tmp.clone(),
            source,
        })?;
        fs::rename(&tmp, &self.path).map_err(|source| StorageError::Write {
            path: self.path.clone(),
            source,
        })
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StorageError> {
        if self.entries.get(key) == Some(&value) {
            return Ok(());
        }
        self.entries.insert(key.to_string(), value);
        self.flush()
    }
}
