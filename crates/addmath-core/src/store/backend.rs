//! Raw document backends.

use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};

use super::StoreError;

/// Somewhere a single serialised document can be kept.
///
/// Every backend is a [`StateStore`](super::StateStore) through the blanket
/// impl, which handles parsing and migration.
pub trait DocumentBackend {
    /// The stored document, or `None` when nothing has been written.
    fn read(&self) -> Result<Option<String>, StoreError>;

    fn write(&self, raw: &str) -> Result<(), StoreError>;
}

/// In-memory backend for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    raw: RefCell<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing raw document.
    pub fn with_document(raw: impl Into<String>) -> Self {
        Self {
            raw: RefCell::new(Some(raw.into())),
        }
    }

    pub fn raw(&self) -> Option<String> {
        self.raw.borrow().clone()
    }
}

impl DocumentBackend for MemoryStore {
    fn read(&self) -> Result<Option<String>, StoreError> {
        Ok(self.raw.borrow().clone())
    }

    fn write(&self, raw: &str) -> Result<(), StoreError> {
        *self.raw.borrow_mut() = Some(raw.to_string());
        Ok(())
    }
}

/// JSON file backend.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<dir>/addmathai_data.json`
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref().join(format!("{}.json", super::STORAGE_KEY)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DocumentBackend for FileStore {
    fn read(&self) -> Result<Option<String>, StoreError> {
        if !self.path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(&self.path)?))
    }

    fn write(&self, raw: &str) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, raw)?;
        Ok(())
    }
}
