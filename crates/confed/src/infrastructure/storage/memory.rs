//! In-memory config file store for testing.
//!
//! Lets tests run the edit-file use case without touching the file system.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

use confed_core::split_lines;

use crate::application::edit_file::{ConfigFileStore, StoreError};

/// A [`ConfigFileStore`] backed by a map of path to content.
#[derive(Debug, Default)]
pub struct MemoryConfigFileStore {
    files: RefCell<HashMap<PathBuf, String>>,
    writes: Cell<usize>,
}

impl MemoryConfigFileStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a file.
    pub fn insert(&self, path: impl Into<PathBuf>, content: impl Into<String>) {
        self.files.borrow_mut().insert(path.into(), content.into());
    }

    /// Returns the current content of a file.
    pub fn content(&self, path: impl AsRef<Path>) -> Option<String> {
        self.files.borrow().get(path.as_ref()).cloned()
    }

    /// Returns how many times [`ConfigFileStore::write_lines`] was called.
    pub fn write_count(&self) -> usize {
        self.writes.get()
    }
}

impl ConfigFileStore for MemoryConfigFileStore {
    fn read_lines(&self, path: &Path) -> Result<Vec<String>, StoreError> {
        self.files
            .borrow()
            .get(path)
            .map(|content| split_lines(content))
            .ok_or_else(|| StoreError::Io {
                path: path.to_path_buf(),
                source: io::Error::new(io::ErrorKind::NotFound, "no such file in memory store"),
            })
    }

    fn write_lines(&self, path: &Path, lines: &[String]) -> Result<(), StoreError> {
        self.files
            .borrow_mut()
            .insert(path.to_path_buf(), lines.concat());
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }
}
