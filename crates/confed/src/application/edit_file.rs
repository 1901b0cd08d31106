//! EditFileUseCase: read a config file, edit one setting, deliver the result.
//!
//! The use case is the only place where the three output modes differ:
//!
//! - [`OutputMode::Stdout`] – return the updated content for printing.
//! - [`OutputMode::InPlace`] – write the updated content back, but only if it
//!   actually changed.
//! - [`OutputMode::Test`] – return a unified diff and write nothing.
//!
//! The core edit either succeeds completely or fails before anything is
//! written, so a failed edit never leaves the file half-modified.

use std::path::{Path, PathBuf};

use confed_core::{update_setting_with_plan, EditError, GrammarConfig, OperationRequest};
use thiserror::Error;
use tracing::{debug, info};

use super::diff::unified_diff;

/// Errors raised by a [`ConfigFileStore`].
#[derive(Debug, Error)]
pub enum StoreError {
    /// A file system I/O error occurred.
    #[error("I/O error accessing {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file does not hold UTF-8 text.
    #[error("{path} is not valid UTF-8 text")]
    NotText { path: PathBuf },

    /// The store cannot write to this location (e.g. stdin).
    #[error("cannot write to {path}")]
    ReadOnly { path: PathBuf },
}

/// Source and sink of config file lines.
///
/// Lines keep their own terminators, so concatenating what `read_lines`
/// returns reproduces the file exactly.
pub trait ConfigFileStore {
    /// Reads the whole file as lines.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the file cannot be read.
    fn read_lines(&self, path: &Path) -> Result<Vec<String>, StoreError>;

    /// Replaces the whole file with `lines`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the file cannot be written.
    fn write_lines(&self, path: &Path, lines: &[String]) -> Result<(), StoreError>;
}

/// Error type for the edit-file use case.
#[derive(Debug, Error)]
pub enum EditFileError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Edit(#[from] EditError),
}

/// Where the result of an edit goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Print the updated file.
    #[default]
    Stdout,
    /// Rewrite the file.
    InPlace,
    /// Print a diff of the change, write nothing.
    Test,
}

/// Everything needed to run one edit.
#[derive(Debug, Clone)]
pub struct EditFileRequest {
    pub path: PathBuf,
    pub grammar: GrammarConfig,
    pub operation: OperationRequest,
    pub mode: OutputMode,
}

/// Result of running the use case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditFileOutcome {
    /// The updated file content, for [`OutputMode::Stdout`].
    Rendered(String),
    /// The file was rewritten (`changed`) or left alone, for [`OutputMode::InPlace`].
    Written { changed: bool },
    /// A unified diff (empty when nothing changed), for [`OutputMode::Test`].
    Diff(String),
}

/// Applies one setting edit to one file through a [`ConfigFileStore`].
#[derive(Debug)]
pub struct EditFileUseCase<S> {
    store: S,
}

impl<S: ConfigFileStore> EditFileUseCase<S> {
    /// Creates the use case over `store`.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Returns the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Runs the edit described by `request`.
    ///
    /// # Errors
    ///
    /// Returns [`EditFileError::Store`] if the file cannot be read or written
    /// and [`EditFileError::Edit`] if the edit itself is rejected.
    pub fn execute(&self, request: &EditFileRequest) -> Result<EditFileOutcome, EditFileError> {
        let original = self.store.read_lines(&request.path)?;
        debug!(path = %request.path.display(), lines = original.len(), "config file read");

        let outcome = update_setting_with_plan(&original, &request.grammar, &request.operation)?;
        info!(
            path = %request.path.display(),
            setting = %request.operation.setting,
            "{}",
            outcome.plan.describe()
        );
        let changed = outcome.lines != original;

        match request.mode {
            OutputMode::Stdout => Ok(EditFileOutcome::Rendered(outcome.lines.concat())),
            OutputMode::InPlace => {
                if changed {
                    self.store.write_lines(&request.path, &outcome.lines)?;
                    info!(path = %request.path.display(), "config file updated");
                } else {
                    info!(path = %request.path.display(), "config file already up to date");
                }
                Ok(EditFileOutcome::Written { changed })
            }
            OutputMode::Test => {
                let label = request.path.display().to_string();
                Ok(EditFileOutcome::Diff(unified_diff(
                    &label,
                    &original.concat(),
                    &outcome.lines.concat(),
                )))
            }
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
