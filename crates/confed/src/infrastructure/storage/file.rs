//! File system config store.
//!
//! The path `-` reads standard input; it cannot be written.

use std::io::{self, Read};
use std::path::{Path, PathBuf};

use confed_core::split_lines;

use crate::application::edit_file::{ConfigFileStore, StoreError};

/// Path that stands for standard input.
pub const STDIN_PATH: &str = "-";

/// Returns `true` if `path` names standard input.
pub fn is_stdin(path: &Path) -> bool {
    path.as_os_str() == STDIN_PATH
}

/// A [`ConfigFileStore`] over real files.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsConfigFileStore;

impl FsConfigFileStore {
    pub fn new() -> Self {
        Self
    }
}

fn io_error(path: &Path) -> impl FnOnce(io::Error) -> StoreError + '_ {
    move |source| {
        if source.kind() == io::ErrorKind::InvalidData {
            StoreError::NotText {
                path: path.to_path_buf(),
            }
        } else {
            StoreError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    }
}

impl ConfigFileStore for FsConfigFileStore {
    fn read_lines(&self, path: &Path) -> Result<Vec<String>, StoreError> {
        let content = if is_stdin(path) {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf).map_err(io_error(path))?;
            buf
        } else {
            std::fs::read_to_string(path).map_err(io_error(path))?
        };
        Ok(split_lines(&content))
    }

    fn write_lines(&self, path: &Path, lines: &[String]) -> Result<(), StoreError> {
        if is_stdin(path) {
            return Err(StoreError::ReadOnly {
                path: PathBuf::from(STDIN_PATH),
            });
        }
        std::fs::write(path, lines.concat()).map_err(io_error(path))
    }
}
