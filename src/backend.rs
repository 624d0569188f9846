//! Where a preferences document lives. The store only ever reads or writes
//! the whole text at once.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::constants::MEMORY_SOURCE;
use crate::errors::{PrefsError, PrefsResult};

/// Whole-text read/write access to a backing document.
pub trait TextBackend {
    /// Names the document in diagnostics.
    fn source(&self) -> String;
    fn read_all(&self) -> PrefsResult<String>;
    fn write_all(&mut self, text: &str) -> PrefsResult<()>;
}

/// A document on disk. No handle is held between calls.
#[derive(Debug, Clone)]
pub struct FileBackend {
    path: PathBuf,
}
impl FileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        self.path.as_path()
    }

    fn io_error(&self, source: std::io::Error) -> PrefsError {
        PrefsError::Io {
            path: self.path.clone(),
            source,
        }
    }
}
impl TextBackend for FileBackend {
    fn source(&self) -> String {
        self.path.display().to_string()
    }

    fn read_all(&self) -> PrefsResult<String> {
        match fs::read_to_string(&self.path) {
            Ok(text) => Ok(text),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                Err(PrefsError::FileNotFound(self.path.clone()))
            }
            Err(err) => Err(self.io_error(err)),
        }
    }

    fn write_all(&mut self, text: &str) -> PrefsResult<()> {
        fs::write(&self.path, text).map_err(|err| self.io_error(err))
    }
}

/// A document held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    text: String,
}
impl MemoryBackend {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// The current document, i.e. the last text saved.
    pub fn contents(&self) -> &str {
        self.text.as_str()
    }
}
impl TextBackend for MemoryBackend {
    fn source(&self) -> String {
        MEMORY_SOURCE.to_string()
    }

    fn read_all(&self) -> PrefsResult<String> {
        Ok(self.text.clone())
    }

    fn write_all(&mut self, text: &str) -> PrefsResult<()> {
        self.text = text.to_string();
        Ok(())
    }
}
