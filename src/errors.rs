//! Hard failures. Only the backing document can fail this way; everything
//! else is a [`Diagnostic`](crate::Diagnostic).

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type for operations touching the backing document.
pub type PrefsResult<T> = Result<T, PrefsError>;

#[derive(Debug, Error)]
pub enum PrefsError {
    #[error("File does not exist: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("I/O error on {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
