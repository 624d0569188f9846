//! A line-oriented preferences / savegame store.
//!
//! ```text
//! :PlayerData
//! name Bob        # comments run to the end of the line
//! level 12
//! :World
//! is_raining True
//! ```
//!
//! Documents are loaded into a [`Preferences`] store, read into serde
//! records one table at a time, written back and saved.

// Module Declarations
mod backend; // Where the document text lives
mod constants; // Characters of Interest
mod diagnostics; // Recoverable problems, reported instead of raised
mod errors;
mod parserline; // Comment stripping and line classification
mod preferences; // The table store
mod prefparse; // The document parser
mod preftypes; // Tables and pairs
mod prefwrite; // Tables back to text
mod projector; // Records <-> tables

// Imports
use std::path::PathBuf;

pub use backend::{FileBackend, MemoryBackend, TextBackend};
pub use diagnostics::{Diagnostic, DiagnosticKind, DiagnosticSink, Severity, StderrSink};
pub use errors::{PrefsError, PrefsResult};
pub use parserline::{LineKind, ParserLine};
pub use preferences::Preferences;
pub use prefparse::{parse_document, PrefParser};
pub use preftypes::{FieldKind, Table, TableMap, VariablePair};
pub use prefwrite::render_tables;
pub use projector::table_name_of;

/// Opens and loads the document at `path`, reporting problems to stderr.
pub fn load(path: impl Into<PathBuf>) -> PrefsResult<Preferences> {
    let mut prefs = Preferences::new(path);
    prefs.load()?;
    Ok(prefs)
}
