//! The table store.
//!
//! Typical use mirrors a savegame: [`load`](Preferences::load) once, let
//! each owner [`read_table`](Preferences::read_table) its own record, later
//! [`write_table`](Preferences::write_table) the records back and
//! [`save`](Preferences::save).
//!
//! Reading a table consumes it, so each table can be read once per load.
//! Saving empties the store, so every table has to be written again before
//! the next save.

// stdlib imports
use std::path::PathBuf;
// third-party imports
use serde::{de::DeserializeOwned, Serialize};
// internal imports
use crate::backend::{FileBackend, MemoryBackend, TextBackend};
use crate::diagnostics::{DiagnosticKind, DiagnosticSink, Reporter, StderrSink};
use crate::errors::PrefsResult;
use crate::prefparse::parse_document;
use crate::preftypes::{Table, TableMap};
use crate::prefwrite::render_tables;
use crate::projector::{project_from, project_into, table_name_of};

mod tests;

/// In-memory tables of one backing document.
///
/// Not synchronized; share it behind a lock if several threads need it.
#[derive(Debug)]
pub struct Preferences<B: TextBackend = FileBackend, S: DiagnosticSink = StderrSink> {
    tables: TableMap,
    backend: B,
    sink: S,
}

impl Preferences {
    /// A store backed by the file at `path`, reporting to standard error.
    /// Nothing is read until [`load`](Self::load).
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_backend(FileBackend::new(path), StderrSink)
    }
}

impl Preferences<MemoryBackend> {
    pub fn in_memory(text: impl Into<String>) -> Self {
        Self::with_backend(MemoryBackend::new(text), StderrSink)
    }
}

impl<B: TextBackend, S: DiagnosticSink> Preferences<B, S> {
    pub fn with_backend(backend: B, sink: S) -> Self {
        Self {
            tables: TableMap::new(),
            backend,
            sink,
        }
    }

    ////////////////
    // Whole-document
    ////////////////

    /// Reads the backing document, replacing everything in the store.
    ///
    /// Only a failure to read the document is an error. Malformed lines are
    /// reported to the sink and skipped.
    pub fn load(&mut self) -> PrefsResult<()> {
        let text = self.backend.read_all()?;
        self.load_str(&text);
        Ok(())
    }

    /// Like [`load`](Self::load), from text already in hand.
    pub fn load_str(&mut self, text: &str) {
        let source = self.backend.source();
        self.tables = parse_document(text, &source, &mut self.sink);
    }

    /// Writes the store to the backing document and then empties it.
    /// On failure the store is left untouched.
    pub fn save(&mut self) -> PrefsResult<()> {
        let text = self.serialize();
        self.backend.write_all(&text)?;
        self.drain();
        Ok(())
    }

    pub fn serialize(&self) -> String {
        render_tables(&self.tables)
    }

    pub fn drain(&mut self) {
        self.tables.clear();
    }

    /////////
    // Tables
    /////////

    /// Removes and returns a table. Not finding it is reported, not raised.
    pub fn extract(&mut self, name: &str) -> Option<Table> {
        let table = self.tables.shift_remove(name);
        if table.is_none() {
            self.report(DiagnosticKind::TableNotFound(name.to_string()));
        }
        table
    }

    /// Inserts a table, replacing one of the same name in place. Replacing
    /// a table that was never saved is reported as wasted work.
    pub fn upsert(&mut self, table: Table) {
        let name = table.name().to_string();
        if self.tables.contains_key(&name) {
            self.report(DiagnosticKind::TableRequeued(name.clone()));
        }
        self.tables.insert(name, table);
    }

    /// Looks at a table without consuming it.
    pub fn table(&self, name: &str) -> Option<&Table> {
        self.tables.get(name)
    }

    pub fn contains_table(&self, name: &str) -> bool {
        self.tables.contains_key(name)
    }

    pub fn table_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.tables.keys().map(|name| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    //////////
    // Records
    //////////

    /// Fills `record` from the table named after its type and returns it.
    /// See [`read_table_named`](Self::read_table_named).
    pub fn read_table<T>(&mut self, record: T) -> T
    where
        T: Serialize + DeserializeOwned,
    {
        self.read_table_named(record, table_name_of::<T>())
    }

    /// Fills `record` from table `name`, consuming the table.
    ///
    /// Fields with no matching pair keep the value they came in with. If
    /// the table does not exist (never loaded, or read already) the record
    /// is returned as is.
    pub fn read_table_named<T>(&mut self, record: T, name: &str) -> T
    where
        T: Serialize + DeserializeOwned,
    {
        let table = match self.extract(name) {
            Some(table) => table,
            None => return record,
        };
        let source = self.backend.source();
        let mut reporter = Reporter::new(&source, &mut self.sink);
        project_into(record, &table, &mut reporter)
    }

    /// Queues `record` under its type name. See
    /// [`write_table_named`](Self::write_table_named).
    pub fn write_table<T>(&mut self, record: &T)
    where
        T: Serialize + ?Sized,
    {
        self.write_table_named(record, table_name_of::<T>())
    }

    /// Queues every field of `record` as table `name`. Nothing reaches the
    /// backing document before [`save`](Self::save).
    pub fn write_table_named<T>(&mut self, record: &T, name: &str)
    where
        T: Serialize + ?Sized,
    {
        let table = {
            let source = self.backend.source();
            let mut reporter = Reporter::new(&source, &mut self.sink);
            project_from(record, name, &mut reporter)
        };
        if let Some(table) = table {
            self.upsert(table);
        }
    }

    ////////////
    // Accessors
    ////////////

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    fn report(&mut self, kind: DiagnosticKind) {
        let source = self.backend.source();
        Reporter::new(&source, &mut self.sink).report(None, kind);
    }
}
