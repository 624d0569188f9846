//! Recoverable problems found while loading, reading or writing tables.
//!
//! Nothing here aborts an operation. Each problem becomes a [`Diagnostic`]
//! handed to a [`DiagnosticSink`] and the surrounding pass carries on with
//! whatever it could make sense of.

use std::fmt;

use thiserror::Error;

use crate::preftypes::FieldKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Wasteful but harmless.
    Warning,
    /// Some data was dropped or left unchanged.
    Error,
}
impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Warning => write!(f, "Warning"),
            Self::Error => write!(f, "Error"),
        }
    }
}

/// The cause of a diagnostic.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DiagnosticKind {
    // Document parsing
    #[error("Duplicate table '{0}'")]
    DuplicateTable(String),

    #[error("Key without a value")]
    KeyWithoutValue,

    #[error("Key value pair defined outside of a table definition")]
    PairOutsideTable,

    // Field projection
    #[error("Expected {expected} value")]
    InvalidValue { key: String, expected: FieldKind },

    #[error("Value of '{key}' was rejected: {reason}")]
    RejectedValue { key: String, reason: String },

    #[error("The type '{found}' of '{key}' is not supported by preferences")]
    UnsupportedType { key: String, found: &'static str },

    #[error("No field named '{key}' in '{record}'")]
    UnknownField { key: String, record: String },

    #[error("'{0}' has no named fields to store")]
    NotARecord(String),

    // Store lookups and writes
    #[error("No table named {0}, perhaps it has already been loaded and destroyed")]
    TableNotFound(String),

    #[error("Table {0} is already queued, call save before re-writing table data")]
    TableRequeued(String),
}
impl DiagnosticKind {
    pub fn severity(&self) -> Severity {
        match self {
            Self::TableRequeued(_) | Self::UnknownField { .. } => Severity::Warning,
            _ => Severity::Error,
        }
    }
}

/// A located problem report.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    /// Identifies the backing document, usually its path.
    pub source: String,
    pub line: Option<usize>,
}
impl Diagnostic {
    pub fn severity(&self) -> Severity {
        self.kind.severity()
    }
}
impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(
                f,
                "{}: {} in '{}' at line {}.",
                self.severity(),
                self.kind,
                self.source,
                line
            ),
            None => write!(f, "{}: {} in '{}'.", self.severity(), self.kind, self.source),
        }
    }
}

/// Receives every diagnostic produced by the store.
pub trait DiagnosticSink {
    fn report(&mut self, diagnostic: Diagnostic);
}

/// Prints diagnostics to standard error.
#[derive(Debug, Clone, Copy, Default)]
pub struct StderrSink;
impl DiagnosticSink for StderrSink {
    fn report(&mut self, diagnostic: Diagnostic) {
        eprintln!("{}", diagnostic);
    }
}

/// Collects diagnostics for later inspection.
impl DiagnosticSink for Vec<Diagnostic> {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for &mut S {
    fn report(&mut self, diagnostic: Diagnostic) {
        (**self).report(diagnostic);
    }
}

/// Binds a sink to the document it reports about, so error sites only
/// supply a line and a cause.
pub(crate) struct Reporter<'a> {
    source: &'a str,
    sink: &'a mut dyn DiagnosticSink,
}
impl<'a> Reporter<'a> {
    pub(crate) fn new(source: &'a str, sink: &'a mut dyn DiagnosticSink) -> Self {
        Self { source, sink }
    }

    pub(crate) fn report(&mut self, line: Option<usize>, kind: DiagnosticKind) {
        self.sink.report(Diagnostic {
            kind,
            source: self.source.to_string(),
            line,
        });
    }
}
