//! Moves data between records and tables by field name.
//!
//! A record is any serde type with named fields. Serializing it into a
//! snapshot gives the field names (in declaration order) with primitives
//! already in their written form. Reading puts each pair's text into its
//! slot and rebuilds the record, so the field's own type decides how the
//! text is parsed. Writing emits the text slots as they are.

// third-party imports
use serde::{de::DeserializeOwned, Serialize};
use unicode_segmentation::UnicodeSegmentation as utf8;
// internal imports
use crate::diagnostics::{DiagnosticKind, Reporter};
use crate::preftypes::{Table, VariablePair};
use fields::{ProjectionError, Slot, Snapshot};
use rebuild::rebuild;

// Module Declarations
mod fields; // Record to field slots
mod rebuild; // Field slots back to a record

/// The table name a record is stored under by default: its type name
/// without module path or generic arguments.
pub fn table_name_of<T: ?Sized>() -> &'static str {
    let full = std::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}

/// Assigns each pair of `table` to the same-named field of `record`.
///
/// Fields without a pair keep their current value. A pair that cannot be
/// parsed as its field's type is reported and leaves the field alone.
pub(crate) fn project_into<T>(record: T, table: &Table, reporter: &mut Reporter<'_>) -> T
where
    T: Serialize + DeserializeOwned,
{
    let Some(mut fields) = snapshot(&record, reporter) else {
        return record;
    };
    let mut current = record;

    for pair in table.pairs() {
        let Some(idx) = fields.iter().position(|(key, _)| *key == pair.key) else {
            reporter.report(
                pair.line_number,
                DiagnosticKind::UnknownField {
                    key: pair.key.clone(),
                    record: table_name_of::<T>().to_string(),
                },
            );
            continue;
        };
        if let Slot::Other { found, .. } = &fields[idx].1 {
            reporter.report(
                pair.line_number,
                DiagnosticKind::UnsupportedType {
                    key: pair.key.clone(),
                    found: *found,
                },
            );
            continue;
        }

        let previous = std::mem::replace(&mut fields[idx].1, Slot::Text(pair.value.clone()));
        match rebuild::<T>(&fields) {
            Ok(rebuilt) => current = rebuilt,
            Err(err) => {
                let kind = match err {
                    ProjectionError::Expected(expected) => DiagnosticKind::InvalidValue {
                        key: pair.key.clone(),
                        expected,
                    },
                    // The type refused a well-formed value (enum variant, char...).
                    other => DiagnosticKind::RejectedValue {
                        key: pair.key.clone(),
                        reason: other.to_string(),
                    },
                };
                reporter.report(pair.line_number, kind);
                fields[idx].1 = previous;
            }
        }
    }
    current
}

/// Builds a table named `name` holding one pair per field of `record`, in
/// declaration order. Fields of unsupported types are reported and left out.
pub(crate) fn project_from<T>(record: &T, name: &str, reporter: &mut Reporter<'_>) -> Option<Table>
where
    T: Serialize + ?Sized,
{
    let fields = snapshot(record, reporter)?;
    let mut table = Table::new(name, None);
    for (key, slot) in fields {
        match slot {
            Slot::Text(text) => table.push(VariablePair::new(key, text, None)),
            Slot::Other { found, .. } => {
                reporter.report(None, DiagnosticKind::UnsupportedType { key, found })
            }
        }
    }
    Some(table)
}

fn snapshot<T: Serialize + ?Sized>(record: &T, reporter: &mut Reporter<'_>) -> Option<Snapshot> {
    match fields::snapshot(record) {
        Ok(fields) => Some(fields),
        Err(_) => {
            reporter.report(
                None,
                DiagnosticKind::NotARecord(table_name_of::<T>().to_string()),
            );
            None
        }
    }
}

/// Only the first character counts: `t`/`T` or `f`/`F`.
fn parse_bool(raw: &str) -> Option<bool> {
    match utf8::graphemes(raw, true).next() {
        Some("t") | Some("T") => Some(true),
        Some("f") | Some("F") => Some(false),
        _ => None,
    }
}
