// Imports
use indexmap::IndexMap;
use std::fmt;

/// Table name -> table. Iteration follows insertion order, which is the
/// order tables are serialized in.
pub type TableMap = IndexMap<String, Table>;

/// A single `key value` entry of a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariablePair {
    pub key: String,
    /// Raw, unparsed text.
    pub value: String,
    /// Source line, if the pair was read from a document.
    pub line_number: Option<usize>,
}
impl VariablePair {
    pub fn new(key: impl Into<String>, value: impl Into<String>, line_number: Option<usize>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            line_number,
        }
    }
}

/// A named, ordered group of pairs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    name: String,
    pairs: Vec<VariablePair>,
    line_number: Option<usize>,
}
impl Table {
    pub fn new(name: impl Into<String>, line_number: Option<usize>) -> Self {
        Self {
            name: name.into(),
            pairs: Vec::new(),
            line_number,
        }
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Line of the `:name` header. `None` for tables built in memory.
    pub fn line_number(&self) -> Option<usize> {
        self.line_number
    }

    pub fn pairs(&self) -> &[VariablePair] {
        &self.pairs
    }

    pub fn push(&mut self, pair: VariablePair) {
        self.pairs.push(pair);
    }

    /// Value of `key`. Keys may repeat; the last one wins.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .rev()
            .find(|pair| pair.key == key)
            .map(|pair| pair.value.as_str())
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// The primitive field types a record may declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Int,
    Float,
    Bool,
    Text,
}
impl fmt::Display for FieldKind {
    // Reads as "Expected {kind} value".
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let article = match self {
            Self::Int => "an int",
            Self::Float => "a float",
            Self::Bool => "a bool",
            Self::Text => "a text",
        };
        write!(f, "{}", article)
    }
}
