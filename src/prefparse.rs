// internal imports
use crate::constants::BYTE_ORDER_MARK;
use crate::diagnostics::{DiagnosticKind, DiagnosticSink, Reporter};
use crate::parserline::{LineKind, ParserLine};
use crate::preftypes::{Table, TableMap, VariablePair};


/// Which table, if any, key-value lines currently belong to.
#[derive(Debug, Clone, PartialEq, Eq)]
enum ParseState {
    NoTableOpen,
    TableOpen(String),
}

/// Builds a [`TableMap`] one line at a time.
///
/// Problems are reported and the offending line skipped; the parser never
/// stops early. A repeated header does not create a new table: it reopens
/// the table registered first, so the lines that follow it are appended
/// there.
pub struct PrefParser<'a> {
    tables: TableMap,
    state: ParseState,
    reporter: Reporter<'a>,
}
impl<'a> PrefParser<'a> {
    pub fn init(source: &'a str, sink: &'a mut dyn DiagnosticSink) -> Self {
        Self {
            tables: TableMap::new(),
            state: ParseState::NoTableOpen,
            reporter: Reporter::new(source, sink),
        }
    }

    pub fn parse_line(&mut self, pline: &ParserLine) {
        let line_num = pline.line_num();
        match pline.classify() {
            LineKind::Blank => (),
            LineKind::TableHead(name) => self.parse_table_header(name, line_num),
            LineKind::KeyVal { key, value } => self.parse_keyval(key, value, line_num),
            LineKind::KeyOnly(_) => {
                let kind = match self.state {
                    ParseState::NoTableOpen => DiagnosticKind::PairOutsideTable,
                    ParseState::TableOpen(_) => DiagnosticKind::KeyWithoutValue,
                };
                self.reporter.report(Some(line_num), kind);
            }
        }
    }

    fn parse_table_header(&mut self, name: &str, line_num: usize) {
        self.state = ParseState::TableOpen(name.to_string());
        if self.tables.contains_key(name) {
            self.reporter.report(
                Some(line_num),
                DiagnosticKind::DuplicateTable(name.to_string()),
            );
            return;
        }
        self.tables
            .insert(name.to_string(), Table::new(name, Some(line_num)));
    }

    fn parse_keyval(&mut self, key: &str, value: &str, line_num: usize) {
        match &self.state {
            ParseState::NoTableOpen => self
                .reporter
                .report(Some(line_num), DiagnosticKind::PairOutsideTable),
            ParseState::TableOpen(name) => {
                // The open table is always registered: either by its own
                // header or by the first header of the same name.
                if let Some(table) = self.tables.get_mut(name) {
                    table.push(VariablePair::new(key, value, Some(line_num)));
                }
            }
        }
    }

    /// Ends the pass. Tables need no closing, so this only hands over the map.
    pub fn finish(self) -> TableMap {
        self.tables
    }
}

/// Parses a whole document. Line numbers start at 1. A leading byte order
/// mark is ignored.
pub fn parse_document(text: &str, source: &str, sink: &mut dyn DiagnosticSink) -> TableMap {
    let text = text.strip_prefix(BYTE_ORDER_MARK).unwrap_or(text);
    let mut parser = PrefParser::init(source, sink);
    for (idx, raw_line) in text.lines().enumerate() {
        parser.parse_line(&ParserLine::new(raw_line, idx + 1));
    }
    parser.finish()
}
