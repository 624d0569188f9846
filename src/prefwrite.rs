// internal imports
use crate::constants::{KEY_VAL_SEP, TABLE_HEAD_TOKEN};
use crate::preftypes::TableMap;

/// Renders tables back into document text.
///
/// Tables appear in map order and pairs in stored order. Nothing is
/// escaped: a value containing the comment token will be cut short the
/// next time the document is loaded.
pub fn render_tables(tables: &TableMap) -> String {
    let mut outstr = String::new();
    for (name, table) in tables {
        outstr.push_str(TABLE_HEAD_TOKEN);
        outstr.push_str(name);
        outstr.push('\n');
        for pair in table.pairs() {
            outstr.push_str(&pair.key);
            outstr.push(KEY_VAL_SEP);
            outstr.push_str(&pair.value);
            outstr.push('\n');
        }
    }
    outstr
}
