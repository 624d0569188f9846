// Characters of Interest

/// Everything from this character to the end of the line is discarded.
pub const COMMENT_TOKEN: &str = "#";
/// A line beginning with this character opens a new table.
pub const TABLE_HEAD_TOKEN: &str = ":";
/// The first occurrence on a line splits the key from its value.
pub const KEY_VAL_SEP: char = ' ';

// Canonical boolean spellings written by the serializer.
pub const TRUE_TEXT: &str = "True";
pub const FALSE_TEXT: &str = "False";

/// Dropped from the start of a document.
pub const BYTE_ORDER_MARK: char = '\u{feff}';

/// Source identifier used for documents that do not come from a file.
pub const MEMORY_SOURCE: &str = "<memory>";
