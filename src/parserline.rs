// third-party imports
use unicode_segmentation::UnicodeSegmentation as utf8;
// internal imports
use crate::constants::{COMMENT_TOKEN, KEY_VAL_SEP, TABLE_HEAD_TOKEN};

/// What a single logical line means to the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// Nothing left once the comment and surrounding whitespace are gone.
    Blank,
    /// `:name`, carrying the trimmed name.
    TableHead(&'a str),
    /// `key value`, split at the first space. The value is trimmed.
    KeyVal { key: &'a str, value: &'a str },
    /// Non-blank content with no separator in it.
    KeyOnly(&'a str),
}

/// One line of a preferences document, comment-stripped and left-trimmed,
/// remembering where it came from.
#[derive(Debug, Clone)]
pub struct ParserLine {
    data: String,
    line_num: usize,
}
impl ParserLine {
    pub fn new(input: &str, line_num: usize) -> Self {
        Self {
            data: strip_comment(input).trim_start().to_string(),
            line_num,
        }
    }

    pub fn line_num(&self) -> usize {
        self.line_num
    }

    /// The logical content of the line.
    pub fn content(&self) -> &str {
        self.data.trim_end()
    }

    pub fn classify(&self) -> LineKind<'_> {
        let line = self.content();
        let mut graphemes = utf8::graphemes(line, true);
        match graphemes.next() {
            None => LineKind::Blank,
            Some(TABLE_HEAD_TOKEN) => LineKind::TableHead(graphemes.as_str().trim()),
            // Split before trimming the end so `key ` keeps an empty value.
            Some(_) => match self.data.split_once(KEY_VAL_SEP) {
                Some((key, value)) => LineKind::KeyVal {
                    key,
                    value: value.trim(),
                },
                None => LineKind::KeyOnly(line),
            },
        }
    }
}

/// Drops everything from the first comment token onward, inline comments included.
fn strip_comment(line: &str) -> &str {
    match line.find(COMMENT_TOKEN) {
        Some(idx) => &line[..idx],
        None => line,
    }
}
