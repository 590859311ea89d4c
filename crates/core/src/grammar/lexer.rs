//! Low-level scanning primitives shared by the clause scanners and the
//! options parser.
//!
//! All positions are byte offsets into the full mode option string, so spans
//! produced here can be reported against the original input unchanged.

use super::diag::Span;
use super::error::ModeParseError;

/// Forward-only cursor over one clause of the input.
///
/// `text` is a slice of the full input starting at byte offset `base`.
#[derive(Debug)]
pub(crate) struct Cursor<'a> {
    text: &'a str,
    base: usize,
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(text: &'a str, base: usize) -> Self {
        Self { text, base, pos: 0 }
    }

    /// Absolute byte offset of the next character.
    pub(crate) fn offset(&self) -> usize {
        self.base + self.pos
    }

    pub(crate) fn peek(&self) -> Option<char> {
        self.text[self.pos..].chars().next()
    }

    pub(crate) fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    /// Consume `c` if it is next.
    pub(crate) fn eat(&mut self, c: char) -> bool {
        if self.peek() == Some(c) {
            self.pos += c.len_utf8();
            true
        } else {
            false
        }
    }

    /// Span of the next character, or a zero-width span at the end.
    pub(crate) fn next_char_span(&self) -> Span {
        let len = self.peek().map_or(0, char::len_utf8);
        Span::new(self.offset(), self.offset() + len)
    }

    /// Read a non-empty run of ASCII digits as a `u32`.
    pub(crate) fn digits(&mut self, field: &'static str) -> Result<u32, ModeParseError> {
        let start = self.pos;
        let len = self.text[start..]
            .bytes()
            .take_while(u8::is_ascii_digit)
            .count();
        if len == 0 {
            return Err(ModeParseError::ExpectedNumber {
                field,
                span: self.next_char_span(),
            });
        }
        self.pos += len;
        parse_decimal(&self.text[start..self.pos], self.base + start, field)
    }
}

/// Parse a whole string as an unsigned decimal `u32`.
///
/// `base` is the absolute offset of `text` in the input.
pub(crate) fn parse_decimal(
    text: &str,
    base: usize,
    field: &'static str,
) -> Result<u32, ModeParseError> {
    if let Some((i, c)) = text.char_indices().find(|(_, c)| !c.is_ascii_digit()) {
        return Err(ModeParseError::ExpectedNumber {
            field,
            span: Span::new(base + i, base + i + c.len_utf8()),
        });
    }
    if text.is_empty() {
        return Err(ModeParseError::ExpectedNumber {
            field,
            span: Span::empty(base),
        });
    }
    text.parse::<u32>()
        .map_err(|_| ModeParseError::NumberOutOfRange {
            field,
            span: Span::new(base, base + text.len()),
        })
}

/// One `key` or `key=value` entry of the options clause.
///
/// Borrows from the input; offsets are absolute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct OptionToken<'a> {
    /// Text before the first `=`, or the whole entry.
    pub(crate) key: &'a str,
    /// Text after the first `=`, if there is one.
    pub(crate) value: Option<&'a str>,
    /// Byte offset of the first character.
    pub(crate) start: usize,
    /// Byte offset one past the last character.
    pub(crate) end: usize,
}

impl OptionToken<'_> {
    pub(crate) fn span(&self) -> Span {
        Span::new(self.start, self.end)
    }

    /// Span of the value, or of the whole entry when there is none.
    pub(crate) fn value_span(&self) -> Span {
        match self.value {
            Some(v) => Span::new(self.end - v.len(), self.end),
            None => self.span(),
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Split an options clause on commas.
///
/// `text` starts at absolute offset `base`. Empty entries are kept so the
/// caller can reject them.
pub(crate) fn split_options(text: &str, base: usize) -> Vec<OptionToken<'_>> {
    let mut toks = Vec::new();
    let mut start = 0usize;
    for piece in text.split(',') {
        let (key, value) = match piece.split_once('=') {
            Some((k, v)) => (k, Some(v)),
            None => (piece, None),
        };
        toks.push(OptionToken {
            key,
            value,
            start: base + start,
            end: base + start + piece.len(),
        });
        start += piece.len() + 1;
    }
    toks
}
