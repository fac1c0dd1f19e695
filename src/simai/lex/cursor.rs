use crate::simai::{command::mixin::SourcePosition, metadata::BodyLine};

/// Walks the significant characters of the note body.
///
/// Whitespace and control characters are skipped, and so is the rest of a line after `||`.
pub struct Cursor<'a, 'b> {
    lines: &'b [BodyLine<'a>],
    /// Index into `lines`.
    line_idx: usize,
    /// The byte position in the current line.
    byte: usize,
    /// The column position of char count, starts with 1. It is NOT byte count.
    column: usize,
}

impl<'a, 'b> Cursor<'a, 'b> {
    pub const fn new(lines: &'b [BodyLine<'a>]) -> Self {
        Self {
            lines,
            line_idx: 0,
            byte: 0,
            column: 1,
        }
    }

    const fn next_line(&mut self) {
        self.line_idx += 1;
        self.byte = 0;
        self.column = 1;
    }

    /// Move cursor, through and return the next significant character with its position.
    pub fn next_char(&mut self) -> Option<(SourcePosition, char)> {
        loop {
            let line = self.lines.get(self.line_idx)?;
            let rest = line.text.get(self.byte..).unwrap_or("");
            if rest.starts_with("||") {
                self.next_line();
                continue;
            }
            let Some(ch) = rest.chars().next() else {
                self.next_line();
                continue;
            };
            let position = SourcePosition {
                line: line.line,
                column: self.column,
                index: line.offset + self.byte,
            };
            self.byte += ch.len_utf8();
            self.column += 1;
            if ch.is_whitespace() || ch.is_control() {
                continue;
            }
            return Some((position, ch));
        }
    }
}
