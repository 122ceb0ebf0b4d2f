//! Position and line-map utilities.
//!
//! ESTree parsers record offsets in UTF-16 code units (JavaScript string
//! indices), while diagnostics are shown with line/column pairs. This module
//! provides the conversion, keeping every offset in UTF-16 units.

use memchr::memchr2_iter;
use serde::{Deserialize, Serialize};

/// A position in a source file (0-indexed line and column).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    /// 0-indexed line number
    pub line: u32,
    /// 0-indexed column, counted in UTF-16 code units like ESTree `loc`
    pub character: u32,
}

impl Position {
    pub fn new(line: u32, character: u32) -> Self {
        Position { line, character }
    }
}

/// Line map for efficient offset -> position conversion.
/// Stores the starting offset of each line, in UTF-16 code units.
#[derive(Debug, Clone)]
pub struct LineMap {
    /// Starting offset of each line (line_starts[0] is always 0)
    line_starts: Vec<u32>,
    /// Length of the whole source in UTF-16 code units
    len: u32,
}

impl LineMap {
    /// Build a line map from source text.
    pub fn build(source: &str) -> Self {
        let bytes = source.as_bytes();
        let mut line_starts = vec![0u32];
        let mut units = 0u32;
        let mut counted = 0usize;

        for i in memchr2_iter(b'\n', b'\r', bytes) {
            if bytes[i] == b'\r' && bytes.get(i + 1) == Some(&b'\n') {
                // \r\n: the \n creates the line start
                continue;
            }
            // Line terminators are ASCII, so `i + 1` is a char boundary
            units += utf16_len(&source[counted..=i]);
            counted = i + 1;
            line_starts.push(units);
        }
        units += utf16_len(&source[counted..]);

        LineMap {
            line_starts,
            len: units,
        }
    }

    /// Number of lines in the mapped source.
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Starting offset of a 0-indexed line.
    pub fn line_start(&self, line: u32) -> Option<u32> {
        self.line_starts.get(line as usize).copied()
    }

    /// Length of the mapped source in UTF-16 code units.
    pub fn len_utf16(&self) -> u32 {
        self.len
    }

    /// Convert a UTF-16 offset to a Position. Offsets past the end clamp to
    /// the end of the source.
    pub fn offset_to_position(&self, offset: u32) -> Position {
        let offset = offset.min(self.len);
        // Binary search for the line containing this offset
        let line = match self.line_starts.binary_search(&offset) {
            Ok(exact) => exact,
            Err(insert_point) => insert_point.saturating_sub(1),
        };
        let line_start = self.line_starts.get(line).copied().unwrap_or(0);

        Position {
            line: line as u32,
            character: offset - line_start,
        }
    }
}

fn utf16_len(text: &str) -> u32 {
    text.chars().map(|ch| ch.len_utf16() as u32).sum()
}
