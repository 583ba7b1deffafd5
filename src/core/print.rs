//! Format-preserving printer.
//!
//! Output is the original text with a set of byte ranges replaced. Bytes
//! outside the ranges are copied verbatim, so untouched code keeps its
//! whitespace and comments, and a position map is produced alongside.

use crate::core::PositionMap;

/// Replace `original[start..end]` with `text`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    pub start: usize,
    pub end: usize,
    pub text: String,
}

#[derive(Debug, Clone)]
pub struct Printed {
    pub code: String,
    pub position_map: PositionMap,
}

/// Byte offsets of line starts, for offset -> (line, column) conversion.
struct LineIndex<'a> {
    text: &'a str,
    starts: Vec<usize>,
}

impl<'a> LineIndex<'a> {
    fn new(text: &'a str) -> Self {
        let mut starts = vec![0];
        starts.extend(line_starts(text));
        Self { text, starts }
    }

    /// 0-based line and UTF-16 column of a byte offset.
    fn position(&self, offset: usize) -> (u32, u32) {
        let line = self.starts.partition_point(|&start| start <= offset) - 1;
        let column = utf16_len(&self.text[self.starts[line]..offset]);
        (line as u32, column)
    }
}

/// Byte offsets just past each ECMAScript line terminator in `text`.
///
/// `\r\n` is one terminator; a lone `\r`, U+2028 and U+2029 each start a
/// new line as well.
pub fn line_starts(text: &str) -> impl Iterator<Item = usize> + '_ {
    let bytes = text.as_bytes();
    text.char_indices().filter_map(move |(i, c)| match c {
        '\n' | '\u{2028}' | '\u{2029}' => Some(i + c.len_utf8()),
        '\r' if bytes.get(i + 1) != Some(&b'\n') => Some(i + 1),
        _ => None,
    })
}

fn ends_with_line_terminator(text: &str) -> bool {
    text.ends_with(['\n', '\r', '\u{2028}', '\u{2029}'])
}

fn utf16_len(text: &str) -> u32 {
    text.chars().map(|c| c.len_utf16() as u32).sum()
}

/// Output buffer that tracks its own line and UTF-16 column.
struct Output {
    code: String,
    line: u32,
    column: u32,
}

impl Output {
    fn position(&self) -> (u32, u32) {
        (self.line, self.column)
    }

    fn push(&mut self, text: &str) {
        let mut lines = 0;
        let mut last_start = None;
        for start in line_starts(text) {
            lines += 1;
            last_start = Some(start);
        }
        match last_start {
            Some(start) => {
                self.line += lines;
                self.column = utf16_len(&text[start..]);
            }
            None => self.column += utf16_len(text),
        }
        self.code.push_str(text);
    }
}

/// Apply `edits` to `original[base..base + len]` without tracking positions.
///
/// Edits use absolute offsets into `original`, must lie inside the range and
/// must not overlap.
pub fn splice(original: &str, base: usize, len: usize, edits: &[Edit]) -> String {
    let mut out = String::with_capacity(len);
    let mut cursor = base;
    for edit in edits {
        out.push_str(&original[cursor..edit.start]);
        out.push_str(&edit.text);
        cursor = edit.end;
    }
    out.push_str(&original[cursor..base + len]);
    out
}

/// Print `original` with `edits` applied and `trailer` appended.
///
/// `edits` must be sorted and non-overlapping. The trailer is left unmapped.
pub fn print_source(
    original: &str,
    file_path: &str,
    edits: &[Edit],
    trailer: Option<&str>,
) -> Printed {
    let index = LineIndex::new(original);
    let mut map = PositionMap::for_source(file_path, Some(original.to_string()));
    let mut out = Output {
        code: String::with_capacity(original.len()),
        line: 0,
        column: 0,
    };

    let copy = |out: &mut Output, map: &mut PositionMap, start: usize, end: usize| {
        if start == end {
            return;
        }
        map.add(out.position(), index.position(start));
        let mut cursor = start;
        for next in line_starts(&original[start..end]).map(|i| start + i) {
            out.push(&original[cursor..next]);
            cursor = next;
            if next < end {
                map.add(out.position(), index.position(next));
            }
        }
        out.push(&original[cursor..end]);
    };

    let mut cursor = 0;
    for edit in edits {
        copy(&mut out, &mut map, cursor, edit.start);
        map.add(out.position(), index.position(edit.start));
        out.push(&edit.text);
        cursor = edit.end;
    }
    copy(&mut out, &mut map, cursor, original.len());

    if let Some(trailer) = trailer {
        if !out.code.is_empty() && !ends_with_line_terminator(&out.code) {
            out.push("\n");
        }
        out.push(trailer);
    }

    Printed {
        code: out.code,
        position_map: map,
    }
}
