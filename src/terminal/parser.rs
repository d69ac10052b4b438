//! ANSI stream parser.
//!
//! Feeds raw bytes through `vte` into a [`GridPerformer`], the explicit
//! parser state (cursor, pen and the lazily grown line buffer). Once the
//! stream is consumed the grid is flattened into attribute runs and a
//! [`Canvas`].

use std::borrow::Cow;

use tracing::trace;
use vte::{Params, Perform};

use super::handlers::{apply_sgr, Cursor, Pen};
use super::types::{Attr, Cell, Color, Run};
use crate::canvas::Canvas;

/// Fixed line width of ANSI art sources.
pub const LINE_WIDTH: usize = 80;

/// Parameters `vte` collects for one CSI sequence before dropping the rest.
const VTE_MAX_PARAMS: usize = 32;

/// Parameter count of each SGR sequence written by [`split_long_sgr`].
const SGR_CHUNK: usize = 16;

/// Result of parsing one ANSI stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedArt {
    /// Coalesced (attribute, text) runs of the final grid
    pub runs: Vec<Run>,
    /// The backing grid, `LINE_WIDTH` columns wide
    pub canvas: Canvas,
}

/// Entry point for parsing ANSI art.
pub struct AnsiParser;

impl AnsiParser {
    /// Parse a complete stream. Never fails: malformed input yields a
    /// visually wrong but well-formed grid.
    pub fn parse(bytes: &[u8]) -> ParsedArt {
        let mut performer = GridPerformer::new();
        let mut parser = vte::Parser::new();
        parser.advance(&mut performer, &split_long_sgr(bytes));
        performer.finish()
    }

    /// Convenience wrapper for string input.
    pub fn parse_str(text: &str) -> ParsedArt {
        Self::parse(text.as_bytes())
    }
}

/// Parser state threaded through `vte`.
#[derive(Debug, Clone)]
pub struct GridPerformer {
    cursor: Cursor,
    pen: Pen,
    lines: Vec<Vec<Cell>>,
}

impl Default for GridPerformer {
    fn default() -> Self {
        Self::new()
    }
}

impl GridPerformer {
    pub fn new() -> Self {
        let mut performer = Self {
            cursor: Cursor::default(),
            pen: Pen::default(),
            lines: Vec::new(),
        };
        performer.move_to(Cursor::default());
        performer
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn pen(&self) -> &Pen {
        &self.pen
    }

    pub fn lines(&self) -> &[Vec<Cell>] {
        &self.lines
    }

    /// Move the cursor, growing the buffer so that its row exists.
    /// New rows are blank under the current attribute.
    fn move_to(&mut self, cursor: Cursor) {
        let fill = Cell::blank(self.pen.attr());
        while self.lines.len() <= cursor.y {
            self.lines.push(vec![fill; LINE_WIDTH]);
        }
        self.cursor = cursor;
    }

    /// Consume the performer, producing runs and the backing canvas.
    pub fn finish(self) -> ParsedArt {
        let runs = collect_runs(&self.lines);
        let fill = Attr::ansi_default();
        let canvas = Canvas::from_rows(self.lines, fill);
        ParsedArt { runs, canvas }
    }
}

impl Perform for GridPerformer {
    fn print(&mut self, c: char) {
        let Cursor { x, y } = self.cursor;
        self.lines[y][x] = Cell::new(c, self.pen.attr());
        self.move_to(self.cursor.advance(LINE_WIDTH));
    }

    fn execute(&mut self, byte: u8) {
        match byte {
            b'\r' => self.move_to(self.cursor.carriage_return()),
            b'\n' => self.move_to(self.cursor.line_feed()),
            // 0x1A (SUB) and the remaining C0 controls are ignored
            _ => {}
        }
    }

    fn csi_dispatch(&mut self, params: &Params, _intermediates: &[u8], ignore: bool, action: char) {
        if ignore && action != 'm' {
            return;
        }
        let values: Vec<u16> = params.iter().flat_map(|p| p.iter().copied()).collect();
        let first = values.first().copied().unwrap_or(0);

        match action {
            'm' => apply_sgr(&mut self.pen, &values),
            'A' => self.move_to(self.cursor.up(first, LINE_WIDTH)),
            'C' => self.move_to(self.cursor.forward(first, LINE_WIDTH)),
            'H' | 'f' => {
                let col = values.get(1).copied().unwrap_or(1);
                self.move_to(Cursor::position(first, col, LINE_WIDTH));
            }
            other => trace!(action = %other, "ignoring unsupported CSI sequence"),
        }
    }
}

/// Rewrite SGR sequences longer than `vte` accepts as consecutive shorter
/// ones, so every parameter is applied in order. Extended color selectors
/// (`38;5;n`, `48;2;r;g;b`) are never split across two sequences.
fn split_long_sgr(bytes: &[u8]) -> Cow<'_, [u8]> {
    let mut out: Option<Vec<u8>> = None;
    let mut copied = 0;
    let mut i = 0;
    while i + 1 < bytes.len() {
        if bytes[i] != 0x1b || bytes[i + 1] != b'[' {
            i += 1;
            continue;
        }
        let start = i + 2;
        let end = bytes[start..]
            .iter()
            .position(|b| !matches!(b, b'0'..=b'9' | b';' | b':'))
            .map_or(bytes.len(), |n| start + n);
        let params = &bytes[start..end];
        let separators = params.iter().filter(|b| matches!(b, b';' | b':')).count();
        if bytes.get(end) == Some(&b'm') && separators >= VTE_MAX_PARAMS {
            let buf = out.get_or_insert_with(|| Vec::with_capacity(bytes.len() + 64));
            buf.extend_from_slice(&bytes[copied..i]);
            write_sgr_chunks(buf, params);
            copied = end + 1;
        }
        i = end;
    }

    match out {
        Some(mut buf) => {
            buf.extend_from_slice(&bytes[copied..]);
            Cow::Owned(buf)
        }
        None => Cow::Borrowed(bytes),
    }
}

fn write_sgr_chunks(out: &mut Vec<u8>, params: &[u8]) {
    let fields: Vec<&[u8]> = params.split(|b| *b == b';').collect();
    let mut chunk_start = 0;
    let mut i = 0;
    while i < fields.len() {
        let group = selector_len(&fields[i..]);
        if i + group - chunk_start > SGR_CHUNK {
            write_sgr(out, &fields[chunk_start..i]);
            chunk_start = i;
        }
        i += group;
    }
    write_sgr(out, &fields[chunk_start..]);
}

/// Number of fields the SGR code at the head of `fields` consumes,
/// matching how [`apply_sgr`] reads extended colors.
fn selector_len(fields: &[&[u8]]) -> usize {
    let len = match field_value(fields[0]) {
        Some(38 | 48) => match fields.get(1).map(|f| field_value(f)) {
            Some(Some(5)) => 3,
            Some(Some(2)) => 5,
            Some(_) => 2,
            None => 1,
        },
        _ => 1,
    };
    len.min(fields.len())
}

/// Numeric value of one field; empty is 0, subparameters are not numbers.
fn field_value(field: &[u8]) -> Option<u16> {
    if field.is_empty() {
        return Some(0);
    }
    std::str::from_utf8(field).ok()?.parse().ok()
}

fn write_sgr(out: &mut Vec<u8>, fields: &[&[u8]]) {
    out.extend_from_slice(b"\x1b[");
    for (n, field) in fields.iter().enumerate() {
        if n > 0 {
            out.push(b';');
        }
        out.extend_from_slice(field);
    }
    out.push(b'm');
}

/// The background whose trailing spaces are trimmed away.
fn is_default_background(color: Color) -> bool {
    color == Color::BLACK
}

/// Walk the grid row-major, coalescing cells that share foreground and
/// background into runs.
fn collect_runs(lines: &[Vec<Cell>]) -> Vec<Run> {
    let mut runs = Vec::new();
    let Some(first) = lines.first().and_then(|row| row.first()) else {
        return runs;
    };

    let mut current = first.attr;
    let mut text = String::new();

    for row in lines {
        for cell in row {
            if !cell.attr.same_colors(&current) {
                if !text.is_empty() {
                    runs.push(Run::new(current, std::mem::take(&mut text)));
                }
                current = cell.attr;
            }
            text.push(cell.ch);
        }
        if is_default_background(current.bg) {
            let kept = text.trim_end_matches(' ').len();
            text.truncate(kept);
        }
        text.push('\n');
    }

    let kept = text.trim_end_matches('\n').len();
    text.truncate(kept);
    text.push('\n');
    runs.push(Run::new(current, text));
    runs
}
