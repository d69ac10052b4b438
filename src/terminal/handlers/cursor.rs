//! Cursor movement handlers.
//!
//! Handles CSI sequences:
//! - A: Cursor up
//! - C: Cursor forward
//! - H/f: Cursor position
//!
//! Plus the implicit moves of printing, `\r` and `\n`. Every move goes
//! through [`Cursor::wrapped`], so the column stays inside the fixed line
//! width and overflow spills onto following rows.

/// Cursor position inside the parser's grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    pub x: usize,
    pub y: usize,
}

impl Cursor {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Normalize a position whose column may exceed `width`.
    pub fn wrapped(x: usize, y: usize, width: usize) -> Self {
        Self {
            x: x % width,
            y: y + x / width,
        }
    }

    /// CSI n A. Zero or missing counts as one row; clamps at the top.
    pub fn up(self, n: u16, width: usize) -> Self {
        let n = usize::from(n.max(1));
        Self::wrapped(self.x, self.y.saturating_sub(n), width)
    }

    /// CSI n C. Zero or missing counts as one column; wraps past the edge.
    pub fn forward(self, n: u16, width: usize) -> Self {
        let n = usize::from(n.max(1));
        Self::wrapped(self.x + n, self.y, width)
    }

    /// CSI row;col H with 1-based coordinates. Missing values count as 1.
    pub fn position(row: u16, col: u16, width: usize) -> Self {
        let row = usize::from(row.max(1)) - 1;
        let col = usize::from(col.max(1)) - 1;
        Self::wrapped(col, row, width)
    }

    /// One column to the right, as after printing a character.
    pub fn advance(self, width: usize) -> Self {
        Self::wrapped(self.x + 1, self.y, width)
    }

    /// `\r`
    pub fn carriage_return(self) -> Self {
        Self { x: 0, y: self.y }
    }

    /// `\n`; the column is preserved.
    pub fn line_feed(self) -> Self {
        Self {
            x: self.x,
            y: self.y + 1,
        }
    }
}
