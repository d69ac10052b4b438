//! Immutable cell grids.
//!
//! A [`Canvas`] is the unit exchanged between the parser, the slide
//! layout, the compositor and the display sink. Its dimensions are fixed
//! at construction and its cells are never mutated afterwards; new
//! content means a new canvas, built through [`CanvasBuilder`].

use std::sync::Arc;

use unicode_width::UnicodeWidthChar;

use crate::terminal::{Attr, Cell};

/// Grid dimensions in character cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Size {
    pub cols: usize,
    pub rows: usize,
}

impl Size {
    pub const fn new(cols: usize, rows: usize) -> Self {
        Self { cols, rows }
    }

    pub fn area(&self) -> usize {
        self.cols * self.rows
    }
}

impl From<(u16, u16)> for Size {
    fn from((cols, rows): (u16, u16)) -> Self {
        Self::new(cols as usize, rows as usize)
    }
}

/// Anything that can be drawn onto a canvas of a given size.
pub trait Renderable {
    fn render(&self, size: Size) -> Canvas;
}

/// An immutable rectangular grid of cells.
///
/// Cloning is cheap: cells live behind an `Arc`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    size: Size,
    cells: Arc<[Cell]>,
}

impl Canvas {
    /// A canvas filled with blanks under `attr`.
    pub fn blank(size: Size, attr: Attr) -> Self {
        Self {
            size,
            cells: vec![Cell::blank(attr); size.area()].into(),
        }
    }

    /// Build from row vectors. Ragged rows are padded with blanks
    /// under `fill` up to the widest row.
    pub fn from_rows(rows: Vec<Vec<Cell>>, fill: Attr) -> Self {
        let cols = rows.iter().map(Vec::len).max().unwrap_or(0);
        let size = Size::new(cols, rows.len());
        let mut cells = Vec::with_capacity(size.area());
        for mut row in rows {
            row.resize(cols, Cell::blank(fill));
            cells.extend(row);
        }
        Self {
            size,
            cells: cells.into(),
        }
    }

    /// Build from a flat row-major cell vector.
    ///
    /// # Panics
    /// Panics if `cells.len()` does not equal `size.area()`.
    pub fn from_cells(size: Size, cells: Vec<Cell>) -> Self {
        assert_eq!(
            cells.len(),
            size.area(),
            "cell count does not match {}x{} canvas",
            size.cols,
            size.rows
        );
        Self {
            size,
            cells: cells.into(),
        }
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn cols(&self) -> usize {
        self.size.cols
    }

    pub fn rows(&self) -> usize {
        self.size.rows
    }

    /// Cell at column `x`, row `y`.
    ///
    /// # Panics
    /// Panics when out of bounds.
    pub fn cell(&self, x: usize, y: usize) -> &Cell {
        assert!(x < self.size.cols && y < self.size.rows, "cell ({}, {}) out of bounds", x, y);
        &self.cells[y * self.size.cols + x]
    }

    /// Row `y` as a slice, or `None` past the last row.
    pub fn row(&self, y: usize) -> Option<&[Cell]> {
        if y >= self.size.rows {
            return None;
        }
        let start = y * self.size.cols;
        Some(&self.cells[start..start + self.size.cols])
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Whether both canvases share the same cell storage.
    pub fn ptr_eq(&self, other: &Canvas) -> bool {
        Arc::ptr_eq(&self.cells, &other.cells)
    }

    /// Width of the visible content: the column after the rightmost cell
    /// holding a glyph or a background different from `background`.
    pub fn content_width(&self, background: &Attr) -> usize {
        (0..self.size.rows)
            .filter_map(|y| self.row(y))
            .map(|row| {
                row.iter()
                    .rposition(|c| !c.is_blank() || c.attr.bg != background.bg)
                    .map_or(0, |x| x + 1)
            })
            .max()
            .unwrap_or(0)
    }

    /// Number of rows up to and including the last non-blank one.
    pub fn content_height(&self, background: &Attr) -> usize {
        (0..self.size.rows)
            .rev()
            .find(|&y| {
                self.row(y)
                    .is_some_and(|row| row.iter().any(|c| !c.is_blank() || c.attr.bg != background.bg))
            })
            .map_or(0, |y| y + 1)
    }

    /// Plain text of the grid, rows joined with `\n`, trailing spaces trimmed.
    pub fn to_text(&self) -> String {
        (0..self.size.rows)
            .filter_map(|y| self.row(y))
            .map(|row| row.iter().map(|c| c.ch).collect::<String>().trim_end().to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Renderable for Canvas {
    /// Crop or pad (blank, default attribute of the top-left cell) to `size`.
    fn render(&self, size: Size) -> Canvas {
        if size == self.size {
            return self.clone();
        }
        let fill = self.cells.first().map(|c| c.attr).unwrap_or_default();
        let mut builder = CanvasBuilder::new(size, fill);
        builder.blit(0, 0, self);
        builder.build()
    }
}

/// Mutable staging area for a canvas under construction.
#[derive(Debug, Clone)]
pub struct CanvasBuilder {
    size: Size,
    cells: Vec<Cell>,
}

impl CanvasBuilder {
    pub fn new(size: Size, fill: Attr) -> Self {
        Self {
            size,
            cells: vec![Cell::blank(fill); size.area()],
        }
    }

    pub fn size(&self) -> Size {
        self.size
    }

    /// Set one cell; writes outside the grid are clipped.
    pub fn set(&mut self, x: usize, y: usize, cell: Cell) {
        if x < self.size.cols && y < self.size.rows {
            self.cells[y * self.size.cols + x] = cell;
        }
    }

    /// Write a string starting at (x, y), clipped at the right edge.
    /// Returns the number of columns consumed.
    pub fn put_str(&mut self, x: usize, y: usize, text: &str, attr: Attr) -> usize {
        let mut col = x;
        for ch in text.chars() {
            let width = ch.width().unwrap_or(0);
            if width == 0 {
                continue;
            }
            self.set(col, y, Cell::new(ch, attr));
            // wide glyphs occupy a trailing blank
            for extra in 1..width {
                self.set(col + extra, y, Cell::new(' ', attr));
            }
            col += width;
        }
        col - x
    }

    /// Copy another canvas in with its top-left corner at (x, y).
    pub fn blit(&mut self, x: usize, y: usize, source: &Canvas) {
        for sy in 0..source.rows() {
            if let Some(row) = source.row(sy) {
                for (sx, cell) in row.iter().enumerate() {
                    self.set(x + sx, y + sy, *cell);
                }
            }
        }
    }

    /// Copy a sub-rectangle `(src_x, src_y, size)` of `source` to (x, y).
    pub fn blit_region(&mut self, x: usize, y: usize, source: &Canvas, src_x: usize, src_y: usize, size: Size) {
        for dy in 0..size.rows {
            let Some(row) = source.row(src_y + dy) else {
                break;
            };
            for dx in 0..size.cols {
                if let Some(cell) = row.get(src_x + dx) {
                    self.set(x + dx, y + dy, *cell);
                }
            }
        }
    }

    pub fn build(self) -> Canvas {
        Canvas {
            size: self.size,
            cells: self.cells.into(),
        }
    }
}
