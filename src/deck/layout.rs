//! Slide layout.
//!
//! The title sits centered on the first row. Below it the content blocks
//! (body lines, progressive groups, then animation frames) are stacked,
//! and the stack as a whole is centered both ways in the remaining area.

use unicode_width::UnicodeWidthStr;

use super::{Slide, SlideTheme};
use crate::canvas::{Canvas, CanvasBuilder, Renderable, Size};

/// Rows taken by the title and the gap below it.
const TITLE_ROWS: usize = 2;

/// A slide at a given reveal depth.
#[derive(Debug, Clone, Copy)]
pub struct SlideView<'a> {
    slide: &'a Slide,
    depth: usize,
    theme: &'a SlideTheme,
}

impl<'a> SlideView<'a> {
    pub fn new(slide: &'a Slide, depth: usize, theme: &'a SlideTheme) -> Self {
        Self {
            slide,
            depth: depth.min(slide.progressive_count()),
            theme,
        }
    }
}

enum Block<'a> {
    Text { lines: &'a [String], dimmed: bool },
    Frame { canvas: &'a Canvas, extent: Size },
}

impl Block<'_> {
    fn extent(&self) -> Size {
        match self {
            Block::Text { lines, .. } => Size::new(
                lines.iter().map(|l| l.width()).max().unwrap_or(0),
                lines.len(),
            ),
            Block::Frame { extent, .. } => *extent,
        }
    }
}

impl Renderable for SlideView<'_> {
    fn render(&self, size: Size) -> Canvas {
        let theme = self.theme;
        let mut builder = CanvasBuilder::new(size, theme.default);

        let mut top = 0;
        if !self.slide.hide_title && !self.slide.title.is_empty() {
            let width = self.slide.title.width();
            let x = size.cols.saturating_sub(width) / 2;
            builder.put_str(x, 0, &self.slide.title, theme.title);
            top = TITLE_ROWS;
        }

        let mut blocks = Vec::new();
        if !self.slide.body.is_empty() {
            blocks.push(Block::Text {
                lines: &self.slide.body,
                dimmed: false,
            });
        }
        for (i, group) in self.slide.progressive.iter().enumerate() {
            blocks.push(Block::Text {
                lines: group,
                dimmed: i >= self.depth,
            });
        }
        for track in &self.slide.animations {
            if let Some(canvas) = track.current_frame() {
                blocks.push(Block::Frame {
                    canvas,
                    extent: track.extent(),
                });
            }
        }

        let extents: Vec<Size> = blocks.iter().map(Block::extent).collect();
        let width = extents.iter().map(|e| e.cols).max().unwrap_or(0);
        let height: usize = extents.iter().map(|e| e.rows).sum();

        let left = size.cols.saturating_sub(width) / 2;
        let available = size.rows.saturating_sub(top);
        let mut y = top + available.saturating_sub(height) / 2;

        for (block, extent) in blocks.iter().zip(&extents) {
            match block {
                Block::Text { lines, dimmed } => {
                    let attr = if *dimmed { theme.progressive } else { theme.default };
                    for (row, line) in lines.iter().enumerate() {
                        builder.put_str(left, y + row, line, attr);
                    }
                }
                Block::Frame { canvas, extent } => {
                    builder.blit_region(left, y, canvas, 0, 0, *extent);
                }
            }
            y += extent.rows;
        }

        builder.build()
    }
}

/// Speaker notes of a slide, left-aligned and horizontally centered.
#[derive(Debug, Clone, Copy)]
pub struct HandoutView<'a> {
    slide: &'a Slide,
    theme: &'a SlideTheme,
}

impl<'a> HandoutView<'a> {
    pub fn new(slide: &'a Slide, theme: &'a SlideTheme) -> Self {
        Self { slide, theme }
    }

    /// Smallest size that holds the notes.
    pub fn natural_size(&self) -> Size {
        Size::new(
            self.slide.notes.iter().map(|l| l.width()).max().unwrap_or(0),
            self.slide.notes.len(),
        )
    }
}

impl Renderable for HandoutView<'_> {
    fn render(&self, size: Size) -> Canvas {
        let mut builder = CanvasBuilder::new(size, self.theme.default);
        let left = size.cols.saturating_sub(self.natural_size().cols) / 2;
        for (row, line) in self.slide.notes.iter().enumerate() {
            builder.put_str(left, row, line, self.theme.default);
        }
        builder.build()
    }
}
