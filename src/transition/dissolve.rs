//! Cross-fade between two canvases.
//!
//! Each cell position blends independently. The glyph comes from whichever
//! side is not blank, or from the nearer endpoint when both sides carry
//! one. Foreground and background are interpolated in 8-bit RGB and
//! quantized to four bits per channel.

use crate::canvas::{Canvas, Size};
use crate::terminal::{Attr, Cell, Color};

/// A cell plus its resolved colors: `[fg_r, fg_g, fg_b, bg_r, bg_g, bg_b]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FlatCell {
    cell: Cell,
    rgb: [u8; 6],
}

impl FlatCell {
    fn new(cell: Cell, default_attr: &Attr) -> Self {
        let resolved = match (cell.attr.fg.to_rgb8(), cell.attr.bg.to_rgb8()) {
            (Some(fg), Some(bg)) => Some((fg, bg)),
            _ => None,
        };
        let (fg, bg) = resolved
            .or_else(|| Some((default_attr.fg.to_rgb8()?, default_attr.bg.to_rgb8()?)))
            .unwrap_or(([0xe5; 3], [0; 3]));
        Self {
            cell,
            rgb: [fg[0], fg[1], fg[2], bg[0], bg[1], bg[2]],
        }
    }

    /// Colors with the foreground replaced by the background, so a blank
    /// side fades from its background alone.
    fn background_only(&self) -> [u8; 6] {
        let [_, _, _, r, g, b] = self.rgb;
        [r, g, b, r, g, b]
    }
}

/// Flattened cell buffers of both transition endpoints.
#[derive(Debug, Clone)]
pub struct DissolveBuffers {
    size: Size,
    old: Vec<FlatCell>,
    new: Vec<FlatCell>,
}

impl DissolveBuffers {
    /// # Panics
    /// Panics if the canvases differ in size.
    pub fn new(old: &Canvas, new: &Canvas, default_attr: &Attr) -> Self {
        assert_eq!(old.size(), new.size(), "dissolve between canvases of different sizes");
        let flatten = |canvas: &Canvas| {
            canvas
                .cells()
                .iter()
                .map(|cell| FlatCell::new(*cell, default_attr))
                .collect::<Vec<_>>()
        };
        Self {
            size: old.size(),
            old: flatten(old),
            new: flatten(new),
        }
    }

    pub fn size(&self) -> Size {
        self.size
    }
}

/// Blend the buffered endpoints at `progress`.
pub fn dissolve(buffers: &DissolveBuffers, progress: f64) -> Canvas {
    let progress = progress.clamp(0.0, 1.0);
    let cells = buffers
        .old
        .iter()
        .zip(&buffers.new)
        .map(|(old, new)| blend(old, new, progress))
        .collect();
    Canvas::from_cells(buffers.size, cells)
}

fn blend(old: &FlatCell, new: &FlatCell, progress: f64) -> Cell {
    if old.cell == new.cell {
        return old.cell;
    }

    let (source, old_rgb, new_rgb) = if new.cell.is_blank() {
        (old, old.rgb, new.background_only())
    } else if old.cell.is_blank() {
        (new, old.background_only(), new.rgb)
    } else if progress >= 0.5 {
        (new, old.rgb, new.rgb)
    } else {
        (old, old.rgb, new.rgb)
    };

    let mut rgb = [0u8; 6];
    for (i, channel) in rgb.iter_mut().enumerate() {
        let (o, n) = (f64::from(old_rgb[i]), f64::from(new_rgb[i]));
        *channel = (((n - o) * progress + o) as u8) >> 4;
    }

    let attr = Attr::new(
        Color::Rgb4(rgb[0], rgb[1], rgb[2]),
        Color::Rgb4(rgb[3], rgb[4], rgb[5]),
    )
    .with_flags(source.cell.attr.flags);
    Cell::new(source.cell.ch, attr)
}
