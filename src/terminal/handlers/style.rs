//! SGR (Select Graphic Rendition) handler.
//!
//! Handles CSI m sequence for text styling:
//! - Reset (0)
//! - Bold, underline, blink, standout (1, 4, 5, 7)
//! - Standard foreground/background colors (30-47)
//! - Extended colors - 256-color mode (38;5;n, 48;5;n)
//! - Extended colors - RGB mode (38;2;r;g;b, 48;2;r;g;b), quantized to the cube
//!
//! Anything else is ignored.

use crate::terminal::palette::{color_from_index, color_from_rgb};
use crate::terminal::types::{Attr, CellFlags, Color};

/// The pen: attribute state accumulated from SGR sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pen {
    pub fg: u8,
    pub bg: u8,
    pub bold: bool,
    pub blink: bool,
    pub underline: bool,
    pub standout: bool,
    /// Extended (256-color) foreground overriding `fg`
    pub fg_ext: Option<Color>,
    /// Extended (256-color) background overriding `bg`
    pub bg_ext: Option<Color>,
}

impl Default for Pen {
    fn default() -> Self {
        Self {
            fg: 7,
            bg: 0,
            bold: false,
            blink: false,
            underline: false,
            standout: false,
            fg_ext: None,
            bg_ext: None,
        }
    }
}

impl Pen {
    /// The cell attribute this pen currently paints with.
    pub fn attr(&self) -> Attr {
        let fg = match self.fg_ext {
            Some(color) => color,
            None if self.bold => Color::Indexed(self.fg + 8),
            None => Color::Indexed(self.fg),
        };
        let bg = self.bg_ext.unwrap_or(Color::Indexed(self.bg));
        Attr {
            fg,
            bg,
            flags: CellFlags {
                bold: self.bold,
                underline: self.underline,
                standout: self.standout,
                blink: self.blink,
            },
        }
    }
}

#[derive(Clone, Copy)]
enum Layer {
    Foreground,
    Background,
}

/// Apply one SGR sequence's parameters to the pen.
///
/// An empty parameter list behaves as a single 0.
pub fn apply_sgr(pen: &mut Pen, params: &[u16]) {
    if params.is_empty() {
        *pen = Pen::default();
        return;
    }

    let mut i = 0;
    while i < params.len() {
        match params[i] {
            0 => *pen = Pen::default(),
            1 => pen.bold = true,
            4 => pen.underline = true,
            5 => pen.blink = true,
            7 => pen.standout = true,
            v @ 30..=37 => {
                pen.fg = (v - 30) as u8;
                pen.fg_ext = None;
            }
            v @ 40..=47 => {
                pen.bg = (v - 40) as u8;
                pen.bg_ext = None;
            }
            38 => i += extended_color(pen, Layer::Foreground, &params[i + 1..]),
            48 => i += extended_color(pen, Layer::Background, &params[i + 1..]),
            _ => {}
        }
        i += 1;
    }
}

/// Consume an extended color selector. Returns the number of parameters used.
fn extended_color(pen: &mut Pen, layer: Layer, rest: &[u16]) -> usize {
    match rest {
        [5, index, ..] => {
            set_indexed(pen, layer, *index);
            2
        }
        [2, r, g, b, ..] => {
            set_extended(pen, layer, color_from_rgb(*r, *g, *b));
            4
        }
        // Truncated selector: swallow what is there
        [5] | [2, ..] => rest.len(),
        [index, ..] => {
            set_indexed(pen, layer, *index);
            1
        }
        [] => 0,
    }
}

fn set_indexed(pen: &mut Pen, layer: Layer, index: u16) {
    match (layer, index) {
        (Layer::Foreground, 0..=7) => {
            pen.fg = index as u8;
            pen.fg_ext = None;
        }
        (Layer::Foreground, 8..=15) => {
            pen.fg = (index - 8) as u8;
            pen.bold = true;
            pen.fg_ext = None;
        }
        (Layer::Background, 0..=7) => {
            pen.bg = index as u8;
            pen.bg_ext = None;
        }
        (Layer::Background, 8..=15) => pen.bg_ext = Some(Color::Indexed(index as u8)),
        (layer, index) => match color_from_index(index) {
            Color::Default => {}
            color => set_extended(pen, layer, color),
        },
    }
}

fn set_extended(pen: &mut Pen, layer: Layer, color: Color) {
    match layer {
        Layer::Foreground => pen.fg_ext = Some(color),
        Layer::Background => pen.bg_ext = Some(color),
    }
}
