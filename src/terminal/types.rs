//! Terminal data types.
//!
//! Contains the core data structures for representing styled text:
//! - Color: palette slots, 4-bit-per-channel RGB, grayscale
//! - CellFlags: Text attributes (bold, underline, standout, blink)
//! - Attr: Foreground, background and flags together
//! - Cell: A single character with its attribute
//! - Run: A horizontal stretch of text sharing one attribute

use super::palette::{gray_to_rgb8, BASIC_RGB};

/// A cell color.
///
/// Every variant except `Default` normalizes to 8-bit RGB through
/// [`Color::to_rgb8`], which is what the dissolve compositor blends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Color {
    /// Unset; the renderer falls back to the deck's default attribute
    #[default]
    Default,
    /// Base 16-color palette slot (0..=15)
    Indexed(u8),
    /// 4-bit-per-channel RGB (`#rgb`), each channel 0..=15
    Rgb4(u8, u8, u8),
    /// Grayscale percentage (0..=100)
    Gray(u8),
}

impl Color {
    /// Black, the background every ANSI art source assumes.
    pub const BLACK: Color = Color::Indexed(0);

    /// Normalize to 8-bit RGB. Returns `None` for `Color::Default`.
    pub fn to_rgb8(self) -> Option<[u8; 3]> {
        match self {
            Color::Default => None,
            Color::Indexed(n) => Some(BASIC_RGB[(n & 0x0f) as usize]),
            Color::Rgb4(r, g, b) => Some([r.min(15) * 0x11, g.min(15) * 0x11, b.min(15) * 0x11]),
            Color::Gray(level) => {
                let v = gray_to_rgb8(level);
                Some([v, v, v])
            }
        }
    }
}

/// Text style flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CellFlags {
    pub bold: bool,
    pub underline: bool,
    pub standout: bool,
    pub blink: bool,
}

impl CellFlags {
    pub const BOLD: CellFlags = CellFlags {
        bold: true,
        underline: false,
        standout: false,
        blink: false,
    };
}

/// Foreground, background and style flags of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Attr {
    pub fg: Color,
    pub bg: Color,
    pub flags: CellFlags,
}

impl Attr {
    pub const fn new(fg: Color, bg: Color) -> Self {
        Self {
            fg,
            bg,
            flags: CellFlags {
                bold: false,
                underline: false,
                standout: false,
                blink: false,
            },
        }
    }

    /// Light gray on black, the attribute an ANSI stream starts from.
    pub const fn ansi_default() -> Self {
        Self::new(Color::Indexed(7), Color::Indexed(0))
    }

    pub fn with_flags(mut self, flags: CellFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Same foreground and background (flags ignored).
    pub fn same_colors(&self, other: &Attr) -> bool {
        self.fg == other.fg && self.bg == other.bg
    }
}

/// A single character cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub ch: char,
    pub attr: Attr,
}

impl Cell {
    pub const fn new(ch: char, attr: Attr) -> Self {
        Self { ch, attr }
    }

    pub const fn blank(attr: Attr) -> Self {
        Self { ch: ' ', attr }
    }

    pub fn is_blank(&self) -> bool {
        self.ch == ' '
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::blank(Attr::default())
    }
}

/// A stretch of text rendered with a single attribute.
///
/// Text may span several grid rows, separated by `\n`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Run {
    pub attr: Attr,
    pub text: String,
}

impl Run {
    pub fn new(attr: Attr, text: impl Into<String>) -> Self {
        Self {
            attr,
            text: text.into(),
        }
    }
}
