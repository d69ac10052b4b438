//! ANSI art parsing module.
//!
//! Turns a raw byte stream of text and escape sequences into a styled
//! character grid. Only cursor movement (A, C, H) and SGR color/style
//! sequences are interpreted; everything else is dropped.
//!
//! - `types`: Color, CellFlags, Attr, Cell, Run
//! - `palette`: 16-color, 6x6x6 cube and grayscale tables
//! - `handlers`: Cursor and SGR handlers
//! - `parser`: The `vte`-driven grid performer

pub mod handlers;
pub mod palette;
mod parser;
mod types;

#[cfg(test)]
mod tests;

pub use parser::{AnsiParser, GridPerformer, ParsedArt, LINE_WIDTH};
pub use types::{Attr, Cell, CellFlags, Color, Run};
