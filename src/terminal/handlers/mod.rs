//! Terminal escape sequence handlers.
//!
//! Organized by category:
//! - cursor: Cursor movement and positioning
//! - style: SGR (Select Graphic Rendition) handling

pub mod cursor;
pub mod style;

pub use cursor::Cursor;
pub use style::{apply_sgr, Pen};
