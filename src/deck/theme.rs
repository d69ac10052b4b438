//! Slide color themes.

use crate::terminal::{Attr, CellFlags, Color};

/// Attributes used when laying out a slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlideTheme {
    /// Body text and the slide background
    pub default: Attr,
    /// Slide title
    pub title: Attr,
    /// Progressive groups that are not revealed yet
    pub progressive: Attr,
}

impl SlideTheme {
    /// Light gray on black.
    pub fn dark() -> Self {
        Self {
            default: Attr::new(Color::Indexed(7), Color::BLACK),
            title: Attr::new(Color::Indexed(15), Color::BLACK).with_flags(CellFlags::BOLD),
            progressive: Attr::new(Color::Indexed(8), Color::BLACK),
        }
    }

    /// Black on bright white.
    pub fn light() -> Self {
        let paper = Color::Indexed(15);
        Self {
            default: Attr::new(Color::BLACK, paper),
            title: Attr::new(Color::BLACK, paper).with_flags(CellFlags::BOLD),
            progressive: Attr::new(Color::Indexed(7), paper),
        }
    }

    pub fn select(light: bool) -> Self {
        if light {
            Self::light()
        } else {
            Self::dark()
        }
    }
}

impl Default for SlideTheme {
    fn default() -> Self {
        Self::dark()
    }
}
