//! Rendering components for the player.
//!
//! Everything the player draws goes through the [`Display`] trait: the
//! terminal sink in `screen` for real playback and [`RecordingDisplay`]
//! for tests.

mod ansi;
mod screen;

use anyhow::Result;

use crate::canvas::{Canvas, Size};

pub use ansi::{attr_to_ansi_bg, attr_to_ansi_fg, attr_to_ansi_flags, attr_to_sgr};
pub use screen::{canvas_to_ansi, TerminalDisplay};

/// A place finished frames are shown.
pub trait Display {
    /// Current drawable area.
    fn size(&self) -> Size;

    /// Record a new drawable area.
    fn resize(&mut self, size: Size);

    /// Replace the visible frame.
    fn show(&mut self, canvas: &Canvas) -> Result<()>;
}

/// In-memory display keeping every shown frame.
#[derive(Debug, Clone, Default)]
pub struct RecordingDisplay {
    size: Size,
    frames: Vec<Canvas>,
}

impl RecordingDisplay {
    pub fn new(size: Size) -> Self {
        Self {
            size,
            frames: Vec::new(),
        }
    }

    pub fn frames(&self) -> &[Canvas] {
        &self.frames
    }

    pub fn last(&self) -> Option<&Canvas> {
        self.frames.last()
    }

    pub fn clear(&mut self) {
        self.frames.clear();
    }
}

impl Display for RecordingDisplay {
    fn size(&self) -> Size {
        self.size
    }

    fn resize(&mut self, size: Size) {
        self.size = size;
    }

    fn show(&mut self, canvas: &Canvas) -> Result<()> {
        self.frames.push(canvas.clone());
        Ok(())
    }
}
