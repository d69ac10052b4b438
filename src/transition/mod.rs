//! Slide transitions.
//!
//! A transition blends the outgoing and incoming slide canvases into an
//! in-between frame for a progress value in `[0, 1]`:
//!
//! - `cut`: instant swap, never animated
//! - `pan`: horizontal slide of the two canvases side by side
//! - `tilt`: vertical slide of the two canvases stacked
//! - `dissolve`: per-cell glyph selection and color interpolation
//!
//! [`composite`] is the stateless form; [`Compositor`] keeps the
//! flattened dissolve buffers between frames of one transition.

mod compositor;
mod dissolve;

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;

pub use compositor::{composite, Compositor};
pub use dissolve::{dissolve, DissolveBuffers};

/// Default transition duration in seconds.
pub const DEFAULT_DURATION_SECS: f64 = 0.4;

/// Transition style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransitionStyle {
    Cut,
    Pan,
    Tilt,
    #[default]
    Dissolve,
}

impl TransitionStyle {
    pub const ALL: [TransitionStyle; 4] = [
        TransitionStyle::Cut,
        TransitionStyle::Pan,
        TransitionStyle::Tilt,
        TransitionStyle::Dissolve,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            TransitionStyle::Cut => "cut",
            TransitionStyle::Pan => "pan",
            TransitionStyle::Tilt => "tilt",
            TransitionStyle::Dissolve => "dissolve",
        }
    }
}

impl fmt::Display for TransitionStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error for an unrecognized transition style name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown transition style '{0}' (expected cut, pan, tilt or dissolve)")]
pub struct UnknownStyle(pub String);

impl FromStr for TransitionStyle {
    type Err = UnknownStyle;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TransitionStyle::ALL
            .into_iter()
            .find(|style| style.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownStyle(s.to_string()))
    }
}

/// A transition descriptor: style plus duration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionSpec {
    pub style: TransitionStyle,
    duration: Duration,
}

impl TransitionSpec {
    pub fn new(style: TransitionStyle, duration: Duration) -> Self {
        Self { style, duration }
    }

    pub fn cut() -> Self {
        Self::new(TransitionStyle::Cut, Duration::ZERO)
    }

    /// Effective duration. A cut is always instantaneous.
    pub fn duration(&self) -> Duration {
        match self.style {
            TransitionStyle::Cut => Duration::ZERO,
            _ => self.duration,
        }
    }
}

impl Default for TransitionSpec {
    fn default() -> Self {
        Self::new(
            TransitionStyle::Dissolve,
            Duration::from_secs_f64(DEFAULT_DURATION_SECS),
        )
    }
}
