//! Geometric transitions and the per-transition compositor.

use super::dissolve::{dissolve, DissolveBuffers};
use super::TransitionStyle;
use crate::canvas::{Canvas, CanvasBuilder};
use crate::terminal::Attr;

/// Blend `old` and `new` for `progress` in `[0, 1]`.
///
/// `default_attr` supplies colors for cells whose colors are unset; only
/// dissolve consults it.
///
/// # Panics
/// Panics if the canvases differ in size. Transitions between different
/// geometries must be ruled out by the caller.
pub fn composite(
    old: &Canvas,
    new: &Canvas,
    style: TransitionStyle,
    progress: f64,
    default_attr: &Attr,
) -> Canvas {
    assert_same_size(old, new);
    let progress = progress.clamp(0.0, 1.0);
    match style {
        TransitionStyle::Cut => new.clone(),
        TransitionStyle::Pan => pan(old, new, progress),
        TransitionStyle::Tilt => tilt(old, new, progress),
        TransitionStyle::Dissolve => {
            let buffers = DissolveBuffers::new(old, new, default_attr);
            dissolve(&buffers, progress)
        }
    }
}

fn assert_same_size(old: &Canvas, new: &Canvas) {
    assert_eq!(
        old.size(),
        new.size(),
        "transition between canvases of different sizes"
    );
}

/// Window offset into the doubled buffer.
fn offset(extent: usize, progress: f64) -> usize {
    ((extent as f64 * progress).round() as usize).min(extent)
}

/// `old` and `new` side by side; a window of the original width slides
/// right by `round(width * progress)` columns.
fn pan(old: &Canvas, new: &Canvas, progress: f64) -> Canvas {
    let size = old.size();
    let shift = offset(size.cols, progress);
    if shift == 0 {
        return old.clone();
    }
    if shift == size.cols {
        return new.clone();
    }

    let fill = old.cells().first().map(|c| c.attr).unwrap_or_default();
    let mut builder = CanvasBuilder::new(size, fill);
    let old_part = crate::canvas::Size::new(size.cols - shift, size.rows);
    let new_part = crate::canvas::Size::new(shift, size.rows);
    builder.blit_region(0, 0, old, shift, 0, old_part);
    builder.blit_region(size.cols - shift, 0, new, 0, 0, new_part);
    builder.build()
}

/// `old` above `new`; a window of the original height slides down by
/// `round(height * progress)` rows.
fn tilt(old: &Canvas, new: &Canvas, progress: f64) -> Canvas {
    let size = old.size();
    let shift = offset(size.rows, progress);
    if shift == 0 {
        return old.clone();
    }
    if shift == size.rows {
        return new.clone();
    }

    let fill = old.cells().first().map(|c| c.attr).unwrap_or_default();
    let mut builder = CanvasBuilder::new(size, fill);
    let old_part = crate::canvas::Size::new(size.cols, size.rows - shift);
    let new_part = crate::canvas::Size::new(size.cols, shift);
    builder.blit_region(0, 0, old, 0, shift, old_part);
    builder.blit_region(0, size.rows - shift, new, 0, 0, new_part);
    builder.build()
}

/// Compositor for one transition between two fixed canvases.
///
/// Dissolve frames reuse the flattened cell buffers across calls; they
/// are rebuilt only when the targets change.
#[derive(Debug)]
pub struct Compositor {
    style: TransitionStyle,
    default_attr: Attr,
    old: Canvas,
    new: Canvas,
    buffers: Option<DissolveBuffers>,
}

impl Compositor {
    /// # Panics
    /// Panics if the canvases differ in size.
    pub fn new(style: TransitionStyle, old: Canvas, new: Canvas, default_attr: Attr) -> Self {
        assert_same_size(&old, &new);
        Self {
            style,
            default_attr,
            old,
            new,
            buffers: None,
        }
    }

    pub fn style(&self) -> TransitionStyle {
        self.style
    }

    /// Replace the targets, dropping cached buffers that no longer match.
    pub fn set_targets(&mut self, old: Canvas, new: Canvas) {
        assert_same_size(&old, &new);
        if !old.ptr_eq(&self.old) || !new.ptr_eq(&self.new) {
            self.buffers = None;
        }
        self.old = old;
        self.new = new;
    }

    /// Frame at `progress`.
    pub fn frame(&mut self, progress: f64) -> Canvas {
        let progress = progress.clamp(0.0, 1.0);
        match self.style {
            TransitionStyle::Dissolve => {
                let size = self.old.size();
                let stale = self.buffers.as_ref().map_or(true, |b| b.size() != size);
                if stale {
                    self.buffers = Some(DissolveBuffers::new(&self.old, &self.new, &self.default_attr));
                }
                match &self.buffers {
                    Some(buffers) => dissolve(buffers, progress),
                    None => self.new.clone(),
                }
            }
            style => composite(&self.old, &self.new, style, progress, &self.default_attr),
        }
    }

    /// Whether dissolve buffers are currently cached.
    pub fn is_cached(&self) -> bool {
        self.buffers.is_some()
    }
}
