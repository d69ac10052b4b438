//! Timed frame cycling for ANSI-art animations.
//!
//! A track never owns a timer of its own. The render loop asks every
//! running track for its [`AnimationTrack::next_deadline`], waits until the
//! nearest one, then calls [`AnimationTrack::tick`].

use std::time::{Duration, Instant};

use crate::canvas::{Canvas, Size};
use crate::terminal::Attr;

/// Default delay between frames.
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(500);

/// Shortest accepted frame interval.
const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// An ordered list of frames played on a fixed interval.
#[derive(Debug, Clone)]
pub struct AnimationTrack {
    frames: Vec<Canvas>,
    interval: Duration,
    oneshot: bool,
    current: usize,
    /// Set while running
    deadline: Option<Instant>,
    extent: Size,
}

impl AnimationTrack {
    pub fn new(frames: Vec<Canvas>, interval: Duration, oneshot: bool) -> Self {
        let background = Attr::ansi_default();
        let extent = frames.iter().fold(Size::default(), |acc, frame| {
            Size::new(
                acc.cols.max(frame.content_width(&background)),
                acc.rows.max(frame.content_height(&background)),
            )
        });
        Self {
            frames,
            interval: interval.max(MIN_INTERVAL),
            oneshot,
            current: 0,
            deadline: None,
            extent,
        }
    }

    pub fn frames(&self) -> &[Canvas] {
        &self.frames
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_oneshot(&self) -> bool {
        self.oneshot
    }

    pub fn is_running(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_frame(&self) -> Option<&Canvas> {
        self.frames.get(self.current)
    }

    /// Largest visible extent over all frames, so layout does not jitter
    /// between frames of different size.
    pub fn extent(&self) -> Size {
        self.extent
    }

    /// Arm the first deadline. No-op when already running or when there
    /// is nothing to cycle through.
    pub fn start(&mut self, now: Instant) {
        if self.is_running() || self.frames.len() <= 1 {
            return;
        }
        self.deadline = Some(now + self.interval);
    }

    /// Halt without touching the current frame.
    pub fn stop(&mut self) {
        self.deadline = None;
    }

    /// Rewind to the first frame.
    pub fn reset(&mut self) {
        self.current = 0;
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Advance once per expired deadline. Returns whether the visible
    /// frame changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let mut changed = false;
        while let Some(deadline) = self.deadline {
            if deadline > now {
                break;
            }
            if self.current + 1 >= self.frames.len() {
                if self.oneshot {
                    self.deadline = None;
                    break;
                }
                self.current = 0;
            } else {
                self.current += 1;
            }
            changed = true;
            self.deadline = Some(deadline + self.interval);
        }
        changed
    }
}
