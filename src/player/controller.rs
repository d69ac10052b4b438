//! Playback controller.
//!
//! Owns the deck, the state machine and the display, and carries out
//! every navigation step end to end: animations, transition frames,
//! the final redraw and the snapshot published to control clients.

use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use super::render::Display;
use super::state::{Direction, NavError, PlaybackState, PositionReport, Step, TransitionPlan};
use crate::canvas::{Canvas, Renderable, Size};
use crate::control::{MutatingCommand, Snapshot, SnapshotHandle};
use crate::deck::{AnimationTrack, Deck, SlideTheme, SlideView};
use crate::transition::Compositor;

/// Default transition frame rate.
pub const DEFAULT_FRAME_RATE: u32 = 60;

pub struct Controller<D: Display> {
    deck: Deck,
    state: PlaybackState,
    display: D,
    theme: SlideTheme,
    frame_interval: Duration,
    snapshot: SnapshotHandle,
}

impl<D: Display> Controller<D> {
    pub fn new(deck: Deck, display: D, theme: SlideTheme) -> Self {
        let state = PlaybackState::new(deck.progressive_counts());
        let controller = Self {
            deck,
            state,
            display,
            theme,
            frame_interval: frame_interval(DEFAULT_FRAME_RATE),
            snapshot: SnapshotHandle::default(),
        };
        controller.publish();
        controller
    }

    /// Pace transitions at `fps` frames per second.
    pub fn with_frame_rate(mut self, fps: u32) -> Self {
        self.frame_interval = frame_interval(fps);
        self
    }

    pub fn snapshot(&self) -> SnapshotHandle {
        self.snapshot.clone()
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }

    pub fn position(&self) -> PositionReport {
        let index = self.state.index();
        PositionReport {
            index,
            depth: self.state.depth(),
            title: index
                .and_then(|i| self.deck.get(i))
                .map(|s| s.title.clone())
                .unwrap_or_default(),
        }
    }

    /// Show the first slide.
    pub fn start(&mut self) -> PositionReport {
        if self.state.index().is_none() {
            self.next()
        } else {
            self.position()
        }
    }

    pub fn next(&mut self) -> PositionReport {
        let step = self.state.next();
        self.apply(step);
        self.position()
    }

    pub fn prev(&mut self) -> PositionReport {
        let step = self.state.prev();
        self.apply(step);
        self.position()
    }

    pub fn jump(&mut self, index: usize) -> Result<PositionReport, NavError> {
        let step = self.state.jump(index)?;
        self.apply(step);
        Ok(self.position())
    }

    pub fn execute(&mut self, command: MutatingCommand) -> Result<PositionReport, NavError> {
        debug!(?command, "executing remote command");
        match command {
            MutatingCommand::Next => Ok(self.next()),
            MutatingCommand::Prev => Ok(self.prev()),
            MutatingCommand::Jump(index) => self.jump(index),
        }
    }

    fn apply(&mut self, step: Step) {
        match step {
            Step::Stay => {}
            Step::Reveal { depth } => {
                debug!(depth, "progressive reveal");
                self.redraw();
                self.publish();
            }
            Step::Transition(plan) => self.run_transition(plan),
        }
    }

    /// Render slide `index` at `depth`, or the blank pre-start screen.
    fn render_slide(&self, index: Option<usize>, depth: usize, size: Size) -> Canvas {
        match index.and_then(|i| self.deck.get(i)) {
            Some(slide) => SlideView::new(slide, depth, &self.theme).render(size),
            None => Canvas::blank(size, self.theme.default),
        }
    }

    fn current_canvas(&self) -> Canvas {
        self.render_slide(self.state.index(), self.state.depth(), self.display.size())
    }

    fn show(&mut self, canvas: &Canvas) {
        if let Err(e) = self.display.show(canvas) {
            warn!(error = %e, "failed to draw frame");
        }
    }

    /// Re-render the current slide.
    pub fn redraw(&mut self) {
        let canvas = self.current_canvas();
        self.show(&canvas);
    }

    fn run_transition(&mut self, plan: TransitionPlan) {
        if let Some(from) = plan.from {
            self.for_each_track(from, |t| t.stop());
        }

        let spec = self.deck.transition_for(plan.later());
        let duration = spec.duration();
        debug!(
            from = ?plan.from,
            to = plan.to,
            style = %spec.style,
            ?duration,
            "transition"
        );

        if !duration.is_zero() {
            let size = self.display.size();
            let current = self.current_canvas();
            let target = self.render_slide(Some(plan.to), plan.depth, size);
            let (old, new) = match plan.direction {
                Direction::Forward => (current, target),
                Direction::Backward => (target, current),
            };
            let mut compositor = Compositor::new(spec.style, old, new, self.theme.default);

            let started = Instant::now();
            loop {
                let frame_start = Instant::now();
                let elapsed = frame_start.duration_since(started);
                let t = (elapsed.as_secs_f64() / duration.as_secs_f64()).min(1.0);
                let progress = match plan.direction {
                    Direction::Forward => t,
                    Direction::Backward => 1.0 - t,
                };
                let frame = compositor.frame(progress);
                self.show(&frame);
                if elapsed >= duration {
                    break;
                }
                let wait = (frame_start + self.frame_interval).saturating_duration_since(Instant::now());
                thread::sleep(wait.min(duration.saturating_sub(elapsed)));
            }
        }

        self.state.commit(&plan);
        if let Some(from) = plan.from {
            self.for_each_track(from, |t| t.reset());
        }
        self.redraw();
        let now = Instant::now();
        self.for_each_track(plan.to, |t| t.start(now));
        self.publish();
    }

    fn for_each_track(&mut self, index: usize, f: impl Fn(&mut AnimationTrack)) {
        if let Some(slide) = self.deck.get_mut(index) {
            slide.animations.iter_mut().for_each(f);
        }
    }

    /// Nearest animation deadline on the current slide.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.state
            .index()
            .and_then(|i| self.deck.get(i))
            .and_then(|slide| slide.animations.iter().filter_map(|t| t.next_deadline()).min())
    }

    /// Advance due animation frames; redraws when any frame changed.
    pub fn tick_animations(&mut self, now: Instant) -> bool {
        let Some(index) = self.state.index() else {
            return false;
        };
        let changed = match self.deck.get_mut(index) {
            Some(slide) => slide
                .animations
                .iter_mut()
                .fold(false, |changed, track| track.tick(now) | changed),
            None => false,
        };
        if changed {
            self.redraw();
        }
        changed
    }

    /// Adopt a new screen size.
    pub fn resize(&mut self, size: Size) {
        debug!(cols = size.cols, rows = size.rows, "resize");
        self.display.resize(size);
        self.redraw();
        self.publish();
    }

    fn publish(&self) {
        self.snapshot.publish(Snapshot {
            titles: self.deck.titles(),
            position: self.position(),
            size: self.display.size(),
        });
    }
}

fn frame_interval(fps: u32) -> Duration {
    Duration::from_secs(1) / fps.max(1)
}
