//! Player state management
//!
//! Contains the `PlaybackState` state machine (current slide and reveal
//! depth) together with the shared types the controller and the input
//! handlers exchange.

/// Result of processing an input event.
///
/// This enum is returned by input handlers to signal control flow
/// decisions to the main loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputResult {
    /// Nothing to do
    Continue,
    /// Advance one step
    Next,
    /// Go back one step
    Prev,
    /// Exit the player
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Transitioning {
        direction: Direction,
        from: Option<usize>,
        to: usize,
    },
}

/// A slide change the controller has to carry out, then hand back to
/// [`PlaybackState::commit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionPlan {
    pub direction: Direction,
    /// `None` when leaving the blank pre-start screen
    pub from: Option<usize>,
    pub to: usize,
    /// Reveal depth of the target once the transition completes
    pub depth: usize,
}

impl TransitionPlan {
    /// The later slide of the pair, whose descriptor drives the
    /// transition in either direction.
    pub fn later(&self) -> usize {
        match (self.direction, self.from) {
            (Direction::Backward, Some(from)) => from,
            _ => self.to,
        }
    }
}

/// Outcome of a navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Nothing changed
    Stay,
    /// Same slide, new reveal depth
    Reveal { depth: usize },
    /// A slide change is pending
    Transition(TransitionPlan),
}

/// Current position as reported to remote clients.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PositionReport {
    /// `None` before the first slide is shown
    pub index: Option<usize>,
    pub depth: usize,
    pub title: String,
}

impl PositionReport {
    /// The index as sent on the wire, with -1 for "nothing shown yet".
    pub fn wire_index(&self) -> i64 {
        self.index.map_or(-1, |i| i as i64)
    }
}

/// Navigation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum NavError {
    #[error("slide {index} is out of range (deck has {len} slides)")]
    OutOfRange { index: usize, len: usize },
}

/// Slide index and reveal depth.
///
/// Owned by the rendering thread. Only the controller drives it.
#[derive(Debug, Clone)]
pub struct PlaybackState {
    index: Option<usize>,
    depth: usize,
    phase: Phase,
    /// Progressive group count per slide
    counts: Vec<usize>,
}

impl PlaybackState {
    /// State before the first slide is shown.
    pub fn new(progressive_counts: Vec<usize>) -> Self {
        Self {
            index: None,
            depth: 0,
            phase: Phase::Idle,
            counts: progressive_counts,
        }
    }

    pub fn index(&self) -> Option<usize> {
        self.index
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    fn is_transitioning(&self) -> bool {
        matches!(self.phase, Phase::Transitioning { .. })
    }

    fn begin(&mut self, direction: Direction, to: usize, depth: usize) -> Step {
        let plan = TransitionPlan {
            direction,
            from: self.index,
            to,
            depth,
        };
        self.phase = Phase::Transitioning {
            direction,
            from: self.index,
            to,
        };
        Step::Transition(plan)
    }

    /// Reveal the next group, or move to the next slide.
    pub fn next(&mut self) -> Step {
        if self.is_transitioning() {
            return Step::Stay;
        }
        match self.index {
            None if self.is_empty() => Step::Stay,
            None => self.begin(Direction::Forward, 0, 0),
            Some(i) if self.depth < self.counts[i] => {
                self.depth += 1;
                Step::Reveal { depth: self.depth }
            }
            Some(i) if i + 1 >= self.counts.len() => Step::Stay,
            Some(i) => self.begin(Direction::Forward, i + 1, 0),
        }
    }

    /// Hide the last revealed group, or move to the previous slide fully
    /// revealed.
    pub fn prev(&mut self) -> Step {
        if self.is_transitioning() {
            return Step::Stay;
        }
        match self.index {
            None | Some(0) if self.depth == 0 => Step::Stay,
            Some(_) if self.depth > 0 => {
                self.depth -= 1;
                Step::Reveal { depth: self.depth }
            }
            Some(i) if i > 0 => self.begin(Direction::Backward, i - 1, self.counts[i - 1]),
            _ => Step::Stay,
        }
    }

    /// Go straight to `target` with nothing revealed.
    pub fn jump(&mut self, target: usize) -> Result<Step, NavError> {
        if target >= self.counts.len() {
            return Err(NavError::OutOfRange {
                index: target,
                len: self.counts.len(),
            });
        }
        if self.is_transitioning() {
            return Ok(Step::Stay);
        }
        let direction = match self.index {
            Some(current) if target < current => Direction::Backward,
            _ => Direction::Forward,
        };
        Ok(self.begin(direction, target, 0))
    }

    /// Finish a transition at its target.
    pub fn commit(&mut self, plan: &TransitionPlan) {
        self.index = Some(plan.to);
        self.depth = plan.depth;
        self.phase = Phase::Idle;
    }
}
