//! Slide deck model.
//!
//! - `animation`: per-slide frame tracks driven by the render loop
//! - `layout`: `Renderable` views of a slide and of its handout
//! - `loader`: TOML deck files
//! - `theme`: dark and light slide attributes

pub mod animation;
mod layout;
mod loader;
pub mod theme;

use crate::transition::{TransitionSpec, UnknownStyle};

pub use animation::AnimationTrack;
pub use layout::{HandoutView, SlideView};
pub use loader::{load_deck, parse_deck};
pub use theme::SlideTheme;

/// Structural problems of a deck description.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DeckError {
    #[error("deck contains no slides")]
    Empty,

    #[error("slide {slide}: {source}")]
    Style {
        slide: usize,
        #[source]
        source: UnknownStyle,
    },

    #[error("defaults: {0}")]
    DefaultStyle(#[source] UnknownStyle),

    #[error("transition duration must not be negative (got {0})")]
    NegativeDuration(f64),

    #[error("slide {slide}: animation interval must be positive (got {interval})")]
    BadInterval { slide: usize, interval: f64 },
}

/// One slide.
#[derive(Debug, Clone, Default)]
pub struct Slide {
    pub title: String,
    /// Omit the title row when laying out
    pub hide_title: bool,
    /// Overrides the deck default when set
    pub transition: Option<TransitionSpec>,
    pub body: Vec<String>,
    /// Groups revealed one per step, in order
    pub progressive: Vec<Vec<String>>,
    pub animations: Vec<AnimationTrack>,
    /// Speaker notes, never shown on the audience screen
    pub notes: Vec<String>,
}

impl Slide {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn with_body<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.body = lines.into_iter().map(Into::into).collect();
        self
    }

    /// Append one progressive group.
    pub fn with_group<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.progressive.push(lines.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_transition(mut self, transition: TransitionSpec) -> Self {
        self.transition = Some(transition);
        self
    }

    pub fn progressive_count(&self) -> usize {
        self.progressive.len()
    }

    /// Speaker notes joined into one block, if there are any.
    pub fn handout(&self) -> Option<String> {
        if self.notes.is_empty() {
            None
        } else {
            Some(self.notes.join("\n"))
        }
    }
}

/// An ordered, non-empty list of slides.
#[derive(Debug, Clone)]
pub struct Deck {
    slides: Vec<Slide>,
    default_transition: TransitionSpec,
}

impl Deck {
    pub fn new(slides: Vec<Slide>, default_transition: TransitionSpec) -> Result<Self, DeckError> {
        if slides.is_empty() {
            return Err(DeckError::Empty);
        }
        Ok(Self {
            slides,
            default_transition,
        })
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    /// Always false: construction rejects empty decks.
    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Slide> {
        self.slides.get(index)
    }

    /// Mutable access, used only for animation playback state.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Slide> {
        self.slides.get_mut(index)
    }

    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    pub fn titles(&self) -> Vec<String> {
        self.slides.iter().map(|s| s.title.clone()).collect()
    }

    pub fn progressive_counts(&self) -> Vec<usize> {
        self.slides.iter().map(Slide::progressive_count).collect()
    }

    pub fn default_transition(&self) -> TransitionSpec {
        self.default_transition
    }

    /// Descriptor for slide `index`, falling back to the deck default.
    pub fn transition_for(&self, index: usize) -> TransitionSpec {
        self.slides
            .get(index)
            .and_then(|s| s.transition)
            .unwrap_or(self.default_transition)
    }
}
