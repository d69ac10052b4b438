//! termdeck - Terminal slide deck player
//!
//! Plays a deck of character-grid slides with progressive reveal,
//! looping ANSI-art animations and animated transitions, and exposes a
//! line-oriented control socket so a second process can drive playback.
//!
//! # Module Structure
//!
//! - [`terminal`] - ANSI stream parser producing styled cell grids
//! - [`canvas`] - Immutable cell grid shared by every other component
//! - [`transition`] - Cut/pan/tilt/dissolve compositor
//! - [`deck`] - Slides, deck loading, layout and animation tracks
//! - [`player`] - Playback state machine, controller and render loop
//! - [`control`] - Remote control protocol, server and client
//! - [`tui`] - Presenter console
//! - [`config`] - User configuration
//! - [`logging`] - Tracing subscriber setup

pub mod canvas;
pub mod config;
pub mod control;
pub mod deck;
pub mod logging;
pub mod player;
pub mod terminal;
pub mod transition;
pub mod tui;

pub use canvas::{Canvas, CanvasBuilder, Renderable, Size};
pub use config::Config;
pub use deck::{Deck, Slide};
pub use player::{Controller, PlaybackState};
pub use terminal::{AnsiParser, Attr, Cell, Color, ParsedArt, Run};
pub use transition::{composite, Compositor, TransitionSpec, TransitionStyle};
