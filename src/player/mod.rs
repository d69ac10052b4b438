//! Slide deck player
//!
//! # Architecture
//!
//! The player is organized into submodules:
//! - `state`: PlaybackState machine and shared types (Step, PositionReport, InputResult)
//! - `controller`: owns the deck and display, runs transitions and animations
//! - `input/`: keyboard handling and the input reader thread
//! - `render/`: the Display seam, ANSI encoding and the terminal sink
//! - `native`: the render loop tying input and remote requests together
//!
//! # Usage
//!
//! ```no_run
//! use termdeck::deck::load_deck;
//! use termdeck::player::{play_deck, PlayOptions, PlaybackResult};
//! use std::path::Path;
//!
//! let deck = load_deck(Path::new("talk.toml")).unwrap();
//! match play_deck(deck, &PlayOptions::default()).unwrap() {
//!     PlaybackResult::Quit => println!("Done"),
//!     PlaybackResult::Interrupted => println!("Stopped by signal"),
//!     PlaybackResult::Closed => {}
//! }
//! ```

pub mod controller;
pub(crate) mod input;
mod native;
pub mod render;
pub mod state;

pub use controller::{Controller, DEFAULT_FRAME_RATE};
pub use native::{play_deck, run_loop, LoopEvent, PlayOptions, PlaybackResult};
pub use state::{
    Direction, InputResult, NavError, Phase, PlaybackState, PositionReport, Step, TransitionPlan,
};
