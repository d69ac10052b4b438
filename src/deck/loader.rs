//! TOML deck files.
//!
//! ```toml
//! [defaults]
//! transition = { style = "dissolve", duration = 0.4 }
//!
//! [[slides]]
//! title = "Intro"
//! body = ["line", "line"]
//! progressive = [["first"], ["second"]]
//! notes = ["speaker note"]
//!
//! [[slides.animations]]
//! frames = ["art/a1.ans", "art/a2.ans"]
//! interval = 0.5
//! ```
//!
//! Animation frame paths are resolved relative to the deck file.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::debug;

use super::animation::{AnimationTrack, DEFAULT_INTERVAL};
use super::{Deck, DeckError, Slide};
use crate::terminal::AnsiParser;
use crate::transition::{TransitionSpec, TransitionStyle, DEFAULT_DURATION_SECS};

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct DeckFile {
    #[serde(default)]
    defaults: Defaults,
    #[serde(default)]
    slides: Vec<SlideEntry>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct Defaults {
    transition: Option<TransitionEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TransitionEntry {
    style: String,
    #[serde(default = "default_duration")]
    duration: f64,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SlideEntry {
    #[serde(default)]
    title: String,
    #[serde(default)]
    hide_title: bool,
    transition: Option<TransitionEntry>,
    #[serde(default)]
    body: Vec<String>,
    #[serde(default)]
    progressive: Vec<Vec<String>>,
    #[serde(default)]
    notes: Vec<String>,
    #[serde(default)]
    animations: Vec<AnimationEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct AnimationEntry {
    frames: Vec<PathBuf>,
    #[serde(default = "default_interval")]
    interval: f64,
    #[serde(default)]
    oneshot: bool,
}

fn default_duration() -> f64 {
    DEFAULT_DURATION_SECS
}

fn default_interval() -> f64 {
    DEFAULT_INTERVAL.as_secs_f64()
}

/// Read and parse a deck file.
pub fn load_deck(path: &Path) -> Result<Deck> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read deck file {}", path.display()))?;
    let base = path.parent().unwrap_or_else(|| Path::new("."));
    parse_deck(&text, base).with_context(|| format!("Invalid deck file {}", path.display()))
}

/// Parse deck TOML, resolving frame paths against `base`.
pub fn parse_deck(text: &str, base: &Path) -> Result<Deck> {
    let file: DeckFile = toml::from_str(text).context("Failed to parse deck TOML")?;

    let default_transition = match &file.defaults.transition {
        Some(entry) => {
            let style = entry.style.parse().map_err(DeckError::DefaultStyle)?;
            transition_spec(style, entry.duration)?
        }
        None => TransitionSpec::default(),
    };

    let slides = file
        .slides
        .into_iter()
        .enumerate()
        .map(|(index, entry)| build_slide(index, entry, base))
        .collect::<Result<Vec<_>>>()?;

    debug!(slides = slides.len(), "deck parsed");
    Ok(Deck::new(slides, default_transition)?)
}

fn transition_spec(style: TransitionStyle, duration: f64) -> Result<TransitionSpec, DeckError> {
    if duration < 0.0 || !duration.is_finite() {
        return Err(DeckError::NegativeDuration(duration));
    }
    Ok(TransitionSpec::new(style, Duration::from_secs_f64(duration)))
}

fn build_slide(index: usize, entry: SlideEntry, base: &Path) -> Result<Slide> {
    let transition = entry
        .transition
        .map(|t| {
            let style = t.style.parse().map_err(|source| DeckError::Style {
                slide: index,
                source,
            })?;
            transition_spec(style, t.duration)
        })
        .transpose()?;

    let animations = entry
        .animations
        .into_iter()
        .map(|anim| load_track(index, anim, base))
        .collect::<Result<Vec<_>>>()?;

    Ok(Slide {
        title: single_line(&entry.title),
        hide_title: entry.hide_title,
        transition,
        body: entry.body,
        progressive: entry.progressive,
        animations,
        notes: entry.notes,
    })
}

/// Titles travel in one protocol line each, so control characters
/// (newlines included) become spaces.
fn single_line(title: &str) -> String {
    title.chars().map(|c| if c.is_control() { ' ' } else { c }).collect()
}

fn load_track(index: usize, entry: AnimationEntry, base: &Path) -> Result<AnimationTrack> {
    if entry.interval <= 0.0 || !entry.interval.is_finite() {
        return Err(DeckError::BadInterval {
            slide: index,
            interval: entry.interval,
        }
        .into());
    }

    let frames = entry
        .frames
        .iter()
        .map(|frame| {
            let path = base.join(frame);
            let bytes = fs::read(&path)
                .with_context(|| format!("Failed to read animation frame {}", path.display()))?;
            Ok(AnsiParser::parse(&bytes).canvas)
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(AnimationTrack::new(
        frames,
        Duration::from_secs_f64(entry.interval),
        entry.oneshot,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn parse(text: &str) -> Result<Deck> {
        parse_deck(text, Path::new("."))
    }

    #[test]
    fn control_characters_in_titles_become_spaces() {
        let deck = parse("[[slides]]\ntitle = \"Two\\nlines\\tand tab\"\n").unwrap();
        assert_eq!(deck.get(0).unwrap().title, "Two lines and tab");
    }

    #[test]
    fn minimal_deck() {
        let deck = parse("[[slides]]\ntitle = \"One\"\n").unwrap();
        assert_eq!(deck.len(), 1);
        assert_eq!(deck.get(0).unwrap().title, "One");
        assert_eq!(deck.default_transition(), TransitionSpec::default());
    }

    #[test]
    fn empty_deck_fails() {
        let err = parse("").unwrap_err();
        assert!(err.downcast_ref::<DeckError>().is_some_and(|e| *e == DeckError::Empty));
    }

    #[test]
    fn defaults_and_overrides() {
        let deck = parse(
            r#"
            [defaults]
            transition = { style = "Pan", duration = 0.2 }

            [[slides]]
            title = "a"

            [[slides]]
            title = "b"
            transition = { style = "cut" }
            progressive = [["x"], ["y"], ["z"]]
            "#,
        )
        .unwrap();
        assert_eq!(deck.default_transition().style, TransitionStyle::Pan);
        assert_eq!(deck.default_transition().duration(), Duration::from_millis(200));
        assert_eq!(deck.transition_for(1).style, TransitionStyle::Cut);
        assert_eq!(deck.progressive_counts(), vec![0, 3]);
    }

    #[test]
    fn unknown_style_is_reported_with_slide() {
        let err = parse("[[slides]]\ntransition = { style = \"wipe\" }\n").unwrap_err();
        let message = format!("{:#}", err);
        assert!(message.contains("slide 0"), "{}", message);
        assert!(message.contains("wipe"), "{}", message);
    }

    #[test]
    fn negative_duration_fails() {
        let err = parse("[defaults]\ntransition = { style = \"pan\", duration = -1.0 }\n[[slides]]\n")
            .unwrap_err();
        assert!(err.downcast_ref::<DeckError>().is_some());
    }

    #[test]
    fn unknown_fields_are_rejected() {
        assert!(parse("[[slides]]\ntitel = \"typo\"\n").is_err());
    }

    #[test]
    fn frames_load_relative_to_deck() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("art")).unwrap();
        fs::write(dir.path().join("art/a.ans"), "\x1b[31m*").unwrap();
        fs::write(dir.path().join("art/b.ans"), "\x1b[32m+").unwrap();
        let deck_path = dir.path().join("deck.toml");
        fs::write(
            &deck_path,
            "[[slides]]\n[[slides.animations]]\nframes = [\"art/a.ans\", \"art/b.ans\"]\ninterval = 0.25\noneshot = true\n",
        )
        .unwrap();

        let deck = load_deck(&deck_path).unwrap();
        let track = &deck.get(0).unwrap().animations[0];
        assert_eq!(track.frames().len(), 2);
        assert_eq!(track.interval(), Duration::from_millis(250));
        assert!(track.is_oneshot());
        assert_eq!(track.frames()[1].cell(0, 0).ch, '+');
    }

    #[test]
    fn missing_frame_names_the_file() {
        let dir = TempDir::new().unwrap();
        let deck_path = dir.path().join("deck.toml");
        fs::write(&deck_path, "[[slides]]\n[[slides.animations]]\nframes = [\"nope.ans\"]\n").unwrap();
        let err = load_deck(&deck_path).unwrap_err();
        assert!(format!("{:#}", err).contains("nope.ans"));
    }

    #[test]
    fn zero_interval_fails() {
        let err = parse("[[slides]]\n[[slides.animations]]\nframes = []\ninterval = 0.0\n");
        assert!(err.is_err());
    }
}
