//! Deck loading from disk

use std::time::Duration;

use termdeck::canvas::{Renderable, Size};
use termdeck::deck::{load_deck, SlideTheme, SlideView};
use termdeck::TransitionStyle;

use crate::helpers::{deck_dir, SAMPLE_DECK};

#[test]
fn sample_deck_loads() {
    let (_dir, path) = deck_dir(SAMPLE_DECK, &[]);
    let deck = load_deck(&path).unwrap();
    assert_eq!(deck.titles(), vec!["Intro", "Details", "Thanks"]);
    assert_eq!(deck.progressive_counts(), vec![0, 2, 0]);
    assert_eq!(deck.default_transition().style, TransitionStyle::Cut);
    assert_eq!(deck.get(1).unwrap().handout().as_deref(), Some("remember the demo"));
}

#[test]
fn animation_frames_resolve_relative_to_deck() {
    let deck = r#"
[[slides]]
title = "Art"
[[slides.animations]]
frames = ["art/one.ans", "art/two.ans"]
interval = 0.25
oneshot = true
"#;
    let files: &[(&str, &[u8])] = &[
        ("art/one.ans", b"\x1b[31mAB\x1b[0m\r\n"),
        ("art/two.ans", b"\x1b[32mCD\x1b[0m\r\n"),
    ];
    let (_dir, path) = deck_dir(deck, files);
    let deck = load_deck(&path).unwrap();

    let track = &deck.get(0).unwrap().animations[0];
    assert_eq!(track.frames().len(), 2);
    assert_eq!(track.interval(), Duration::from_millis(250));
    assert!(track.is_oneshot());

    // the first frame is laid out below the title
    let theme = SlideTheme::dark();
    let text = SlideView::new(deck.get(0).unwrap(), 0, &theme)
        .render(Size::new(20, 6))
        .to_text();
    assert!(text.contains("Art"));
    assert!(text.contains("AB"));
    assert!(!text.contains("CD"));
}

#[test]
fn slide_transition_overrides_default() {
    let deck = r#"
[defaults]
transition = { style = "pan", duration = 1.5 }

[[slides]]
title = "One"

[[slides]]
title = "Two"
transition = { style = "Tilt" }
"#;
    let (_dir, path) = deck_dir(deck, &[]);
    let deck = load_deck(&path).unwrap();
    assert_eq!(deck.transition_for(0).style, TransitionStyle::Pan);
    assert_eq!(deck.transition_for(0).duration(), Duration::from_millis(1500));
    assert_eq!(deck.transition_for(1).style, TransitionStyle::Tilt);
    assert_eq!(deck.transition_for(1).duration(), Duration::from_millis(400));
}

// ============================================================================
// Errors
// ============================================================================

fn load_error(deck: &str) -> String {
    let (_dir, path) = deck_dir(deck, &[]);
    format!("{:#}", load_deck(&path).unwrap_err())
}

#[test]
fn empty_deck_is_rejected() {
    let err = load_error("[defaults]\n");
    assert!(err.contains("Invalid deck file"));
    assert!(err.contains("no slides"));
}

#[test]
fn unknown_style_names_the_slide() {
    let err = load_error("[[slides]]\ntitle = \"a\"\n\n[[slides]]\ntransition = { style = \"wipe\" }\n");
    assert!(err.contains("slide 1"));
    assert!(err.contains("wipe"));
}

#[test]
fn negative_duration_is_rejected() {
    let err = load_error("[defaults]\ntransition = { style = \"pan\", duration = -1.0 }\n\n[[slides]]\n");
    assert!(err.contains("negative"));
}

#[test]
fn missing_frame_file_is_reported() {
    let err = load_error("[[slides]]\n[[slides.animations]]\nframes = [\"nope.ans\"]\n");
    assert!(err.contains("Failed to read animation frame"));
    assert!(err.contains("nope.ans"));
}

#[test]
fn unknown_keys_are_rejected() {
    let err = load_error("[[slides]]\ntitle = \"a\"\ncolour = \"red\"\n");
    assert!(err.contains("colour"));
}

#[test]
fn missing_deck_file_is_reported() {
    let (dir, _path) = deck_dir(SAMPLE_DECK, &[]);
    let err = load_deck(&dir.path().join("absent.toml")).unwrap_err();
    assert!(format!("{}", err).contains("Failed to read deck file"));
}
