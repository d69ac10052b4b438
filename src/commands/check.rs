//! Check subcommand handler

use std::path::Path;

use anyhow::Result;

use termdeck::canvas::Renderable;
use termdeck::deck::{load_deck, HandoutView, SlideTheme};
use termdeck::tui::current_theme;
use termdeck::{Deck, Slide};

/// One summary line per slide.
pub fn summarize(deck: &Deck) -> Vec<String> {
    deck.slides()
        .iter()
        .enumerate()
        .map(|(i, slide)| summarize_slide(deck, i, slide))
        .collect()
}

fn summarize_slide(deck: &Deck, index: usize, slide: &Slide) -> String {
    let title = if slide.title.is_empty() {
        "(untitled)"
    } else {
        slide.title.as_str()
    };
    let spec = deck.transition_for(index);
    let mut line = format!(
        "{:>3}  {}  [{} {:.2}s]",
        index,
        title,
        spec.style,
        spec.duration().as_secs_f64()
    );
    if slide.progressive_count() > 0 {
        line.push_str(&format!(" steps={}", slide.progressive_count()));
    }
    if !slide.animations.is_empty() {
        let frames: usize = slide.animations.iter().map(|a| a.frames().len()).sum();
        line.push_str(&format!(" animations={} frames={}", slide.animations.len(), frames));
    }
    if !slide.notes.is_empty() {
        line.push_str(" notes");
    }
    line
}

/// Speaker notes as they appear in the console.
pub fn handout_text(slide: &Slide) -> Option<String> {
    slide.handout()?;
    let theme = SlideTheme::dark();
    let view = HandoutView::new(slide, &theme);
    Some(view.render(view.natural_size()).to_text())
}

#[cfg(not(tarpaulin_include))]
pub fn handle(deck_path: &Path, notes: bool) -> Result<()> {
    let deck = load_deck(deck_path)?;
    let theme = current_theme();

    println!(
        "{}",
        theme.success_text(&format!("{}: {} slides", deck_path.display(), deck.len()))
    );
    for (index, line) in summarize(&deck).into_iter().enumerate() {
        println!("{}", theme.primary_text(&line));
        if notes {
            if let Some(text) = deck.get(index).and_then(handout_text) {
                for note in text.lines() {
                    println!("       {}", theme.secondary_text(note));
                }
            }
        }
    }
    Ok(())
}
