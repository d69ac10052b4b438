//! Play subcommand handler

use std::path::Path;

use anyhow::Result;
use tracing::info;

use termdeck::deck::{load_deck, SlideTheme};
use termdeck::player::{play_deck, PlayOptions, PlaybackResult};
use termdeck::tui::current_theme;
use termdeck::Config;

/// Flags that override the config file.
#[derive(Debug, Clone, Default)]
pub struct PlayArgs {
    pub light: bool,
    pub no_control: bool,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub frame_rate: Option<u32>,
}

/// Merge config and flags. Flags win.
pub fn resolve_options(config: &Config, args: PlayArgs) -> PlayOptions {
    let control = if args.no_control || !config.control.enabled {
        None
    } else {
        Some((
            args.host.unwrap_or_else(|| config.control.host.clone()),
            args.port.unwrap_or(config.control.port),
        ))
    };
    PlayOptions {
        theme: SlideTheme::select(args.light || config.playback.light),
        frame_rate: args.frame_rate.unwrap_or(config.playback.frame_rate).max(1),
        control,
    }
}

#[cfg(not(tarpaulin_include))]
pub fn handle(deck_path: &Path, args: PlayArgs) -> Result<()> {
    let config = Config::load()?;
    let deck = load_deck(deck_path)?;
    let options = resolve_options(&config, args);
    info!(deck = %deck_path.display(), slides = deck.len(), "starting playback");

    if play_deck(deck, &options)? == PlaybackResult::Interrupted {
        println!("{}", current_theme().secondary_text("Interrupted"));
    }
    Ok(())
}
