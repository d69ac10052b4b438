//! Console subcommand handler

use std::path::Path;
use std::time::Duration;

use anyhow::Result;

use termdeck::control::Client;
use termdeck::deck::load_deck;
use termdeck::tui::ConsoleApp;
use termdeck::Config;

#[cfg(not(tarpaulin_include))]
pub fn handle(deck: Option<&Path>, host: Option<String>, port: Option<u16>, light: bool) -> Result<()> {
    let config = Config::load()?;
    // load before taking over the terminal so errors print normally
    let deck = deck.map(load_deck).transpose()?;
    let host = host.unwrap_or(config.control.host);
    let port = port.unwrap_or(config.control.port);
    let client = Client::connect(&host, port)?;

    let mut app = ConsoleApp::new(
        client,
        deck,
        light || config.playback.light,
        config.console.timer_minutes,
        Duration::from_millis(config.console.poll_interval_ms.max(50)),
    )?;
    app.run()
}
