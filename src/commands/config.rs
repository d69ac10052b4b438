//! Config subcommands handler

use anyhow::Result;

use termdeck::tui::current_theme;
use termdeck::Config;

/// Show current configuration as TOML.
#[cfg(not(tarpaulin_include))]
pub fn handle_show() -> Result<()> {
    let config = Config::load()?;
    println!("{}", current_theme().primary_text(&config.to_toml()?));
    Ok(())
}

/// Print where the configuration file is read from.
#[cfg(not(tarpaulin_include))]
pub fn handle_path() -> Result<()> {
    let path = Config::config_path()?;
    let theme = current_theme();
    if path.exists() {
        println!("{}", theme.primary_text(&path.display().to_string()));
    } else {
        println!(
            "{} {}",
            theme.primary_text(&path.display().to_string()),
            theme.secondary_text("(not created, defaults in use)")
        );
    }
    Ok(())
}
