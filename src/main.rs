//! termdeck command line interface

mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use termdeck::logging::{self, LogTarget};

#[derive(Parser)]
#[command(name = "termdeck")]
#[command(version)]
#[command(about = "Play slide decks with ANSI art and animated transitions in the terminal")]
#[command(long_about = "termdeck plays a TOML deck of text slides, progressive reveals and \
ANSI-art animations full screen, with cut, pan, tilt and dissolve transitions.\n\n\
While playing it listens on a local control socket, so a presenter console \
or any line-based client can drive the show from another terminal.")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Present a deck full screen
    Play {
        /// Deck file (TOML)
        deck: PathBuf,
        /// Black on white slides
        #[arg(long)]
        light: bool,
        /// Do not start the control server
        #[arg(long)]
        no_control: bool,
        /// Control server address
        #[arg(long)]
        host: Option<String>,
        /// Control server port
        #[arg(long)]
        port: Option<u16>,
        /// Transition frames per second
        #[arg(long)]
        frame_rate: Option<u32>,
        /// Write logs to this file
        #[arg(long)]
        log_file: Option<PathBuf>,
    },

    /// Validate a deck and print a slide summary
    Check {
        /// Deck file (TOML)
        deck: PathBuf,
        /// Also print speaker notes
        #[arg(long)]
        notes: bool,
    },

    /// Send one command to a running player and print the response
    Remote {
        #[command(subcommand)]
        command: RemoteCommands,
        /// Player address
        #[arg(long, global = true)]
        host: Option<String>,
        /// Player control port
        #[arg(long, global = true)]
        port: Option<u16>,
    },

    /// Presenter console for a running player
    Console {
        /// Deck file, enables previews and notes
        deck: Option<PathBuf>,
        /// Player address
        #[arg(long)]
        host: Option<String>,
        /// Player control port
        #[arg(long)]
        port: Option<u16>,
        /// Dark text for white terminals
        #[arg(long)]
        light: bool,
        /// Write logs to this file
        #[arg(long)]
        log_file: Option<PathBuf>,
    },

    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand)]
enum RemoteCommands {
    /// List slide titles
    List,
    /// Show the current position
    Current,
    /// Advance one step
    Next,
    /// Go back one step
    Prev,
    /// Go to a slide (0-based)
    Jump { index: String },
    /// Show the player's screen size
    Size,
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Print the configuration file path
    Path,
}

#[cfg(not(tarpaulin_include))]
fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Play {
            deck,
            light,
            no_control,
            host,
            port,
            frame_rate,
            log_file,
        } => {
            logging::init(&LogTarget::for_command(log_file, true))?;
            commands::play::handle(
                &deck,
                commands::play::PlayArgs {
                    light,
                    no_control,
                    host,
                    port,
                    frame_rate,
                },
            )
        }
        Commands::Check { deck, notes } => {
            logging::init(&LogTarget::Stderr)?;
            commands::check::handle(&deck, notes)
        }
        Commands::Remote { command, host, port } => {
            logging::init(&LogTarget::Stderr)?;
            let request = match command {
                RemoteCommands::List => "list".to_string(),
                RemoteCommands::Current => "current".to_string(),
                RemoteCommands::Next => "next".to_string(),
                RemoteCommands::Prev => "prev".to_string(),
                RemoteCommands::Jump { index } => format!("jump {}", index),
                RemoteCommands::Size => "size".to_string(),
            };
            commands::remote::handle(&request, host, port)
        }
        Commands::Console {
            deck,
            host,
            port,
            light,
            log_file,
        } => {
            logging::init(&LogTarget::for_command(log_file, true))?;
            commands::console::handle(deck.as_deref(), host, port, light)
        }
        Commands::Config(cmd) => {
            logging::init(&LogTarget::Stderr)?;
            match cmd {
                ConfigCommands::Show => commands::config::handle_show(),
                ConfigCommands::Path => commands::config::handle_path(),
            }
        }
    }
}
