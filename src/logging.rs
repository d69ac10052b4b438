//! Tracing subscriber setup for the binary.
//!
//! The library only emits `tracing` events; which of them end up where is
//! decided here, once, at startup.

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used for log files when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "info";

/// Where log output goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    /// Append to a file, `info` and above by default
    File(PathBuf),
    /// Warnings and errors on stderr
    Stderr,
    /// Nothing; the terminal is owned by a full-screen view
    Silent,
}

impl LogTarget {
    /// Pick a target for a command. Full-screen commands must not write to
    /// stderr while the alternate screen is up.
    pub fn for_command(log_file: Option<PathBuf>, fullscreen: bool) -> Self {
        match log_file {
            Some(path) => LogTarget::File(path),
            None if fullscreen => LogTarget::Silent,
            None => LogTarget::Stderr,
        }
    }
}

fn env_filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

/// Install the global subscriber.
#[cfg(not(tarpaulin_include))]
pub fn init(target: &LogTarget) -> Result<()> {
    match target {
        LogTarget::File(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            tracing_subscriber::registry()
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_ansi(false)
                        .with_thread_names(true)
                        .with_writer(Mutex::new(file)),
                )
                .with(env_filter(DEFAULT_FILTER))
                .try_init()
                .context("Failed to install log subscriber")?;
        }
        LogTarget::Stderr => {
            tracing_subscriber::registry()
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_target(false)
                        .with_writer(std::io::stderr),
                )
                .with(env_filter("warn"))
                .try_init()
                .context("Failed to install log subscriber")?;
        }
        LogTarget::Silent => {}
    }
    Ok(())
}
