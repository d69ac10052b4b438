//! Subcommand handlers

pub mod check;
pub mod config;
pub mod console;
pub mod play;
pub mod remote;
