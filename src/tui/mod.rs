//! Presenter console
//!
//! Terminal UI built on ratatui/crossterm that drives a running player
//! over the control socket.

pub mod app;
pub mod console_app;
pub mod theme;
pub mod timer;
pub mod ui;
pub mod widgets;

pub use console_app::{render_console, ConsoleApp, ConsoleState};
pub use theme::{current_theme, Theme};
pub use timer::CountdownTimer;
