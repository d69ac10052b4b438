//! Input handling for the presenter view.
//!
//! Terminal events are read on a dedicated thread and forwarded into the
//! render loop's channel; this module maps them to control flow signals.

mod keyboard;

use std::sync::mpsc::Sender;
use std::thread;

use crossterm::event::{self, Event};
use tracing::debug;

pub use keyboard::handle_key_event;

use crate::canvas::Size;
use crate::player::state::InputResult;

/// Handle any input event, dispatching to the appropriate handler.
///
/// Resize events are reported separately through [`resize_of`].
pub fn handle_event(event: &Event) -> InputResult {
    match event {
        Event::Key(key) => handle_key_event(*key),
        _ => InputResult::Continue, // Ignore focus, paste, mouse, etc.
    }
}

/// New screen size carried by a resize event.
pub fn resize_of(event: &Event) -> Option<Size> {
    match event {
        Event::Resize(cols, rows) => Some(Size::from((*cols, *rows))),
        _ => None,
    }
}

/// Start the blocking reader thread. It exits when the channel closes or
/// reading from the terminal fails.
pub fn spawn_reader<E>(sender: Sender<E>) -> std::io::Result<thread::JoinHandle<()>>
where
    E: From<Event> + Send + 'static,
{
    thread::Builder::new().name("input".into()).spawn(move || loop {
        match event::read() {
            Ok(event) => {
                if sender.send(E::from(event)).is_err() {
                    break;
                }
            }
            Err(e) => {
                debug!(error = %e, "terminal input closed");
                break;
            }
        }
    })
}
