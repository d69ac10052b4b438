//! The presenter's render loop.
//!
//! The rendering thread owns the [`Controller`] and waits on a single
//! channel that carries both terminal events (from the input thread) and
//! remote requests (from control workers). The wait is bounded by the
//! nearest animation deadline so frames advance on time.

use std::panic;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::Event;
use crossterm::{cursor, execute, terminal};
use signal_hook::consts::{SIGINT, SIGTERM};
use tracing::{debug, info};

use super::controller::{Controller, DEFAULT_FRAME_RATE};
use super::input::{handle_event, resize_of, spawn_reader};
use super::render::{Display, TerminalDisplay};
use super::state::InputResult;
use crate::control::{self, CommandBridge, RemoteRequest};
use crate::deck::{Deck, SlideTheme};

/// Longest wait between checks of the quit flag.
const IDLE_POLL: Duration = Duration::from_millis(250);

/// Everything the render loop reacts to.
#[derive(Debug)]
pub enum LoopEvent {
    Terminal(Event),
    Remote(RemoteRequest),
}

impl From<Event> for LoopEvent {
    fn from(event: Event) -> Self {
        LoopEvent::Terminal(event)
    }
}

impl From<RemoteRequest> for LoopEvent {
    fn from(request: RemoteRequest) -> Self {
        LoopEvent::Remote(request)
    }
}

/// Why the render loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackResult {
    /// The presenter pressed quit
    Quit,
    /// SIGINT or SIGTERM
    Interrupted,
    /// Every event source went away
    Closed,
}

/// Options for [`play_deck`].
#[derive(Debug, Clone)]
pub struct PlayOptions {
    pub theme: SlideTheme,
    pub frame_rate: u32,
    /// Control server bind address; `None` disables remote control
    pub control: Option<(String, u16)>,
}

impl Default for PlayOptions {
    fn default() -> Self {
        Self {
            theme: SlideTheme::dark(),
            frame_rate: DEFAULT_FRAME_RATE,
            control: Some(("127.0.0.1".into(), control::DEFAULT_PORT)),
        }
    }
}

/// Present `deck` on the terminal until the user quits.
#[cfg(not(tarpaulin_include))]
pub fn play_deck(deck: Deck, options: &PlayOptions) -> Result<PlaybackResult> {
    let quit = Arc::new(AtomicBool::new(false));
    signal_hook::flag::register(SIGTERM, Arc::clone(&quit)).context("Failed to register SIGTERM handler")?;
    signal_hook::flag::register(SIGINT, Arc::clone(&quit)).context("Failed to register SIGINT handler")?;

    let (sender, events) = mpsc::channel::<LoopEvent>();

    install_panic_hook();
    let display = TerminalDisplay::new()?;
    let mut controller = Controller::new(deck, display, options.theme).with_frame_rate(options.frame_rate);

    let mut server = match &options.control {
        Some((host, port)) => {
            let bridge = Arc::new(CommandBridge::new(sender.clone()));
            Some(control::spawn((host.as_str(), *port), bridge, controller.snapshot())?)
        }
        None => None,
    };

    spawn_reader(sender).context("Failed to start input thread")?;

    controller.start();
    let result = run_loop(&mut controller, &events, &quit);
    info!(?result, "playback ended");

    if let Some(server) = server.as_mut() {
        server.shutdown();
    }
    // late remote requests fail once the receiver is gone
    drop(events);
    controller.display_mut().restore()?;
    Ok(result)
}

/// Leave the alternate screen before the default hook prints the panic.
#[cfg(not(tarpaulin_include))]
fn install_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = terminal::disable_raw_mode();
        let _ = execute!(std::io::stdout(), cursor::Show, terminal::LeaveAlternateScreen);
        original_hook(panic_info);
    }));
}

/// Serve events until quit, a signal, or every sender is gone.
pub fn run_loop<D: Display>(
    controller: &mut Controller<D>,
    events: &Receiver<LoopEvent>,
    quit: &AtomicBool,
) -> PlaybackResult {
    loop {
        if quit.load(Ordering::SeqCst) {
            return PlaybackResult::Interrupted;
        }

        let now = Instant::now();
        controller.tick_animations(now);
        let timeout = controller
            .next_deadline()
            .map_or(IDLE_POLL, |deadline| deadline.saturating_duration_since(now))
            .min(IDLE_POLL);

        match events.recv_timeout(timeout) {
            Ok(LoopEvent::Terminal(event)) => {
                if let Some(size) = resize_of(&event) {
                    controller.resize(size);
                    continue;
                }
                match handle_event(&event) {
                    InputResult::Next => {
                        controller.next();
                    }
                    InputResult::Prev => {
                        controller.prev();
                    }
                    InputResult::Quit => return PlaybackResult::Quit,
                    InputResult::Continue => {}
                }
            }
            Ok(LoopEvent::Remote(request)) => {
                let result = controller.execute(request.command());
                request.respond(result);
            }
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => {
                debug!("all event sources closed");
                return PlaybackResult::Closed;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::Size;
    use crate::control::{Dispatch, DispatchError, MutatingCommand};
    use crate::deck::Slide;
    use crate::player::render::RecordingDisplay;
    use crate::player::NavError;
    use crate::transition::TransitionSpec;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use std::thread;

    fn controller() -> Controller<RecordingDisplay> {
        let deck = Deck::new(
            vec![Slide::new("A"), Slide::new("B"), Slide::new("C")],
            TransitionSpec::cut(),
        )
        .unwrap();
        Controller::new(deck, RecordingDisplay::new(Size::new(10, 4)), SlideTheme::dark())
    }

    fn key(code: KeyCode) -> LoopEvent {
        LoopEvent::Terminal(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)))
    }

    #[test]
    fn keys_drive_playback_until_quit() {
        let mut c = controller();
        c.start();
        let (tx, rx) = mpsc::channel();
        tx.send(key(KeyCode::Right)).unwrap();
        tx.send(key(KeyCode::Right)).unwrap();
        tx.send(key(KeyCode::Left)).unwrap();
        tx.send(key(KeyCode::Char('q'))).unwrap();

        let result = run_loop(&mut c, &rx, &AtomicBool::new(false));
        assert_eq!(result, PlaybackResult::Quit);
        assert_eq!(c.position().index, Some(1));
    }

    #[test]
    fn resize_event_updates_display() {
        let mut c = controller();
        let (tx, rx) = mpsc::channel();
        tx.send(LoopEvent::Terminal(Event::Resize(30, 8))).unwrap();
        drop(tx);
        assert_eq!(run_loop(&mut c, &rx, &AtomicBool::new(false)), PlaybackResult::Closed);
        assert_eq!(c.display().size(), Size::new(30, 8));
    }

    #[test]
    fn quit_flag_stops_loop() {
        let mut c = controller();
        let (_tx, rx) = mpsc::channel::<LoopEvent>();
        let quit = AtomicBool::new(true);
        assert_eq!(run_loop(&mut c, &rx, &quit), PlaybackResult::Interrupted);
    }

    #[test]
    fn remote_requests_run_on_loop_thread() {
        let mut c = controller();
        c.start();
        let (tx, rx) = mpsc::channel::<LoopEvent>();
        let bridge = Arc::new(CommandBridge::new(tx));

        let client = {
            let bridge = Arc::clone(&bridge);
            thread::spawn(move || {
                let first = bridge.dispatch(MutatingCommand::Jump(2));
                let second = bridge.dispatch(MutatingCommand::Jump(7));
                (first, second)
            })
        };
        // closes the channel once the client thread is done with it
        drop(bridge);

        assert_eq!(run_loop(&mut c, &rx, &AtomicBool::new(false)), PlaybackResult::Closed);
        let (first, second) = client.join().unwrap();
        assert_eq!(first.unwrap().index, Some(2));
        assert_eq!(
            second,
            Err(DispatchError::OutOfRange(NavError::OutOfRange { index: 7, len: 3 }))
        );
        assert_eq!(c.position().index, Some(2));
    }
}
