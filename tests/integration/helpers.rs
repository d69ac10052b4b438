//! Shared fixtures: deck files on disk and an in-process player.

use std::fs;
use std::io::{BufRead, BufReader, Write};
use std::net::{SocketAddr, TcpStream};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tempfile::TempDir;

use termdeck::canvas::Size;
use termdeck::control::{self, CommandBridge, ServerHandle};
use termdeck::deck::{parse_deck, SlideTheme};
use termdeck::player::render::RecordingDisplay;
use termdeck::player::{run_loop, Controller, LoopEvent};

/// Three slides, the middle one with two reveal steps, cut transitions.
pub const SAMPLE_DECK: &str = r#"
[defaults]
transition = { style = "cut" }

[[slides]]
title = "Intro"
body = ["Welcome"]

[[slides]]
title = "Details"
body = ["Points:"]
progressive = [["one"], ["two"]]
notes = ["remember the demo"]

[[slides]]
title = "Thanks"
"#;

/// Screen size of the in-process player.
pub const PLAYER_SIZE: Size = Size::new(40, 10);

/// Write `files` (relative path, contents) into a fresh directory and
/// return it with the path of `deck.toml`.
pub fn deck_dir(deck: &str, files: &[(&str, &[u8])]) -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    for (name, contents) in files {
        let path = dir.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, contents).unwrap();
    }
    let deck_path = dir.path().join("deck.toml");
    fs::write(&deck_path, deck).unwrap();
    (dir, deck_path)
}

/// A player running its render loop on a background thread with a
/// recording display, plus its control server on an ephemeral port.
pub struct TestPlayer {
    server: ServerHandle,
    quit: Arc<AtomicBool>,
    thread: Option<JoinHandle<Controller<RecordingDisplay>>>,
}

impl TestPlayer {
    pub fn start(deck_toml: &str) -> Self {
        let deck = parse_deck(deck_toml, std::path::Path::new(".")).unwrap();
        let (sender, events) = mpsc::channel::<LoopEvent>();
        let (ready_tx, ready_rx) = mpsc::channel();
        let quit = Arc::new(AtomicBool::new(false));

        let loop_quit = Arc::clone(&quit);
        let thread = thread::spawn(move || {
            let mut controller = Controller::new(deck, RecordingDisplay::new(PLAYER_SIZE), SlideTheme::dark());
            controller.start();
            ready_tx.send(controller.snapshot()).unwrap();
            run_loop(&mut controller, &events, &loop_quit);
            controller
        });

        let snapshot = ready_rx.recv().unwrap();
        let bridge = Arc::new(CommandBridge::new(sender));
        let server = control::spawn("127.0.0.1:0", bridge, snapshot).unwrap();
        Self {
            server,
            quit,
            thread: Some(thread),
        }
    }

    pub fn addr(&self) -> SocketAddr {
        self.server.local_addr()
    }

    pub fn connect(&self) -> LineClient {
        LineClient::connect(self.addr())
    }

    /// Stop the server and the loop, returning the controller for
    /// inspection.
    pub fn stop(mut self) -> Controller<RecordingDisplay> {
        self.server.shutdown();
        self.quit.store(true, Ordering::SeqCst);
        self.thread.take().unwrap().join().unwrap()
    }
}

impl Drop for TestPlayer {
    fn drop(&mut self) {
        self.quit.store(true, Ordering::SeqCst);
    }
}

/// Raw line-oriented connection to a control server.
pub struct LineClient {
    reader: BufReader<TcpStream>,
    writer: TcpStream,
}

impl LineClient {
    pub fn connect(addr: SocketAddr) -> Self {
        let stream = TcpStream::connect(addr).unwrap();
        stream.set_read_timeout(Some(Duration::from_secs(5))).unwrap();
        Self {
            reader: BufReader::new(stream.try_clone().unwrap()),
            writer: stream,
        }
    }

    pub fn send(&mut self, line: &str) {
        self.writer.write_all(line.as_bytes()).unwrap();
        self.writer.write_all(b"\n").unwrap();
        self.writer.flush().unwrap();
    }

    /// Write bytes as-is, without appending a newline.
    pub fn send_raw(&mut self, bytes: &[u8]) {
        self.writer.write_all(bytes).unwrap();
        self.writer.flush().unwrap();
    }

    pub fn read_line(&mut self) -> String {
        let mut line = String::new();
        self.reader.read_line(&mut line).unwrap();
        line
    }

    /// Send `line` and return the single response line, newline included.
    pub fn ask(&mut self, line: &str) -> String {
        self.send(line);
        self.read_line()
    }
}

/// A localhost port with nothing listening on it.
pub fn unused_port() -> u16 {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap().port()
}
