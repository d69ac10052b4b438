//! TCP control server.
//!
//! One accept thread plus one worker thread per connection. Read-only
//! commands are answered from the [`SnapshotHandle`]; mutating commands go
//! through a [`Dispatch`] implementation and block the worker until the
//! rendering thread has executed them.

use std::io::{self, BufRead, BufReader, Write};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr, TcpListener, TcpStream, ToSocketAddrs};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use super::bridge::{Dispatch, DispatchError};
use super::protocol::{self, Command, ERR, END};
use super::snapshot::SnapshotHandle;

/// Default port of the control server.
pub const DEFAULT_PORT: u16 = 1292;

/// Running server. Dropping it stops accepting new connections.
pub struct ServerHandle {
    addr: SocketAddr,
    stopping: Arc<AtomicBool>,
    accept_thread: Option<JoinHandle<()>>,
}

impl ServerHandle {
    /// Bound address; useful when binding port 0.
    pub fn local_addr(&self) -> SocketAddr {
        self.addr
    }

    /// Stop accepting. Workers already serving a connection keep running
    /// until their peer hangs up.
    pub fn shutdown(&mut self) {
        let Some(thread) = self.accept_thread.take() else {
            return;
        };
        self.stopping.store(true, Ordering::SeqCst);
        // accept() has no timeout; a throwaway connection wakes it up
        if let Err(e) = TcpStream::connect(wake_addr(self.addr)) {
            debug!(error = %e, "wake-up connection failed");
        }
        if thread.join().is_err() {
            warn!("control accept thread panicked");
        }
        info!(addr = %self.addr, "control server stopped");
    }
}

impl Drop for ServerHandle {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Where to connect to reach a listener bound to `addr`.
fn wake_addr(addr: SocketAddr) -> SocketAddr {
    let ip = match addr.ip() {
        IpAddr::V4(ip) if ip.is_unspecified() => IpAddr::V4(Ipv4Addr::LOCALHOST),
        IpAddr::V6(ip) if ip.is_unspecified() => IpAddr::V6(Ipv6Addr::LOCALHOST),
        ip => ip,
    };
    SocketAddr::new(ip, addr.port())
}

/// Bind and start serving.
pub fn spawn<D>(addr: impl ToSocketAddrs, dispatch: Arc<D>, snapshot: SnapshotHandle) -> Result<ServerHandle>
where
    D: Dispatch + ?Sized + 'static,
{
    let listener = TcpListener::bind(addr).context("Failed to bind control server")?;
    let local = listener
        .local_addr()
        .context("Failed to read control server address")?;
    let stopping = Arc::new(AtomicBool::new(false));

    let accept_thread = {
        let stopping = Arc::clone(&stopping);
        thread::Builder::new()
            .name("control-accept".into())
            .spawn(move || accept_loop(listener, dispatch, snapshot, stopping))
            .context("Failed to start control server thread")?
    };

    info!(addr = %local, "control server listening");
    Ok(ServerHandle {
        addr: local,
        stopping,
        accept_thread: Some(accept_thread),
    })
}

fn accept_loop<D>(listener: TcpListener, dispatch: Arc<D>, snapshot: SnapshotHandle, stopping: Arc<AtomicBool>)
where
    D: Dispatch + ?Sized + 'static,
{
    for stream in listener.incoming() {
        if stopping.load(Ordering::SeqCst) {
            break;
        }
        let stream = match stream {
            Ok(stream) => stream,
            Err(e) => {
                warn!(error = %e, "failed to accept control connection");
                continue;
            }
        };
        let peer = stream
            .peer_addr()
            .map(|a| a.to_string())
            .unwrap_or_else(|_| "unknown".into());
        debug!(%peer, "control connection opened");

        let dispatch = Arc::clone(&dispatch);
        let snapshot = snapshot.clone();
        let spawned = thread::Builder::new()
            .name("control-worker".into())
            .spawn(move || {
                match serve_connection(stream, dispatch.as_ref(), &snapshot) {
                    Ok(()) => debug!(%peer, "control connection closed"),
                    Err(e) => debug!(%peer, error = %e, "control connection failed"),
                }
            });
        if let Err(e) = spawned {
            warn!(error = %e, "failed to start control worker");
        }
    }
}

/// Serve request lines until the peer hangs up.
///
/// Lines that are not UTF-8 are decoded lossily and fall through as
/// unknown verbs; only I/O errors end the connection.
pub fn serve_connection<D>(stream: TcpStream, dispatch: &D, snapshot: &SnapshotHandle) -> io::Result<()>
where
    D: Dispatch + ?Sized,
{
    let mut reader = BufReader::new(stream.try_clone()?);
    let mut writer = stream;
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            return Ok(());
        }
        let line = String::from_utf8_lossy(&buf);
        if let Some(response) = respond(&line, dispatch, snapshot) {
            writer.write_all(response.as_bytes())?;
            writer.flush()?;
        }
    }
}

/// Full response text for one request line, newline-terminated, or `None`
/// for lines that get no answer.
pub fn respond<D>(line: &str, dispatch: &D, snapshot: &SnapshotHandle) -> Option<String>
where
    D: Dispatch + ?Sized,
{
    let command = match Command::parse(line.trim()) {
        Ok(command) => command,
        Err(e) if e.answers_err() => {
            debug!(line, error = %e, "rejected control request");
            return Some(format!("{}\n", ERR));
        }
        Err(e) => {
            debug!(error = %e, "ignoring control request");
            return None;
        }
    };

    if let Some(mutating) = command.as_mutating() {
        let text = match dispatch.dispatch(mutating) {
            Ok(report) => protocol::current_line(&report),
            Err(DispatchError::OutOfRange(e)) => {
                debug!(error = %e, "rejected jump");
                ERR.to_string()
            }
            Err(DispatchError::Unavailable) => {
                warn!(%command, "rendering thread unavailable");
                ERR.to_string()
            }
        };
        return Some(text + "\n");
    }

    let snap = snapshot.load();
    let text = match command {
        Command::List => {
            let mut out = String::new();
            for (i, title) in snap.titles.iter().enumerate() {
                out.push_str(&protocol::slide_line(i, title));
                out.push('\n');
            }
            out.push_str(END);
            out
        }
        Command::Current => protocol::current_line(&snap.position),
        Command::Size => protocol::size_line(snap.size),
        Command::Next | Command::Prev | Command::Jump(_) => return None,
    };
    Some(text + "\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::Size;
    use crate::control::protocol::MutatingCommand;
    use crate::control::snapshot::Snapshot;
    use crate::player::{NavError, PositionReport};
    use parking_lot::Mutex;

    /// Three-slide deck that only moves its index.
    struct FakeDispatch {
        index: Mutex<Option<usize>>,
    }

    impl Dispatch for FakeDispatch {
        fn dispatch(&self, command: MutatingCommand) -> Result<PositionReport, DispatchError> {
            let mut index = self.index.lock();
            let next = match (command, *index) {
                (MutatingCommand::Next, None) => 0,
                (MutatingCommand::Next, Some(i)) => (i + 1).min(2),
                (MutatingCommand::Prev, i) => i.unwrap_or(0).saturating_sub(1),
                (MutatingCommand::Jump(t), _) if t < 3 => t,
                (MutatingCommand::Jump(t), _) => {
                    return Err(NavError::OutOfRange { index: t, len: 3 }.into())
                }
            };
            *index = Some(next);
            Ok(PositionReport {
                index: Some(next),
                depth: 0,
                title: format!("Slide {}", next),
            })
        }
    }

    fn fixture() -> (FakeDispatch, SnapshotHandle) {
        let snapshot = SnapshotHandle::new(Snapshot {
            titles: vec!["One".into(), "Two words".into()],
            position: PositionReport::default(),
            size: Size::new(80, 24),
        });
        (
            FakeDispatch {
                index: Mutex::new(None),
            },
            snapshot,
        )
    }

    #[test]
    fn read_only_commands_use_snapshot() {
        let (dispatch, snapshot) = fixture();
        assert_eq!(
            respond("list", &dispatch, &snapshot).as_deref(),
            Some("slide 0 One\nslide 1 Two words\nend\n")
        );
        assert_eq!(
            respond("current", &dispatch, &snapshot).as_deref(),
            Some("current -1 0 \n")
        );
        assert_eq!(respond("size\r", &dispatch, &snapshot).as_deref(), Some("size 80 24\n"));
        assert_eq!(*dispatch.index.lock(), None);
    }

    #[test]
    fn mutating_commands_report_position() {
        let (dispatch, snapshot) = fixture();
        assert_eq!(
            respond("next", &dispatch, &snapshot).as_deref(),
            Some("current 0 0 Slide 0\n")
        );
        assert_eq!(
            respond(" jump 2 ", &dispatch, &snapshot).as_deref(),
            Some("current 2 0 Slide 2\n")
        );
    }

    #[test]
    fn bad_jumps_answer_err() {
        let (dispatch, snapshot) = fixture();
        for line in ["jump 99", "jump abc", "jump"] {
            assert_eq!(respond(line, &dispatch, &snapshot).as_deref(), Some("err\n"), "{}", line);
        }
        assert_eq!(*dispatch.index.lock(), None);
    }

    #[test]
    fn unknown_verbs_get_no_answer() {
        let (dispatch, snapshot) = fixture();
        assert_eq!(respond("hello", &dispatch, &snapshot), None);
        assert_eq!(respond("", &dispatch, &snapshot), None);
    }

    #[test]
    fn wake_addr_maps_unspecified_to_loopback() {
        let addr: SocketAddr = "0.0.0.0:1292".parse().unwrap();
        assert_eq!(wake_addr(addr), "127.0.0.1:1292".parse().unwrap());
        let addr: SocketAddr = "127.0.0.1:7".parse().unwrap();
        assert_eq!(wake_addr(addr), addr);
    }
}
