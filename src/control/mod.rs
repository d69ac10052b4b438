//! Remote control over TCP.
//!
//! - `protocol`: request parsing and response lines
//! - `bridge`: hand-off of mutating commands to the rendering thread
//! - `snapshot`: read-only state shared with connection workers
//! - `server`: accept thread and per-connection workers
//! - `client`: blocking client for `remote` and the console

mod bridge;
mod client;
pub mod protocol;
mod server;
mod snapshot;

pub use bridge::{CommandBridge, Dispatch, DispatchError, RemoteRequest};
pub use client::Client;
pub use protocol::{Command, MutatingCommand, ProtocolError};
pub use server::{respond, serve_connection, spawn, ServerHandle, DEFAULT_PORT};
pub use snapshot::{Snapshot, SnapshotHandle};
