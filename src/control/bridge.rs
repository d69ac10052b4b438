//! Hand-off of mutating commands to the rendering thread.
//!
//! Connection workers never touch playback state. They post a
//! [`RemoteRequest`] carrying a one-shot reply channel into the render
//! loop and block until the loop has executed it. The sender sits behind a
//! `FairMutex`, held for the whole round trip, so requests are served one
//! at a time in arrival order.

use std::sync::mpsc::{self, Sender, SyncSender};

use parking_lot::FairMutex;
use tracing::debug;

use super::protocol::MutatingCommand;
use crate::player::{NavError, PositionReport};

/// Why a mutating command produced no position.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DispatchError {
    #[error(transparent)]
    OutOfRange(#[from] NavError),
    #[error("rendering thread is not accepting commands")]
    Unavailable,
}

/// A mutating command in flight to the rendering thread.
#[derive(Debug)]
pub struct RemoteRequest {
    command: MutatingCommand,
    reply: SyncSender<Result<PositionReport, NavError>>,
}

impl RemoteRequest {
    pub fn command(&self) -> MutatingCommand {
        self.command
    }

    /// Send the outcome back to the waiting worker. A worker that has
    /// gone away is ignored.
    pub fn respond(self, result: Result<PositionReport, NavError>) {
        if self.reply.send(result).is_err() {
            debug!(command = ?self.command, "requester went away before the reply");
        }
    }
}

/// Executes mutating commands on behalf of connection workers.
pub trait Dispatch: Send + Sync {
    fn dispatch(&self, command: MutatingCommand) -> Result<PositionReport, DispatchError>;
}

/// [`Dispatch`] through the render loop's event channel.
///
/// Generic over the loop's event type so the loop can multiplex remote
/// requests with its own input events on one channel.
pub struct CommandBridge<E> {
    slot: FairMutex<Sender<E>>,
}

impl<E> CommandBridge<E>
where
    E: From<RemoteRequest> + Send,
{
    pub fn new(sender: Sender<E>) -> Self {
        Self {
            slot: FairMutex::new(sender),
        }
    }
}

impl<E> Dispatch for CommandBridge<E>
where
    E: From<RemoteRequest> + Send,
{
    fn dispatch(&self, command: MutatingCommand) -> Result<PositionReport, DispatchError> {
        let sender = self.slot.lock();
        let (reply, response) = mpsc::sync_channel(1);
        sender
            .send(E::from(RemoteRequest { command, reply }))
            .map_err(|_| DispatchError::Unavailable)?;
        let result = response.recv().map_err(|_| DispatchError::Unavailable)?;
        drop(sender);
        Ok(result?)
    }
}
