//! Read-only view of playback for connection workers.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::canvas::Size;
use crate::player::PositionReport;

/// What read-only commands answer from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    pub titles: Vec<String>,
    pub position: PositionReport,
    pub size: Size,
}

/// Shared slot holding the latest [`Snapshot`].
///
/// The rendering thread publishes a fresh snapshot after every state
/// change or resize; readers clone the inner `Arc` and never block it
/// for longer than a pointer swap.
#[derive(Debug, Clone, Default)]
pub struct SnapshotHandle {
    inner: Arc<RwLock<Arc<Snapshot>>>,
}

impl SnapshotHandle {
    pub fn new(snapshot: Snapshot) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Arc::new(snapshot))),
        }
    }

    pub fn load(&self) -> Arc<Snapshot> {
        Arc::clone(&self.inner.read())
    }

    pub fn publish(&self, snapshot: Snapshot) {
        *self.inner.write() = Arc::new(snapshot);
    }
}
