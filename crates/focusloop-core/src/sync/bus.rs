//! Snapshot broadcast channel between engine instances.
//!
//! Multiple engine facades over one logical timer do not run clocks in
//! lockstep; they converge on one authoritative `EngineState` snapshot
//! and each recomputes remaining time locally (see `timer::clock`).
//! The bus only has to deliver snapshots, best-effort:
//!
//! - last snapshot wins; a dropped or lagged message is repaired by the
//!   next one, because every snapshot carries the anchor needed to
//!   recompute remaining time exactly,
//! - adoption is idempotent - re-delivering an identical snapshot is a
//!   no-op for every observer,
//! - an instance ignores messages tagged with its own origin id.
//!
//! Publishing is synchronous; subscribers drain pending messages on
//! their next `FocusEngine::reconcile` call. No task or thread is
//! required, matching the caller-driven engine.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use super::instance_id::InstanceId;
use crate::timer::EngineState;

/// Default buffered snapshots per subscriber. Snapshots supersede each
/// other, so a small buffer suffices; overflow drops the oldest.
const DEFAULT_CAPACITY: usize = 64;

/// One authoritative snapshot, tagged with the instance that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncMessage {
    pub state: EngineState,
    pub origin: InstanceId,
}

impl SyncMessage {
    /// Parse and validate a snapshot arriving from outside the typed
    /// channel (a window bridge, a pipe). Returns `None` for anything
    /// malformed - wrong shape, foreign origin format, or a snapshot
    /// that claims to run without an anchor.
    pub fn from_json(raw: &str) -> Option<Self> {
        let msg: SyncMessage = serde_json::from_str(raw).ok()?;
        InstanceId::parse(msg.origin.as_str())?;
        if !msg.state.is_well_formed() {
            return None;
        }
        Some(msg)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

/// In-process publish/subscribe channel for [`SyncMessage`]s.
#[derive(Debug, Clone)]
pub struct SyncBus {
    tx: broadcast::Sender<SyncMessage>,
}

impl SyncBus {
    pub fn new(capacity: usize) -> Self {
        let (tx, _rx) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    pub fn publisher(&self) -> SyncPublisher {
        SyncPublisher {
            tx: self.tx.clone(),
        }
    }

    pub fn subscribe(&self) -> SyncSubscriber {
        SyncSubscriber {
            rx: self.tx.subscribe(),
        }
    }
}

impl Default for SyncBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

/// Sending half held by each engine instance.
#[derive(Debug, Clone)]
pub struct SyncPublisher {
    tx: broadcast::Sender<SyncMessage>,
}

impl SyncPublisher {
    /// Best-effort broadcast. "No subscribers" is not an error.
    pub fn publish(&self, msg: SyncMessage) {
        let _ = self.tx.send(msg);
    }
}

/// Receiving half held by each engine instance.
#[derive(Debug)]
pub struct SyncSubscriber {
    rx: broadcast::Receiver<SyncMessage>,
}

impl SyncSubscriber {
    /// Drain every pending message without blocking. Lagged slots are
    /// skipped - the messages still buffered supersede them anyway.
    pub fn drain(&mut self) -> Vec<SyncMessage> {
        let mut messages = Vec::new();
        loop {
            match self.rx.try_recv() {
                Ok(msg) => messages.push(msg),
                Err(broadcast::error::TryRecvError::Lagged(_)) => continue,
                Err(broadcast::error::TryRecvError::Empty)
                | Err(broadcast::error::TryRecvError::Closed) => break,
            }
        }
        messages
    }
}
