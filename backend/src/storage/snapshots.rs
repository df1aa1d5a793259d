//! Snapshot subscription port.
//!
//! Replaces implicit global listeners with an explicit observer interface:
//! subscribers receive full, point-in-time snapshots of a collection, and
//! every successful mutation publishes a fresh snapshot. Consumers (the
//! aggregation engine in practice) recompute their derived views from
//! scratch on each emission; nothing is updated incrementally.
//!
//! Subscribing is restartable: each call yields a new receiver primed with
//! the current snapshot, so a consumer that fell behind or was dropped can
//! simply subscribe again.

use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::{Arc, Mutex};

use log::debug;

/// Fan-out of collection snapshots to any number of subscribers.
#[derive(Clone)]
pub struct SnapshotBus<T> {
    subscribers: Arc<Mutex<Vec<Sender<Vec<T>>>>>,
}

impl<T: Clone> SnapshotBus<T> {
    pub fn new() -> Self {
        Self {
            subscribers: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Register a new subscriber, primed with the current snapshot.
    pub fn subscribe(&self, current: Vec<T>) -> Receiver<Vec<T>> {
        let (sender, receiver) = channel();
        // The primed send cannot fail; we still hold the receiver.
        let _ = sender.send(current);
        self.subscribers.lock().unwrap().push(sender);
        receiver
    }

    /// Push a fresh snapshot to every live subscriber. Subscribers whose
    /// receiver was dropped are pruned here.
    pub fn publish(&self, snapshot: Vec<T>) {
        let mut subscribers = self.subscribers.lock().unwrap();
        subscribers.retain(|sender| sender.send(snapshot.clone()).is_ok());
        debug!("Published snapshot to {} subscriber(s)", subscribers.len());
    }

    /// Number of live subscribers (dead ones are only detected on publish).
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.lock().unwrap().len()
    }
}

impl<T: Clone> Default for SnapshotBus<T> {
    fn default() -> Self {
        Self::new()
    }
}
