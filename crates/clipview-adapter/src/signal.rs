//! Listener lists and the event feed.
//!
//! Each event kind gets its own [`Signal`]. Listeners run synchronously on
//! the emitting thread, in the order they were connected.

use crossbeam_channel::{Receiver, Sender};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Identifies one registered listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(u64);

impl ConnectionId {
    fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// Ordered list of listeners for one event kind.
pub struct Signal<T: ?Sized> {
    listeners: Vec<(ConnectionId, Box<dyn FnMut(&T)>)>,
}

impl<T: ?Sized> Signal<T> {
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }

    /// Register a listener. It runs after every listener connected before it.
    pub fn connect(&mut self, listener: impl FnMut(&T) + 'static) -> ConnectionId {
        let id = ConnectionId::next();
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns false if it was not connected here.
    pub fn disconnect(&mut self, id: ConnectionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    /// Invoke every listener with `value`.
    pub fn emit(&mut self, value: &T) {
        for (_, listener) in &mut self.listeners {
            listener(value);
        }
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    pub fn clear(&mut self) {
        self.listeners.clear();
    }
}

impl<T: ?Sized> Default for Signal<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> fmt::Debug for Signal<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signal")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

/// Every notification the adapter publishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdapterEvent {
    /// The producer was rebound; re-read every derived property.
    ProducerChanged,
    /// Local position updated.
    PositionChanged(i32),
    /// Playback should move to this frame.
    Seeked(i32),
    /// In-point changed to this frame.
    InChanged(i32),
    /// Out-point changed to this frame.
    OutChanged(i32),
    /// Asynchronously computed audio levels are ready to be re-read.
    AudioLevelsChanged,
}

/// Channel subscribers that receive every [`AdapterEvent`].
#[derive(Debug, Default)]
pub(crate) struct EventFeed {
    senders: Vec<Sender<AdapterEvent>>,
}

impl EventFeed {
    pub(crate) fn subscribe(&mut self) -> Receiver<AdapterEvent> {
        let (tx, rx) = crossbeam_channel::unbounded();
        self.senders.push(tx);
        rx
    }

    /// Send to every subscriber, dropping those whose receiver is gone.
    pub(crate) fn publish(&mut self, event: AdapterEvent) {
        self.senders.retain(|tx| tx.send(event).is_ok());
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.senders.len()
    }
}
