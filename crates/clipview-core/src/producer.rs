//! The producer contract and the non-owning handle the adapter holds.
//!
//! A producer is owned by the engine side (timeline, playback). Consumers
//! only ever see it through a [`ProducerHandle`], which does not keep it
//! alive: once the owner drops the producer, the handle reads as invalid.

use std::fmt;
use std::sync::{Arc, Weak};

use crate::levels::AudioLevels;

/// Read-only view of an engine producer.
pub trait Producer: Send + Sync {
    /// Whether the engine considers this producer usable.
    fn is_valid(&self) -> bool;

    /// Engine in-point (first included frame).
    fn get_in(&self) -> i32;

    /// Engine out-point (last included frame).
    fn get_out(&self) -> i32;

    /// Raw named-property lookup. `None` when the property is unset.
    fn get(&self, name: &str) -> Option<String>;

    /// Audio levels, computed and cached by the producer on first request.
    ///
    /// `None` when the producer has no audio or the levels are not ready.
    fn audio_levels(&self) -> Option<Arc<AudioLevels>>;
}

/// Non-owning shared reference to a producer, possibly empty.
#[derive(Clone, Default)]
pub struct ProducerHandle {
    inner: Option<Weak<dyn Producer>>,
}

impl ProducerHandle {
    /// A handle with no producer attached.
    pub fn empty() -> Self {
        Self { inner: None }
    }

    /// Reference a producer owned elsewhere.
    pub fn new<P: Producer + 'static>(producer: &Arc<P>) -> Self {
        let weak: Weak<P> = Arc::downgrade(producer);
        Self { inner: Some(weak) }
    }

    /// Reference a type-erased producer owned elsewhere.
    pub fn from_dyn(producer: &Arc<dyn Producer>) -> Self {
        Self {
            inner: Some(Arc::downgrade(producer)),
        }
    }

    /// Whether a producer was ever attached to this handle.
    pub fn is_attached(&self) -> bool {
        self.inner.is_some()
    }

    /// Whether the producer is still alive and reports itself valid.
    pub fn is_valid(&self) -> bool {
        self.upgrade().is_some()
    }

    /// Borrow the producer for the duration of one read.
    ///
    /// Returns `None` if the handle is empty, the owner has dropped the
    /// producer, or the producer reports itself invalid.
    pub fn upgrade(&self) -> Option<Arc<dyn Producer>> {
        self.inner
            .as_ref()
            .and_then(Weak::upgrade)
            .filter(|producer| producer.is_valid())
    }

    /// Whether both handles refer to the same producer instance.
    pub fn same_producer(&self, other: &ProducerHandle) -> bool {
        match (&self.inner, &other.inner) {
            (Some(a), Some(b)) => Weak::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        }
    }
}

impl fmt::Debug for ProducerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProducerHandle")
            .field("attached", &self.is_attached())
            .field("valid", &self.is_valid())
            .finish()
    }
}

impl<P: Producer + 'static> From<&Arc<P>> for ProducerHandle {
    fn from(producer: &Arc<P>) -> Self {
        Self::new(producer)
    }
}
