use super::Signal;
use crate::error::{Cancelled, ProducerFailure};

use std::mem;
use std::sync::{Mutex, PoisonError};

/// Content of the single handoff slot.
pub(crate) enum Slot<T> {
    /// Nothing has been delivered since the last take.
    Empty,

    /// The producer published a value.
    Item(T),

    /// The producer routine returned normally.
    Finished,

    /// The producer routine failed.
    Failed(ProducerFailure),
}

/// Single-slot rendezvous between a cursor and its producer.
///
/// Two signals drive the protocol:
/// - `requested` — the consumer wants the next item,
/// - `ready` — the producer stored an item or finished.
///
/// The consumer always raises `requested` before waiting on `ready`, and
/// the producer always fills the slot before raising `ready`, so at most
/// one value is ever in flight.
pub(crate) struct Handoff<T> {
    requested: Signal,
    ready: Signal,
    slot: Mutex<Slot<T>>,
}

impl<T> Handoff<T> {
    /// Creates an empty handoff with both signals lowered.
    pub(crate) fn new() -> Self {
        Self {
            requested: Signal::new(),
            ready: Signal::new(),
            slot: Mutex::new(Slot::Empty),
        }
    }

    /// Asks the producer for the next item.
    pub(crate) fn request(&self) {
        tracing::trace!("item requested");
        self.requested.raise();
    }

    /// Blocks until the producer delivers, then takes the slot.
    ///
    /// The `ready` signal is never closed, so the wait only ends once the
    /// producer has delivered something.
    pub(crate) fn await_ready(&self) -> Slot<T> {
        let _ = self.ready.wait();

        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        mem::replace(&mut *slot, Slot::Empty)
    }

    /// Stores `slot` and wakes the consumer.
    pub(crate) fn deliver(&self, slot: Slot<T>) {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = slot;

        tracing::trace!("item available or finished");
        self.ready.raise();
    }

    /// Blocks the producer until the consumer requests another item.
    ///
    /// # Errors
    ///
    /// Returns [`Cancelled`] once [`cancel`](Self::cancel) has been called.
    pub(crate) fn await_request(&self) -> Result<(), Cancelled> {
        self.requested.wait()
    }

    /// Interrupts the producer side of the handoff.
    pub(crate) fn cancel(&self) {
        self.requested.close();
    }

    /// Returns `true` once the handoff has been cancelled.
    pub(crate) fn is_cancelled(&self) -> bool {
        self.requested.is_closed()
    }
}
