use crate::error::Cancelled;
use crate::runtime::GeneratorId;
use crate::sync::{Handoff, Slot};

use std::cell::Cell;
use std::marker::PhantomData;
use std::sync::Arc;

/// The capability a producer routine uses to publish values.
///
/// A `Yielder` is created by the producer thread and lent to the routine
/// for the duration of [`Producer::run`](super::Producer::run). It cannot
/// be cloned or obtained any other way.
///
/// A `Yielder` is not `Sync`: only one thread at a time may publish, since
/// the handoff holds a single value.
///
/// ```rust,compile_fail
/// fn assert_sync<T: Sync>() {}
/// assert_sync::<yielder::Yielder<u32>>();
/// ```
pub struct Yielder<T> {
    id: GeneratorId,
    handoff: Arc<Handoff<T>>,
    _not_sync: PhantomData<Cell<()>>,
}

impl<T> Yielder<T> {
    pub(crate) fn new(id: GeneratorId, handoff: Arc<Handoff<T>>) -> Self {
        Self {
            id,
            handoff,
            _not_sync: PhantomData,
        }
    }

    /// Hands `value` to the consumer and suspends until the next item is
    /// requested.
    ///
    /// This is the only suspension point of a producer: no further work
    /// happens until the consumer polls again.
    ///
    /// # Errors
    ///
    /// Returns [`Cancelled`] once the consumer has disposed of the cursor.
    /// The value is then dropped without being observed, and every later
    /// call fails the same way without blocking.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let squares = Generator::from_fn(|co| {
    ///     for i in 0u64.. {
    ///         co.publish(i * i)?;
    ///     }
    ///     Ok(())
    /// });
    /// ```
    pub fn publish(&self, value: T) -> Result<(), Cancelled> {
        if self.handoff.is_cancelled() {
            return Err(Cancelled);
        }

        self.handoff.deliver(Slot::Item(value));
        self.handoff.await_request()
    }

    /// Publishes every value of `values` in order.
    ///
    /// # Errors
    ///
    /// Stops at the first [`Cancelled`].
    pub fn publish_all<I>(&self, values: I) -> Result<(), Cancelled>
    where
        I: IntoIterator<Item = T>,
    {
        values.into_iter().try_for_each(|value| self.publish(value))
    }

    /// Returns `true` once the consumer has disposed of the cursor.
    ///
    /// Routines that handle the result of [`publish`](Self::publish)
    /// themselves, instead of propagating it, can check this before doing
    /// more work.
    pub fn is_cancelled(&self) -> bool {
        self.handoff.is_cancelled()
    }

    /// Identifier of the generator instance this yielder belongs to.
    pub fn id(&self) -> GeneratorId {
        self.id
    }
}
