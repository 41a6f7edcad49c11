use super::builder::ProducerConfig;
use super::executor::{GeneratorId, ProducerContext, ProducerStatus};
use crate::error::{GeneratorError, ProducerFailure};
use crate::producer::Producer;
use crate::sync::Slot;

use std::iter::FusedIterator;
use std::mem;
use std::sync::Arc;

/// Externally visible state of a [`Cursor`].
///
/// Transitions only move `NotStarted → Running`, then between `Running`
/// and `ItemReady` while items flow, and finally to one of the terminal
/// states `Exhausted` or `Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorState {
    /// The producer thread has not been spawned.
    NotStarted,

    /// The producer is running; no item is buffered.
    Running,

    /// An item was published and not yet taken.
    ItemReady,

    /// The sequence ended, or the cursor was disposed.
    Exhausted,

    /// The producer failed; the failure is re-raised on every poll.
    Failed,
}

enum State<T> {
    NotStarted,
    Running,
    ItemReady(T),
    Exhausted,
    Failed(ProducerFailure),
}

/// A single-pass, pull-based cursor over a producer's sequence.
///
/// The producer thread is spawned on the first call to
/// [`has_more`](Self::has_more) or [`take_next`](Self::take_next), and runs
/// only as far as the consumer asks: at most one item is ever in flight.
///
/// Dropping the cursor, or calling [`dispose`](Self::dispose), cancels the
/// producer and joins its thread, whether or not it had finished.
///
/// # Examples
///
/// ```rust,ignore
/// let naturals = Generator::from_fn(|co| {
///     for n in 0u64.. {
///         co.publish(n)?;
///     }
///     Ok(())
/// });
///
/// let mut cursor = naturals.cursor();
/// assert_eq!(cursor.take_next()?, 0);
/// assert_eq!(cursor.take_next()?, 1);
/// cursor.dispose();
/// ```
pub struct Cursor<T> {
    producer: Arc<dyn Producer<T>>,
    context: ProducerContext<T>,
    state: State<T>,

    /// Set once the iterator adapter has yielded the failure.
    failure_reported: bool,
}

impl<T: Send + 'static> Cursor<T> {
    pub(crate) fn new(producer: Arc<dyn Producer<T>>, config: ProducerConfig) -> Self {
        Self {
            producer,
            context: ProducerContext::new(config),
            state: State::NotStarted,
            failure_reported: false,
        }
    }

    /// Reports whether a further item exists, without consuming it.
    ///
    /// Starts the producer on first call and blocks until it publishes an
    /// item or finishes. Calling it repeatedly without
    /// [`take_next`](Self::take_next) does not advance the sequence.
    ///
    /// # Errors
    ///
    /// - [`GeneratorError::Producer`] if the producer failed; the same
    ///   failure is returned on every later poll.
    /// - [`GeneratorError::Spawn`] if the producer thread could not start.
    pub fn has_more(&mut self) -> Result<bool, GeneratorError> {
        match &self.state {
            State::ItemReady(_) => return Ok(true),
            State::Exhausted => return Ok(false),
            State::Failed(failure) => return Err(failure.clone().into()),
            State::NotStarted => {
                self.context.start(self.producer.clone())?;
                self.state = State::Running;
            }
            State::Running => {}
        }

        let handoff = self.context.handoff();
        handoff.request();

        self.state = match handoff.await_ready() {
            Slot::Item(value) => State::ItemReady(value),
            // `deliver` fills the slot before raising `ready`; `Empty` is
            // only the resting state between two deliveries.
            Slot::Empty | Slot::Finished => State::Exhausted,
            Slot::Failed(failure) => State::Failed(failure),
        };

        match &self.state {
            State::ItemReady(_) => Ok(true),
            State::Failed(failure) => {
                let failure = failure.clone();
                self.context.cancel();
                Err(failure.into())
            }
            _ => {
                self.context.cancel();
                Ok(false)
            }
        }
    }

    /// Returns the next item, advancing the sequence.
    ///
    /// # Errors
    ///
    /// - [`GeneratorError::EndOfSequence`] if the sequence is exhausted.
    ///   Calling again keeps failing; items are never repeated.
    /// - [`GeneratorError::Producer`] if the producer failed.
    /// - [`GeneratorError::Spawn`] if the producer thread could not start.
    pub fn take_next(&mut self) -> Result<T, GeneratorError> {
        if !self.has_more()? {
            return Err(GeneratorError::EndOfSequence);
        }

        match mem::replace(&mut self.state, State::Running) {
            State::ItemReady(value) => Ok(value),
            other => {
                self.state = other;
                Err(GeneratorError::EndOfSequence)
            }
        }
    }

    /// Mutation through a cursor is not supported.
    ///
    /// # Errors
    ///
    /// Always returns [`GeneratorError::Unsupported`].
    pub fn remove(&mut self) -> Result<(), GeneratorError> {
        Err(GeneratorError::Unsupported("remove"))
    }
}

impl<T> Cursor<T> {
    /// Cancels the producer and waits for its thread to terminate.
    ///
    /// Any buffered item is dropped. Afterwards the cursor reports
    /// `Exhausted`, unless it had already failed. Disposing twice is a
    /// no-op.
    pub fn dispose(&mut self) {
        self.context.cancel();

        if !matches!(self.state, State::Failed(_)) {
            self.state = State::Exhausted;
        }
    }

    /// Returns the cursor's current state.
    pub fn state(&self) -> CursorState {
        match self.state {
            State::NotStarted => CursorState::NotStarted,
            State::Running => CursorState::Running,
            State::ItemReady(_) => CursorState::ItemReady,
            State::Exhausted => CursorState::Exhausted,
            State::Failed(_) => CursorState::Failed,
        }
    }

    /// Returns the state of the cursor's producer thread.
    pub fn producer_status(&self) -> ProducerStatus {
        self.context.status()
    }

    /// Identifier of this cursor's generator instance.
    pub fn id(&self) -> GeneratorId {
        self.context.id()
    }
}

impl<T: Send + 'static> Iterator for Cursor<T> {
    type Item = Result<T, GeneratorError>;

    /// Yields each published item, then `None`.
    ///
    /// A producer failure is yielded once as `Some(Err(_))`, after which
    /// the iterator is fused.
    fn next(&mut self) -> Option<Self::Item> {
        if self.failure_reported {
            return None;
        }

        match self.take_next() {
            Ok(value) => Some(Ok(value)),
            Err(GeneratorError::EndOfSequence) => None,
            Err(error) => {
                self.failure_reported = true;
                Some(Err(error))
            }
        }
    }
}

impl<T: Send + 'static> FusedIterator for Cursor<T> {}
