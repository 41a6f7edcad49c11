//! Error types shared by cursors, producers and the handoff channel.
//!
//! Producer routines return [`BoxError`] so that any domain error can be
//! propagated with `?`. When a routine fails, the error is wrapped into a
//! [`ProducerFailure`] and handed back to the consumer on every subsequent
//! poll of the cursor.

use std::error::Error;
use std::fmt;
use std::io;
use std::sync::Arc;

use crate::runtime::GeneratorId;

/// Boxed error type returned by producer routines.
pub type BoxError = Box<dyn Error + Send + Sync + 'static>;

/// Errors surfaced to the consumer of a generator.
#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    /// `take_next` was called with nothing left in the sequence.
    #[error("generator has no further items")]
    EndOfSequence,

    /// The producer routine failed. The original error is preserved.
    #[error(transparent)]
    Producer(#[from] ProducerFailure),

    /// The producer execution context was started a second time.
    ///
    /// Internal invariant: a cursor starts its context at most once, so this
    /// is never returned by [`Cursor`](crate::Cursor).
    #[error("producer context for generator {0} was already started")]
    IllegalReuse(GeneratorId),

    /// A mutation was attempted through a cursor.
    #[error("`{0}` is not supported by generator cursors")]
    Unsupported(&'static str),

    /// The producer thread could not be spawned.
    #[error("failed to spawn producer thread")]
    Spawn(#[source] io::Error),
}

impl GeneratorError {
    /// Returns `true` if this is the end-of-sequence condition.
    pub fn is_end_of_sequence(&self) -> bool {
        matches!(self, Self::EndOfSequence)
    }

    /// Returns the captured producer failure, if any.
    pub fn as_producer_failure(&self) -> Option<&ProducerFailure> {
        match self {
            Self::Producer(failure) => Some(failure),
            _ => None,
        }
    }
}

/// A failure raised by a producer routine.
///
/// The underlying error is reference counted so a failed cursor can hand
/// out the very same error on every poll.
#[derive(Clone)]
pub struct ProducerFailure {
    inner: Arc<dyn Error + Send + Sync + 'static>,
}

impl ProducerFailure {
    pub(crate) fn new(error: BoxError) -> Self {
        Self {
            inner: Arc::from(error),
        }
    }

    /// Returns `true` if the original error is of type `E`.
    pub fn is<E: Error + 'static>(&self) -> bool {
        self.inner.is::<E>()
    }

    /// Borrows the original error as `E`, if it has that type.
    pub fn downcast_ref<E: Error + 'static>(&self) -> Option<&E> {
        self.inner.downcast_ref::<E>()
    }

    /// Returns `true` if both failures share the same original error.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Borrows the original error.
    pub fn get_ref(&self) -> &(dyn Error + Send + Sync + 'static) {
        &*self.inner
    }
}

impl fmt::Debug for ProducerFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.inner, f)
    }
}

impl fmt::Display for ProducerFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&*self.inner, f)
    }
}

impl Error for ProducerFailure {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.inner.source()
    }
}

/// Returned by [`Yielder::publish`](crate::Yielder::publish) once the
/// consumer has disposed of the generator.
///
/// Producer routines should propagate it with `?`; it is never reported to
/// the consumer as a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("generator was cancelled")]
pub struct Cancelled;

/// A producer routine panicked.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("producer panicked: {0}")]
pub struct PanicFailure(pub String);

impl PanicFailure {
    pub(crate) fn from_payload(payload: &(dyn std::any::Any + Send)) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            (*s).to_owned()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "non-string panic payload".to_owned()
        };

        Self(message)
    }
}
