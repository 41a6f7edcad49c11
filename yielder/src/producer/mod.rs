//! Producer routines.
//!
//! A producer routine is any unit of work that, given a [`Yielder`], hands
//! an ordered sequence of values to its consumer by calling
//! [`Yielder::publish`] repeatedly, then returns. The routine runs on a
//! dedicated thread owned by the cursor driving it, and only once the
//! consumer actually asks for a value.
//!
//! Every shape is a [`Producer`]:
//! - closures `Fn(&Yielder<T>) -> Result<(), BoxError>` (blanket impl),
//! - [`FnProducer`] — a named wrapper around such a closure,
//! - [`Replay`] — replays a collection,
//! - [`RepeatWith`] — calls a "produce one value" function in a loop.
//!
//! A routine is *stateless* when running it has no side effects; stateless
//! routines produce the same sequence for every cursor, which is what makes
//! [`Generator::reset`](crate::Generator::reset) meaningful.

mod capability;
mod shapes;

pub use capability::Yielder;
pub use shapes::{FnProducer, Replay, RepeatWith, from_fn, replay, repeat_with};

use crate::error::BoxError;

/// A routine that publishes values through a [`Yielder`].
///
/// Routines are shared between every cursor of a generator, hence the
/// `Send + Sync` bound. Constructing a routine never runs it.
///
/// # Cancellation
///
/// [`Yielder::publish`] returns [`Cancelled`](crate::Cancelled) once the
/// consumer disposes of the cursor. Routines should propagate it with `?`
/// so the producer thread can be joined.
pub trait Producer<T>: Send + Sync + 'static {
    /// Runs the routine to completion or failure.
    fn run(&self, co: &Yielder<T>) -> Result<(), BoxError>;
}

impl<T, F> Producer<T> for F
where
    F: Fn(&Yielder<T>) -> Result<(), BoxError> + Send + Sync + 'static,
{
    fn run(&self, co: &Yielder<T>) -> Result<(), BoxError> {
        self(co)
    }
}
