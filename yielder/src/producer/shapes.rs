use super::{Producer, Yielder};
use crate::error::BoxError;

use std::fmt;

/// A producer backed by a closure.
///
/// Equivalent to passing the closure directly, but gives the shape a name
/// that can be stored in a struct field.
pub struct FnProducer<F> {
    f: F,
}

/// Wraps a closure into a [`FnProducer`].
///
/// Unlike the blanket `Producer` impl, the `Fn` bound here lets the
/// compiler infer the closure's argument type.
pub fn from_fn<T, F>(f: F) -> FnProducer<F>
where
    F: Fn(&Yielder<T>) -> Result<(), BoxError> + Send + Sync + 'static,
{
    FnProducer { f }
}

impl<T, F> Producer<T> for FnProducer<F>
where
    F: Fn(&Yielder<T>) -> Result<(), BoxError> + Send + Sync + 'static,
{
    fn run(&self, co: &Yielder<T>) -> Result<(), BoxError> {
        (self.f)(co)
    }
}

impl<F> fmt::Debug for FnProducer<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnProducer").finish_non_exhaustive()
    }
}

/// Replays a fixed collection, one element per request.
///
/// Stateless: every run publishes the same elements in the same order.
#[derive(Debug, Clone)]
pub struct Replay<T> {
    items: Vec<T>,
}

/// Creates a [`Replay`] producer from any collection.
pub fn replay<I>(items: I) -> Replay<I::Item>
where
    I: IntoIterator,
{
    Replay {
        items: items.into_iter().collect(),
    }
}

impl<T> Producer<T> for Replay<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn run(&self, co: &Yielder<T>) -> Result<(), BoxError> {
        co.publish_all(self.items.iter().cloned())?;
        Ok(())
    }
}

/// Turns a "produce one value" function into an unbounded producer.
///
/// The function is called once per requested item, forever, until it
/// fails or the consumer disposes of the cursor.
pub struct RepeatWith<F> {
    f: F,
}

/// Creates a [`RepeatWith`] producer.
///
/// # Examples
///
/// ```rust,ignore
/// let ones = Generator::new(repeat_with(|| Ok(1)));
/// ```
pub fn repeat_with<T, F>(f: F) -> RepeatWith<F>
where
    F: Fn() -> Result<T, BoxError> + Send + Sync + 'static,
{
    RepeatWith { f }
}

impl<T, F> Producer<T> for RepeatWith<F>
where
    F: Fn() -> Result<T, BoxError> + Send + Sync + 'static,
{
    fn run(&self, co: &Yielder<T>) -> Result<(), BoxError> {
        loop {
            co.publish((self.f)()?)?;
        }
    }
}

impl<F> fmt::Debug for RepeatWith<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RepeatWith").finish_non_exhaustive()
    }
}
