use crate::error::{BoxError, GeneratorError};
use crate::producer::{Producer, Yielder, from_fn};
use crate::runtime::builder::{GeneratorBuilder, ProducerConfig};
use crate::runtime::cursor::Cursor;

use std::fmt;
use std::sync::Arc;

/// A lazily evaluated sequence defined by a producer routine.
///
/// A `Generator` owns its routine and hands out [`Cursor`]s over it. It
/// never runs anything by itself: constructing one spawns no thread.
///
/// Besides independent cursors, a generator keeps one internal cursor that
/// backs [`get`](Self::get), so it can be used as a supplier of successive
/// values. [`reset`](Self::reset) starts that sequence over on a brand-new
/// producer thread.
///
/// # Examples
///
/// ```rust,ignore
/// let fibs = Generator::from_fn(|co| {
///     let (mut a, mut b) = (0u64, 1u64);
///     loop {
///         co.publish(a)?;
///         (a, b) = (b, a + b);
///     }
/// });
///
/// let first: Vec<u64> = fibs.cursor().take(10).collect::<Result<_, _>>()?;
/// ```
pub struct Generator<T> {
    producer: Arc<dyn Producer<T>>,
    config: ProducerConfig,

    /// Cursor backing `get`, created on first use.
    getter: Option<Cursor<T>>,
}

impl<T: Send + 'static> Generator<T> {
    /// Creates a generator driven by `producer`.
    pub fn new<P: Producer<T>>(producer: P) -> Self {
        Self::with_config(Arc::new(producer), ProducerConfig::default())
    }

    /// Creates a generator driven by a closure.
    ///
    /// This is the most convenient constructor: the closure's argument
    /// type is inferred.
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(&Yielder<T>) -> Result<(), BoxError> + Send + Sync + 'static,
    {
        Self::new(from_fn(f))
    }

    /// Returns a builder for configuring producer threads.
    pub fn builder() -> GeneratorBuilder {
        GeneratorBuilder::new()
    }

    pub(crate) fn with_config(producer: Arc<dyn Producer<T>>, config: ProducerConfig) -> Self {
        Self {
            producer,
            config,
            getter: None,
        }
    }

    /// Returns a fresh single-pass cursor over the sequence.
    ///
    /// Every cursor runs the routine from the beginning on its own thread.
    /// Cursors are independent of each other and of [`get`](Self::get).
    pub fn cursor(&self) -> Cursor<T> {
        Cursor::new(self.producer.clone(), self.config.clone())
    }

    /// Returns the next value of the generator's own sequence.
    ///
    /// # Errors
    ///
    /// Same as [`Cursor::take_next`].
    pub fn get(&mut self) -> Result<T, GeneratorError> {
        let producer = &self.producer;
        let config = &self.config;

        self.getter
            .get_or_insert_with(|| Cursor::new(producer.clone(), config.clone()))
            .take_next()
    }
}

impl<T> Generator<T> {
    /// Restarts the sequence returned by [`get`](Self::get).
    ///
    /// The current internal cursor is disposed of, and the next `get`
    /// starts a brand-new producer thread; the previous one is never
    /// resumed. This only makes sense for stateless routines, whose runs
    /// all produce the same sequence.
    pub fn reset(&mut self) {
        self.dispose();
    }

    /// Tears down the internal cursor backing [`get`](Self::get), if any.
    ///
    /// Cursors obtained from [`cursor`](Self::cursor) are unaffected.
    pub fn dispose(&mut self) {
        if let Some(mut getter) = self.getter.take() {
            getter.dispose();
        }
    }
}

impl<T> Clone for Generator<T> {
    /// Shares the routine; the clone starts its own `get` sequence.
    fn clone(&self) -> Self {
        Self {
            producer: self.producer.clone(),
            config: self.config.clone(),
            getter: None,
        }
    }
}

impl<T> fmt::Debug for Generator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Generator")
            .field("config", &self.config)
            .field("getter", &self.getter.as_ref().map(Cursor::state))
            .finish_non_exhaustive()
    }
}

impl<'a, T: Send + 'static> IntoIterator for &'a Generator<T> {
    type Item = Result<T, GeneratorError>;
    type IntoIter = Cursor<T>;

    fn into_iter(self) -> Cursor<T> {
        self.cursor()
    }
}
