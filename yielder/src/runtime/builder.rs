use crate::generator::Generator;
use crate::producer::{Producer, Yielder, from_fn};
use crate::error::BoxError;

use std::sync::Arc;

/// Default prefix of producer thread names.
pub(crate) const DEFAULT_THREAD_NAME: &str = "yielder-producer";

/// Settings applied to every producer thread of a generator.
#[derive(Debug, Clone)]
pub(crate) struct ProducerConfig {
    /// Thread name prefix; the generator id is appended.
    pub(crate) thread_name: Arc<str>,

    /// Stack size for producer threads, or the platform default.
    pub(crate) stack_size: Option<usize>,
}

impl Default for ProducerConfig {
    fn default() -> Self {
        Self {
            thread_name: Arc::from(DEFAULT_THREAD_NAME),
            stack_size: None,
        }
    }
}

/// Builder for configuring and creating a generator.
///
/// `GeneratorBuilder` allows customizing how producer threads are spawned
/// before binding a producer routine. Building never starts a thread.
///
/// # Examples
///
/// ```rust,ignore
/// let generator = GeneratorBuilder::new()
///     .thread_name("lattice")
///     .stack_size(256 * 1024)
///     .build_fn(|co| co.publish_all(0..10).map_err(Into::into));
/// ```
#[derive(Debug, Clone, Default)]
pub struct GeneratorBuilder {
    config: ProducerConfig,
}

impl GeneratorBuilder {
    /// Creates a new `GeneratorBuilder` with default configuration.
    ///
    /// Producer threads are named `yielder-producer-<id>` and use the
    /// platform's default stack size.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the prefix of producer thread names.
    ///
    /// Each thread is named `<prefix>-<id>` where `id` is the generator's
    /// [`GeneratorId`](crate::GeneratorId).
    pub fn thread_name(mut self, prefix: impl Into<String>) -> Self {
        self.config.thread_name = Arc::from(prefix.into());
        self
    }

    /// Sets the stack size of producer threads, in bytes.
    ///
    /// # Panics
    ///
    /// Panics if `bytes == 0`.
    pub fn stack_size(mut self, bytes: usize) -> Self {
        assert!(bytes > 0, "stack_size must be > 0");

        self.config.stack_size = Some(bytes);
        self
    }

    /// Builds a generator driven by `producer`.
    pub fn build<T, P>(self, producer: P) -> Generator<T>
    where
        T: Send + 'static,
        P: Producer<T>,
    {
        Generator::with_config(Arc::new(producer), self.config)
    }

    /// Builds a generator driven by a closure.
    pub fn build_fn<T, F>(self, f: F) -> Generator<T>
    where
        T: Send + 'static,
        F: Fn(&Yielder<T>) -> Result<(), BoxError> + Send + Sync + 'static,
    {
        self.build(from_fn(f))
    }
}
