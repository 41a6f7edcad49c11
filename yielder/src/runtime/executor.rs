use super::builder::ProducerConfig;
use super::context::{self, LiveToken};
use crate::error::{GeneratorError, PanicFailure, ProducerFailure};
use crate::producer::{Producer, Yielder};
use crate::sync::{Handoff, Slot};

use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::thread::{self, JoinHandle};

/// Process-wide identifier of a generator instance.
///
/// Every cursor gets a fresh id, including cursors created by
/// [`Generator::reset`](crate::Generator::reset).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GeneratorId(u64);

impl GeneratorId {
    pub(crate) fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    /// Returns the raw numeric id.
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for GeneratorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Lifecycle of a producer thread, as seen from its owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProducerStatus {
    /// No thread has been spawned yet.
    NotStarted,

    /// The thread is alive, computing or blocked in the handoff.
    Running,

    /// The thread has returned.
    Terminated,
}

/// Owner of the single background thread running a producer routine.
///
/// A `ProducerContext` is bound to one cursor and one routine invocation
/// for its entire lifetime. The thread is spawned lazily by
/// [`start`](Self::start) and torn down by [`cancel`](Self::cancel), which
/// also runs on drop.
///
/// The thread body follows a fixed protocol:
/// 1. Wait for the first request; no routine code runs before demand.
/// 2. Run the routine with a [`Yielder`] bound to the handoff.
/// 3. Deliver `Finished` on return, or `Failed` on error or panic.
/// 4. If cancelled, exit without delivering anything.
pub(crate) struct ProducerContext<T> {
    id: GeneratorId,
    config: ProducerConfig,
    handoff: Arc<Handoff<T>>,

    /// Join handle of the producer thread, taken on cancel.
    thread: Option<JoinHandle<()>>,

    /// Set once a thread has been spawned.
    started: bool,
}

impl<T> ProducerContext<T> {
    /// Creates an idle context. No thread is spawned.
    pub(crate) fn new(config: ProducerConfig) -> Self {
        Self {
            id: GeneratorId::next(),
            config,
            handoff: Arc::new(Handoff::new()),
            thread: None,
            started: false,
        }
    }

    /// Interrupts the producer thread and waits for it to terminate.
    ///
    /// Safe to call at any point: before start, while the routine is
    /// blocked in `publish`, or after it finished. Calling it again is a
    /// no-op.
    pub(crate) fn cancel(&mut self) {
        self.handoff.cancel();

        if let Some(handle) = self.thread.take() {
            if handle.join().is_err() {
                tracing::warn!(
                    generator = %self.id,
                    "producer thread panicked outside its routine"
                );
            }

            tracing::debug!(generator = %self.id, "producer thread joined");
        }
    }

    /// Returns the state of the producer thread.
    pub(crate) fn status(&self) -> ProducerStatus {
        match &self.thread {
            _ if !self.started => ProducerStatus::NotStarted,
            Some(handle) if !handle.is_finished() => ProducerStatus::Running,
            _ => ProducerStatus::Terminated,
        }
    }

    pub(crate) fn handoff(&self) -> &Handoff<T> {
        &self.handoff
    }

    pub(crate) fn id(&self) -> GeneratorId {
        self.id
    }
}

impl<T: Send + 'static> ProducerContext<T> {
    /// Spawns the producer thread running `producer`.
    ///
    /// The thread immediately blocks until the first request arrives on
    /// the handoff.
    ///
    /// # Errors
    ///
    /// - [`GeneratorError::IllegalReuse`] if a thread was already spawned.
    /// - [`GeneratorError::Spawn`] if the OS refused to create the thread;
    ///   the context stays unstarted in that case.
    pub(crate) fn start(
        &mut self,
        producer: Arc<dyn Producer<T>>,
    ) -> Result<(), GeneratorError> {
        if self.started {
            return Err(GeneratorError::IllegalReuse(self.id));
        }

        let id = self.id;
        let handoff = self.handoff.clone();
        let scope = context::current_scope();
        let token = LiveToken::register(scope.as_ref());

        let name = format!("{}-{}", self.config.thread_name, id);
        let mut builder = thread::Builder::new().name(name);
        if let Some(bytes) = self.config.stack_size {
            builder = builder.stack_size(bytes);
        }

        let handle = builder
            .spawn(move || {
                // Cursors polled by the routine belong to the same scope.
                context::replace_scope(scope);
                let _token = token;
                drive(id, producer.as_ref(), handoff);
            })
            .map_err(GeneratorError::Spawn)?;

        tracing::debug!(generator = %id, "producer thread spawned");

        self.thread = Some(handle);
        self.started = true;
        Ok(())
    }
}

impl<T> Drop for ProducerContext<T> {
    /// Cancels and joins the producer thread.
    ///
    /// This ensures producer threads do not outlive the cursor that owns
    /// them, whether or not the routine had finished.
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Body of the producer thread.
fn drive<T: 'static>(id: GeneratorId, producer: &dyn Producer<T>, handoff: Arc<Handoff<T>>) {
    if handoff.await_request().is_err() {
        tracing::debug!(generator = %id, "producer cancelled before first request");
        return;
    }

    let co = Yielder::new(id, handoff.clone());
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| producer.run(&co)));

    // Anything the routine does after cancellation is unobservable, so a
    // cancelled routine is never reported, whatever it returned.
    if handoff.is_cancelled() {
        tracing::debug!(generator = %id, "producer cancelled");
        return;
    }

    let slot = match outcome {
        Ok(Ok(())) => {
            tracing::debug!(generator = %id, "producer finished");
            Slot::Finished
        }
        Ok(Err(error)) => {
            tracing::warn!(generator = %id, %error, "producer failed");
            Slot::Failed(ProducerFailure::new(error))
        }
        Err(payload) => {
            let failure = PanicFailure::from_payload(payload.as_ref());
            tracing::warn!(generator = %id, error = %failure, "producer panicked");
            Slot::Failed(ProducerFailure::new(Box::new(failure)))
        }
    };

    handoff.deliver(slot);
}
