//! Test support: detecting producer threads that outlive their scope.
//!
//! A [`LeakScope`] counts the producer threads started from the current
//! thread while it is entered. Once every cursor created inside the scope
//! has been dropped or disposed, the count must be back to zero; anything
//! else means a producer thread was left running.
//!
//! The `#[yielder::test]` attribute wraps a test body in
//! [`leak_checked`].

use crate::runtime::context::replace_scope;

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Guard counting producer threads started on this thread.
///
/// Entering a scope replaces any scope already entered on the thread; the
/// previous one is restored when the guard is dropped. Producer threads
/// register with the scope that was current when their cursor first
/// polled, including cursors polled from inside another producer.
pub struct LeakScope {
    live: Arc<AtomicUsize>,
    previous: Option<Arc<AtomicUsize>>,
}

impl LeakScope {
    /// Enters a new scope on the current thread.
    pub fn enter() -> Self {
        let live = Arc::new(AtomicUsize::new(0));
        let previous = replace_scope(Some(live.clone()));

        Self { live, previous }
    }

    /// Number of producer threads of this scope that have not returned.
    pub fn live(&self) -> usize {
        self.live.load(Ordering::Acquire)
    }
}

impl Drop for LeakScope {
    fn drop(&mut self) {
        replace_scope(self.previous.take());
    }
}

/// Runs `f` inside a fresh [`LeakScope`] and asserts that no producer
/// thread started by it is still alive afterwards.
///
/// # Panics
///
/// Panics if any producer thread outlived `f`.
///
/// # Examples
///
/// ```rust,ignore
/// leak_checked(|| {
///     let mut cursor = Generator::new(replay([1, 2, 3])).cursor();
///     assert_eq!(cursor.take_next().unwrap(), 1);
/// });
/// ```
pub fn leak_checked<R>(f: impl FnOnce() -> R) -> R {
    let scope = LeakScope::enter();
    let out = f();

    let live = scope.live();
    assert_eq!(
        live, 0,
        "{live} producer thread(s) still running after the scope ended"
    );

    out
}
