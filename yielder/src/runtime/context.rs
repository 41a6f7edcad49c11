use std::cell::RefCell;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

thread_local! {
    /// Live-thread counter of the leak scope entered on this thread.
    ///
    /// Producer contexts started from this thread register with it, so a
    /// scope can tell whether every producer it caused has terminated.
    /// Producer threads inherit the scope of the thread that started them.
    pub(crate) static CURRENT_SCOPE: RefCell<Option<Arc<AtomicUsize>>> =
        const { RefCell::new(None) };
}

/// Installs `scope` as the current leak scope and returns the previous one.
pub(crate) fn replace_scope(scope: Option<Arc<AtomicUsize>>) -> Option<Arc<AtomicUsize>> {
    CURRENT_SCOPE.with(|cell| cell.replace(scope))
}

/// Returns the leak scope entered on this thread, if any.
pub(crate) fn current_scope() -> Option<Arc<AtomicUsize>> {
    CURRENT_SCOPE.with(|cell| cell.borrow().clone())
}

/// Registration of one producer thread with a leak scope.
///
/// Moved into the producer thread and dropped when its body returns.
pub(crate) struct LiveToken {
    live: Arc<AtomicUsize>,
}

impl LiveToken {
    /// Registers a new producer thread with `scope`, if any.
    pub(crate) fn register(scope: Option<&Arc<AtomicUsize>>) -> Option<Self> {
        scope.map(|live| {
            live.fetch_add(1, Ordering::AcqRel);
            Self { live: live.clone() }
        })
    }
}

impl Drop for LiveToken {
    fn drop(&mut self) {
        self.live.fetch_sub(1, Ordering::AcqRel);
    }
}
