use crate::error::Cancelled;

use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};

/// A reusable one-shot signal.
///
/// A `Signal` is a boolean flag paired with a condition variable. Raising
/// it wakes one waiter; waiting consumes the flag. It can be raised and
/// waited on any number of times, one cycle at a time.
///
/// A signal can also be closed, which permanently wakes every waiter with
/// [`Cancelled`].
pub(crate) struct Signal {
    /// Flag state, guarded so that raise and wait cannot interleave.
    state: Mutex<SignalState>,

    /// Condition variable used to park waiters.
    condvar: Condvar,
}

#[derive(Default)]
struct SignalState {
    raised: bool,
    closed: bool,
}

impl Signal {
    /// Creates a new lowered, open signal.
    pub(crate) fn new() -> Self {
        Self {
            state: Mutex::new(SignalState::default()),
            condvar: Condvar::new(),
        }
    }

    /// Raises the signal and wakes one waiter.
    ///
    /// Raising an already raised signal has no further effect.
    pub(crate) fn raise(&self) {
        self.lock().raised = true;
        self.condvar.notify_one();
    }

    /// Blocks until the signal is raised, then lowers it.
    ///
    /// Returns immediately if the signal was raised before this call.
    /// Closing takes precedence over a pending raise.
    ///
    /// # Errors
    ///
    /// Returns [`Cancelled`] if the signal is or becomes closed.
    pub(crate) fn wait(&self) -> Result<(), Cancelled> {
        let mut state = self.lock();

        loop {
            if state.closed {
                return Err(Cancelled);
            }

            if state.raised {
                state.raised = false;
                return Ok(());
            }

            state = self
                .condvar
                .wait(state)
                .unwrap_or_else(PoisonError::into_inner);
        }
    }

    /// Closes the signal, waking all waiters.
    ///
    /// Idempotent.
    pub(crate) fn close(&self) {
        self.lock().closed = true;
        self.condvar.notify_all();
    }

    /// Returns `true` once [`close`](Self::close) has been called.
    pub(crate) fn is_closed(&self) -> bool {
        self.lock().closed
    }

    // The guarded state is two booleans written in single statements, so a
    // poisoned lock still holds a consistent value.
    fn lock(&self) -> MutexGuard<'_, SignalState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Arc;
    use std::thread;

    #[test]
    fn raise_before_wait_is_not_lost() {
        let signal = Signal::new();
        signal.raise();
        signal.raise();

        assert_eq!(signal.wait(), Ok(()));
        assert!(!signal.lock().raised, "wait must lower the flag");
    }

    #[test]
    fn close_wakes_blocked_waiter() {
        let signal = Arc::new(Signal::new());
        let waiter = {
            let signal = signal.clone();
            thread::spawn(move || signal.wait())
        };

        signal.close();

        assert_eq!(waiter.join().unwrap(), Err(Cancelled));
        assert_eq!(signal.wait(), Err(Cancelled));
    }

    #[test]
    fn close_takes_precedence_over_raise() {
        let signal = Signal::new();
        signal.raise();
        signal.close();

        assert_eq!(signal.wait(), Err(Cancelled));
    }

    #[test]
    fn ping_pong_never_loses_a_signal() {
        let ping = Arc::new(Signal::new());
        let pong = Arc::new(Signal::new());

        let peer = {
            let (ping, pong) = (ping.clone(), pong.clone());
            thread::spawn(move || {
                for _ in 0..1000 {
                    ping.wait().unwrap();
                    pong.raise();
                }
            })
        };

        for _ in 0..1000 {
            ping.raise();
            pong.wait().unwrap();
        }

        peer.join().unwrap();
    }
}
