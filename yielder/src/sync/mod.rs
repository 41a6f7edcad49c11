//! Synchronization primitives behind the generator handoff.
//!
//! This module provides the blocking rendezvous used between a cursor and
//! its producer thread:
//! - [`Signal`] — a reusable one-shot flag with a condition variable.
//! - [`Handoff`] — two signals plus a single value slot, enforcing strict
//!   request/deliver alternation with zero buffering.
//!
//! ## Design notes
//!
//! - A signal raised before the matching wait is never lost: the flag is
//!   checked under the same lock the waiter sleeps on.
//! - Closing a signal is the only way to interrupt a waiter. Once closed,
//!   every current and future wait returns [`Cancelled`](crate::Cancelled).
//! - Nothing here spawns threads; the producer context owns the thread.

mod handoff;
mod signal;

pub(crate) use handoff::{Handoff, Slot};
pub(crate) use signal::Signal;
