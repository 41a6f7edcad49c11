//! # Yielder
//!
//! **Yielder** brings Python-style generators to Rust: write the producer
//! of a sequence as plain imperative code (nested loops, unbounded
//! recurrences, recursive traversals) and consume it as a lazy, ordered,
//! pull-based sequence.
//!
//! Each generator instance runs its producer routine on one dedicated
//! background thread. The producer and the consumer meet on a single-slot
//! handoff with strict alternation:
//!
//! - **Lazy** — the thread starts on the first poll, and the routine runs
//!   only as far as the consumer asks.
//! - **Synchronous backpressure** — at most one item is ever in flight.
//! - **Failure propagation** — a producer error is re-raised to the
//!   consumer on every poll.
//! - **Deterministic teardown** — dropping or disposing a cursor cancels
//!   the producer and joins its thread.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use yielder::Generator;
//!
//! let lattice = Generator::from_fn(|co| {
//!     for x in 0..10 {
//!         for y in 0..10 {
//!             co.publish((x, y))?;
//!         }
//!     }
//!     Ok(())
//! });
//!
//! for point in &lattice {
//!     let (x, y) = point?;
//!     println!("{x}, {y}");
//! }
//! ```
//!
//! ## Modules
//!
//! - [`producer`] — the producer routine abstraction and its shapes
//! - [`testing`] — leak checking for producer threads
//!
//! ## Getting Started
//!
//! Add Yielder to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! yielder = { git = "https://github.com/Nebula-ecosystem/Yielder", package = "yielder" }
//! ```

mod error;
mod generator;
mod runtime;
mod sync;

pub mod producer;
pub mod testing;

pub use error::{BoxError, Cancelled, GeneratorError, PanicFailure, ProducerFailure};
pub use generator::Generator;
pub use producer::{Producer, Yielder};
pub use runtime::builder::GeneratorBuilder;
pub use runtime::cursor::{Cursor, CursorState};
pub use runtime::{GeneratorId, ProducerStatus};

pub use yielder_macros::test;
