//! Core generator machinery.
//!
//! This module contains the pieces that turn a producer routine into a
//! pull-based sequence:
//! - the producer context owning the background thread,
//! - the cursor driving it through the handoff,
//! - the builder carrying thread configuration,
//! - the thread-local scope used for leak checking.
//!
//! Most users will go through [`Generator`](crate::Generator) rather than
//! these types directly.

mod executor;

pub(crate) mod builder;
pub(crate) mod context;
pub(crate) mod cursor;

pub use executor::{GeneratorId, ProducerStatus};
