//! # Shared Access
//!
//! A bare array has no internal synchronization, and any growth or shrink
//! moves its buffer. Cross-thread use therefore goes through one lock per
//! instance, so no reference into the buffer ever outlives the guard that
//! produced it.

mod shared;

pub use shared::SharedDArray;
