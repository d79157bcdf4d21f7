//! # Memory Management
//!
//! Growable contiguous arrays with an explicit reallocation policy.
//!
//! ## Design Philosophy
//!
//! Each array owns exactly one buffer. Capacity changes only on:
//! - An insertion into a full array (multiply by the growth factor)
//! - An explicit `shrink` (down to `len + 1`)
//!
//! Every capacity change allocates a fresh buffer, copies the live elements
//! forward and releases the old one.

mod dyn_array;
mod raw;

pub use dyn_array::DArray;
pub use raw::{RawDArray, RawHeader};

use std::alloc::{handle_alloc_error, Layout};

/// Allocates an empty buffer with room for at least `capacity` elements.
///
/// Returns `None` if the allocator refuses or the size overflows.
pub(crate) fn allocate<T>(capacity: usize) -> Option<Vec<T>> {
    let mut buffer = Vec::new();
    buffer.try_reserve_exact(capacity).ok()?;
    Some(buffer)
}

/// Like [`allocate`], but allocation failure is fatal.
pub(crate) fn allocate_or_abort<T>(capacity: usize) -> Vec<T> {
    match allocate(capacity) {
        Some(buffer) => buffer,
        None => match Layout::array::<T>(capacity) {
            Ok(layout) => handle_alloc_error(layout),
            Err(_) => capacity_overflow(capacity),
        },
    }
}

/// Aborts growth whose target size cannot be represented.
pub(crate) fn capacity_overflow(capacity: usize) -> ! {
    panic!("darray capacity overflow at {capacity} elements")
}
