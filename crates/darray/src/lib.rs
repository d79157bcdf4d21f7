//! # DARRAY
//!
//! Growable, contiguous-storage arrays with an explicit capacity policy:
//! - Capacity starts at one slot (or a reserve size) and multiplies by the
//!   growth factor whenever an insertion finds the array full
//! - `shrink` reallocates down to `len + 1` slots
//! - Every reallocation copies the live elements into one fresh buffer
//!
//! ## Containers
//!
//! - [`DArray<T>`]: typed array, the one to reach for
//! - [`RawDArray`]: stride-erased byte array for element types only known at
//!   runtime, with `bytemuck::Pod` helpers
//! - [`SharedDArray<T>`]: one lock per instance for cross-thread use
//!
//! ## Errors
//!
//! Bounds, emptiness and stride errors come back as [`DArrayError`] and never
//! modify the array. Allocation failure is fatal.
//!
//! ## Example
//!
//! ```rust
//! use darray::{DArray, DArrayError};
//!
//! let mut array = DArray::new();
//! for v in [10u64, 20, 30] {
//!     array.push(v);
//! }
//! assert_eq!(array.capacity(), 4);
//!
//! // Insert only addresses existing elements.
//! assert_eq!(
//!     array.insert_at(3, 40),
//!     Err(DArrayError::IndexOutOfRange { index: 3, length: 3 })
//! );
//! array.insert_at(1, 15).unwrap();
//! assert_eq!(array.remove_at(0), Ok(10));
//! assert_eq!(array.as_slice(), &[15, 20, 30]);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod config;
pub mod error;
pub mod memory;
pub mod sync;

pub use config::{DArrayConfig, DEFAULT_CAPACITY, DEFAULT_GROWTH_FACTOR, MAX_GROWTH_FACTOR};
pub use error::{DArrayError, DArrayResult};
pub use memory::{DArray, RawDArray, RawHeader};
pub use sync::SharedDArray;
