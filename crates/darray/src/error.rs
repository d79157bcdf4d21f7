//! # Array Error Types
//!
//! All recoverable errors that can occur on a dynamic array.
//!
//! None of these errors mutate the array: an operation that returns `Err`
//! leaves length, capacity and every element exactly as they were.

use thiserror::Error;

/// Errors that can occur on a dynamic array.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DArrayError {
    /// Index passed to `insert_at` / `remove_at` is not below the length.
    #[error("index {index} out of range for length {length}")]
    IndexOutOfRange {
        /// The rejected index.
        index: usize,
        /// Length of the array at the time of the call.
        length: usize,
    },

    /// Pop on an array holding no elements.
    #[error("cannot pop from an empty array")]
    Empty,

    /// Requested length in `set_len` exceeds what the array can expose.
    #[error("length {requested} exceeds limit {limit}")]
    LengthOutOfRange {
        /// The rejected length.
        requested: usize,
        /// Largest length accepted at the time of the call.
        limit: usize,
    },

    /// Byte buffer does not match the element stride.
    #[error("stride mismatch: expected {expected} bytes, got {actual}")]
    StrideMismatch {
        /// Stride of the array.
        expected: usize,
        /// Size of the buffer or type that was supplied.
        actual: usize,
    },

    /// A raw array cannot store zero-sized elements.
    #[error("stride must be at least one byte")]
    ZeroStride,

    /// Invalid configuration.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The allocator could not satisfy a fallible reservation.
    #[error("allocation of {bytes} bytes failed")]
    Allocation {
        /// Size of the payload that was requested.
        bytes: usize,
    },
}

/// Result type for array operations.
pub type DArrayResult<T> = Result<T, DArrayError>;
