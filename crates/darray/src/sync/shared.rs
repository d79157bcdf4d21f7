//! # Shared Dynamic Array
//!
//! `Arc<Mutex<DArray<T>>>`: one lock guarding one array.

use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard};

use crate::memory::DArray;

/// A dynamic array shared between threads behind a single lock.
///
/// Cloning the handle shares the same array; it does not copy elements.
///
/// # Example
///
/// ```rust
/// use darray::SharedDArray;
///
/// let shared = SharedDArray::new();
/// let writer = shared.clone();
/// std::thread::spawn(move || writer.with(|array| array.push(7u32)))
///     .join()
///     .unwrap();
///
/// assert_eq!(shared.snapshot(), vec![7]);
/// ```
#[derive(Debug)]
pub struct SharedDArray<T> {
    inner: Arc<Mutex<DArray<T>>>,
}

impl<T> SharedDArray<T> {
    /// Creates an empty shared array with the default capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::from_array(DArray::new())
    }

    /// Wraps an existing array.
    #[must_use]
    pub fn from_array(array: DArray<T>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(array)),
        }
    }

    /// Locks the array for exclusive access.
    ///
    /// Blocks until the lock is free. Keep the guard short-lived.
    pub fn lock(&self) -> MutexGuard<'_, DArray<T>> {
        self.inner.lock()
    }

    /// Runs `f` with exclusive access to the array.
    pub fn with<R>(&self, f: impl FnOnce(&mut DArray<T>) -> R) -> R {
        let mut guard = self.inner.lock();
        f(&mut *guard)
    }

    /// Number of elements at the time of the call.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Returns `true` if the array was empty at the time of the call.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }
}

impl<T: Clone> SharedDArray<T> {
    /// Copies the live elements out under the lock.
    #[must_use]
    pub fn snapshot(&self) -> Vec<T> {
        self.inner.lock().as_slice().to_vec()
    }
}

impl<T> Clone for SharedDArray<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> Default for SharedDArray<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_concurrent_push() {
        let shared = SharedDArray::new();
        let handles: Vec<_> = (0..4u32)
            .map(|t| {
                let shared = shared.clone();
                thread::spawn(move || {
                    for i in 0..250 {
                        shared.with(|array| array.push(t * 1000 + i));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(shared.len(), 1000);
        let mut values = shared.snapshot();
        values.sort_unstable();
        values.dedup();
        assert_eq!(values.len(), 1000);
        assert_eq!(shared.lock().capacity(), 1024);
    }

    #[test]
    fn test_with_runs_fallible_ops() {
        let shared = SharedDArray::from_array(DArray::<u8>::with_capacity(4));
        assert!(shared.is_empty());
        let result = shared.with(|array| array.insert_at(0, 1));
        assert!(result.is_err());
        shared.with(|array| array.push(1));
        assert_eq!(shared.with(DArray::pop), Ok(1));
    }

    #[test]
    fn test_clone_shares_one_array() {
        let shared = SharedDArray::new();
        let other = shared.clone();
        other.with(|array| array.push(3i64));
        assert_eq!(shared.snapshot(), vec![3]);
        assert_eq!(shared.lock().as_slice(), other.lock().as_slice());
    }

    #[test]
    fn test_debug_shows_contents() {
        let shared = SharedDArray::new();
        shared.with(|array| array.push(5u16));
        let text = format!("{shared:?}");
        assert!(text.contains("SharedDArray"));
        assert!(text.contains("items: [5]"));
    }
}
