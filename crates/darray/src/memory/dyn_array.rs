//! # Dynamic Array
//!
//! Typed, growable, contiguous array with an explicit capacity policy.
//!
//! The array owns one buffer with room for exactly `capacity` elements.
//! When an insertion finds it full, a new buffer of `capacity * growth_factor`
//! slots is allocated, the live elements are moved across and the old buffer
//! is released. `shrink` does the same towards `len + 1` slots.
//!
//! All mutation goes through `&mut self`, so a reallocation can never leave a
//! caller holding a reference into the released buffer.

use std::fmt;
use std::ops::{Index, IndexMut};

use crate::config::{DArrayConfig, DEFAULT_CAPACITY, DEFAULT_GROWTH_FACTOR};
use crate::error::{DArrayError, DArrayResult};
use crate::memory::raw::RawHeader;
use crate::memory::{allocate, allocate_or_abort, capacity_overflow};

/// A growable contiguous array of `T`.
///
/// # Thread Safety
///
/// No internal synchronization. Wrap in
/// [`SharedDArray`](crate::sync::SharedDArray) to share across threads.
///
/// # Example
///
/// ```rust
/// use darray::DArray;
///
/// let mut points: DArray<(f32, f32)> = DArray::new();
/// points.push((1.0, 2.0));
/// points.push((3.0, 4.0));
/// points.push((5.0, 6.0));
///
/// assert_eq!(points.len(), 3);
/// assert_eq!(points.capacity(), 4);
/// assert_eq!(points[1], (3.0, 4.0));
///
/// points.clear();
/// assert_eq!(points.capacity(), 4);
/// ```
pub struct DArray<T> {
    /// Live elements. The allocation always has room for `capacity` items.
    items: Vec<T>,
    /// Logical capacity in elements.
    capacity: usize,
    /// Capacity multiplier used when full.
    growth_factor: usize,
}

impl<T> DArray<T> {
    /// Creates an empty array with the default capacity of one slot.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates an empty array with room for `capacity` elements.
    ///
    /// A capacity of zero is raised to one so that growth by multiplication
    /// always makes progress.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            items: allocate_or_abort(capacity),
            capacity,
            growth_factor: DEFAULT_GROWTH_FACTOR,
        }
    }

    /// Fallible form of [`with_capacity`](Self::with_capacity).
    ///
    /// # Errors
    ///
    /// Returns [`DArrayError::Allocation`] if the allocator cannot provide the
    /// buffer, instead of aborting the process.
    pub fn try_with_capacity(capacity: usize) -> DArrayResult<Self> {
        let capacity = capacity.max(1);
        let items = allocate(capacity).ok_or(DArrayError::Allocation {
            bytes: capacity.saturating_mul(std::mem::size_of::<T>()),
        })?;
        Ok(Self {
            items,
            capacity,
            growth_factor: DEFAULT_GROWTH_FACTOR,
        })
    }

    /// Creates an empty array sized by `config`.
    ///
    /// # Errors
    ///
    /// Returns [`DArrayError::InvalidConfig`] if the config fails validation.
    pub fn with_config(config: &DArrayConfig) -> DArrayResult<Self> {
        config.validate()?;
        let mut array = Self::with_capacity(config.initial_capacity);
        array.growth_factor = config.growth_factor;
        Ok(array)
    }

    /// Number of elements in use.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if no elements are in use.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of element slots currently allocated.
    #[inline]
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Byte size of one element.
    #[inline]
    #[must_use]
    pub const fn stride(&self) -> usize {
        std::mem::size_of::<T>()
    }

    /// Capacity multiplier applied on growth.
    #[inline]
    #[must_use]
    pub const fn growth_factor(&self) -> usize {
        self.growth_factor
    }

    /// Snapshot of `{capacity, length, stride}`.
    #[must_use]
    pub fn header(&self) -> RawHeader {
        RawHeader::new(self.capacity, self.len(), self.stride())
    }

    /// Sets the length, dropping the elements past `len`.
    ///
    /// Only shrinking is possible: slots past the current length hold no
    /// value to expose. Capacity is never changed.
    ///
    /// # Errors
    ///
    /// Returns [`DArrayError::LengthOutOfRange`] if `len` exceeds the current
    /// length.
    pub fn set_len(&mut self, len: usize) -> DArrayResult<()> {
        if len > self.items.len() {
            tracing::debug!(requested = len, limit = self.items.len(), "darray set_len rejected");
            return Err(DArrayError::LengthOutOfRange {
                requested: len,
                limit: self.items.len(),
            });
        }
        self.items.truncate(len);
        Ok(())
    }

    /// Drops every element without releasing or shrinking the buffer.
    #[inline]
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Appends an element, growing the buffer if it is full.
    pub fn push(&mut self, value: T) {
        if self.items.len() == self.capacity {
            self.grow();
        }
        self.items.push(value);
    }

    /// Removes and returns the last element.
    ///
    /// # Errors
    ///
    /// Returns [`DArrayError::Empty`] if there is nothing to pop.
    pub fn pop(&mut self) -> DArrayResult<T> {
        self.items.pop().ok_or_else(|| {
            tracing::debug!("darray pop on empty array");
            DArrayError::Empty
        })
    }

    /// Inserts `value` at `index`, shifting the tail one slot to the right.
    ///
    /// `index` must address an existing element. Appending through
    /// `insert_at(len, ..)` is rejected; use [`push`](Self::push).
    ///
    /// # Errors
    ///
    /// Returns [`DArrayError::IndexOutOfRange`] if `index >= len`. The array
    /// is left untouched and `value` is dropped.
    pub fn insert_at(&mut self, index: usize, value: T) -> DArrayResult<()> {
        self.check_index(index)?;
        if self.items.len() == self.capacity {
            self.grow();
        }
        self.items.insert(index, value);
        Ok(())
    }

    /// Removes and returns the element at `index`, shifting the tail left.
    ///
    /// # Errors
    ///
    /// Returns [`DArrayError::IndexOutOfRange`] if `index >= len`.
    pub fn remove_at(&mut self, index: usize) -> DArrayResult<T> {
        self.check_index(index)?;
        Ok(self.items.remove(index))
    }

    /// Reallocates to exactly `len + 1` slots, releasing unused capacity.
    pub fn shrink(&mut self) {
        let target = self.items.len().saturating_add(1);
        self.reallocate(target);
    }

    /// Gets a reference to the element at `index`.
    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    /// Gets a mutable reference to the element at `index`.
    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.items.get_mut(index)
    }

    /// Returns the live elements as a slice.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    /// Returns the live elements as a mutable slice.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.items
    }

    /// Iterates over the live elements in order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Iterates mutably over the live elements in order.
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.items.iter_mut()
    }

    fn check_index(&self, index: usize) -> DArrayResult<()> {
        if index >= self.items.len() {
            tracing::debug!(index, length = self.items.len(), "darray index out of range");
            return Err(DArrayError::IndexOutOfRange {
                index,
                length: self.items.len(),
            });
        }
        Ok(())
    }

    fn grow(&mut self) {
        let target = self
            .capacity
            .checked_mul(self.growth_factor)
            .unwrap_or_else(|| capacity_overflow(self.capacity));
        self.reallocate(target);
    }

    /// Moves the live elements into a fresh buffer of `capacity` slots.
    fn reallocate(&mut self, capacity: usize) {
        debug_assert!(capacity >= self.items.len());
        let mut next = allocate_or_abort(capacity);
        next.append(&mut self.items);
        tracing::trace!(
            old_capacity = self.capacity,
            new_capacity = capacity,
            length = next.len(),
            stride = self.stride(),
            "darray reallocated"
        );
        self.items = next;
        self.capacity = capacity;
    }
}

impl<T> Default for DArray<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for DArray<T> {
    fn clone(&self) -> Self {
        let mut items = allocate_or_abort(self.capacity);
        items.extend_from_slice(&self.items);
        Self {
            items,
            capacity: self.capacity,
            growth_factor: self.growth_factor,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for DArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DArray")
            .field("capacity", &self.capacity)
            .field("growth_factor", &self.growth_factor)
            .field("items", &self.items)
            .finish()
    }
}

impl<T: PartialEq> PartialEq for DArray<T> {
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items
    }
}

impl<T: Eq> Eq for DArray<T> {}

impl<T> Index<usize> for DArray<T> {
    type Output = T;

    #[inline]
    fn index(&self, index: usize) -> &T {
        &self.items[index]
    }
}

impl<T> IndexMut<usize> for DArray<T> {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.items[index]
    }
}

impl<T> Extend<T> for DArray<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push(value);
        }
    }
}

impl<T> FromIterator<T> for DArray<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut array = Self::new();
        array.extend(iter);
        array
    }
}

impl<T> IntoIterator for DArray<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a DArray<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut DArray<T> {
    type Item = &'a mut T;
    type IntoIter = std::slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter_mut()
    }
}
