//! # Raw Dynamic Array
//!
//! Stride-erased byte array for plain-old-data elements.
//!
//! Every element is exactly `stride` bytes, copied in and out by value.
//! Use this only when the element type is not known at compile time; for
//! everything else [`DArray<T>`](crate::DArray) is the better fit.
//!
//! ## Layout
//!
//! ```text
//! ┌─────────────────────────────┐ ┌──────────┬──────────┬─────┬──────────┐
//! │ RawHeader                   │ │ slot 0   │ slot 1   │ ... │ slot c-1 │
//! │ capacity │ length │ stride  │ │ stride B │ stride B │     │ stride B │
//! └─────────────────────────────┘ └──────────┴──────────┴─────┴──────────┘
//!                                  ◄──────── length ────────►
//! ```
//!
//! The payload is always fully initialised (zero-filled on allocation), so
//! `set_len` may expose any slot below capacity.

use bytemuck::{Pod, Zeroable};

use crate::config::{DArrayConfig, DEFAULT_CAPACITY, DEFAULT_GROWTH_FACTOR};
use crate::error::{DArrayError, DArrayResult};
use crate::memory::{allocate, allocate_or_abort, capacity_overflow};

/// Array metadata: `{capacity, length, stride}` as three `u64` fields.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
#[repr(C)]
pub struct RawHeader {
    /// Number of element slots allocated.
    pub capacity: u64,
    /// Number of element slots in use.
    pub length: u64,
    /// Byte size of one element.
    pub stride: u64,
}

impl RawHeader {
    /// Size of the encoded header in bytes.
    pub const SIZE: usize = std::mem::size_of::<Self>();

    /// Creates a header from in-memory sizes.
    #[must_use]
    pub const fn new(capacity: usize, length: usize, stride: usize) -> Self {
        Self {
            capacity: capacity as u64,
            length: length as u64,
            stride: stride as u64,
        }
    }

    /// The header as raw bytes, in native field order.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}

/// A growable contiguous array of fixed-size byte elements.
///
/// # Example
///
/// ```rust
/// use darray::RawDArray;
///
/// let mut array = RawDArray::new(8).unwrap();
/// array.push(&1u64.to_ne_bytes()).unwrap();
/// array.push(&2u64.to_ne_bytes()).unwrap();
///
/// let mut out = [0u8; 8];
/// array.pop(&mut out).unwrap();
/// assert_eq!(u64::from_ne_bytes(out), 2);
/// ```
#[derive(Clone, Debug)]
pub struct RawDArray {
    /// `capacity * stride` bytes, always initialised.
    payload: Vec<u8>,
    capacity: usize,
    length: usize,
    stride: usize,
    growth_factor: usize,
}

impl RawDArray {
    /// Creates an empty array of `stride`-byte elements with one slot.
    ///
    /// # Errors
    ///
    /// Returns [`DArrayError::ZeroStride`] if `stride` is zero.
    pub fn new(stride: usize) -> DArrayResult<Self> {
        Self::with_capacity(DEFAULT_CAPACITY, stride)
    }

    /// Creates an empty array with room for `capacity` elements.
    ///
    /// A capacity of zero is raised to one.
    ///
    /// # Errors
    ///
    /// Returns [`DArrayError::ZeroStride`] if `stride` is zero.
    pub fn with_capacity(capacity: usize, stride: usize) -> DArrayResult<Self> {
        if stride == 0 {
            return Err(DArrayError::ZeroStride);
        }
        let capacity = capacity.max(1);
        Ok(Self {
            payload: zeroed_or_abort(slot_bytes(capacity, stride)),
            capacity,
            length: 0,
            stride,
            growth_factor: DEFAULT_GROWTH_FACTOR,
        })
    }

    /// Fallible form of [`with_capacity`](Self::with_capacity).
    ///
    /// # Errors
    ///
    /// Returns [`DArrayError::ZeroStride`] for a zero stride, or
    /// [`DArrayError::Allocation`] if the payload cannot be allocated.
    pub fn try_with_capacity(capacity: usize, stride: usize) -> DArrayResult<Self> {
        if stride == 0 {
            return Err(DArrayError::ZeroStride);
        }
        let capacity = capacity.max(1);
        let bytes = capacity
            .checked_mul(stride)
            .ok_or(DArrayError::Allocation { bytes: usize::MAX })?;
        let mut payload = allocate(bytes).ok_or(DArrayError::Allocation { bytes })?;
        payload.resize(bytes, 0);
        Ok(Self {
            payload,
            capacity,
            length: 0,
            stride,
            growth_factor: DEFAULT_GROWTH_FACTOR,
        })
    }

    /// Creates an empty array sized by `config`.
    ///
    /// # Errors
    ///
    /// Returns [`DArrayError::InvalidConfig`] if the config fails validation,
    /// or [`DArrayError::ZeroStride`] for a zero stride.
    pub fn with_config(config: &DArrayConfig, stride: usize) -> DArrayResult<Self> {
        config.validate()?;
        let mut array = Self::with_capacity(config.initial_capacity, stride)?;
        array.growth_factor = config.growth_factor;
        Ok(array)
    }

    /// Number of elements in use.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.length
    }

    /// Returns `true` if no elements are in use.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Number of element slots allocated.
    #[inline]
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Byte size of one element.
    #[inline]
    #[must_use]
    pub const fn stride(&self) -> usize {
        self.stride
    }

    /// Capacity multiplier applied on growth.
    #[inline]
    #[must_use]
    pub const fn growth_factor(&self) -> usize {
        self.growth_factor
    }

    /// Snapshot of the metadata.
    #[must_use]
    pub const fn header(&self) -> RawHeader {
        RawHeader::new(self.capacity, self.length, self.stride)
    }

    /// Sets the length directly.
    ///
    /// Growing the length exposes whatever bytes the newly covered slots
    /// hold: zero if never written, otherwise the last value stored there.
    ///
    /// # Errors
    ///
    /// Returns [`DArrayError::LengthOutOfRange`] if `len > capacity`.
    pub fn set_len(&mut self, len: usize) -> DArrayResult<()> {
        if len > self.capacity {
            tracing::debug!(requested = len, limit = self.capacity, "raw darray set_len rejected");
            return Err(DArrayError::LengthOutOfRange {
                requested: len,
                limit: self.capacity,
            });
        }
        self.length = len;
        Ok(())
    }

    /// Drops all elements logically. No reallocation.
    #[inline]
    pub fn clear(&mut self) {
        self.length = 0;
    }

    /// Appends one element, growing the payload if it is full.
    ///
    /// # Errors
    ///
    /// Returns [`DArrayError::StrideMismatch`] if `element.len() != stride`.
    pub fn push(&mut self, element: &[u8]) -> DArrayResult<()> {
        self.check_stride(element.len())?;
        if self.length == self.capacity {
            self.grow();
        }
        let at = self.length * self.stride;
        self.payload[at..at + self.stride].copy_from_slice(element);
        self.length += 1;
        Ok(())
    }

    /// Copies the last element into `out` and removes it.
    ///
    /// # Errors
    ///
    /// Returns [`DArrayError::StrideMismatch`] if `out.len() != stride`, or
    /// [`DArrayError::Empty`] if there is nothing to pop.
    pub fn pop(&mut self, out: &mut [u8]) -> DArrayResult<()> {
        self.check_stride(out.len())?;
        if self.length == 0 {
            tracing::debug!("raw darray pop on empty array");
            return Err(DArrayError::Empty);
        }
        self.length -= 1;
        out.copy_from_slice(self.slot(self.length));
        Ok(())
    }

    /// Inserts `element` at `index`, shifting `[index, len)` one slot right.
    ///
    /// Same narrow policy as [`DArray::insert_at`](crate::DArray::insert_at):
    /// `index == len` is rejected.
    ///
    /// # Errors
    ///
    /// Returns [`DArrayError::IndexOutOfRange`] if `index >= len`, or
    /// [`DArrayError::StrideMismatch`] if `element.len() != stride`.
    pub fn insert_at(&mut self, index: usize, element: &[u8]) -> DArrayResult<()> {
        self.check_index(index)?;
        self.check_stride(element.len())?;
        if self.length == self.capacity {
            self.grow();
        }
        let stride = self.stride;
        let start = index * stride;
        let end = self.length * stride;
        self.payload.copy_within(start..end, start + stride);
        self.payload[start..start + stride].copy_from_slice(element);
        self.length += 1;
        Ok(())
    }

    /// Copies the element at `index` into `out` and removes it, shifting
    /// `[index + 1, len)` one slot left.
    ///
    /// # Errors
    ///
    /// Returns [`DArrayError::IndexOutOfRange`] if `index >= len`, or
    /// [`DArrayError::StrideMismatch`] if `out.len() != stride`.
    pub fn remove_at(&mut self, index: usize, out: &mut [u8]) -> DArrayResult<()> {
        self.check_index(index)?;
        self.check_stride(out.len())?;
        out.copy_from_slice(self.slot(index));
        let stride = self.stride;
        let start = index * stride;
        let end = self.length * stride;
        self.payload.copy_within(start + stride..end, start);
        self.length -= 1;
        Ok(())
    }

    /// Reallocates to exactly `len + 1` slots.
    pub fn shrink(&mut self) {
        self.reallocate(self.length.saturating_add(1));
    }

    /// Bytes of the element at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&[u8]> {
        (index < self.length).then(|| self.slot(index))
    }

    /// Mutable bytes of the element at `index`.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut [u8]> {
        if index >= self.length {
            return None;
        }
        let start = index * self.stride;
        Some(&mut self.payload[start..start + self.stride])
    }

    /// The live elements as one contiguous byte slice.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.payload[..self.length * self.stride]
    }

    /// Iterates over the live elements, one `stride`-byte slice each.
    pub fn iter(&self) -> std::slice::ChunksExact<'_, u8> {
        self.as_bytes().chunks_exact(self.stride)
    }

    /// Appends a `Pod` value.
    ///
    /// # Errors
    ///
    /// Returns [`DArrayError::StrideMismatch`] if `size_of::<T>() != stride`.
    pub fn push_pod<T: Pod>(&mut self, value: &T) -> DArrayResult<()> {
        self.push(bytemuck::bytes_of(value))
    }

    /// Pops the last element as a `Pod` value.
    ///
    /// # Errors
    ///
    /// Returns [`DArrayError::StrideMismatch`] or [`DArrayError::Empty`].
    pub fn pop_pod<T: Pod>(&mut self) -> DArrayResult<T> {
        let mut value = T::zeroed();
        self.pop(bytemuck::bytes_of_mut(&mut value))?;
        Ok(value)
    }

    /// Inserts a `Pod` value at `index`.
    ///
    /// # Errors
    ///
    /// Same as [`insert_at`](Self::insert_at).
    pub fn insert_pod<T: Pod>(&mut self, index: usize, value: &T) -> DArrayResult<()> {
        self.insert_at(index, bytemuck::bytes_of(value))
    }

    /// Removes the element at `index` as a `Pod` value.
    ///
    /// # Errors
    ///
    /// Same as [`remove_at`](Self::remove_at).
    pub fn remove_pod<T: Pod>(&mut self, index: usize) -> DArrayResult<T> {
        let mut value = T::zeroed();
        self.remove_at(index, bytemuck::bytes_of_mut(&mut value))?;
        Ok(value)
    }

    /// Reads the element at `index` as a `Pod` value.
    ///
    /// # Errors
    ///
    /// Returns [`DArrayError::StrideMismatch`] or
    /// [`DArrayError::IndexOutOfRange`].
    pub fn get_pod<T: Pod>(&self, index: usize) -> DArrayResult<T> {
        self.check_stride(std::mem::size_of::<T>())?;
        self.check_index(index)?;
        // Payload bytes carry no alignment guarantee for T.
        Ok(bytemuck::pod_read_unaligned(self.slot(index)))
    }

    /// Overwrites the element at `index` with a `Pod` value.
    ///
    /// # Errors
    ///
    /// Returns [`DArrayError::StrideMismatch`] or
    /// [`DArrayError::IndexOutOfRange`].
    pub fn set_pod<T: Pod>(&mut self, index: usize, value: &T) -> DArrayResult<()> {
        self.check_stride(std::mem::size_of::<T>())?;
        self.check_index(index)?;
        let start = index * self.stride;
        self.payload[start..start + self.stride].copy_from_slice(bytemuck::bytes_of(value));
        Ok(())
    }

    fn slot(&self, index: usize) -> &[u8] {
        let start = index * self.stride;
        &self.payload[start..start + self.stride]
    }

    fn check_stride(&self, actual: usize) -> DArrayResult<()> {
        if actual != self.stride {
            tracing::debug!(expected = self.stride, actual, "raw darray stride mismatch");
            return Err(DArrayError::StrideMismatch {
                expected: self.stride,
                actual,
            });
        }
        Ok(())
    }

    fn check_index(&self, index: usize) -> DArrayResult<()> {
        if index >= self.length {
            tracing::debug!(index, length = self.length, "raw darray index out of range");
            return Err(DArrayError::IndexOutOfRange {
                index,
                length: self.length,
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

    /// Copies the live bytes into a fresh zeroed payload of `capacity` slots.
    fn reallocate(&mut self, capacity: usize) {
        debug_assert!(capacity >= self.length);
        let mut next = zeroed_or_abort(slot_bytes(capacity, self.stride));
        let live = self.length * self.stride;
        next[..live].copy_from_slice(&self.payload[..live]);
        tracing::trace!(
            old_capacity = self.capacity,
            new_capacity = capacity,
            length = self.length,
            stride = self.stride,
            "raw darray reallocated"
        );
        self.payload = next;
        self.capacity = capacity;
    }
}

fn slot_bytes(capacity: usize, stride: usize) -> usize {
    capacity
        .checked_mul(stride)
        .unwrap_or_else(|| capacity_overflow(capacity))
}

fn zeroed_or_abort(bytes: usize) -> Vec<u8> {
    let mut payload = allocate_or_abort(bytes);
    payload.resize(bytes, 0);
    payload
}
