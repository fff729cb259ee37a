//! Fixed-capacity ring buffer.
//!
//! Slots live in one boxed array allocated at construction. The buffer tracks
//! the oldest slot (`head`) and the number of occupied slots (`len`); the
//! newest slot is derived as `head + len - 1` modulo capacity. Keeping an
//! explicit length means a buffer of capacity `N` holds `N` elements and
//! full/empty can never be confused.
//!
//! # Example
//!
//! ```
//! use nexus_ring::RingBuffer;
//!
//! let mut ring = RingBuffer::new(4);
//!
//! for lap in 0..3u64 {
//!     for i in 0..4 {
//!         ring.enqueue(lap * 4 + i).unwrap();
//!     }
//!     assert!(ring.is_full());
//!     for i in 0..4 {
//!         assert_eq!(ring.dequeue(), Ok(lap * 4 + i));
//!     }
//! }
//! assert!(ring.is_empty());
//! ```

use std::fmt;
use std::iter::FusedIterator;

use crate::QueueError;

/// A fixed-capacity FIFO queue.
///
/// Not thread-safe: all mutators take `&mut self`. Wrap it in a lock if it
/// has to be shared.
pub struct RingBuffer<T> {
    /// Backing slots. `None` marks an unoccupied slot.
    slots: Box<[Option<T>]>,
    /// Index of the oldest element.
    head: usize,
    /// Number of occupied slots.
    len: usize,
}

impl<T> RingBuffer<T> {
    /// Creates an empty ring buffer with room for exactly `capacity` elements.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "ring buffer capacity must be non-zero");

        Self {
            slots: std::iter::repeat_with(|| None).take(capacity).collect(),
            head: 0,
            len: 0,
        }
    }

    /// Returns the fixed capacity.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Returns the number of queued elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if no element is queued.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns `true` if every slot is occupied.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.len == self.capacity()
    }

    /// Wraps a position in `[0, 2 * capacity)` back into `[0, capacity)`.
    #[inline]
    fn wrap(&self, pos: usize) -> usize {
        let capacity = self.capacity();
        if pos >= capacity {
            pos - capacity
        } else {
            pos
        }
    }

    /// Appends `value` at the tail.
    ///
    /// # Errors
    ///
    /// Returns [`QueueError::CapacityExceeded`] if the buffer is full. The
    /// rejected value is dropped; use [`try_enqueue`](Self::try_enqueue) to
    /// get it back.
    #[inline]
    pub fn enqueue(&mut self, value: T) -> Result<(), QueueError> {
        self.try_enqueue(value)
            .map_err(|_| QueueError::CapacityExceeded)
    }

    /// Appends `value` at the tail. Returns `Err(value)` if full.
    ///
    /// # Errors
    ///
    /// Hands `value` back unchanged when no slot is free.
    #[inline]
    pub fn try_enqueue(&mut self, value: T) -> Result<(), T> {
        if self.is_full() {
            return Err(value);
        }

        let tail = self.wrap(self.head + self.len);
        self.slots[tail] = Some(value);
        self.len += 1;
        Ok(())
    }

    /// Removes and returns the oldest element.
    ///
    /// The slot is left empty so the buffer keeps no reference to the
    /// returned value.
    ///
    /// # Errors
    ///
    /// Returns [`QueueError::EmptyQueue`] if the buffer is empty.
    #[inline]
    pub fn dequeue(&mut self) -> Result<T, QueueError> {
        if self.is_empty() {
            return Err(QueueError::EmptyQueue);
        }

        let value = self.slots[self.head]
            .take()
            .ok_or(QueueError::EmptyQueue)?;
        self.head = self.wrap(self.head + 1);
        self.len -= 1;
        Ok(value)
    }

    /// Returns a reference to the oldest element without removing it.
    #[inline]
    pub fn peek(&self) -> Option<&T> {
        if self.is_empty() {
            None
        } else {
            self.slots[self.head].as_ref()
        }
    }

    /// Drops every queued element.
    ///
    /// Same outcome as dequeuing until empty, but only the occupied slots are
    /// touched and the indices are reset in one step.
    pub fn clear(&mut self) {
        let dropped = self.len;
        for i in 0..self.len {
            let idx = self.wrap(self.head + i);
            self.slots[idx] = None;
        }
        self.head = 0;
        self.len = 0;

        tracing::trace!(dropped, capacity = self.capacity(), "ring buffer cleared");
    }

    /// Returns an iterator that dequeues elements in FIFO order.
    ///
    /// Elements not consumed by the time the iterator is dropped are dropped
    /// with it, leaving the buffer empty.
    pub fn drain(&mut self) -> Drain<'_, T> {
        Drain { ring: self }
    }
}

impl<T: fmt::Debug> fmt::Debug for RingBuffer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let queued = (0..self.len).filter_map(|i| self.slots[self.wrap(self.head + i)].as_ref());
        f.debug_struct("RingBuffer")
            .field("capacity", &self.capacity())
            .field("len", &self.len)
            .field("queued", &DebugList(queued))
            .finish()
    }
}

struct DebugList<I>(I);

impl<I> fmt::Debug for DebugList<I>
where
    I: Iterator + Clone,
    I::Item: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.0.clone()).finish()
    }
}

/// Draining iterator returned by [`RingBuffer::drain`].
pub struct Drain<'a, T> {
    ring: &'a mut RingBuffer<T>,
}

impl<T> Iterator for Drain<'_, T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        self.ring.dequeue().ok()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.ring.len, Some(self.ring.len))
    }
}

impl<T> ExactSizeIterator for Drain<'_, T> {}

impl<T> FusedIterator for Drain<'_, T> {}

impl<T> Drop for Drain<'_, T> {
    fn drop(&mut self) {
        self.ring.clear();
    }
}
