//! Head/tail-comparison ring buffer.
//!
//! [`HeadTailRing`] decides fullness and emptiness purely from the relative
//! position of its `head` and `tail` indices, with no length field:
//!
//! ```text
//! full  <=> (tail + 1) mod capacity == head
//! empty <=> tail + 1 == head                                    (raw counters)
//!           || (tail < head && (tail + 1) mod capacity == head)
//! ```
//!
//! starting from `head = 0, tail = -1`. Those two predicates overlap: the
//! starting state satisfies both, so the very first enqueue is rejected as
//! [`QueueError::CapacityExceeded`] and the structure never leaves its
//! initial state. The raw `tail + 1 == head` branch is only reachable with
//! `head == 0` through the `-1` sentinel.
//!
//! The type exists so the behavior stays pinned by tests next to
//! [`RingBuffer`](crate::RingBuffer), which tracks an explicit length instead.
//! New code should use [`RingBuffer`](crate::RingBuffer).
//!
//! ```
//! use nexus_ring::legacy::HeadTailRing;
//! use nexus_ring::{QueueError, RingBuffer};
//!
//! let mut legacy = HeadTailRing::new(3);
//! assert!(legacy.is_empty() && legacy.is_full());
//! assert_eq!(legacy.enqueue('A'), Err(QueueError::CapacityExceeded));
//!
//! let mut ring = RingBuffer::new(3);
//! assert!(ring.is_empty() && !ring.is_full());
//! assert_eq!(ring.enqueue('A'), Ok(()));
//! ```

use crate::QueueError;

/// Full predicate over raw head/tail indices.
#[inline]
pub const fn reports_full(head: isize, tail: isize, capacity: isize) -> bool {
    wrap(tail + 1, capacity) == head
}

/// Empty predicate over raw head/tail indices.
#[inline]
pub const fn reports_empty(head: isize, tail: isize, capacity: isize) -> bool {
    tail + 1 == head || (tail < head && wrap(tail + 1, capacity) == head)
}

/// Maps `pos` in `[-capacity, ∞)` into `[0, capacity)`.
#[inline]
const fn wrap(pos: isize, capacity: isize) -> isize {
    (pos + capacity) % capacity
}

/// Fixed-capacity queue whose full/empty test compares head and tail only.
///
/// See the [module docs](self) for the predicates and their overlap.
#[derive(Debug)]
pub struct HeadTailRing<T> {
    slots: Box<[Option<T>]>,
    /// Oldest occupied slot.
    head: isize,
    /// Most recently written slot, `-1` before the first write.
    tail: isize,
}

impl<T> HeadTailRing<T> {
    /// Creates a ring with `capacity` slots.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero or does not fit in `isize`.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "ring buffer capacity must be non-zero");
        assert!(
            isize::try_from(capacity).is_ok(),
            "ring buffer capacity must fit in isize"
        );

        Self {
            slots: std::iter::repeat_with(|| None).take(capacity).collect(),
            head: 0,
            tail: -1,
        }
    }

    /// Returns the number of slots.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    #[allow(clippy::cast_possible_wrap)]
    fn signed_capacity(&self) -> isize {
        // Checked against isize::MAX in `new`.
        self.slots.len() as isize
    }

    /// Returns the raw `(head, tail)` indices.
    #[inline]
    pub fn indices(&self) -> (isize, isize) {
        (self.head, self.tail)
    }

    /// See [`reports_full`].
    #[inline]
    pub fn is_full(&self) -> bool {
        reports_full(self.head, self.tail, self.signed_capacity())
    }

    /// See [`reports_empty`].
    #[inline]
    pub fn is_empty(&self) -> bool {
        reports_empty(self.head, self.tail, self.signed_capacity())
    }

    /// Advances `tail` and stores `value` there.
    ///
    /// # Errors
    ///
    /// Returns [`QueueError::CapacityExceeded`] when [`is_full`](Self::is_full)
    /// holds, which includes the freshly constructed state.
    #[allow(clippy::cast_sign_loss)]
    pub fn enqueue(&mut self, value: T) -> Result<(), QueueError> {
        if self.is_full() {
            return Err(QueueError::CapacityExceeded);
        }

        self.tail = wrap(self.tail + 1, self.signed_capacity());
        self.slots[self.tail as usize] = Some(value);
        Ok(())
    }

    /// Takes the element at `head` and advances `head`.
    ///
    /// # Errors
    ///
    /// Returns [`QueueError::EmptyQueue`] when [`is_empty`](Self::is_empty)
    /// holds, or when the slot at `head` is vacant.
    #[allow(clippy::cast_sign_loss)]
    pub fn dequeue(&mut self) -> Result<T, QueueError> {
        if self.is_empty() {
            return Err(QueueError::EmptyQueue);
        }

        let value = self.slots[self.head as usize]
            .take()
            .ok_or(QueueError::EmptyQueue)?;
        self.head = wrap(self.head + 1, self.signed_capacity());
        Ok(value)
    }

    /// Dequeues until [`is_empty`](Self::is_empty) holds.
    pub fn clear(&mut self) {
        while self.dequeue().is_ok() {}
    }
}
