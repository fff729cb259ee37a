//! # nexus-ring
//!
//! Fixed-capacity FIFO ring buffer for single-threaded use.
//!
//! ## Features
//!
//! - **[`RingBuffer`]**: Bounded queue over a single preallocated slot array
//! - **[`legacy::HeadTailRing`]**: The head/tail-comparison variant, kept to
//!   pin down where its full/empty predicates disagree with [`RingBuffer`]
//!
//! ## Design Goals
//!
//! - O(1) enqueue and dequeue
//! - No allocations after construction
//! - Fail fast: enqueue on a full buffer and dequeue on an empty one are
//!   reported immediately as [`QueueError`], never retried
//! - Removed elements are moved out of their slot, so the buffer never
//!   holds on to something it already handed back
//!
//! ## Example
//!
//! ```
//! use nexus_ring::{QueueError, RingBuffer};
//!
//! let mut ring = RingBuffer::new(3);
//!
//! ring.enqueue('A').unwrap();
//! ring.enqueue('B').unwrap();
//! ring.enqueue('C').unwrap();
//! assert_eq!(ring.enqueue('D'), Err(QueueError::CapacityExceeded));
//!
//! assert_eq!(ring.dequeue(), Ok('A'));
//! ring.enqueue('D').unwrap();
//!
//! let rest: Vec<char> = ring.drain().collect();
//! assert_eq!(rest, ['B', 'C', 'D']);
//! assert_eq!(ring.dequeue(), Err(QueueError::EmptyQueue));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

mod error;
pub mod legacy;
mod ring;

pub use error::QueueError;
pub use ring::{Drain, RingBuffer};
