//! Error types for ring buffer operations.

use thiserror::Error;

/// Failure of a ring buffer mutator.
///
/// Both variants are caller errors: the buffer state is left untouched and
/// nothing is retried internally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum QueueError {
    /// Enqueue was called while every slot was occupied.
    #[error("ring buffer is full")]
    CapacityExceeded,
    /// Dequeue was called while no slot was occupied.
    #[error("ring buffer is empty")]
    EmptyQueue,
}
