//! FIFO properties of `RingBuffer` over arbitrary operation sequences.

use std::collections::VecDeque;

use nexus_ring::{QueueError, RingBuffer};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Enqueue(u32),
    Dequeue,
    Clear,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        6 => any::<u32>().prop_map(Op::Enqueue),
        5 => Just(Op::Dequeue),
        1 => Just(Op::Clear),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(512))]

    /// Every observable result matches a `VecDeque` bounded at the same capacity.
    #[test]
    fn matches_bounded_model(
        capacity in 1usize..16,
        ops in prop::collection::vec(op(), 0..400),
    ) {
        let mut ring = RingBuffer::new(capacity);
        let mut model = VecDeque::with_capacity(capacity);

        for op in ops {
            match op {
                Op::Enqueue(v) => {
                    let expected = if model.len() == capacity {
                        Err(QueueError::CapacityExceeded)
                    } else {
                        model.push_back(v);
                        Ok(())
                    };
                    prop_assert_eq!(ring.enqueue(v), expected);
                }
                Op::Dequeue => {
                    prop_assert_eq!(ring.dequeue(), model.pop_front().ok_or(QueueError::EmptyQueue));
                }
                Op::Clear => {
                    ring.clear();
                    model.clear();
                    prop_assert!(ring.is_empty());
                    prop_assert_eq!(ring.dequeue(), Err(QueueError::EmptyQueue));
                }
            }

            prop_assert!(ring.len() <= capacity);
            prop_assert_eq!(ring.len(), model.len());
            prop_assert_eq!(ring.peek(), model.front());
        }

        let rest: Vec<u32> = ring.drain().collect();
        prop_assert_eq!(rest, model.into_iter().collect::<Vec<_>>());
    }

    /// After N enqueues and M dequeues with no overflow or underflow, exactly
    /// N - M elements remain, in enqueue order.
    #[test]
    fn remaining_is_n_minus_m(
        capacity in 1usize..32,
        rounds in prop::collection::vec((0usize..8, 0usize..8), 1..64),
    ) {
        let mut ring = RingBuffer::new(capacity);
        let mut enqueued = 0u64;
        let mut dequeued = 0u64;

        for (pushes, pops) in rounds {
            let pushes = pushes.min(capacity - ring.len());
            for _ in 0..pushes {
                ring.enqueue(enqueued).unwrap();
                enqueued += 1;
            }
            let pops = pops.min(ring.len());
            for _ in 0..pops {
                prop_assert_eq!(ring.dequeue(), Ok(dequeued));
                dequeued += 1;
            }
        }

        let remaining: Vec<u64> = ring.drain().collect();
        prop_assert_eq!(remaining.len() as u64, enqueued - dequeued);
        prop_assert_eq!(remaining, (dequeued..enqueued).collect::<Vec<_>>());
    }
}

#[test]
fn capacity_three_walkthrough() {
    let mut ring = RingBuffer::new(3);

    assert_eq!(ring.enqueue("A"), Ok(()));
    assert_eq!(ring.enqueue("B"), Ok(()));
    assert_eq!(ring.enqueue("C"), Ok(()));
    assert_eq!(ring.enqueue("D"), Err(QueueError::CapacityExceeded));

    assert_eq!(ring.dequeue(), Ok("A"));
    assert_eq!(ring.enqueue("D"), Ok(()));

    assert_eq!(ring.dequeue(), Ok("B"));
    assert_eq!(ring.dequeue(), Ok("C"));
    assert_eq!(ring.dequeue(), Ok("D"));
    assert_eq!(ring.dequeue(), Err(QueueError::EmptyQueue));
}

#[test]
fn clear_then_dequeue_fails() {
    let mut ring = RingBuffer::new(5);
    for i in 0..5 {
        ring.enqueue(i).unwrap();
    }

    ring.clear();

    assert!(ring.is_empty());
    assert_eq!(ring.dequeue(), Err(QueueError::EmptyQueue));
}

#[test]
fn error_messages() {
    assert_eq!(QueueError::CapacityExceeded.to_string(), "ring buffer is full");
    assert_eq!(QueueError::EmptyQueue.to_string(), "ring buffer is empty");
}
