use ndarray::array;

use crate::replay_buffer::{ReplayBuffer, Transition};

fn transition(tag: f32) -> Transition {
    Transition {
        state: array![tag, -tag],
        action: 0,
        reward: tag,
        next_state: array![tag + 1.0, -tag],
        done: false,
    }
}

#[test]
fn test_push_and_sample() {
    let mut buffer = ReplayBuffer::new(10);
    let t = transition(0.5);
    buffer.push(t.clone());
    assert_eq!(buffer.len(), 1);

    let sample = buffer.sample(1).unwrap();
    assert_eq!(sample[0], &t);
}

#[test]
fn test_fifo_eviction_at_capacity() {
    let mut buffer = ReplayBuffer::new(3);

    // Push A, B, C, D into a buffer of capacity 3.
    for i in 0..4 {
        buffer.push(transition(i as f32));
    }

    assert_eq!(buffer.len(), 3);

    // A (tag 0) was evicted; B, C, D remain in insertion order.
    let tags: Vec<f32> = buffer.iter().map(|t| t.reward).collect();
    assert_eq!(tags, vec![1.0, 2.0, 3.0]);
}

#[test]
fn test_capacity_never_exceeded() {
    let mut buffer = ReplayBuffer::new(5);
    for i in 0..50 {
        buffer.push(transition(i as f32));
        assert!(buffer.len() <= buffer.capacity());
    }
    assert_eq!(buffer.len(), 5);
}

#[test]
fn test_sample_refuses_when_underfilled() {
    let mut buffer = ReplayBuffer::new(10);
    for i in 0..3 {
        buffer.push(transition(i as f32));
    }

    assert!(buffer.sample(4).is_err());
    assert!(buffer.sample(3).is_ok());
}

#[test]
fn test_sample_has_no_duplicate_indices() {
    let mut buffer = ReplayBuffer::new(20);
    for i in 0..20 {
        buffer.push(transition(i as f32));
    }

    // All stored rewards are distinct, so a duplicate-free index draw yields
    // distinct rewards.
    for _ in 0..10 {
        let sample = buffer.sample(20).unwrap();
        let mut tags: Vec<f32> = sample.iter().map(|t| t.reward).collect();
        tags.sort_by(|a, b| a.partial_cmp(b).unwrap());
        tags.dedup();
        assert_eq!(tags.len(), 20);
    }
}

#[test]
fn test_is_empty() {
    let mut buffer = ReplayBuffer::new(4);
    assert!(buffer.is_empty());
    buffer.push(transition(1.0));
    assert!(!buffer.is_empty());
}
