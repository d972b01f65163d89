//! Seeded random operation sequences checked against a reference model.
//!
//! The model is a plain list of pending items. A drain must invoke exactly
//! the model's pending items, in order, and leave the model empty.

use std::sync::Arc;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::{Item, ItemQueue, Journal};

/// What the queue should hold right now.
#[derive(Debug, Default)]
struct ReferenceModel {
    pending: Vec<Item>,
    invoked: Vec<Item>,
}

impl ReferenceModel {
    fn register(&mut self, item: Item, has_callback: bool) {
        // No-op bindings are still pending but never show up as invocations.
        self.pending.push(if has_callback {
            item
        } else {
            Item::new(usize::MAX, item.seq)
        });
    }

    fn drain(&mut self) -> usize {
        let taken = std::mem::take(&mut self.pending);
        let count = taken.len();
        self.invoked
            .extend(taken.into_iter().filter(|item| item.producer != usize::MAX));
        count
    }
}

fn run_seed(seed: u64, operations: usize) {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let queue = ItemQueue::new();
    let journal = Journal::new();
    let mut model = ReferenceModel::default();
    let mut next_seq = vec![0usize; 4];

    for _ in 0..operations {
        if rng.random_bool(0.7) {
            let producer = rng.random_range(0..next_seq.len());
            let item = Item::new(producer, next_seq[producer]);
            next_seq[producer] += 1;

            let has_callback = rng.random_bool(0.9);
            let callback = has_callback.then(|| journal.callback());
            queue.register(callback, Arc::new(item));
            model.register(item, has_callback);
        } else {
            let expected = model.drain();
            assert_eq!(queue.process(), expected, "seed {} drain size", seed);
        }

        assert_eq!(queue.len(), model.pending.len(), "seed {} pending", seed);
        assert_eq!(journal.entries(), model.invoked, "seed {} invocations", seed);
    }

    let expected = model.drain();
    assert_eq!(queue.process(), expected, "seed {} final drain", seed);
    assert_eq!(journal.entries(), model.invoked, "seed {} final", seed);
    assert!(queue.is_empty());
}

#[test]
fn test_random_sequences_match_model() {
    for seed in 0..64 {
        run_seed(seed, 200);
    }
}
