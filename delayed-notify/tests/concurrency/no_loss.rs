//! Many producers, one consumer: nothing lost, nothing doubled.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;

use super::invariants::{assert_exactly_once, assert_per_producer_order};
use super::{init_tracing, Item, ItemQueue, Journal};

fn run_producers_with_consumer(producers: usize, per_producer: usize) -> (Vec<Item>, usize) {
    let queue = Arc::new(ItemQueue::new());
    let journal = Journal::new();
    let done = Arc::new(AtomicBool::new(false));
    let start = Arc::new(Barrier::new(producers + 1));

    let consumer = {
        let queue = Arc::clone(&queue);
        let done = Arc::clone(&done);
        let start = Arc::clone(&start);
        thread::spawn(move || {
            start.wait();
            let mut drained = 0;
            while !done.load(Ordering::Acquire) {
                drained += queue.process();
                thread::yield_now();
            }
            // Producers have joined; pick up whatever they left behind.
            drained + queue.process()
        })
    };

    let handles: Vec<_> = (0..producers)
        .map(|producer| {
            let queue = Arc::clone(&queue);
            let callback = journal.callback();
            let start = Arc::clone(&start);
            thread::spawn(move || {
                start.wait();
                for seq in 0..per_producer {
                    queue.register(
                        Some(Arc::clone(&callback)),
                        Arc::new(Item::new(producer, seq)),
                    );
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("producer panicked");
    }
    done.store(true, Ordering::Release);
    let drained = consumer.join().expect("consumer panicked");

    assert!(queue.is_empty());
    (journal.entries(), drained)
}

#[test]
fn test_concurrent_producers_single_consumer() {
    init_tracing();

    let (entries, drained) = run_producers_with_consumer(8, 500);

    assert_eq!(drained, 8 * 500);
    assert_exactly_once(&entries, 8, 500);
    assert_per_producer_order(&entries);
}

#[test]
fn test_single_producer_is_globally_fifo() {
    let (entries, drained) = run_producers_with_consumer(1, 2_000);

    assert_eq!(drained, 2_000);
    let expected: Vec<Item> = (0..2_000).map(|seq| Item::new(0, seq)).collect();
    assert_eq!(entries, expected);
}

#[test]
fn test_registrations_after_swap_wait_for_next_drain() {
    let queue = ItemQueue::new();
    let journal = Journal::new();

    for seq in 0..3 {
        queue.register(Some(journal.callback()), Arc::new(Item::new(0, seq)));
    }
    assert_eq!(queue.process(), 3);

    for seq in 3..5 {
        queue.register(Some(journal.callback()), Arc::new(Item::new(0, seq)));
    }
    assert_eq!(journal.entries().len(), 3);
    assert_eq!(queue.len(), 2);

    assert_eq!(queue.process(), 2);
    assert_exactly_once(&journal.entries(), 1, 5);
    assert_per_producer_order(&journal.entries());
}
