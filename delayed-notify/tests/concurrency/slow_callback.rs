//! A callback that blocks must not block registration or other drains.

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use super::{init_tracing, Item, ItemQueue, Journal};

const WAIT: Duration = Duration::from_secs(10);

/// Registers a callback that reports entry and then blocks until released.
fn register_blocking(queue: &ItemQueue) -> (Receiver<()>, Sender<()>) {
    let (entered_tx, entered_rx) = mpsc::channel();
    let (release_tx, release_rx) = mpsc::channel::<()>();
    let entered_tx = Mutex::new(entered_tx);
    let release_rx = Mutex::new(release_rx);

    queue.register_fn(
        move |_item: Arc<Item>| {
            let _ = entered_tx.lock().expect("entered lock").send(());
            let _ = release_rx.lock().expect("release lock").recv_timeout(WAIT);
        },
        Arc::new(Item::new(0, 0)),
    );

    (entered_rx, release_tx)
}

#[test]
fn test_register_does_not_wait_for_running_callback() {
    init_tracing();

    let queue = Arc::new(ItemQueue::new());
    let journal = Journal::new();
    let (entered, release) = register_blocking(&queue);

    let drainer = {
        let queue = Arc::clone(&queue);
        thread::spawn(move || queue.process())
    };
    entered.recv_timeout(WAIT).expect("blocking callback never started");

    let (registered_tx, registered_rx) = mpsc::channel();
    let producer = {
        let queue = Arc::clone(&queue);
        let callback = journal.callback();
        thread::spawn(move || {
            queue.register(Some(callback), Arc::new(Item::new(1, 0)));
            let _ = registered_tx.send(());
        })
    };

    registered_rx
        .recv_timeout(Duration::from_secs(5))
        .expect("register blocked behind a running callback");
    producer.join().expect("producer panicked");

    // The drain in flight already owns its batch; the new binding waits.
    assert!(!drainer.is_finished());
    assert_eq!(queue.len(), 1);
    assert!(journal.entries().is_empty());

    release.send(()).expect("callback gone");
    assert_eq!(drainer.join().expect("drainer panicked"), 1);

    assert_eq!(queue.process(), 1);
    assert_eq!(journal.entries(), vec![Item::new(1, 0)]);
}

#[test]
fn test_second_drain_runs_while_first_is_blocked() {
    let queue = Arc::new(ItemQueue::new());
    let journal = Journal::new();
    let (entered, release) = register_blocking(&queue);

    let drainer = {
        let queue = Arc::clone(&queue);
        thread::spawn(move || queue.process())
    };
    entered.recv_timeout(WAIT).expect("blocking callback never started");

    queue.register(Some(journal.callback()), Arc::new(Item::new(2, 0)));
    queue.register(Some(journal.callback()), Arc::new(Item::new(2, 1)));

    // Runs on this thread without waiting for the blocked callback.
    assert_eq!(queue.process(), 2);
    assert_eq!(journal.entries(), vec![Item::new(2, 0), Item::new(2, 1)]);

    release.send(()).expect("callback gone");
    assert_eq!(drainer.join().expect("drainer panicked"), 1);
    assert!(queue.is_empty());
}
