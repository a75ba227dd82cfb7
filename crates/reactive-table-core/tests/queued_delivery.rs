//! Integration tests for signals delivering across threads through a context.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;
use reactive_table_core::{ConnectionType, MainContext, Property, Signal};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[test]
fn queued_slots_run_on_owner_in_emission_order() {
    init_tracing();
    let context = MainContext::new();
    let signal = Signal::<usize>::new();
    let received = Arc::new(Mutex::new(Vec::new()));

    let received_clone = received.clone();
    signal.connect_queued(&context.handle(), move |&n| {
        received_clone.lock().push((n, std::thread::current().id()));
    });

    let emitters: Vec<_> = (0..4)
        .map(|worker| {
            let signal = signal.clone();
            std::thread::spawn(move || {
                for i in 0..25 {
                    signal.emit(worker * 100 + i);
                }
            })
        })
        .collect();
    for emitter in emitters {
        emitter.join().unwrap();
    }

    assert!(received.lock().is_empty());
    assert_eq!(context.process_pending(), 100);

    let received = received.lock();
    let owner = std::thread::current().id();
    assert!(received.iter().all(|(_, thread)| *thread == owner));
    for worker in 0..4 {
        let from_worker: Vec<usize> = received
            .iter()
            .map(|(n, _)| *n)
            .filter(|n| n / 100 == worker)
            .collect();
        let expected: Vec<usize> = (0..25).map(|i| worker * 100 + i).collect();
        assert_eq!(from_worker, expected);
    }
}

#[test]
fn direct_and_queued_slots_mix() {
    let context = MainContext::new();
    let signal = Signal::<&'static str>::new();
    let log = Arc::new(Mutex::new(Vec::new()));

    let direct_log = log.clone();
    signal.connect(move |s| direct_log.lock().push(format!("direct {s}")));
    let queued_log = log.clone();
    signal.connect_queued(&context.handle(), move |s| {
        queued_log.lock().push(format!("queued {s}"))
    });

    signal.emit("a");
    signal.emit("b");
    assert_eq!(*log.lock(), vec!["direct a", "direct b"]);

    context.process_pending();
    assert_eq!(
        *log.lock(),
        vec!["direct a", "direct b", "queued a", "queued b"]
    );
}

#[test]
fn disconnect_before_drain_still_runs_posted_invocations() {
    let context = MainContext::new();
    let signal = Signal::<()>::new();
    let hits = Arc::new(AtomicUsize::new(0));

    let hits_clone = hits.clone();
    let id = signal.connect_queued(&context.handle(), move |_| {
        hits_clone.fetch_add(1, Ordering::SeqCst);
    });
    signal.emit(());
    signal.disconnect(id);
    signal.emit(());

    assert_eq!(context.process_pending(), 1);
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[test]
fn property_paired_with_signal() {
    let value = Property::new(Arc::new(vec![1, 2, 3]));
    let changed = Signal::<Arc<Vec<i32>>>::new();
    let lengths = Arc::new(Mutex::new(Vec::new()));

    let lengths_clone = lengths.clone();
    changed.connect(move |v| lengths_clone.lock().push(v.len()));

    let next = Arc::new(vec![4]);
    let previous = value.swap(next.clone());
    changed.emit(next);

    assert_eq!(previous.len(), 3);
    assert_eq!(*lengths.lock(), vec![1]);
    assert_eq!(ConnectionType::default(), ConnectionType::Direct);
}
