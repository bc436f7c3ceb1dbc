use std::sync::atomic::{AtomicBool, Ordering};

use quicksuggest_index::{PrefixIndex, SharedPrefixIndex};

fn vocabulary(tag: &str, count: usize) -> Vec<(String, f64)> {
    (0..count)
        .map(|i| (format!("alpha {tag}{i:02}"), i as f64 / count as f64))
        .collect()
}

#[test]
fn test_readers_never_observe_partial_rebuilds() {
    let first = vocabulary("a", 10);
    let second = vocabulary("b", 12);
    let shared = SharedPrefixIndex::from_entries(first.clone()).unwrap();
    let done = AtomicBool::new(false);

    std::thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| {
                while !done.load(Ordering::Relaxed) {
                    let results = shared.search_prefix("alpha", 50).unwrap();
                    let from_first = results.iter().filter(|r| r.starts_with("alpha a")).count();
                    let from_second = results.iter().filter(|r| r.starts_with("alpha b")).count();
                    assert!(
                        (from_first == 10 && from_second == 0)
                            || (from_first == 0 && from_second == 12),
                        "mixed or partial result: {from_first} + {from_second}"
                    );
                }
            });
        }

        for round in 0..50 {
            let entries = if round % 2 == 0 { &second } else { &first };
            shared.rebuild(entries.iter().cloned()).unwrap();
        }
        done.store(true, Ordering::Relaxed);
    });

    assert_eq!(shared.snapshot().len(), 10);
}

#[test]
fn test_snapshot_is_shared_and_send() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<PrefixIndex>();
    assert_send_sync::<SharedPrefixIndex>();

    let shared = SharedPrefixIndex::from_entries(vocabulary("a", 3)).unwrap();
    let snapshot = shared.snapshot();
    let handle = std::thread::spawn(move || snapshot.search_prefix("alpha a0", 10).unwrap().len());
    assert_eq!(handle.join().unwrap(), 3);
}

#[test]
fn test_replace_returns_previous() {
    let shared = SharedPrefixIndex::from(PrefixIndex::from_entries([("one", 1.0)]).unwrap());
    let previous = shared.replace(PrefixIndex::from_entries([("two", 1.0)]).unwrap());
    assert!(previous.contains("one"));
    assert!(shared.snapshot().contains("two"));
    assert!(!shared.snapshot().contains("one"));
}
