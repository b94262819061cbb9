/// Property-based tests for composite disposal
///
/// Uses proptest to check idempotence and aggregate ordering across arbitrary
/// member layouts and repeated dispose calls.

use ferrous_dispose::{disposable, CompositeDisposable, Dispose, DisposeError};
use proptest::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

fn build(failures: &[bool]) -> (CompositeDisposable, Vec<Arc<AtomicUsize>>) {
    let composite = CompositeDisposable::new();
    let counters: Vec<_> = failures.iter().map(|_| Arc::new(AtomicUsize::new(0))).collect();

    for (index, (&fails, counter)) in failures.iter().zip(&counters).enumerate() {
        let counter = counter.clone();
        composite
            .add(disposable::try_create(move || {
                counter.fetch_add(1, Ordering::SeqCst);
                if fails {
                    Err(format!("member-{}", index).into())
                } else {
                    Ok(())
                }
            }))
            .unwrap();
    }

    (composite, counters)
}

proptest! {
    #[test]
    fn prop_each_member_disposed_once(
        failures in prop::collection::vec(any::<bool>(), 0..16),
        calls in 1usize..6,
    ) {
        let (composite, counters) = build(&failures);

        let first = composite.dispose();
        for _ in 1..calls {
            prop_assert!(composite.dispose().is_ok());
        }

        for counter in &counters {
            prop_assert_eq!(counter.load(Ordering::SeqCst), 1);
        }
        prop_assert_eq!(first.is_err(), failures.iter().any(|&f| f));
    }

    #[test]
    fn prop_aggregate_preserves_failure_order(
        failures in prop::collection::vec(any::<bool>(), 1..16),
    ) {
        let (composite, _counters) = build(&failures);

        let expected: Vec<String> = failures
            .iter()
            .enumerate()
            .filter(|(_, f)| **f)
            .map(|(i, _)| format!("member-{}", i))
            .collect();

        match composite.dispose() {
            Ok(()) => prop_assert!(expected.is_empty()),
            Err(DisposeError::Aggregate(aggregate)) => {
                let actual: Vec<String> = aggregate.iter().map(|e| e.to_string()).collect();
                prop_assert_eq!(actual, expected);
            }
            Err(other) => prop_assert!(false, "unexpected error: {:?}", other),
        }
    }

    #[test]
    fn prop_count_tracks_adds_and_removes(
        ops in prop::collection::vec(any::<bool>(), 0..64),
    ) {
        let composite = CompositeDisposable::new();
        let item = disposable::empty();
        let mut expected = 0usize;

        for add in ops {
            if add {
                composite.add(item.clone()).unwrap();
                expected += 1;
            } else {
                let removed = composite.remove(&item).unwrap();
                prop_assert_eq!(removed, expected > 0);
                expected = expected.saturating_sub(1);
            }
            prop_assert_eq!(composite.count().unwrap(), expected);
        }

        composite.dispose().unwrap();
    }
}
