#![no_main]

use libfuzzer_sys::fuzz_target;
use ferrous_dispose::{disposable, CompositeDisposable, Dispose, DisposeError, SharedDisposable};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

fuzz_target!(|data: &[u8]| {
    let composite = CompositeDisposable::new();
    let released = Arc::new(AtomicUsize::new(0));
    let mut pool: Vec<SharedDisposable> = Vec::new();
    let mut disposed = false;

    // Each byte selects an operation; the low bits pick an operation, the rest a pool slot.
    for &byte in data {
        let slot = (byte >> 3) as usize;
        let result = match byte & 0b111 {
            0 | 1 => {
                let released = released.clone();
                let item: SharedDisposable = disposable::create(move || {
                    released.fetch_add(1, Ordering::SeqCst);
                });
                pool.push(item.clone());
                composite.add(item)
            }
            2 => match pool.get(slot % pool.len().max(1)) {
                Some(item) => composite.remove(item).map(|_| ()),
                None => Ok(()),
            },
            3 => composite.clear(),
            4 => composite.count().map(|_| ()),
            5 => composite.iter().map(|snapshot| {
                let _ = snapshot.count();
            }),
            6 => {
                let mut buffer: Vec<Option<SharedDisposable>> = vec![None; slot];
                match composite.copy_into(&mut buffer, 0) {
                    Err(DisposeError::BufferTooSmall { .. }) => Ok(()),
                    other => other,
                }
            }
            _ => {
                disposed = true;
                composite.dispose()
            }
        };

        match result {
            Ok(()) => {}
            Err(DisposeError::Disposed) => assert!(disposed),
            Err(other) => panic!("unexpected error: {:?}", other),
        }
    }

    let _ = composite.dispose();
    for item in &pool {
        item.dispose().unwrap();
    }
    // Every leaf runs exactly once, whether released by the composite or directly.
    assert_eq!(released.load(Ordering::SeqCst), pool.len());
});
