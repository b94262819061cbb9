//! # ferrous-dispose
//!
//! Thread-safe, exactly-once disposal of grouped resources.
//!
//! ## Features
//!
//! - **Exactly-once leaves**: callback disposables run their cleanup at most once, even when
//!   disposed from many threads at the same time
//! - **Composite containers**: group disposables and release them together, in insertion order
//! - **Race-safe mutation**: `add`/`remove`/`clear` may race the container's own disposal without
//!   losing or double-releasing a member
//! - **Snapshot iteration**: iterators keep working after the container mutates or is disposed
//! - **Failure aggregation**: every member is visited; all failures come back as one error
//!
//! ## Quick Start
//!
//! ```rust
//! use ferrous_dispose::{disposable, AddTo, CompositeDisposable, Dispose};
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use std::sync::Arc;
//!
//! let released = Arc::new(AtomicUsize::new(0));
//! let composite = CompositeDisposable::new();
//!
//! let counter = released.clone();
//! let _timer = disposable::create(move || {
//!     counter.fetch_add(1, Ordering::SeqCst);
//! })
//! .add_to(&composite)
//! .unwrap();
//!
//! let counter = released.clone();
//! composite
//!     .add(disposable::create_with(counter, |c| {
//!         c.fetch_add(1, Ordering::SeqCst);
//!     }))
//!     .unwrap();
//!
//! composite.dispose().unwrap();
//! composite.dispose().unwrap(); // no-op
//! assert_eq!(released.load(Ordering::SeqCst), 2);
//! ```
//!
//! ## Failure Aggregation
//!
//! ```rust
//! use ferrous_dispose::{disposable, CompositeDisposable, Dispose, DisposeError};
//!
//! let composite = CompositeDisposable::new();
//! composite.add(disposable::try_create(|| Err("socket close failed".into()))).unwrap();
//! composite.add(disposable::create(|| {})).unwrap();
//!
//! match composite.dispose() {
//!     Err(DisposeError::Aggregate(agg)) => assert_eq!(agg.len(), 1),
//!     other => panic!("unexpected: {:?}", other),
//! }
//! // The failed disposal still counts; later calls do nothing.
//! assert!(composite.dispose().is_ok());
//! ```
//!
//! ## Scoped Cleanup
//!
//! ```rust
//! use ferrous_dispose::disposable;
//!
//! let mut log = Vec::new();
//! {
//!     let _guard = disposable::finally(&mut log, |log| log.push("closed"));
//! }
//! assert_eq!(log, ["closed"]);
//! ```

// Module declarations
pub mod composite;
pub mod disposable;
pub mod error;
pub mod traits;

// Internal modules
mod internal;
mod registration;

// Re-export core types
pub use composite::{CompositeDisposable, Snapshot};
pub use disposable::{ActionDisposable, EmptyDisposable, Finally};
pub use error::{AggregateError, BoxError, DisposeError, DisposeResult};
pub use registration::{register, AddTo};
pub use traits::{Dispose, SharedDisposable, same_disposable};
