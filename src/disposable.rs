//! Leaf disposables: callback wrappers, the shared no-op, and scoped cleanup.
//!
//! The factory functions here are the usual way to build leaves:
//!
//! ```
//! use ferrous_dispose::{disposable, Dispose};
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use std::sync::Arc;
//!
//! let calls = Arc::new(AtomicUsize::new(0));
//! let calls_clone = calls.clone();
//! let d = disposable::create(move || {
//!     calls_clone.fetch_add(1, Ordering::SeqCst);
//! });
//!
//! d.dispose().unwrap();
//! d.dispose().unwrap();
//! assert_eq!(calls.load(Ordering::SeqCst), 1);
//! ```

use std::fmt;
use std::marker::PhantomData;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use once_cell::sync::Lazy;

use crate::internal::Mutex;
use crate::{BoxError, Dispose, DisposeError, DisposeResult};

type Action = Box<dyn FnOnce() -> Result<(), BoxError> + Send>;

/// Disposable that runs a callback the first time it is disposed.
///
/// The callback slot is claimed by a single atomic swap. Whichever caller wins
/// runs the callback; every other caller, concurrent or later, returns `Ok(())`
/// at once without waiting for the winner to finish.
///
/// An error returned by the callback goes to the caller that ran it. The slot
/// stays cleared either way, so a failed callback is never retried.
pub struct ActionDisposable {
    claimed: AtomicBool,
    action: Mutex<Option<Action>>,
}

impl ActionDisposable {
    /// Wraps an infallible callback.
    pub fn new<F>(f: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        Self::from_action(Box::new(move || {
            f();
            Ok(())
        }))
    }

    /// Wraps a callback whose error is propagated from `dispose`.
    pub fn fallible<F>(f: F) -> Self
    where
        F: FnOnce() -> Result<(), BoxError> + Send + 'static,
    {
        Self::from_action(Box::new(f))
    }

    /// Wraps an infallible callback bound to a captured argument.
    pub fn with_arg<T, F>(arg: T, f: F) -> Self
    where
        T: Send + 'static,
        F: FnOnce(T) + Send + 'static,
    {
        Self::from_action(Box::new(move || {
            f(arg);
            Ok(())
        }))
    }

    /// Wraps a fallible callback bound to a captured argument.
    pub fn fallible_with_arg<T, F>(arg: T, f: F) -> Self
    where
        T: Send + 'static,
        F: FnOnce(T) -> Result<(), BoxError> + Send + 'static,
    {
        Self::from_action(Box::new(move || f(arg)))
    }

    fn from_action(action: Action) -> Self {
        Self {
            claimed: AtomicBool::new(false),
            action: Mutex::new(Some(action)),
        }
    }

    /// Returns true once some caller has claimed the callback.
    pub fn is_disposed(&self) -> bool {
        self.claimed.load(Ordering::Acquire)
    }
}

impl Dispose for ActionDisposable {
    fn dispose(&self) -> DisposeResult<()> {
        if self.claimed.swap(true, Ordering::AcqRel) {
            return Ok(());
        }
        // Only the winner of the swap ever reaches the lock.
        let action = self.action.lock().take();
        match action {
            Some(action) => action().map_err(DisposeError::Action),
            None => Ok(()),
        }
    }
}

impl fmt::Debug for ActionDisposable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionDisposable")
            .field("disposed", &self.is_disposed())
            .finish()
    }
}

/// Disposable whose `dispose` does nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct EmptyDisposable;

impl Dispose for EmptyDisposable {
    fn dispose(&self) -> DisposeResult<()> {
        Ok(())
    }
}

static EMPTY: Lazy<Arc<EmptyDisposable>> = Lazy::new(|| Arc::new(EmptyDisposable));

/// Returns the process-wide no-op disposable.
///
/// Every call returns a handle to the same instance, so it can be located
/// again with [`CompositeDisposable::contains`](crate::CompositeDisposable::contains)
/// or [`remove`](crate::CompositeDisposable::remove).
pub fn empty() -> Arc<EmptyDisposable> {
    Arc::clone(&EMPTY)
}

/// Creates a disposable that runs `f` once.
pub fn create<F>(f: F) -> Arc<ActionDisposable>
where
    F: FnOnce() + Send + 'static,
{
    Arc::new(ActionDisposable::new(f))
}

/// Creates a disposable that runs the fallible `f` once.
///
/// # Examples
///
/// ```
/// use ferrous_dispose::{disposable, Dispose};
///
/// let d = disposable::try_create(|| Err("flush failed".into()));
/// assert_eq!(d.dispose().unwrap_err().to_string(), "flush failed");
/// // The callback is never retried.
/// assert!(d.dispose().is_ok());
/// ```
pub fn try_create<F>(f: F) -> Arc<ActionDisposable>
where
    F: FnOnce() -> Result<(), BoxError> + Send + 'static,
{
    Arc::new(ActionDisposable::fallible(f))
}

/// Creates a disposable that runs `f(arg)` once.
pub fn create_with<T, F>(arg: T, f: F) -> Arc<ActionDisposable>
where
    T: Send + 'static,
    F: FnOnce(T) + Send + 'static,
{
    Arc::new(ActionDisposable::with_arg(arg, f))
}

/// Creates a disposable that runs the fallible `f(arg)` once.
pub fn try_create_with<T, F>(arg: T, f: F) -> Arc<ActionDisposable>
where
    T: Send + 'static,
    F: FnOnce(T) -> Result<(), BoxError> + Send + 'static,
{
    Arc::new(ActionDisposable::fallible_with_arg(arg, f))
}

/// Creates a scoped cleanup guard that runs `f(arg)` now or at scope exit.
///
/// # Examples
///
/// ```
/// use ferrous_dispose::disposable;
/// use std::cell::Cell;
///
/// let closed = Cell::new(false);
/// {
///     let _guard = disposable::finally(&closed, |c| c.set(true));
///     assert!(!closed.get());
/// }
/// assert!(closed.get());
/// ```
pub fn finally<T, F>(arg: T, f: F) -> Finally<T, impl FnOnce(T) -> Result<(), BoxError>>
where
    F: FnOnce(T),
{
    Finally::new(arg, move |arg| {
        f(arg);
        Ok(())
    })
}

/// Creates a scoped cleanup guard around a fallible `f(arg)`.
pub fn try_finally<T, F>(arg: T, f: F) -> Finally<T, F>
where
    F: FnOnce(T) -> Result<(), BoxError>,
{
    Finally::new(arg, f)
}

/// Stack-scoped cleanup guard.
///
/// Runs its cleanup at most once: on an explicit [`Finally::dispose`], or when
/// the guard goes out of scope. It is meant to live in the local scope that
/// created it. It is neither `Send` nor `Sync` and does not implement
/// [`Dispose`], so it cannot be handed to another thread or registered in a
/// container. Moving it to the heap is possible but unsupported.
///
/// An error from a cleanup that runs during `Drop` has no caller to go to and
/// is logged instead; call `dispose` to observe it.
#[must_use = "the cleanup runs when this guard is dropped; binding it to `_` runs it immediately"]
pub struct Finally<T, F>
where
    F: FnOnce(T) -> Result<(), BoxError>,
{
    slot: Option<(T, F)>,
    _local: PhantomData<*const ()>,
}

impl<T, F> Finally<T, F>
where
    F: FnOnce(T) -> Result<(), BoxError>,
{
    fn new(arg: T, f: F) -> Self {
        Self {
            slot: Some((arg, f)),
            _local: PhantomData,
        }
    }

    /// Runs the cleanup now. Later calls, and the eventual drop, do nothing.
    pub fn dispose(&mut self) -> DisposeResult<()> {
        match self.slot.take() {
            Some((arg, f)) => f(arg).map_err(DisposeError::Action),
            None => Ok(()),
        }
    }

    pub fn is_disposed(&self) -> bool {
        self.slot.is_none()
    }
}

impl<T, F> Drop for Finally<T, F>
where
    F: FnOnce(T) -> Result<(), BoxError>,
{
    fn drop(&mut self) {
        if let Err(err) = self.dispose() {
            tracing::error!(error = %err, "scoped cleanup failed at scope exit");
        }
    }
}

impl<T, F> fmt::Debug for Finally<T, F>
where
    F: FnOnce(T) -> Result<(), BoxError>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Finally")
            .field("disposed", &self.is_disposed())
            .finish()
    }
}
