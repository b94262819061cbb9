//! Disposal trait for resource cleanup.

use std::sync::Arc;

use crate::DisposeResult;

/// Trait for synchronous, idempotent resource disposal.
///
/// Implement this trait for resources that need structured teardown (e.g., flushing caches,
/// closing connections). Calling `dispose` more than once must be safe; only the first call
/// has an effect. Implementations are shared across threads as [`SharedDisposable`].
///
/// # Examples
///
/// ```
/// use ferrous_dispose::{CompositeDisposable, Dispose, DisposeResult};
/// use std::sync::atomic::{AtomicBool, Ordering};
/// use std::sync::Arc;
///
/// struct Connection {
///     closed: AtomicBool,
/// }
///
/// impl Dispose for Connection {
///     fn dispose(&self) -> DisposeResult<()> {
///         if !self.closed.swap(true, Ordering::AcqRel) {
///             // Close the connection...
///         }
///         Ok(())
///     }
/// }
///
/// let conn = Arc::new(Connection { closed: AtomicBool::new(false) });
/// let composite = CompositeDisposable::new();
/// composite.add(conn.clone()).unwrap();
/// composite.dispose().unwrap();
/// assert!(conn.closed.load(Ordering::Acquire));
/// ```
pub trait Dispose: Send + Sync + 'static {
    /// Release the resource. Only the first call per instance has an effect.
    fn dispose(&self) -> DisposeResult<()>;
}

/// A disposable shared between its owner and one or more containers.
pub type SharedDisposable = Arc<dyn Dispose>;

/// Returns true if both handles refer to the same disposable instance.
///
/// Container membership is decided by identity, never by value.
pub fn same_disposable<A, B>(a: &Arc<A>, b: &Arc<B>) -> bool
where
    A: ?Sized,
    B: ?Sized,
{
    std::ptr::eq(Arc::as_ptr(a) as *const (), Arc::as_ptr(b) as *const ())
}
