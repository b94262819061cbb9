//! Fluent registration of disposables into a composite.

use std::sync::Arc;

use crate::{CompositeDisposable, Dispose, DisposeResult};

/// Adds `item` to `composite` and hands the same instance back.
///
/// If the composite is disposed while the call waits for its lock, `item` has
/// already been disposed when it is returned.
///
/// # Examples
///
/// ```
/// use ferrous_dispose::{disposable, register, CompositeDisposable};
/// use std::sync::Arc;
///
/// let composite = CompositeDisposable::new();
/// let timer = disposable::create(|| {});
/// let returned = register(timer.clone(), &composite).unwrap();
///
/// assert!(Arc::ptr_eq(&timer, &returned));
/// assert!(composite.contains(&timer).unwrap());
/// ```
pub fn register<T: Dispose>(item: Arc<T>, composite: &CompositeDisposable) -> DisposeResult<Arc<T>> {
    composite.add(item.clone())?;
    Ok(item)
}

/// Method form of [`register`] for chaining at construction sites.
///
/// # Examples
///
/// ```
/// use ferrous_dispose::{disposable, AddTo, CompositeDisposable};
///
/// let composite = CompositeDisposable::new();
/// let subscription = disposable::create(|| {}).add_to(&composite).unwrap();
/// assert!(composite.contains(&subscription).unwrap());
/// ```
pub trait AddTo: Sized {
    fn add_to(self, composite: &CompositeDisposable) -> DisposeResult<Self>;
}

impl<T: Dispose> AddTo for Arc<T> {
    fn add_to(self, composite: &CompositeDisposable) -> DisposeResult<Self> {
        register(self, composite)
    }
}
