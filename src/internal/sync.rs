//! Mutex shim selecting the lock backend at compile time.

#[cfg(feature = "parking-lot")]
pub(crate) type MutexGuard<'a, T> = parking_lot::MutexGuard<'a, T>;
#[cfg(not(feature = "parking-lot"))]
pub(crate) type MutexGuard<'a, T> = std::sync::MutexGuard<'a, T>;

/// Non-poisoning mutex over either `parking_lot` or `std`.
#[derive(Debug, Default)]
pub(crate) struct Mutex<T> {
    #[cfg(feature = "parking-lot")]
    inner: parking_lot::Mutex<T>,
    #[cfg(not(feature = "parking-lot"))]
    inner: std::sync::Mutex<T>,
}

impl<T> Mutex<T> {
    pub(crate) fn new(value: T) -> Self {
        Self {
            #[cfg(feature = "parking-lot")]
            inner: parking_lot::Mutex::new(value),
            #[cfg(not(feature = "parking-lot"))]
            inner: std::sync::Mutex::new(value),
        }
    }

    /// Acquire the lock. A poisoned std mutex is recovered, since a panicking
    /// member callback leaves the protected data consistent.
    pub(crate) fn lock(&self) -> MutexGuard<'_, T> {
        #[cfg(feature = "parking-lot")]
        {
            self.inner.lock()
        }
        #[cfg(not(feature = "parking-lot"))]
        {
            self.inner
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner)
        }
    }

    pub(crate) fn try_lock(&self) -> Option<MutexGuard<'_, T>> {
        #[cfg(feature = "parking-lot")]
        {
            self.inner.try_lock()
        }
        #[cfg(not(feature = "parking-lot"))]
        {
            match self.inner.try_lock() {
                Ok(guard) => Some(guard),
                Err(std::sync::TryLockError::Poisoned(p)) => Some(p.into_inner()),
                Err(std::sync::TryLockError::WouldBlock) => None,
            }
        }
    }
}
