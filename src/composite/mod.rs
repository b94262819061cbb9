//! Composite container that disposes a group of resources together.
//!
//! [`CompositeDisposable`] owns an ordered list of members and a one-way
//! Active → Disposed state machine. The list lives behind an atomically
//! swappable handle: disposing swaps the handle for `None`, and that swap is
//! the only source of truth for whether the container is disposed.
//!
//! Every other operation reads the handle first (lock-free), then locks the
//! list it saw and checks the handle again. The second check closes the window
//! in which a concurrent `dispose` swapped the handle between the read and the
//! lock.

mod snapshot;

use std::fmt;
use std::sync::Arc;

use arc_swap::ArcSwapOption;

use crate::internal::Mutex;
use crate::{AggregateError, Dispose, DisposeError, DisposeResult, SharedDisposable, same_disposable};

pub use snapshot::Snapshot;

/// Member sequence plus its cached iteration snapshot.
#[derive(Default)]
struct Members {
    items: Vec<SharedDisposable>,
    snapshot: Option<Arc<[SharedDisposable]>>,
}

impl Members {
    fn push(&mut self, item: SharedDisposable) {
        self.snapshot = None;
        self.items.push(item);
    }

    fn remove<T: ?Sized>(&mut self, item: &Arc<T>) -> bool {
        match self.items.iter().position(|m| same_disposable(m, item)) {
            Some(index) => {
                self.snapshot = None;
                self.items.remove(index);
                true
            }
            None => false,
        }
    }

    fn clear(&mut self) {
        self.snapshot = None;
        self.items.clear();
    }

    fn snapshot(&mut self) -> Arc<[SharedDisposable]> {
        if let Some(snapshot) = &self.snapshot {
            return Arc::clone(snapshot);
        }
        let snapshot: Arc<[SharedDisposable]> = self.items.iter().cloned().collect();
        self.snapshot = Some(Arc::clone(&snapshot));
        snapshot
    }
}

/// Lock domain scoped to one member list instance.
struct MemberList {
    members: Mutex<Members>,
}

impl MemberList {
    fn new(items: Vec<SharedDisposable>) -> Self {
        Self {
            members: Mutex::new(Members { items, snapshot: None }),
        }
    }
}

/// A group of disposables released together, exactly once.
///
/// Members are kept in insertion order; duplicates are allowed and membership
/// is decided by identity ([`same_disposable`]). Disposing the composite
/// disposes every member in order, continuing past failures, and reports all
/// failures as one [`AggregateError`]. Once disposing has begun every other
/// operation fails with [`DisposeError::Disposed`], and further `dispose` calls
/// are no-ops.
///
/// # Examples
///
/// ```
/// use ferrous_dispose::{disposable, CompositeDisposable, Dispose};
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use std::sync::Arc;
///
/// let closed = Arc::new(AtomicUsize::new(0));
/// let composite = CompositeDisposable::new();
///
/// for _ in 0..3 {
///     let closed = closed.clone();
///     composite.add(disposable::create(move || {
///         closed.fetch_add(1, Ordering::SeqCst);
///     })).unwrap();
/// }
/// assert_eq!(composite.count().unwrap(), 3);
///
/// composite.dispose().unwrap();
/// composite.dispose().unwrap();
/// assert_eq!(closed.load(Ordering::SeqCst), 3);
/// assert!(composite.count().is_err());
/// ```
pub struct CompositeDisposable {
    list: ArcSwapOption<MemberList>,
}

impl CompositeDisposable {
    /// Creates an empty, active composite.
    pub fn new() -> Self {
        Self::from_vec(Vec::new())
    }

    /// Creates an empty composite with room for `capacity` members.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::from_vec(Vec::with_capacity(capacity))
    }

    /// Creates a composite pre-populated with `members`, in order.
    pub fn from_members<I>(members: I) -> Self
    where
        I: IntoIterator<Item = SharedDisposable>,
    {
        Self::from_vec(members.into_iter().collect())
    }

    fn from_vec(items: Vec<SharedDisposable>) -> Self {
        Self {
            list: ArcSwapOption::from_pointee(MemberList::new(items)),
        }
    }

    /// Returns true once disposing has begun.
    pub fn is_disposed(&self) -> bool {
        self.list.load().is_none()
    }

    /// Fast-path read of the live list.
    fn live_list(&self) -> DisposeResult<Arc<MemberList>> {
        self.list.load_full().ok_or(DisposeError::Disposed)
    }

    /// Runs `f` under the list lock if the composite is still active.
    fn with_members<R>(&self, f: impl FnOnce(&mut Members) -> R) -> DisposeResult<R> {
        let list = self.live_list()?;
        let mut members = list.members.lock();
        if self.is_disposed() {
            return Err(DisposeError::Disposed);
        }
        Ok(f(&mut *members))
    }

    /// Appends `item`.
    ///
    /// Fails with [`DisposeError::Disposed`] if the composite was already
    /// disposed when called. If disposal begins while this call is waiting for
    /// the lock, `item` is disposed immediately instead of being added, and
    /// its own error (if any) is returned.
    pub fn add(&self, item: SharedDisposable) -> DisposeResult<()> {
        let list = self.live_list()?;
        let mut members = list.members.lock();
        if self.is_disposed() {
            drop(members);
            tracing::debug!("composite disposed while adding; disposing item immediately");
            return item.dispose();
        }
        members.push(item);
        Ok(())
    }

    /// Removes the first member identical to `item`, without disposing it.
    ///
    /// Returns whether a member was removed.
    pub fn remove<T: ?Sized>(&self, item: &Arc<T>) -> DisposeResult<bool> {
        self.with_members(|m| m.remove(item))
    }

    /// Removes every member without disposing any of them.
    pub fn clear(&self) -> DisposeResult<()> {
        self.with_members(Members::clear)
    }

    /// Returns true if a member identical to `item` is present.
    pub fn contains<T: ?Sized>(&self, item: &Arc<T>) -> DisposeResult<bool> {
        self.with_members(|m| m.items.iter().any(|i| same_disposable(i, item)))
    }

    /// Number of live members.
    pub fn count(&self) -> DisposeResult<usize> {
        self.with_members(|m| m.items.len())
    }

    /// Copies the members into `buffer` starting at `offset`.
    ///
    /// Slots outside `offset..offset + count` are left untouched.
    pub fn copy_into(&self, buffer: &mut [Option<SharedDisposable>], offset: usize) -> DisposeResult<()> {
        self.with_members(|m| {
            let available = buffer.len().saturating_sub(offset);
            if offset > buffer.len() || available < m.items.len() {
                return Err(DisposeError::BufferTooSmall {
                    offset,
                    required: m.items.len(),
                    available,
                });
            }
            for (slot, item) in buffer[offset..].iter_mut().zip(&m.items) {
                *slot = Some(Arc::clone(item));
            }
            Ok(())
        })?
    }

    /// Returns an iterator over a snapshot of the current members.
    ///
    /// The snapshot is unaffected by later mutation or disposal.
    pub fn iter(&self) -> DisposeResult<Snapshot> {
        self.with_members(|m| Snapshot::new(m.snapshot()))
    }

    #[cfg(feature = "diagnostics")]
    pub fn to_debug_string(&self) -> String {
        let mut s = String::new();
        s.push_str("=== CompositeDisposable Debug ===\n");
        match self.list.load_full() {
            None => s.push_str("State: Disposed\n"),
            Some(list) => {
                s.push_str("State: Active\n");
                let state = list
                    .members
                    .try_lock()
                    .map(|m| (m.items.len(), m.snapshot.is_some()));
                match state {
                    Some((count, cached)) => {
                        s.push_str(&format!("Members: {}\n", count));
                        s.push_str(&format!("Snapshot cached: {}\n", cached));
                    }
                    None => s.push_str("Members: <locked>\n"),
                }
            }
        }
        s
    }
}

impl Dispose for CompositeDisposable {
    /// Disposes every member in insertion order.
    ///
    /// Only the first call does any work; it waits for operations already
    /// holding the list lock, then visits all members even if some fail.
    fn dispose(&self) -> DisposeResult<()> {
        let Some(list) = self.list.swap(None) else {
            return Ok(());
        };
        let mut members = list.members.lock();
        let items = std::mem::take(&mut members.items);
        members.snapshot = None;
        tracing::debug!(members = items.len(), "disposing composite");

        let mut errors = Vec::new();
        for (index, member) in items.iter().enumerate() {
            if let Err(err) = member.dispose() {
                tracing::warn!(index, error = %err, "composite member failed to dispose");
                errors.push(err);
            }
        }
        drop(members);
        drop(items);

        if errors.is_empty() {
            Ok(())
        } else {
            Err(AggregateError::new(errors).into())
        }
    }
}

impl Default for CompositeDisposable {
    fn default() -> Self {
        Self::new()
    }
}

impl FromIterator<SharedDisposable> for CompositeDisposable {
    fn from_iter<I: IntoIterator<Item = SharedDisposable>>(iter: I) -> Self {
        Self::from_members(iter)
    }
}

impl fmt::Debug for CompositeDisposable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let list = self.list.load_full();
        let mut d = f.debug_struct("CompositeDisposable");
        d.field("disposed", &list.is_none());
        if let Some(list) = &list {
            let count = list.members.try_lock().map(|m| m.items.len());
            d.field("count", &count);
        }
        d.finish()
    }
}

impl Drop for CompositeDisposable {
    fn drop(&mut self) {
        let Some(list) = self.list.load_full() else {
            return;
        };
        let undisposed = list.members.try_lock().map_or(0, |m| m.items.len());
        if undisposed > 0 {
            tracing::warn!(
                members = undisposed,
                "CompositeDisposable dropped without being disposed; members were not released"
            );
        }
    }
}
