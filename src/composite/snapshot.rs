//! Immutable iteration snapshots of a composite's members.

use std::fmt;
use std::iter::FusedIterator;
use std::sync::Arc;

use crate::SharedDisposable;

/// Iterator over a frozen copy of a composite's member sequence.
///
/// The copy is shared with the container's cache until the next mutation, and
/// stays valid after the container is mutated or disposed.
#[derive(Clone)]
pub struct Snapshot {
    items: Arc<[SharedDisposable]>,
    pos: usize,
}

impl Snapshot {
    pub(crate) fn new(items: Arc<[SharedDisposable]>) -> Self {
        Self { items, pos: 0 }
    }

    /// Rewinds to the first member.
    pub fn reset(&mut self) {
        self.pos = 0;
    }

    /// All members captured by this snapshot, regardless of position.
    pub fn as_slice(&self) -> &[SharedDisposable] {
        &self.items
    }
}

impl Iterator for Snapshot {
    type Item = SharedDisposable;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.items.get(self.pos)?.clone();
        self.pos += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.items.len().saturating_sub(self.pos);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Snapshot {}

impl FusedIterator for Snapshot {}

impl fmt::Debug for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Snapshot")
            .field("len", &self.items.len())
            .field("pos", &self.pos)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{disposable, same_disposable};

    #[test]
    fn test_reset_and_exact_size() {
        let a: SharedDisposable = disposable::create(|| {});
        let b: SharedDisposable = disposable::empty();
        let mut snap = Snapshot::new(vec![a.clone(), b.clone()].into());

        assert_eq!(snap.len(), 2);
        assert!(same_disposable(&snap.next().unwrap(), &a));
        assert_eq!(snap.len(), 1);
        assert!(same_disposable(&snap.next().unwrap(), &b));
        assert!(snap.next().is_none());
        assert!(snap.next().is_none());

        snap.reset();
        assert_eq!(snap.len(), 2);
        assert_eq!(snap.as_slice().len(), 2);
        assert!(same_disposable(&snap.next().unwrap(), &a));
    }
}
