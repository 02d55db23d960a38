//! Specialized collection types
//!
//! The simulation and render clocks run on separate threads but share the
//! scene's collections, and callbacks running inside an iteration are allowed
//! to register or remove elements of the very collection being iterated.
//! [`SnapshotList`] makes that contract explicit: iteration always works on a
//! consistent snapshot taken at its start, and concurrent mutation becomes
//! visible only to iterations started afterwards.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Lock a mutex, recovering the guard if a previous holder panicked.
///
/// A panicking tick callback must not take the whole scene down with it;
/// the protected data stays usable for subsequent ticks.
pub fn lock_or_recover<T: ?Sized>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Copy-on-write list with snapshot-on-iterate semantics.
///
/// Structural mutation (push, retain, clear) briefly locks an internal mutex,
/// clones the backing vector and swaps it in. Iteration clones the current
/// `Arc` and never blocks mutation, so a fixed task may add a game object
/// mid-pass without corrupting the pass.
pub struct SnapshotList<T: ?Sized> {
    inner: Mutex<Arc<Vec<Arc<T>>>>,
}

impl<T: ?Sized> SnapshotList<T> {
    /// Create an empty list
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Arc::new(Vec::new())),
        }
    }

    /// Append an element; visible to iterations started after this call
    pub fn push(&self, item: Arc<T>) {
        let mut guard = lock_or_recover(&self.inner);
        let mut next = Vec::clone(&guard);
        next.push(item);
        *guard = Arc::new(next);
    }

    /// Keep only the elements for which `keep` returns `true`
    pub fn retain(&self, mut keep: impl FnMut(&T) -> bool) {
        let mut guard = lock_or_recover(&self.inner);
        let mut next = Vec::clone(&guard);
        next.retain(|item| keep(item));
        *guard = Arc::new(next);
    }

    /// Remove every element
    pub fn clear(&self) {
        let mut guard = lock_or_recover(&self.inner);
        *guard = Arc::new(Vec::new());
    }

    /// Take a consistent snapshot of the current contents
    pub fn snapshot(&self) -> Snapshot<T> {
        Snapshot(Arc::clone(&lock_or_recover(&self.inner)))
    }

    /// Number of elements currently stored
    pub fn len(&self) -> usize {
        lock_or_recover(&self.inner).len()
    }

    /// Whether the list is currently empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: ?Sized> Default for SnapshotList<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// An immutable view of a [`SnapshotList`] as of the moment it was taken
pub struct Snapshot<T: ?Sized>(Arc<Vec<Arc<T>>>);

impl<T: ?Sized> Snapshot<T> {
    /// Iterate over the snapshotted elements
    pub fn iter(&self) -> std::slice::Iter<'_, Arc<T>> {
        self.0.iter()
    }

    /// Number of elements in the snapshot
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the snapshot is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a, T: ?Sized> IntoIterator for &'a Snapshot<T> {
    type Item = &'a Arc<T>;
    type IntoIter = std::slice::Iter<'a, Arc<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
