//! Element node shared by the heap index and the enumeration ring.

use crate::Key;

/// One live element of a queue.
///
/// The node wraps user data with its heap slot and its ring links. Users
/// only ever see `&T`; the rest is bookkeeping kept consistent by the queue.
#[derive(Debug, Clone)]
pub struct Node<T, K: Key = usize> {
    pub(crate) value: T,
    /// 1-based slot in the heap index.
    pub(crate) heap_pos: usize,
    pub(crate) prev: K,
    pub(crate) next: K,
}

impl<T, K: Key> Node<T, K> {
    /// Creates a node destined for heap slot `heap_pos`, not yet in the ring.
    #[inline]
    pub(crate) fn new(value: T, heap_pos: usize) -> Self {
        Self {
            value,
            heap_pos,
            prev: K::NONE,
            next: K::NONE,
        }
    }

    /// Returns the stored value.
    #[inline]
    pub fn value(&self) -> &T {
        &self.value
    }

    #[inline]
    pub(crate) fn into_value(self) -> T {
        self.value
    }
}
