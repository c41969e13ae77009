//! Indexable read-only sources for bulk construction.

use std::collections::VecDeque;

/// A read-only sequence with `O(1)` length and positional access.
///
/// [`PriorityQueue::from_sequence`](crate::PriorityQueue::from_sequence)
/// reads each element once, in index order.
pub trait Sequence<T> {
    /// Number of elements.
    fn size(&self) -> usize;

    /// Element at `index`.
    ///
    /// Only called with `index < self.size()`.
    fn get(&self, index: usize) -> &T;
}

impl<T> Sequence<T> for [T] {
    #[inline]
    fn size(&self) -> usize {
        self.len()
    }

    #[inline]
    fn get(&self, index: usize) -> &T {
        &self[index]
    }
}

impl<T, const N: usize> Sequence<T> for [T; N] {
    #[inline]
    fn size(&self) -> usize {
        N
    }

    #[inline]
    fn get(&self, index: usize) -> &T {
        &self[index]
    }
}

impl<T> Sequence<T> for Vec<T> {
    #[inline]
    fn size(&self) -> usize {
        self.len()
    }

    #[inline]
    fn get(&self, index: usize) -> &T {
        &self[index]
    }
}

impl<T> Sequence<T> for VecDeque<T> {
    #[inline]
    fn size(&self) -> usize {
        self.len()
    }

    #[inline]
    fn get(&self, index: usize) -> &T {
        &self[index]
    }
}
