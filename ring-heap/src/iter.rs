//! Borrowing and draining iterators.

use core::iter::FusedIterator;

use crate::node::Node;
use crate::queue::PriorityQueue;
use crate::{Comparator, Key, Storage};

/// Iterator over queue elements in enumeration order.
///
/// Created by [`PriorityQueue::iter`].
pub struct Iter<'a, T, S, K: Key> {
    storage: &'a S,
    current: K,
    remaining: usize,
    _marker: core::marker::PhantomData<&'a T>,
}

impl<'a, T, S, K: Key> Iter<'a, T, S, K> {
    #[inline]
    pub(crate) fn new(storage: &'a S, head: K, len: usize) -> Self {
        Self {
            storage,
            current: head,
            remaining: len,
            _marker: core::marker::PhantomData,
        }
    }
}

impl<'a, T, S, K: Key + 'a> Iterator for Iter<'a, T, S, K>
where
    S: Storage<Node<T, K>, Key = K>,
{
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<&'a T> {
        let key = self.current.into_option()?;
        // Safety: ring keys are occupied, and the shared borrow of the
        // queue keeps them so for 'a
        let node = unsafe { self.storage.get_unchecked(key) };
        self.current = node.next;
        self.remaining -= 1;
        Some(&node.value)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T, S, K: Key + 'a> ExactSizeIterator for Iter<'a, T, S, K> where S: Storage<Node<T, K>, Key = K> {}

impl<'a, T, S, K: Key + 'a> FusedIterator for Iter<'a, T, S, K> where S: Storage<Node<T, K>, Key = K> {}

impl<T, S, K: Key> Clone for Iter<'_, T, S, K> {
    fn clone(&self) -> Self {
        Self {
            storage: self.storage,
            current: self.current,
            remaining: self.remaining,
            _marker: core::marker::PhantomData,
        }
    }
}

/// An iterator that pops elements while a predicate holds.
///
/// Created by [`PriorityQueue::drain_while`]. Elements come out in
/// comparator order; the first rejected element stays in the queue.
pub struct DrainWhile<'a, T, C, S, K: Key, F>
where
    S: Storage<Node<T, K>, Key = K>,
{
    queue: &'a mut PriorityQueue<T, C, S, K>,
    pred: F,
}

impl<'a, T, C, S, K: Key, F> DrainWhile<'a, T, C, S, K, F>
where
    S: Storage<Node<T, K>, Key = K>,
{
    #[inline]
    pub(crate) fn new(queue: &'a mut PriorityQueue<T, C, S, K>, pred: F) -> Self {
        Self { queue, pred }
    }
}

impl<T, C, S, K: Key, F> Iterator for DrainWhile<'_, T, C, S, K, F>
where
    S: Storage<Node<T, K>, Key = K>,
    C: Comparator<T>,
    F: FnMut(&T) -> bool,
{
    type Item = T;

    fn next(&mut self) -> Option<T> {
        let front = self.queue.front().ok()?;
        if (self.pred)(front) {
            self.queue.pop().ok()
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.queue.len()))
    }
}

#[cfg(test)]
mod tests {
    use crate::PriorityQueue;

    #[test]
    fn iter_is_exact_size() {
        let queue: PriorityQueue<u32> = (0..7).collect();
        let mut iter = queue.iter();
        assert_eq!(iter.len(), 7);
        iter.next();
        iter.next();
        assert_eq!(iter.len(), 5);
        assert_eq!(iter.by_ref().count(), 5);
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn items_outlive_the_iterator() {
        let queue = PriorityQueue::from_sequence(&[8u32, 6, 7]);
        let items: Vec<&u32> = {
            let iter = queue.iter();
            iter.collect()
        };
        let largest = items.iter().copied().max();
        assert_eq!(items, vec![&8, &6, &7]);
        assert_eq!(largest, Some(&8));
    }

    #[test]
    fn iter_clone_resumes_independently() {
        let queue = PriorityQueue::from_sequence(&[1, 2, 3]);
        let mut iter = queue.iter();
        iter.next();
        let rest: Vec<_> = iter.clone().copied().collect();
        assert_eq!(rest, vec![2, 3]);
        assert_eq!(iter.next(), Some(&2));
    }

    #[test]
    fn ref_into_iter() {
        let queue = PriorityQueue::from_sequence(&[5, 4]);
        let mut total = 0;
        for v in &queue {
            total += v;
        }
        assert_eq!(total, 9);
    }

    #[test]
    fn drain_while_all() {
        let mut queue: PriorityQueue<u32> = (0..5).collect();
        let drained: Vec<_> = queue.drain_while(|_| true).collect();
        assert_eq!(drained, vec![0, 1, 2, 3, 4]);
        assert!(queue.is_empty());
    }

    #[test]
    fn drain_while_none() {
        let mut queue: PriorityQueue<u32> = (0..5).collect();
        assert_eq!(queue.drain_while(|_| false).count(), 0);
        assert_eq!(queue.len(), 5);
    }

    #[test]
    fn drain_while_dropped_early_keeps_rest() {
        let mut queue: PriorityQueue<u32> = (0..10).collect();
        let first_two: Vec<_> = queue.drain_while(|&x| x < 8).take(2).collect();
        assert_eq!(first_two, vec![0, 1]);
        assert_eq!(queue.len(), 8);
        assert_eq!(queue.front(), Ok(&2));
    }
}
