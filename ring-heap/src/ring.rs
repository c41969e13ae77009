//! Enumeration ring: a sentinel-anchored doubly linked ring of storage keys.
//!
//! The ring header itself is the sentinel. A `K::NONE` link on a node
//! points back at it, so the first node's `prev` and the last node's `next`
//! are both `NONE`. Traversal positions use the same convention: `NONE`
//! means "at the sentinel", and the successor of the sentinel is `head`.
//!
//! The ring holds exactly the live nodes of its queue, each once. Its order
//! depends only on the sequence of link/unlink calls and is unrelated to
//! heap order.

use crate::node::Node;
use crate::{Key, Storage};

#[derive(Debug, Clone)]
pub(crate) struct Ring<K: Key> {
    head: K,
    tail: K,
    len: usize,
}

impl<K: Key> Ring<K> {
    pub(crate) const fn new() -> Self {
        Self {
            head: K::NONE,
            tail: K::NONE,
            len: 0,
        }
    }

    #[inline]
    pub(crate) const fn len(&self) -> usize {
        self.len
    }

    /// First node after the sentinel, or `NONE` if empty.
    #[inline]
    pub(crate) const fn head(&self) -> K {
        self.head
    }

    /// Links a node directly after the sentinel.
    ///
    /// The node must exist in storage and not be linked.
    #[inline]
    pub(crate) fn link_front<T, S>(&mut self, storage: &mut S, key: K)
    where
        S: Storage<Node<T, K>, Key = K>,
    {
        // Safety: caller passes an occupied key
        let node = unsafe { storage.get_unchecked_mut(key) };
        node.next = self.head;
        node.prev = K::NONE;

        if self.head.is_some() {
            // Safety: head is occupied when is_some()
            unsafe { storage.get_unchecked_mut(self.head) }.prev = key;
        } else {
            self.tail = key;
        }

        self.head = key;
        self.len += 1;
    }

    /// Links a node directly before the sentinel.
    ///
    /// The node must exist in storage and not be linked.
    #[inline]
    pub(crate) fn link_back<T, S>(&mut self, storage: &mut S, key: K)
    where
        S: Storage<Node<T, K>, Key = K>,
    {
        // Safety: caller passes an occupied key
        let node = unsafe { storage.get_unchecked_mut(key) };
        node.prev = self.tail;
        node.next = K::NONE;

        if self.tail.is_some() {
            // Safety: tail is occupied when is_some()
            unsafe { storage.get_unchecked_mut(self.tail) }.next = key;
        } else {
            self.head = key;
        }

        self.tail = key;
        self.len += 1;
    }

    /// Unlinks a node by relinking its neighbours.
    ///
    /// The node must currently be in this ring. It stays in storage.
    #[inline]
    pub(crate) fn unlink<T, S>(&mut self, storage: &mut S, key: K)
    where
        S: Storage<Node<T, K>, Key = K>,
    {
        // Safety: caller passes a linked, hence occupied, key
        let node = unsafe { storage.get_unchecked_mut(key) };
        let prev = node.prev;
        let next = node.next;
        node.prev = K::NONE;
        node.next = K::NONE;

        if prev.is_some() {
            // Safety: ring neighbours are occupied
            unsafe { storage.get_unchecked_mut(prev) }.next = next;
        } else {
            self.head = next;
        }

        if next.is_some() {
            // Safety: ring neighbours are occupied
            unsafe { storage.get_unchecked_mut(next) }.prev = prev;
        } else {
            self.tail = prev;
        }

        self.len -= 1;
    }

    /// Node after position `pos`, or `NONE` if that is the sentinel.
    #[inline]
    pub(crate) fn successor<T, S>(&self, storage: &S, pos: K) -> K
    where
        S: Storage<Node<T, K>, Key = K>,
    {
        if pos.is_none() {
            self.head
        } else {
            // Safety: positions are linked nodes
            unsafe { storage.get_unchecked(pos) }.next
        }
    }

    /// Node before position `pos`, or `NONE` if that is the sentinel.
    #[inline]
    pub(crate) fn predecessor<T, S>(&self, storage: &S, pos: K) -> K
    where
        S: Storage<Node<T, K>, Key = K>,
    {
        if pos.is_none() {
            self.tail
        } else {
            // Safety: positions are linked nodes
            unsafe { storage.get_unchecked(pos) }.prev
        }
    }

    /// Resets to the empty ring without touching storage.
    #[inline]
    pub(crate) fn clear(&mut self) {
        self.head = K::NONE;
        self.tail = K::NONE;
        self.len = 0;
    }

    /// Iterates keys from the sentinel's successor round to its predecessor.
    #[inline]
    pub(crate) fn keys<'a, T, S>(&self, storage: &'a S) -> Keys<'a, T, S, K>
    where
        S: Storage<Node<T, K>, Key = K>,
    {
        Keys {
            storage,
            current: self.head,
            remaining: self.len,
            _marker: core::marker::PhantomData,
        }
    }
}

/// Iterator over ring keys in traversal order.
pub(crate) struct Keys<'a, T, S, K: Key> {
    storage: &'a S,
    current: K,
    remaining: usize,
    _marker: core::marker::PhantomData<T>,
}

impl<'a, T, S, K: Key> Iterator for Keys<'a, T, S, K>
where
    S: Storage<Node<T, K>, Key = K>,
{
    type Item = K;

    #[inline]
    fn next(&mut self) -> Option<K> {
        let key = self.current.into_option()?;
        // Safety: ring keys are occupied
        self.current = unsafe { self.storage.get_unchecked(key) }.next;
        self.remaining -= 1;
        Some(key)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T, S, K: Key> ExactSizeIterator for Keys<'_, T, S, K> where S: Storage<Node<T, K>, Key = K> {}
