//! Indexed priority queue over arena storage.
//!
//! Every element lives in one storage node that is threaded through two
//! structures at once:
//!
//! ```text
//! Storage (Slab)   - owns nodes: value, heap_pos, prev, next
//! HeapIndex        - 1-based array of keys in heap order    -> front / pop
//! Ring             - doubly linked ring of keys + sentinel  -> enumeration
//! ```
//!
//! Removing any element is a ring unlink (`O(1)`) followed by a heap repair
//! at the slot the node records (`O(log n)`). `pop`, [`PriorityQueue::remove`]
//! and [`Cursor::remove`](crate::Cursor::remove) all go through that one
//! primitive, so the two structures cannot drift apart.
//!
//! # Example
//!
//! ```
//! use ring_heap::{Error, PriorityQueue};
//!
//! let mut queue = PriorityQueue::new();
//! queue.push(5);
//! queue.push(3);
//! queue.push(8);
//! queue.push(1);
//!
//! assert_eq!(queue.front(), Ok(&1));
//! assert_eq!(queue.pop(), Ok(1));
//! assert_eq!(queue.pop(), Ok(3));
//! assert_eq!(queue.pop(), Ok(5));
//! assert_eq!(queue.pop(), Ok(8));
//! assert_eq!(queue.pop(), Err(Error::EmptyCollection));
//! ```

use core::fmt;
use core::marker::PhantomData;

use slab::Slab;

use crate::cursor::Cursor;
use crate::heap::HeapIndex;
use crate::iter::{DrainWhile, Iter};
use crate::node::Node;
use crate::ring::Ring;
use crate::{Comparator, Error, Key, Less, Sequence, Storage, UnboundedStorage};

/// Default storage: a growable slab keyed by `usize`.
pub type SlabQueueStorage<T> = Slab<Node<T, usize>>;

/// A binary min-heap with stable enumeration and arbitrary removal.
///
/// # Type Parameters
///
/// - `T`: Element type
/// - `C`: Comparator (default [`Less<T>`], smallest first)
/// - `S`: Storage type (default [`SlabQueueStorage<T>`])
/// - `K`: Key type of the storage (default `usize`)
///
/// # Enumeration order
///
/// [`iter`](Self::iter) and [`cursor`](Self::cursor) visit every element
/// exactly once. After pushes the most recently pushed element comes first.
/// After bulk construction the order is the source sequence's order. The
/// order never tracks heap order.
///
/// # Keys
///
/// [`push`](Self::push) returns the element's storage key, which stays valid
/// until that element leaves the queue. Storage reuses freed slots, so a key
/// kept past its element's removal may later name a different element.
pub struct PriorityQueue<T, C = Less<T>, S = SlabQueueStorage<T>, K: Key = usize> {
    pub(crate) storage: S,
    pub(crate) heap: HeapIndex<K>,
    pub(crate) ring: Ring<K>,
    pub(crate) cmp: C,
    _marker: PhantomData<T>,
}

// =============================================================================
// Default storage and comparator
// =============================================================================

impl<T> PriorityQueue<T> {
    /// Creates an empty queue ordered smallest first.
    #[inline]
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty queue with room for at least `capacity` elements.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_storage(capacity, Less::new())
    }
}

impl<T: Clone + PartialOrd> PriorityQueue<T> {
    /// Builds a queue from a sequence in `O(n)`, cloning each element once.
    ///
    /// Enumeration order is the sequence order.
    ///
    /// ```
    /// use ring_heap::PriorityQueue;
    ///
    /// let mut queue = PriorityQueue::from_sequence(&[4, 1, 3]);
    /// assert_eq!(queue.iter().copied().collect::<Vec<_>>(), vec![4, 1, 3]);
    /// assert_eq!(queue.pop(), Ok(1));
    /// ```
    pub fn from_sequence<Q>(seq: &Q) -> Self
    where
        Q: Sequence<T> + ?Sized,
    {
        Self::from_sequence_with(seq, Less::new())
    }
}

impl<T, C> PriorityQueue<T, C> {
    /// Creates an empty queue ordered by `cmp`.
    #[inline]
    pub fn with_comparator(cmp: C) -> Self {
        Self::with_storage(0, cmp)
    }

    /// Creates an empty queue ordered by `cmp` with room for `capacity` elements.
    #[inline]
    pub fn with_capacity_and_comparator(capacity: usize, cmp: C) -> Self {
        Self::with_storage(capacity, cmp)
    }
}

impl<T: Clone, C: Comparator<T>> PriorityQueue<T, C> {
    /// Builds a queue ordered by `cmp` from a sequence in `O(n)`.
    #[inline]
    pub fn from_sequence_by<Q>(seq: &Q, cmp: C) -> Self
    where
        Q: Sequence<T> + ?Sized,
    {
        Self::from_sequence_with(seq, cmp)
    }
}

// =============================================================================
// Growable storage: construction and insertion
// =============================================================================

impl<T, C, S, K: Key> PriorityQueue<T, C, S, K>
where
    S: UnboundedStorage<Node<T, K>, Key = K>,
{
    /// Creates an empty queue over a fresh `S`.
    ///
    /// Use this to pick a storage backend other than the default slab.
    pub fn with_storage(capacity: usize, cmp: C) -> Self {
        Self {
            storage: S::with_capacity(capacity),
            heap: HeapIndex::with_capacity(capacity),
            ring: Ring::new(),
            cmp,
            _marker: PhantomData,
        }
    }

    /// Builds a queue over a fresh `S` from a sequence in `O(n)`.
    pub fn from_sequence_with<Q>(seq: &Q, cmp: C) -> Self
    where
        T: Clone,
        C: Comparator<T>,
        Q: Sequence<T> + ?Sized,
    {
        let len = seq.size();
        Self::bulk_build(len, (0..len).map(|i| seq.get(i).clone()), cmp)
    }

    /// Builds a queue over a fresh `S` from a vector in `O(n)`.
    pub fn from_vec_with(values: Vec<T>, cmp: C) -> Self
    where
        C: Comparator<T>,
    {
        Self::bulk_build(values.len(), values.into_iter(), cmp)
    }

    /// Adds a value and returns its key. `O(log n)`.
    ///
    /// The new element is the first one a fresh enumeration produces.
    pub fn push(&mut self, value: T) -> K
    where
        C: Comparator<T>,
    {
        let pos = self.heap.len() + 1;
        let key = self.storage.insert(Node::new(value, pos));
        self.heap.append(key);
        self.ring.link_front(&mut self.storage, key);
        self.heap.sift_up(&mut self.storage, &self.cmp, pos);
        key
    }

    /// Slots are assigned in input order and the ring follows the same
    /// order; one bottom-up pass then establishes heap order.
    fn bulk_build<I>(len: usize, values: I, cmp: C) -> Self
    where
        C: Comparator<T>,
        I: Iterator<Item = T>,
    {
        let mut queue = Self::with_storage(len, cmp);

        for (i, value) in values.enumerate() {
            let key = queue.storage.insert(Node::new(value, i + 1));
            queue.heap.append(key);
            queue.ring.link_back(&mut queue.storage, key);
        }
        queue.heap.heapify(&mut queue.storage, &queue.cmp);

        log::debug!("bulk-built queue of {} elements", queue.len());
        queue
    }
}

// =============================================================================
// Any storage: access and removal
// =============================================================================

impl<T, C, S, K: Key> PriorityQueue<T, C, S, K>
where
    S: Storage<Node<T, K>, Key = K>,
{
    /// Returns the number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Returns `true` if the queue holds no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Returns the number of elements the heap index holds before it
    /// next doubles.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.heap.capacity()
    }

    /// Returns the comparator.
    #[inline]
    pub fn comparator(&self) -> &C {
        &self.cmp
    }

    /// Returns the least element.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyCollection`] if the queue is empty.
    #[inline]
    pub fn front(&self) -> Result<&T, Error> {
        let key = self.heap.peek().ok_or(Error::EmptyCollection)?;
        // Safety: keys in the heap index are occupied
        Ok(unsafe { &self.storage.get_unchecked(key).value })
    }

    /// Removes and returns the least element. `O(log n)`.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyCollection`] if the queue is empty.
    #[inline]
    pub fn pop(&mut self) -> Result<T, Error>
    where
        C: Comparator<T>,
    {
        let key = self.heap.peek().ok_or(Error::EmptyCollection)?;
        Ok(self.remove_node(key))
    }

    /// Removes and returns the element at `key`. `O(log n)`.
    ///
    /// Returns `None` if `key` names no element of this queue.
    #[inline]
    pub fn remove(&mut self, key: K) -> Option<T>
    where
        C: Comparator<T>,
    {
        self.storage.get(key)?;
        Some(self.remove_node(key))
    }

    /// Returns the element at `key`.
    #[inline]
    pub fn get(&self, key: K) -> Option<&T> {
        self.storage.get(key).map(Node::value)
    }

    /// Returns `true` if `key` names an element of this queue.
    #[inline]
    pub fn contains(&self, key: K) -> bool {
        self.storage.get(key).is_some()
    }

    /// Removes every element. `O(n)`; capacity is kept.
    pub fn clear(&mut self) {
        let destroyed = self.len();
        self.ring.clear();
        self.heap.clear();
        self.storage.clear();
        log::debug!("cleared queue, destroyed {} elements", destroyed);
    }

    /// Returns a cursor over the elements that can remove what it visits.
    ///
    /// ```
    /// use ring_heap::PriorityQueue;
    ///
    /// let mut queue = PriorityQueue::new();
    /// for v in [10, 20, 5, 15] {
    ///     queue.push(v);
    /// }
    ///
    /// let mut cursor = queue.cursor();
    /// assert_eq!(cursor.next(), Ok(&15)); // most recent push comes first
    /// assert_eq!(cursor.remove(), Ok(15));
    ///
    /// assert_eq!(queue.front(), Ok(&5));
    /// assert_eq!(queue.len(), 3);
    /// ```
    #[inline]
    pub fn cursor(&mut self) -> Cursor<'_, T, C, S, K> {
        Cursor::new(self)
    }

    /// Returns an iterator over the elements in enumeration order.
    #[inline]
    pub fn iter(&self) -> Iter<'_, T, S, K> {
        Iter::new(&self.storage, self.ring.head(), self.ring.len())
    }

    /// Pops elements in comparator order while `pred` accepts the front.
    ///
    /// ```
    /// use ring_heap::PriorityQueue;
    ///
    /// let mut queue: PriorityQueue<u64> = [1, 5, 3, 7].into_iter().collect();
    /// let removed: Vec<_> = queue.drain_while(|&x| x < 4).collect();
    /// assert_eq!(removed, vec![1, 3]);
    /// assert_eq!(queue.front(), Ok(&5));
    /// ```
    #[inline]
    pub fn drain_while<F>(&mut self, pred: F) -> DrainWhile<'_, T, C, S, K, F>
    where
        C: Comparator<T>,
        F: FnMut(&T) -> bool,
    {
        DrainWhile::new(self, pred)
    }

    /// Consumes the queue, returning its elements in comparator order.
    pub fn into_sorted_vec(mut self) -> Vec<T>
    where
        C: Comparator<T>,
    {
        let mut sorted = Vec::with_capacity(self.len());
        while let Ok(value) = self.pop() {
            sorted.push(value);
        }
        sorted
    }

    /// Removes every element for which `keep` returns `false`.
    pub fn retain<F>(&mut self, mut keep: F)
    where
        C: Comparator<T>,
        F: FnMut(&T) -> bool,
    {
        let mut cursor = self.cursor();
        while let Ok(value) = cursor.next() {
            if !keep(value) {
                let removed = cursor.remove();
                debug_assert!(removed.is_ok(), "cursor was positioned by next");
            }
        }
    }

    /// Unlinks, un-heaps and destroys the node at `key`.
    ///
    /// `key` must be occupied. The node leaves the ring, the heap index and
    /// storage before the comparator is called, so an unwinding comparator
    /// can only cost heap order, never a node.
    pub(crate) fn remove_node(&mut self, key: K) -> T
    where
        C: Comparator<T>,
    {
        self.ring.unlink(&mut self.storage, key);
        // Safety: caller passes an occupied key
        let pos = unsafe { self.storage.get_unchecked(key) }.heap_pos;
        let refilled = self.heap.detach(&mut self.storage, pos);
        // Safety: neither structure refers to key any more
        let value = unsafe { self.storage.remove_unchecked(key) }.into_value();

        if refilled {
            self.heap.repair(&mut self.storage, &self.cmp, pos);
        }
        value
    }
}

// =============================================================================
// Trait impls
// =============================================================================

impl<T, C, S, K: Key> Default for PriorityQueue<T, C, S, K>
where
    C: Default,
    S: UnboundedStorage<Node<T, K>, Key = K>,
{
    fn default() -> Self {
        Self::with_storage(0, C::default())
    }
}

impl<T, C, S, K: Key> Clone for PriorityQueue<T, C, S, K>
where
    T: Clone,
    C: Clone,
    S: UnboundedStorage<Node<T, K>, Key = K>,
{
    /// Copies every node into fresh storage.
    ///
    /// Each copy keeps its heap slot, so heap order carries over without
    /// sifting. The copies are relinked in the source's ring order.
    fn clone(&self) -> Self {
        let len = self.len();
        let mut storage = S::with_capacity(len);
        let mut ring = Ring::new();
        let mut slots = vec![K::NONE; len + 1];

        for key in self.ring.keys(&self.storage) {
            // Safety: ring keys are occupied
            let node = unsafe { self.storage.get_unchecked(key) };
            let copy = storage.insert(Node::new(node.value.clone(), node.heap_pos));
            ring.link_back(&mut storage, copy);
            slots[node.heap_pos] = copy;
        }

        let mut heap = HeapIndex::with_capacity(self.heap.capacity());
        for &key in &slots[1..] {
            heap.append(key);
        }

        Self {
            storage,
            heap,
            ring,
            cmp: self.cmp.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T, C, S, K: Key> fmt::Debug for PriorityQueue<T, C, S, K>
where
    T: fmt::Debug,
    S: Storage<Node<T, K>, Key = K>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T, C, S, K: Key> From<Vec<T>> for PriorityQueue<T, C, S, K>
where
    C: Comparator<T> + Default,
    S: UnboundedStorage<Node<T, K>, Key = K>,
{
    /// Builds the queue in `O(n)`; enumeration follows the vector's order.
    fn from(values: Vec<T>) -> Self {
        Self::from_vec_with(values, C::default())
    }
}

impl<T, C, S, K: Key, const N: usize> From<[T; N]> for PriorityQueue<T, C, S, K>
where
    C: Comparator<T> + Default,
    S: UnboundedStorage<Node<T, K>, Key = K>,
{
    fn from(values: [T; N]) -> Self {
        Self::bulk_build(N, values.into_iter(), C::default())
    }
}

impl<T, C, S, K: Key> FromIterator<T> for PriorityQueue<T, C, S, K>
where
    C: Comparator<T> + Default,
    S: UnboundedStorage<Node<T, K>, Key = K>,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<Vec<_>>())
    }
}

impl<T, C, S, K: Key> Extend<T> for PriorityQueue<T, C, S, K>
where
    C: Comparator<T>,
    S: UnboundedStorage<Node<T, K>, Key = K>,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push(value);
        }
    }
}

impl<'a, T, C, S, K: Key> IntoIterator for &'a PriorityQueue<T, C, S, K>
where
    S: Storage<Node<T, K>, Key = K>,
{
    type Item = &'a T;
    type IntoIter = Iter<'a, T, S, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
