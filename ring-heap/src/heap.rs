//! Heap index: a 1-based binary min-heap of storage keys.
//!
//! Slot 0 is a placeholder so that the parent of slot `i` is `i / 2` and its
//! children are `2i` and `2i + 1`. Every node records the slot it occupies
//! (`heap_pos`), which is what makes removal of an arbitrary node
//! `O(log n)`: the caller looks the slot up on the node instead of
//! searching for it.
//!
//! # Invariants
//!
//! - **Heap order**: for every slot `i` in `2..=len`, the comparator never
//!   reports `node[i]` as less than `node[i / 2]`.
//! - **Index consistency**: every key's node has `heap_pos` equal to the
//!   slot holding the key.
//!
//! Both hold on return from every `pub(crate)` method except `append` and
//! `detach`, which defer heap order to a later `sift_up`, `repair` or
//! `heapify`.
//!
//! Sifting never compares while a key is duplicated or missing. If the
//! comparator panics, index consistency still holds and only heap order
//! may be lost.

use core::marker::PhantomData;

use crate::node::Node;
use crate::{Comparator, Key, Storage};

/// Smallest non-zero capacity; matches the initial array size.
pub(crate) const MIN_CAPACITY: usize = 4;

#[derive(Debug, Clone)]
pub(crate) struct HeapIndex<K: Key> {
    /// Heap-ordered storage keys; `slots[0]` is always `K::NONE`.
    slots: Vec<K>,
    /// Usable slots before the next doubling. Always `>= len`.
    capacity: usize,
}

impl<K: Key> HeapIndex<K> {
    /// Creates an index with room for at least `capacity` keys.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(MIN_CAPACITY).next_power_of_two();
        let mut slots = Vec::with_capacity(capacity + 1);
        slots.push(K::NONE);
        Self { slots, capacity }
    }

    /// Number of keys in the heap.
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.slots.len() - 1
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub(crate) fn capacity(&self) -> usize {
        self.capacity
    }

    /// Key at 1-based `pos`.
    #[cfg(test)]
    pub(crate) fn key_at(&self, pos: usize) -> K {
        debug_assert!(pos >= 1 && pos <= self.len(), "heap slot out of range");
        self.slots[pos]
    }

    /// Key of the minimum, or `None` if empty.
    #[inline]
    pub(crate) fn peek(&self) -> Option<K> {
        self.slots.get(1).copied()
    }

    /// Doubles the capacity if the next append would overflow it.
    pub(crate) fn reserve(&mut self) {
        if self.len() < self.capacity {
            return;
        }

        let grown = self.capacity * 2;
        self.slots.reserve_exact(grown + 1 - self.slots.len());
        log::trace!("heap index grown from {} to {} slots", self.capacity, grown);
        self.capacity = grown;
    }

    /// Appends `key` at slot `len + 1` without restoring heap order.
    ///
    /// The node must already carry `heap_pos == len + 1`.
    #[inline]
    pub(crate) fn append(&mut self, key: K) {
        self.reserve();
        self.slots.push(key);
    }

    /// Forgets every key. Capacity is kept.
    pub(crate) fn clear(&mut self) {
        self.slots.truncate(1);
    }

    /// Restores heap order over the whole index in `O(n)`.
    pub(crate) fn heapify<T, S, C>(&mut self, storage: &mut S, cmp: &C)
    where
        S: Storage<Node<T, K>, Key = K>,
        C: Comparator<T>,
    {
        for pos in (1..=self.len() / 2).rev() {
            self.sift_down(storage, cmp, pos);
        }
    }

    /// Removes the key at `pos` from the index without comparing anything.
    ///
    /// The node itself stays in storage. If `pos` was not the last slot, the
    /// last key fills it and `true` is returned; the caller must then
    /// [`repair`](Self::repair) `pos`.
    pub(crate) fn detach<T, S>(&mut self, storage: &mut S, pos: usize) -> bool
    where
        S: Storage<Node<T, K>, Key = K>,
    {
        let last = self.len();
        debug_assert!(pos >= 1 && pos <= last, "heap slot out of range");

        let moved = self.slots[last];
        self.slots.truncate(last);
        if pos == last {
            return false;
        }

        self.place(storage, moved, pos);
        true
    }

    /// Restores heap order around a key that was just written into `pos`.
    pub(crate) fn repair<T, S, C>(&mut self, storage: &mut S, cmp: &C, pos: usize)
    where
        S: Storage<Node<T, K>, Key = K>,
        C: Comparator<T>,
    {
        // At most one of these moves anything
        self.sift_up(storage, cmp, pos);
        self.sift_down(storage, cmp, pos);
    }

    /// Moves the key at `pos` towards the root while it is less than its parent.
    pub(crate) fn sift_up<T, S, C>(&mut self, storage: &mut S, cmp: &C, pos: usize)
    where
        S: Storage<Node<T, K>, Key = K>,
        C: Comparator<T>,
    {
        let mut hole = Hole::<T, S, K>::new(&mut self.slots, storage, pos);

        while hole.pos() > 1 {
            let parent = hole.pos() / 2;
            if !hole.less(cmp, hole.key(), hole.key_at(parent)) {
                break;
            }
            hole.move_to(parent);
        }
    }

    /// Moves the key at `pos` towards the leaves while a child is less than it.
    ///
    /// The right child is chosen only when it is strictly less than the left.
    pub(crate) fn sift_down<T, S, C>(&mut self, storage: &mut S, cmp: &C, pos: usize)
    where
        S: Storage<Node<T, K>, Key = K>,
        C: Comparator<T>,
    {
        let len = self.len();
        let mut hole = Hole::<T, S, K>::new(&mut self.slots, storage, pos);

        loop {
            let left = 2 * hole.pos();
            if left > len {
                break;
            }

            let right = left + 1;
            let mut child = left;
            if right <= len && hole.less(cmp, hole.key_at(right), hole.key_at(left)) {
                child = right;
            }

            if !hole.less(cmp, hole.key_at(child), hole.key()) {
                break;
            }
            hole.move_to(child);
        }
    }

    /// Iterates keys in slot order, `1..=len`.
    #[cfg(test)]
    pub(crate) fn keys(&self) -> impl ExactSizeIterator<Item = K> + '_ {
        self.slots[1..].iter().copied()
    }

    /// Writes `key` into `pos` and records the slot on its node.
    #[inline]
    fn place<T, S>(&mut self, storage: &mut S, key: K, pos: usize)
    where
        S: Storage<Node<T, K>, Key = K>,
    {
        self.slots[pos] = key;
        // Safety: every key held by the index is occupied in storage
        unsafe { storage.get_unchecked_mut(key) }.heap_pos = pos;
    }

    /// Panics unless every key sits in the slot its node records.
    #[cfg(test)]
    pub(crate) fn assert_consistent<T, S>(&self, storage: &S)
    where
        S: Storage<Node<T, K>, Key = K>,
    {
        assert!(self.capacity >= self.len(), "capacity below count");
        assert!(self.slots[0].is_none(), "placeholder slot overwritten");
        for pos in 1..=self.len() {
            let node = storage.get(self.slots[pos]).expect("heap key missing from storage");
            assert_eq!(node.heap_pos, pos, "heap_pos out of sync");
        }
    }

    /// Panics unless heap order and index consistency hold.
    #[cfg(test)]
    pub(crate) fn assert_valid<T, S, C>(&self, storage: &S, cmp: &C)
    where
        S: Storage<Node<T, K>, Key = K>,
        C: Comparator<T>,
    {
        self.assert_consistent(storage);
        for pos in 2..=self.len() {
            assert!(
                !less::<T, S, C, K>(storage, cmp, self.slots[pos], self.slots[pos / 2]),
                "heap order violated at slot {pos}"
            );
        }
    }
}

#[inline]
fn less<T, S, C, K>(storage: &S, cmp: &C, a: K, b: K) -> bool
where
    K: Key,
    S: Storage<Node<T, K>, Key = K>,
    C: Comparator<T>,
{
    // Safety: every key held by the index is occupied in storage
    unsafe {
        cmp.less(
            &storage.get_unchecked(a).value,
            &storage.get_unchecked(b).value,
        )
    }
}

/// A slot vacated during a sift, with its key held aside.
///
/// Each step moves one neighbour into the hole and the hole into the
/// neighbour's slot. Dropping the hole writes the held key back, so every
/// key is in exactly one slot even if the comparator unwinds mid-sift.
struct Hole<'a, T, S, K: Key>
where
    S: Storage<Node<T, K>, Key = K>,
{
    slots: &'a mut [K],
    storage: &'a mut S,
    key: K,
    pos: usize,
    _marker: PhantomData<fn() -> T>,
}

impl<'a, T, S, K: Key> Hole<'a, T, S, K>
where
    S: Storage<Node<T, K>, Key = K>,
{
    #[inline]
    fn new(slots: &'a mut [K], storage: &'a mut S, pos: usize) -> Self {
        let key = slots[pos];
        Self {
            slots,
            storage,
            key,
            pos,
            _marker: PhantomData,
        }
    }

    #[inline]
    fn pos(&self) -> usize {
        self.pos
    }

    /// The key waiting to be written back.
    #[inline]
    fn key(&self) -> K {
        self.key
    }

    #[inline]
    fn key_at(&self, pos: usize) -> K {
        debug_assert!(pos != self.pos, "hole slot has no key");
        self.slots[pos]
    }

    #[inline]
    fn less<C: Comparator<T>>(&self, cmp: &C, a: K, b: K) -> bool {
        less::<T, S, C, K>(&*self.storage, cmp, a, b)
    }

    /// Moves the key at `to` into the hole; the hole moves to `to`.
    #[inline]
    fn move_to(&mut self, to: usize) {
        let moved = self.slots[to];
        self.slots[self.pos] = moved;
        // Safety: every key held by the index is occupied in storage
        unsafe { self.storage.get_unchecked_mut(moved) }.heap_pos = self.pos;
        self.pos = to;
    }
}

impl<T, S, K: Key> Drop for Hole<'_, T, S, K>
where
    S: Storage<Node<T, K>, Key = K>,
{
    fn drop(&mut self) {
        self.slots[self.pos] = self.key;
        // Safety: the held key came from the index, so it is occupied
        unsafe { self.storage.get_unchecked_mut(self.key) }.heap_pos = self.pos;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Greater, Less};
    use slab::Slab;

    type TestStorage = Slab<Node<u32>>;

    fn push<C: Comparator<u32>>(
        heap: &mut HeapIndex<usize>,
        storage: &mut TestStorage,
        cmp: &C,
        value: u32,
    ) -> usize {
        let key = storage.insert(Node::new(value, heap.len() + 1));
        heap.append(key);
        heap.sift_up(storage, cmp, heap.len());
        key
    }

    fn delete_at<C: Comparator<u32>>(
        heap: &mut HeapIndex<usize>,
        storage: &mut TestStorage,
        cmp: &C,
        pos: usize,
    ) {
        if heap.detach(storage, pos) {
            heap.repair(storage, cmp, pos);
        }
    }

    fn pop<C: Comparator<u32>>(
        heap: &mut HeapIndex<usize>,
        storage: &mut TestStorage,
        cmp: &C,
    ) -> Option<u32> {
        let key = heap.peek()?;
        delete_at(heap, storage, cmp, 1);
        Some(storage.remove(key).value)
    }

    #[test]
    fn new_is_empty() {
        let heap: HeapIndex<usize> = HeapIndex::with_capacity(0);
        assert!(heap.is_empty());
        assert_eq!(heap.len(), 0);
        assert_eq!(heap.capacity(), MIN_CAPACITY);
        assert!(heap.peek().is_none());
    }

    #[test]
    fn capacity_rounds_to_power_of_two() {
        let heap: HeapIndex<usize> = HeapIndex::with_capacity(100);
        assert_eq!(heap.capacity(), 128);
    }

    #[test]
    fn capacity_doubles_when_full() {
        let mut storage = TestStorage::with_capacity(16);
        let mut heap = HeapIndex::with_capacity(4);
        let cmp = Less::new();

        for i in 0..4 {
            push(&mut heap, &mut storage, &cmp, i);
        }
        assert_eq!(heap.capacity(), 4);

        push(&mut heap, &mut storage, &cmp, 4);
        assert_eq!(heap.capacity(), 8);

        for i in 5..9 {
            push(&mut heap, &mut storage, &cmp, i);
        }
        assert_eq!(heap.capacity(), 16);
        heap.assert_valid(&storage, &cmp);
    }

    #[test]
    fn min_heap_order() {
        let mut storage = TestStorage::with_capacity(16);
        let mut heap = HeapIndex::with_capacity(16);
        let cmp = Less::new();

        for v in [10, 1, 5, 3] {
            push(&mut heap, &mut storage, &cmp, v);
            heap.assert_valid(&storage, &cmp);
        }

        assert_eq!(pop(&mut heap, &mut storage, &cmp), Some(1));
        assert_eq!(pop(&mut heap, &mut storage, &cmp), Some(3));
        assert_eq!(pop(&mut heap, &mut storage, &cmp), Some(5));
        assert_eq!(pop(&mut heap, &mut storage, &cmp), Some(10));
        assert_eq!(pop(&mut heap, &mut storage, &cmp), None);
    }

    #[test]
    fn comparator_decides_the_root() {
        let mut storage = TestStorage::with_capacity(16);
        let mut heap = HeapIndex::with_capacity(16);
        let cmp = Greater::new();

        for v in [10, 1, 5, 3] {
            push(&mut heap, &mut storage, &cmp, v);
        }

        assert_eq!(pop(&mut heap, &mut storage, &cmp), Some(10));
        assert_eq!(pop(&mut heap, &mut storage, &cmp), Some(5));
    }

    #[test]
    fn delete_last_slot_only_shrinks() {
        let mut storage = TestStorage::with_capacity(16);
        let mut heap = HeapIndex::with_capacity(16);
        let cmp = Less::new();

        for v in [1, 2, 3] {
            push(&mut heap, &mut storage, &cmp, v);
        }
        let last = heap.key_at(3);
        delete_at(&mut heap, &mut storage, &cmp, 3);
        storage.remove(last);

        assert_eq!(heap.len(), 2);
        heap.assert_valid(&storage, &cmp);
    }

    #[test]
    fn delete_middle_sifts_replacement_up() {
        let mut storage = TestStorage::with_capacity(16);
        let mut heap = HeapIndex::with_capacity(16);
        let cmp = Less::new();

        //        1
        //     10     2
        //   11  12  3
        for v in [1, 10, 2, 11, 12, 3] {
            push(&mut heap, &mut storage, &cmp, v);
        }

        // Removing 11 moves 3 under 10, which then has to rise above it
        let victim = heap.keys().find(|&k| storage[k].value == 11).unwrap();
        let pos = storage[victim].heap_pos;
        delete_at(&mut heap, &mut storage, &cmp, pos);
        storage.remove(victim);

        heap.assert_valid(&storage, &cmp);
        let drained: Vec<_> = std::iter::from_fn(|| pop(&mut heap, &mut storage, &cmp)).collect();
        assert_eq!(drained, vec![1, 2, 3, 10, 12]);
    }

    #[test]
    fn delete_root_sifts_replacement_down() {
        let mut storage = TestStorage::with_capacity(16);
        let mut heap = HeapIndex::with_capacity(16);
        let cmp = Less::new();

        for v in [4, 8, 6, 9, 7] {
            push(&mut heap, &mut storage, &cmp, v);
        }

        assert_eq!(pop(&mut heap, &mut storage, &cmp), Some(4));
        heap.assert_valid(&storage, &cmp);
        assert_eq!(storage[heap.peek().unwrap()].value, 6);
    }

    #[test]
    fn heapify_builds_valid_heap() {
        let mut storage = TestStorage::with_capacity(32);
        let mut heap = HeapIndex::with_capacity(32);
        let cmp = Less::new();

        for (i, v) in [9u32, 4, 7, 1, 8, 2, 6, 3, 5, 0].into_iter().enumerate() {
            let key = storage.insert(Node::new(v, i + 1));
            heap.append(key);
        }
        heap.heapify(&mut storage, &cmp);
        heap.assert_valid(&storage, &cmp);

        let drained: Vec<_> = std::iter::from_fn(|| pop(&mut heap, &mut storage, &cmp)).collect();
        assert_eq!(drained, (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn ties_prefer_left_child() {
        let mut storage = TestStorage::with_capacity(16);
        let mut heap = HeapIndex::with_capacity(16);
        let cmp = |a: &u32, b: &u32| a / 10 < b / 10;

        // Equal under the comparator: 20 and 21 tie, 0 is the root
        for v in [0, 20, 21] {
            push(&mut heap, &mut storage, &cmp, v);
        }

        assert_eq!(pop(&mut heap, &mut storage, &cmp), Some(0));
        // The last slot (21) fills the root and stays, as 20 is not less
        assert_eq!(storage[heap.peek().unwrap()].value, 21);
        heap.assert_valid(&storage, &cmp);
    }

    #[test]
    fn clear_keeps_capacity() {
        let mut storage = TestStorage::with_capacity(16);
        let mut heap = HeapIndex::with_capacity(4);
        let cmp = Less::new();

        for i in 0..10 {
            push(&mut heap, &mut storage, &cmp, i);
        }
        let capacity = heap.capacity();
        heap.clear();

        assert!(heap.is_empty());
        assert_eq!(heap.capacity(), capacity);
    }

    #[test]
    fn stress_push_pop() {
        let mut storage = TestStorage::with_capacity(1024);
        let mut heap = HeapIndex::with_capacity(0);
        let cmp = Less::new();

        for i in 0..1000u32 {
            let priority = (i * 7 + 13) % 1000; // Deterministic scramble
            push(&mut heap, &mut storage, &cmp, priority);
        }
        heap.assert_valid(&storage, &cmp);

        let mut last = 0;
        while let Some(priority) = pop(&mut heap, &mut storage, &cmp) {
            assert!(priority >= last, "heap order violated");
            last = priority;
        }
        assert!(storage.is_empty());
    }

    #[test]
    fn unwinding_comparator_keeps_slots_consistent() {
        use std::cell::Cell;
        use std::panic::{AssertUnwindSafe, catch_unwind};

        let mut storage = TestStorage::with_capacity(16);
        let mut heap = HeapIndex::with_capacity(16);
        let fail_on = Cell::new(0u32);
        let calls = Cell::new(0u32);
        let cmp = |a: &u32, b: &u32| {
            calls.set(calls.get() + 1);
            if calls.get() == fail_on.get() {
                panic!("comparator failed");
            }
            a < b
        };

        // Ascending pushes never move, so slots hold 1..=10 in order
        for v in 1..=10 {
            push(&mut heap, &mut storage, &cmp, v);
        }

        // Root is replaced by 10: one move down, then the fourth call fails
        let root = heap.peek().unwrap();
        calls.set(0);
        fail_on.set(4);
        let result = catch_unwind(AssertUnwindSafe(|| {
            delete_at(&mut heap, &mut storage, &cmp, 1);
        }));
        assert!(result.is_err());
        fail_on.set(0);

        storage.remove(root);
        heap.assert_consistent(&storage);
        assert_eq!(heap.len(), 9);

        let mut values: Vec<_> = heap.keys().map(|k| storage[k].value).collect();
        values.sort_unstable();
        assert_eq!(values, (2..=10).collect::<Vec<_>>());
    }
}
