//! Removal-capable traversal of a queue's enumeration ring.

use crate::node::Node;
use crate::queue::PriorityQueue;
use crate::{Comparator, Error, Key, Storage};

/// Whether the cursor currently stands on an element it may remove.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Before the first `next`, or just after a `remove`.
    Fresh,
    /// `next` returned the element at `pos` and it is still in the queue.
    Positioned,
}

/// A cursor over a [`PriorityQueue`] that can remove the element it last
/// returned.
///
/// The cursor walks the enumeration ring, not heap order. Removing through
/// the cursor steps it back onto the removed element's predecessor, so the
/// following [`next`](Self::next) yields the element that came after the
/// removed one. Every element present when traversal starts and not removed
/// during it is visited exactly once.
///
/// The cursor borrows the queue mutably; no other access can interleave.
///
/// # Example
///
/// ```
/// use ring_heap::{Error, PriorityQueue};
///
/// let mut queue = PriorityQueue::from_sequence(&[4, 7, 2, 9]);
///
/// // Drop every odd value
/// let mut cursor = queue.cursor();
/// while cursor.has_next() {
///     if cursor.next()? % 2 == 1 {
///         cursor.remove()?;
///     }
/// }
///
/// assert_eq!(queue.into_sorted_vec(), vec![2, 4]);
/// # Ok::<(), Error>(())
/// ```
pub struct Cursor<'a, T, C, S, K: Key>
where
    S: Storage<Node<T, K>, Key = K>,
{
    queue: &'a mut PriorityQueue<T, C, S, K>,
    /// Ring position; `NONE` is the sentinel.
    pos: K,
    state: State,
}

impl<'a, T, C, S, K: Key> Cursor<'a, T, C, S, K>
where
    S: Storage<Node<T, K>, Key = K>,
{
    #[inline]
    pub(crate) fn new(queue: &'a mut PriorityQueue<T, C, S, K>) -> Self {
        Self {
            queue,
            pos: K::NONE,
            state: State::Fresh,
        }
    }

    /// Returns `true` if [`next`](Self::next) would yield an element.
    #[inline]
    pub fn has_next(&self) -> bool {
        self.queue
            .ring
            .successor(&self.queue.storage, self.pos)
            .is_some()
    }

    /// Advances to the next element in enumeration order and returns it.
    ///
    /// # Errors
    ///
    /// [`Error::ElementNotExist`] once traversal has passed the last element.
    /// The cursor does not move in that case.
    #[allow(clippy::should_implement_trait)]
    #[inline]
    pub fn next(&mut self) -> Result<&T, Error> {
        let key = self
            .queue
            .ring
            .successor(&self.queue.storage, self.pos)
            .into_option()
            .ok_or(Error::ElementNotExist)?;

        self.pos = key;
        self.state = State::Positioned;
        // Safety: ring keys are occupied
        Ok(unsafe { &self.queue.storage.get_unchecked(key).value })
    }

    /// Returns the element last returned by [`next`](Self::next), if it is
    /// still in the queue.
    #[inline]
    pub fn peek(&self) -> Option<&T> {
        match self.state {
            // Safety: Positioned means pos is occupied
            State::Positioned => Some(unsafe { &self.queue.storage.get_unchecked(self.pos).value }),
            State::Fresh => None,
        }
    }

    /// Returns the key of the element last returned by [`next`](Self::next),
    /// if it is still in the queue.
    #[inline]
    pub fn key(&self) -> Option<K> {
        match self.state {
            State::Positioned => Some(self.pos),
            State::Fresh => None,
        }
    }
}

impl<T, C, S, K: Key> Cursor<'_, T, C, S, K>
where
    S: Storage<Node<T, K>, Key = K>,
    C: Comparator<T>,
{
    /// Removes the element last returned by [`next`](Self::next) from the
    /// queue and returns it. `O(log n)`.
    ///
    /// # Errors
    ///
    /// [`Error::ElementNotExist`] if `next` has not returned an element yet,
    /// or if that element was already removed.
    #[inline]
    pub fn remove(&mut self) -> Result<T, Error> {
        if self.state != State::Positioned {
            return Err(Error::ElementNotExist);
        }

        let key = self.pos;
        self.pos = self.queue.ring.predecessor(&self.queue.storage, key);
        self.state = State::Fresh;
        Ok(self.queue.remove_node(key))
    }
}
