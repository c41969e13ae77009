//! Storage trait for slab-like arenas with stable keys.
//!
//! Storage owns every node of a queue. The heap index and the enumeration
//! ring only ever hold keys into it, so a node is created and destroyed in
//! exactly one place.

use crate::Key;

/// Slab-like storage with stable keys.
///
/// # Requirements
///
/// Implementations must provide:
/// - **Stable keys**: a key remains valid until explicitly removed
/// - **O(1)** insert, remove, get operations
/// - **Slot reuse**: removed slots may be reused by future inserts
///
/// The key returned for a live value must never equal [`Key::NONE`].
pub trait Storage<T> {
    /// Key type for this storage.
    type Key: Key;

    /// Returns the number of occupied slots.
    fn len(&self) -> usize;

    /// Returns `true` if no slots are occupied.
    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Removes and returns the value at `key`, if present.
    fn remove(&mut self, key: Self::Key) -> Option<T>;

    /// Returns a reference to the value at `key`, if present.
    fn get(&self, key: Self::Key) -> Option<&T>;

    /// Drops every stored value.
    fn clear(&mut self);

    /// Returns a reference without checking occupancy.
    ///
    /// # Safety
    ///
    /// `key` must be valid and occupied.
    unsafe fn get_unchecked(&self, key: Self::Key) -> &T;

    /// Returns a mutable reference without checking occupancy.
    ///
    /// # Safety
    ///
    /// `key` must be valid and occupied.
    unsafe fn get_unchecked_mut(&mut self, key: Self::Key) -> &mut T;

    /// Removes a value without checking occupancy.
    ///
    /// # Safety
    ///
    /// `key` must be valid and occupied.
    unsafe fn remove_unchecked(&mut self, key: Self::Key) -> T;
}

/// Growable storage: insertion always succeeds.
pub trait UnboundedStorage<T>: Storage<T> {
    /// Creates empty storage with room for at least `capacity` values.
    fn with_capacity(capacity: usize) -> Self
    where
        Self: Sized;

    /// Inserts a value, returning its stable key.
    fn insert(&mut self, value: T) -> Self::Key;
}

// =============================================================================
// slab::Slab implementation
// =============================================================================

impl<T> Storage<T> for slab::Slab<T> {
    type Key = usize;

    #[inline]
    fn len(&self) -> usize {
        self.len()
    }

    #[inline]
    fn remove(&mut self, key: Self::Key) -> Option<T> {
        self.try_remove(key)
    }

    #[inline]
    fn get(&self, key: Self::Key) -> Option<&T> {
        self.get(key)
    }

    #[inline]
    fn clear(&mut self) {
        self.clear();
    }

    #[inline]
    unsafe fn get_unchecked(&self, key: Self::Key) -> &T {
        unsafe { self.get_unchecked(key) }
    }

    #[inline]
    unsafe fn get_unchecked_mut(&mut self, key: Self::Key) -> &mut T {
        unsafe { self.get_unchecked_mut(key) }
    }

    #[inline]
    unsafe fn remove_unchecked(&mut self, key: Self::Key) -> T {
        // slab checks occupancy itself
        self.remove(key)
    }
}

impl<T> UnboundedStorage<T> for slab::Slab<T> {
    #[inline]
    fn with_capacity(capacity: usize) -> Self {
        slab::Slab::with_capacity(capacity)
    }

    #[inline]
    fn insert(&mut self, value: T) -> Self::Key {
        self.insert(value)
    }
}
