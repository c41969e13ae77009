//! Indexed priority queue with stable enumeration and cursor removal.
//!
//! A [`PriorityQueue`] is a binary min-heap whose elements can also be
//! walked, and removed, in a stable order independent of priority.
//!
//! # Design
//!
//! Each element is one node in arena storage. Two structures coordinate
//! keys into that arena without owning any data:
//!
//! ```text
//! Storage (Slab)   - owns nodes, provides stable keys
//! HeapIndex        - 1-based key array in heap order, O(log n) push/pop
//! Ring             - doubly linked key ring around a sentinel, O(1) unlink
//! ```
//!
//! Each node records its own heap slot, so removing an arbitrary element
//! (by key or through a [`Cursor`]) is a ring unlink plus one heap repair.
//! Slot 0 of the heap index is a placeholder; the parent of slot `i` is
//! `i / 2`.
//!
//! # Quick Start
//!
//! ```
//! use ring_heap::PriorityQueue;
//!
//! let mut queue = PriorityQueue::new();
//! let key = queue.push(30);
//! queue.push(10);
//! queue.push(20);
//!
//! // O(log n) removal from anywhere
//! assert_eq!(queue.remove(key), Some(30));
//!
//! assert_eq!(queue.pop(), Ok(10));
//! assert_eq!(queue.pop(), Ok(20));
//! assert!(queue.is_empty());
//! ```
//!
//! # Ordering
//!
//! Order comes from a [`Comparator`] value held by the queue. [`Less`]
//! (smallest first) is the default, [`Greater`] reverses it, and any
//! `Fn(&T, &T) -> bool` closure works too.
//!
//! ```
//! use ring_heap::{Greater, PriorityQueue};
//!
//! let mut queue = PriorityQueue::from_sequence_by(&[2, 9, 4], Greater::new());
//! assert_eq!(queue.pop(), Ok(9));
//! ```
//!
//! # Enumeration
//!
//! [`PriorityQueue::iter`] and [`PriorityQueue::cursor`] visit each element
//! exactly once in ring order: newest push first, or source order after a
//! bulk build. A cursor can remove the element it just returned and keep
//! going.
//!
//! # Storage
//!
//! ```text
//! Storage<T>           - base trait: get, remove, len, clear
//!     │
//!     └── UnboundedStorage<T> - growable, insert -> Key (infallible)
//! ```
//!
//! `slab::Slab` is the default backend. Any other arena that implements
//! [`UnboundedStorage`] can be plugged in through
//! [`PriorityQueue::with_storage`].
//!
//! # Logging
//!
//! Emits through the [`log`](https://docs.rs/log) facade: `trace` when the
//! heap index grows, `debug` on bulk build and on `clear`. Nothing is
//! logged on push, pop or remove.

#![warn(missing_docs)]

pub mod compare;
pub mod cursor;
pub mod error;
pub mod iter;
pub mod key;
pub mod node;
pub mod queue;
pub mod sequence;
pub mod storage;

mod heap;
mod ring;

pub use compare::{Comparator, Greater, Less};
pub use cursor::Cursor;
pub use error::Error;
pub use iter::{DrainWhile, Iter};
pub use key::Key;
pub use node::Node;
pub use queue::{PriorityQueue, SlabQueueStorage};
pub use sequence::Sequence;
pub use storage::{Storage, UnboundedStorage};
