//! Comparators supplying the queue's ordering.
//!
//! A comparator is a value carried by the queue rather than a property of
//! the element type, so the same element type can be queued under different
//! orders. [`Less`] is the default and delegates to [`PartialOrd`].

use core::fmt;
use core::marker::PhantomData;

/// A strict weak order over `T`.
///
/// `less(a, b)` answers "must `a` leave the queue before `b`?". The queue
/// never asks anything else, so equal elements are ordered by their
/// position in the heap.
///
/// Closures and function pointers of shape `Fn(&T, &T) -> bool` are
/// comparators:
///
/// ```
/// use ring_heap::PriorityQueue;
///
/// // Longest string first
/// let mut queue = PriorityQueue::with_comparator(|a: &String, b: &String| a.len() > b.len());
/// queue.push("ab".to_string());
/// queue.push("abcd".to_string());
/// queue.push("a".to_string());
/// assert_eq!(queue.front().unwrap(), "abcd");
/// ```
pub trait Comparator<T: ?Sized> {
    /// Returns `true` if `a` sorts strictly before `b`.
    fn less(&self, a: &T, b: &T) -> bool;
}

impl<T: ?Sized, F> Comparator<T> for F
where
    F: Fn(&T, &T) -> bool,
{
    #[inline]
    fn less(&self, a: &T, b: &T) -> bool {
        self(a, b)
    }
}

/// Natural ascending order: the smallest element is at the front.
pub struct Less<T: ?Sized>(PhantomData<fn(&T)>);

/// Natural descending order: the largest element is at the front.
pub struct Greater<T: ?Sized>(PhantomData<fn(&T)>);

macro_rules! natural_order {
    ($name:ident, $op:tt) => {
        impl<T: ?Sized> $name<T> {
            /// Creates the comparator.
            #[inline]
            pub const fn new() -> Self {
                Self(PhantomData)
            }
        }

        impl<T: ?Sized> Default for $name<T> {
            fn default() -> Self {
                Self::new()
            }
        }

        impl<T: ?Sized> Clone for $name<T> {
            fn clone(&self) -> Self {
                *self
            }
        }

        impl<T: ?Sized> Copy for $name<T> {}

        impl<T: ?Sized> fmt::Debug for $name<T> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(stringify!($name))
            }
        }

        impl<T: ?Sized + PartialOrd> Comparator<T> for $name<T> {
            #[inline]
            fn less(&self, a: &T, b: &T) -> bool {
                a $op b
            }
        }
    };
}

natural_order!(Less, <);
natural_order!(Greater, >);
