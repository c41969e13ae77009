//! Sentinel-carrying key type for arena slots.
//!
//! Ring links and heap slots store keys rather than pointers. A reserved
//! `NONE` value stands in for "no node", which the ring also uses to mean
//! its sentinel.

/// A copyable arena key with a sentinel "none" value.
///
/// # Example
///
/// ```
/// use ring_heap::Key;
///
/// let key: usize = 5;
/// assert!(key.is_some());
/// assert!(usize::NONE.is_none());
/// ```
pub trait Key: Copy + Eq + core::fmt::Debug {
    /// Sentinel value representing "no key".
    const NONE: Self;

    /// Returns `true` if this is the sentinel value.
    #[inline]
    fn is_none(self) -> bool {
        self == Self::NONE
    }

    /// Returns `true` if this is not the sentinel value.
    #[inline]
    fn is_some(self) -> bool {
        !self.is_none()
    }

    /// Converts the sentinel into `None`.
    #[inline]
    fn into_option(self) -> Option<Self> {
        if self.is_none() { None } else { Some(self) }
    }
}

macro_rules! impl_key_for_unsigned {
    ($($ty:ty),*) => {
        $(
            impl Key for $ty {
                const NONE: Self = <$ty>::MAX;
            }
        )*
    };
}

impl_key_for_unsigned!(u16, u32, u64, usize);

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! test_key_sentinel {
        ($($ty:ty => $name:ident),*) => {
            $(
                #[test]
                fn $name() {
                    assert!(<$ty>::NONE.is_none());
                    assert!(!<$ty>::NONE.is_some());
                    assert!((0 as $ty).is_some());
                    assert!((<$ty>::MAX - 1).is_some());
                }
            )*
        };
    }

    test_key_sentinel!(
        u16 => u16_sentinel,
        u32 => u32_sentinel,
        u64 => u64_sentinel,
        usize => usize_sentinel
    );

    #[test]
    fn get_maps_sentinel_to_none() {
        assert_eq!(usize::NONE.into_option(), None);
        assert_eq!(7usize.into_option(), Some(7));
    }
}
