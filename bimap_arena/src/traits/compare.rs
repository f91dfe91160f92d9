/// A strict-less-than predicate over `T`.
///
/// Implementations must be a strict weak ordering (irreflexive, transitive,
/// and with transitive incomparability) that is stable for the lifetime of
/// the values in a `BiMap`. Two values are considered equivalent when neither
/// is less than the other.
///
/// Closures of the form `Fn(&T, &T) -> bool` implement this directly.
///
/// ```
/// use bimap_arena::{ptr_struct, BiMap};
///
/// ptr_struct!(P0);
///
/// // case insensitive right side
/// let mut m: BiMap<P0, u8, &str, _, _> = BiMap::with_comparators(
///     bimap_arena::Natural,
///     |a: &&str, b: &&str| a.to_lowercase() < b.to_lowercase(),
/// );
/// m.insert(0, "abc");
/// assert!(m.insert(1, "ABC").is_end());
/// assert_eq!(m.at_right(&"aBc"), Ok(&0));
/// ```
pub trait Compare<T: ?Sized> {
    fn less(&self, lhs: &T, rhs: &T) -> bool;
}

/// The ordering given by `T: Ord`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Natural;

impl<T: Ord + ?Sized> Compare<T> for Natural {
    #[inline]
    fn less(&self, lhs: &T, rhs: &T) -> bool {
        lhs < rhs
    }
}

/// Reverses the ordering of `C`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Reverse<C>(pub C);

impl<T: ?Sized, C: Compare<T>> Compare<T> for Reverse<C> {
    #[inline]
    fn less(&self, lhs: &T, rhs: &T) -> bool {
        self.0.less(rhs, lhs)
    }
}

impl<T: ?Sized, F: Fn(&T, &T) -> bool> Compare<T> for F {
    #[inline]
    fn less(&self, lhs: &T, rhs: &T) -> bool {
        self(lhs, rhs)
    }
}
