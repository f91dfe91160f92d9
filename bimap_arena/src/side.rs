use core::{fmt, hash::Hash, marker::PhantomData};

use crate::{utils::Tree, BiMap, Ptr};

mod sealed {
    pub trait Sealed {}
    impl Sealed for super::Left {}
    impl Sealed for super::Right {}
}

/// One of the two independently ordered views of a `BiMap`. Implemented only
/// by [Left] and [Right].
pub trait Side: sealed::Sealed + Sized + 'static {
    /// The opposite side
    type Flip: Side<Flip = Self>;

    /// Used by `Debug` impls
    const NAME: &'static str;

    /// Returns the tree of this side
    fn tree<P: Ptr, L, R, CL, CR>(m: &BiMap<P, L, R, CL, CR>) -> &Tree<P, Self>;
}

/// Marker for the left side of a `BiMap`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Left {}

/// Marker for the right side of a `BiMap`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Right {}

impl Side for Left {
    type Flip = Right;

    const NAME: &'static str = "Left";

    #[inline]
    fn tree<P: Ptr, L, R, CL, CR>(m: &BiMap<P, L, R, CL, CR>) -> &Tree<P, Self> {
        &m.left
    }
}

impl Side for Right {
    type Flip = Left;

    const NAME: &'static str = "Right";

    #[inline]
    fn tree<P: Ptr, L, R, CL, CR>(m: &BiMap<P, L, R, CL, CR>) -> &Tree<P, Self> {
        &m.right
    }
}

/// A position on side `S` of a `BiMap`: either an entry or the end (one past
/// the greatest entry of the side).
///
/// Positions are plain `Copy` handles that do not borrow the map. They stay
/// valid across insertions and removals of other entries, and become invalid
/// when their own entry is erased through either side. Every `BiMap`
/// operation taking a position checks it and returns
/// [Error::InvalidPos](crate::Error::InvalidPos) if it went stale (reliably so
/// when `P` has a generation counter).
///
/// ```
/// use bimap_arena::{ptr_struct, BiMap};
///
/// ptr_struct!(P0);
///
/// let mut m: BiMap<P0, u32, char> = BiMap::new();
/// m.insert(1, 'z');
/// m.insert(2, 'y');
///
/// let pos = m.find_left(&2);
/// // `O(1)`, no second tree search
/// assert_eq!(m.get_right(pos.flip()), Ok(&'y'));
/// assert_eq!(pos.flip().flip(), pos);
///
/// // the end of one side flips to the end of the other
/// assert!(m.end_left().flip().is_end());
/// ```
pub struct Pos<P: Ptr, S: Side> {
    p: Option<P>,
    _side: PhantomData<fn() -> S>,
}

/// A position in left order
pub type LeftPos<P> = Pos<P, Left>;

/// A position in right order
pub type RightPos<P> = Pos<P, Right>;

impl<P: Ptr, S: Side> Pos<P, S> {
    /// The position of the entry pointed to by `p`
    #[inline]
    pub fn at(p: P) -> Self {
        Self {
            p: Some(p),
            _side: PhantomData,
        }
    }

    /// The end position
    #[inline]
    pub fn end() -> Self {
        Self {
            p: None,
            _side: PhantomData,
        }
    }

    #[inline]
    pub(crate) fn from_option(p: Option<P>) -> Self {
        Self {
            p,
            _side: PhantomData,
        }
    }

    #[inline]
    pub fn is_end(self) -> bool {
        self.p.is_none()
    }

    /// Returns the `Ptr` of the entry, `None` if this is an end position
    #[inline]
    pub fn ptr(self) -> Option<P> {
        self.p
    }

    /// Returns the position of the same entry on the other side, or the end
    /// of the other side if `self` is an end position. This is `O(1)` because
    /// both tree nodes of an entry live in the same arena allocation.
    #[inline]
    pub fn flip(self) -> Pos<P, S::Flip> {
        Pos {
            p: self.p,
            _side: PhantomData,
        }
    }
}

impl<P: Ptr, S: Side> Clone for Pos<P, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<P: Ptr, S: Side> Copy for Pos<P, S> {}

impl<P: Ptr, S: Side> PartialEq for Pos<P, S> {
    fn eq(&self, other: &Self) -> bool {
        self.p == other.p
    }
}

impl<P: Ptr, S: Side> Eq for Pos<P, S> {}

impl<P: Ptr, S: Side> Hash for Pos<P, S> {
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        self.p.hash(state)
    }
}

impl<P: Ptr, S: Side> Default for Pos<P, S> {
    fn default() -> Self {
        Self::end()
    }
}

impl<P: Ptr, S: Side> fmt::Debug for Pos<P, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.p {
            Some(p) => write!(f, "{}({:?})", S::NAME, p),
            None => write!(f, "{}(end)", S::NAME),
        }
    }
}
