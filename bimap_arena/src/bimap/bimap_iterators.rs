//! Iterators for `BiMap`

use core::{iter::FusedIterator, marker::PhantomData};

use crate::{
    utils::{Entry, Tree, TreeNode},
    Advancer, Arena, BiMap, Compare, Left, Pos, Ptr, Right, Side,
};

/// An advancer over the valid `P`s of a `BiMap` in `S` order
///
/// The next entry is found before the current one is returned, so the
/// current entry can be erased between advancements. Erasing the entry that
/// comes next in the order makes the advancer stop early.
///
/// ```
/// use bimap_arena::{ptr_struct, Advancer, BiMap};
///
/// ptr_struct!(P0);
///
/// let mut m: BiMap<P0, u32, u32> = (0..10).map(|i| (i, 100 - i)).collect();
///
/// let mut adv = m.advancer_right();
/// while let Some(p) = adv.advance(&m) {
///     let (l, _) = m.get(p).unwrap();
///     if (l % 3) == 0 {
///         m.remove(p).unwrap();
///     }
/// }
/// let lefts: Vec<u32> = m.iter_right().map(|(_, l, _)| *l).collect();
/// assert_eq!(lefts, [8, 7, 5, 4, 2, 1]);
/// ```
pub struct SideAdvancer<P: Ptr, L, R, CL, CR, S: Side> {
    ptr: Option<P>,
    _boo: PhantomData<fn() -> (L, R, CL, CR, S)>,
}

impl<P: Ptr, L, R, CL, CR, S: Side> Advancer for SideAdvancer<P, L, R, CL, CR, S>
where
    Entry<P, L, R>: TreeNode<P, S>,
{
    type Collection = BiMap<P, L, R, CL, CR>;
    type Item = P;

    fn advance(&mut self, collection: &Self::Collection) -> Option<Self::Item> {
        let p = self.ptr?;
        if collection.contains(p) {
            self.ptr = Tree::<P, S>::next(&collection.a, p.inx())
                .map(|inx| collection.a.ptr_of(inx));
            Some(p)
        } else {
            self.ptr = None;
            None
        }
    }
}

/// A left order `SideAdvancer`
pub type LeftAdvancer<P, L, R, CL, CR> = SideAdvancer<P, L, R, CL, CR, Left>;

/// A right order `SideAdvancer`
pub type RightAdvancer<P, L, R, CL, CR> = SideAdvancer<P, L, R, CL, CR, Right>;

/// An iterator over `(P, &L, &R)` in `S` order
pub struct Iter<'a, P: Ptr, L, R, S: Side> {
    a: &'a Arena<P, Entry<P, L, R>>,
    front: Option<P::Inx>,
    back: Option<P::Inx>,
    // entries between `front` and `back` inclusive
    len: usize,
    _side: PhantomData<fn() -> S>,
}

/// A left order `Iter`
pub type IterLeft<'a, P, L, R> = Iter<'a, P, L, R, Left>;

/// A right order `Iter`
pub type IterRight<'a, P, L, R> = Iter<'a, P, L, R, Right>;

impl<'a, P: Ptr, L, R, S: Side> Iter<'a, P, L, R, S> {
    fn item(&self, inx: P::Inx) -> (P, &'a L, &'a R) {
        let entry = self.a.get_inx_unwrap(inx);
        (self.a.ptr_of(inx), &entry.l, &entry.r)
    }
}

impl<'a, P: Ptr, L, R, S: Side> Iterator for Iter<'a, P, L, R, S>
where
    Entry<P, L, R>: TreeNode<P, S>,
{
    type Item = (P, &'a L, &'a R);

    fn next(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None
        }
        let inx = self.front?;
        self.len -= 1;
        self.front = Tree::<P, S>::next(self.a, inx);
        Some(self.item(inx))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<'a, P: Ptr, L, R, S: Side> DoubleEndedIterator for Iter<'a, P, L, R, S>
where
    Entry<P, L, R>: TreeNode<P, S>,
{
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None
        }
        let inx = self.back?;
        self.len -= 1;
        self.back = Tree::<P, S>::prev(self.a, inx);
        Some(self.item(inx))
    }
}

impl<'a, P: Ptr, L, R, S: Side> ExactSizeIterator for Iter<'a, P, L, R, S> where
    Entry<P, L, R>: TreeNode<P, S>
{
}

impl<'a, P: Ptr, L, R, S: Side> FusedIterator for Iter<'a, P, L, R, S> where
    Entry<P, L, R>: TreeNode<P, S>
{
}

impl<'a, P: Ptr, L, R, S: Side> Clone for Iter<'a, P, L, R, S> {
    fn clone(&self) -> Self {
        Self {
            a: self.a,
            front: self.front,
            back: self.back,
            len: self.len,
            _side: PhantomData,
        }
    }
}

/// An iterator over the positions of a `BiMap` in `S` order, yielding
/// `Pos<P, S>` which can be flipped and passed back to the map
pub struct Positions<'a, P: Ptr, L, R, S: Side> {
    iter: Iter<'a, P, L, R, S>,
}

impl<'a, P: Ptr, L, R, S: Side> Iterator for Positions<'a, P, L, R, S>
where
    Entry<P, L, R>: TreeNode<P, S>,
{
    type Item = Pos<P, S>;

    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next().map(|(p, ..)| Pos::at(p))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<'a, P: Ptr, L, R, S: Side> DoubleEndedIterator for Positions<'a, P, L, R, S>
where
    Entry<P, L, R>: TreeNode<P, S>,
{
    fn next_back(&mut self) -> Option<Self::Item> {
        self.iter.next_back().map(|(p, ..)| Pos::at(p))
    }
}

impl<'a, P: Ptr, L, R, S: Side> ExactSizeIterator for Positions<'a, P, L, R, S> where
    Entry<P, L, R>: TreeNode<P, S>
{
}

impl<P: Ptr, L, R, CL, CR> BiMap<P, L, R, CL, CR> {
    /// Advances over every valid `P` in left order
    pub fn advancer_left(&self) -> LeftAdvancer<P, L, R, CL, CR> {
        SideAdvancer {
            ptr: self.first_left(),
            _boo: PhantomData,
        }
    }

    /// Advances over every valid `P` in right order
    pub fn advancer_right(&self) -> RightAdvancer<P, L, R, CL, CR> {
        SideAdvancer {
            ptr: self.first_right(),
            _boo: PhantomData,
        }
    }

    /// Advances over valid `P`s in `S` order starting from `pos`. The end
    /// position or a stale position makes the advancer return only `None`s.
    pub fn advancer_starting_from<S: Side>(
        &self,
        pos: Pos<P, S>,
    ) -> SideAdvancer<P, L, R, CL, CR, S> {
        SideAdvancer {
            ptr: pos.ptr(),
            _boo: PhantomData,
        }
    }

    /// Iteration over `(P, &L, &R)` in `S` order
    pub fn iter<S: Side>(&self) -> Iter<P, L, R, S>
    where
        Entry<P, L, R>: TreeNode<P, S>,
    {
        let tree = S::tree(self);
        Iter {
            a: &self.a,
            front: tree.min(&self.a),
            back: tree.max(&self.a),
            len: self.a.len(),
            _side: PhantomData,
        }
    }

    /// Iteration over `(P, &L, &R)` in order of the left values
    pub fn iter_left(&self) -> IterLeft<P, L, R> {
        self.iter()
    }

    /// Iteration over `(P, &L, &R)` in order of the right values
    pub fn iter_right(&self) -> IterRight<P, L, R> {
        self.iter()
    }

    /// Iteration over the positions of side `S` in order
    pub fn positions<S: Side>(&self) -> Positions<P, L, R, S>
    where
        Entry<P, L, R>: TreeNode<P, S>,
    {
        Positions { iter: self.iter() }
    }
}

impl<'a, P: Ptr, L, R, CL, CR> IntoIterator for &'a BiMap<P, L, R, CL, CR> {
    type IntoIter = IterLeft<'a, P, L, R>;
    type Item = (P, &'a L, &'a R);

    /// Iterates in left order
    fn into_iter(self) -> Self::IntoIter {
        self.iter_left()
    }
}

impl<P: Ptr, L, R, CL: Compare<L> + Default, CR: Compare<R> + Default> FromIterator<(L, R)>
    for BiMap<P, L, R, CL, CR>
{
    /// Uses `insert`, pairs colliding with earlier pairs are skipped
    fn from_iter<I: IntoIterator<Item = (L, R)>>(iter: I) -> Self {
        let mut m = Self::default();
        m.extend(iter);
        m
    }
}

impl<P: Ptr, L, R, CL: Compare<L>, CR: Compare<R>> Extend<(L, R)> for BiMap<P, L, R, CL, CR> {
    /// Uses `insert`, pairs colliding with existing pairs are skipped
    fn extend<I: IntoIterator<Item = (L, R)>>(&mut self, iter: I) {
        for (l, r) in iter {
            self.insert(l, r);
        }
    }
}
