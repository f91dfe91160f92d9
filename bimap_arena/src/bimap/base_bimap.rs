use core::{fmt, mem};

use crate::{
    utils::{Entry, Tree, TreeNode},
    Arena, Compare, Error, Left, Natural, Pos, Ptr, Right, Side,
};

/// A bidirectional map: a set of `(L, R)` pairs where every left value is
/// unique among the left values and every right value is unique among the
/// right values. Either side can be used as the key to find the other.
///
/// Every pair is a single entry in an arena, and that one entry is a node of
/// two binary search trees at the same time, one ordered by `CL` over the
/// left values and one ordered by `CR` over the right values. `P` is the
/// handle type of the entries (declared with the `ptr_struct` macro), and the
/// same handle addresses an entry from both sides. This is what allows a
/// [Pos] in one order to be [flipped](Pos::flip) to the other order in
/// `O(1)`.
///
/// The trees are not self balancing. Lookups, insertions, and removals are
/// `O(height)`, which becomes `O(n)` if pairs are inserted in sorted (or
/// reverse sorted) order on a side.
///
/// ```
/// use bimap_arena::{ptr_struct, BiMap, Error};
///
/// ptr_struct!(P0);
///
/// let mut m: BiMap<P0, u64, &str> = BiMap::new();
/// m.insert(1, "one");
/// m.insert(2, "two");
/// m.insert(3, "three");
///
/// let pos = m.find_left(&2);
/// assert_eq!(m.get_right(pos.flip()), Ok(&"two"));
/// assert_eq!(m.at_right(&"three"), Ok(&3));
///
/// // either value of a pair being taken already makes `insert` a no-op
/// assert!(m.insert(4, "one").is_end());
/// assert!(m.insert(1, "four").is_end());
///
/// assert!(m.erase_left(&2));
/// assert!(m.find_right(&"two").is_end());
/// assert_eq!(m.at_left(&2), Err(Error::NotFound));
/// assert_eq!(m.len(), 2);
///
/// // iteration in either order
/// let lefts: Vec<u64> = m.iter_left().map(|(_, l, _)| *l).collect();
/// assert_eq!(lefts, [1, 3]);
/// let rights: Vec<&str> = m.iter_right().map(|(_, _, r)| *r).collect();
/// assert_eq!(rights, ["one", "three"]);
/// ```
pub struct BiMap<P: Ptr, L, R, CL = Natural, CR = Natural> {
    pub(crate) a: Arena<P, Entry<P, L, R>>,
    pub(crate) left: Tree<P, Left>,
    pub(crate) right: Tree<P, Right>,
    pub(crate) cmp_l: CL,
    pub(crate) cmp_r: CR,
}

impl<P: Ptr, L, R> BiMap<P, L, R> {
    /// Creates an empty `BiMap` ordered by `Ord` on both sides
    pub fn new() -> Self {
        Self::with_comparators(Natural, Natural)
    }
}

impl<P: Ptr, L, R, CL, CR> BiMap<P, L, R, CL, CR> {
    /// Used by tests
    #[doc(hidden)]
    pub fn _check_invariants(this: &Self) -> Result<(), &'static str>
    where
        CL: Compare<L>,
        CR: Compare<R>,
    {
        Arena::_check_invariants(&this.a)?;
        let len_l = Tree::_check_invariants(&this.left, &this.a, &this.cmp_l)?;
        let len_r = Tree::_check_invariants(&this.right, &this.a, &this.cmp_r)?;
        if len_l != this.a.len() {
            return Err("left tree does not contain every entry")
        }
        if len_r != this.a.len() {
            return Err("right tree does not contain every entry")
        }
        // every entry is reachable from both trees iff the node counts match and
        // every entry that is not a root has parents on both sides
        for (p, entry) in this.a.iter() {
            if entry.links_l.p_back.is_none() && (this.left.root != Some(p.inx())) {
                return Err("entry is not linked into the left tree")
            }
            if entry.links_r.p_back.is_none() && (this.right.root != Some(p.inx())) {
                return Err("entry is not linked into the right tree")
            }
        }
        Ok(())
    }

    /// Creates an empty `BiMap` with custom comparators for each side
    pub fn with_comparators(cmp_l: CL, cmp_r: CR) -> Self {
        Self {
            a: Arena::new(),
            left: Tree::new(),
            right: Tree::new(),
            cmp_l,
            cmp_r,
        }
    }

    pub fn comparator_left(&self) -> &CL {
        &self.cmp_l
    }

    pub fn comparator_right(&self) -> &CR {
        &self.cmp_r
    }

    /// Returns the number of pairs
    pub fn len(&self) -> usize {
        self.a.len()
    }

    pub fn is_empty(&self) -> bool {
        self.a.is_empty()
    }

    /// Returns the capacity of the underlying arena
    pub fn capacity(&self) -> usize {
        self.a.capacity()
    }

    /// Makes sure that at least `additional` more pairs can be inserted
    /// without reallocating
    pub fn reserve(&mut self, additional: usize) {
        self.a.reserve(additional)
    }

    /// Returns the generation counter of the underlying arena
    pub fn gen(&self) -> P::Gen {
        self.a.gen()
    }

    /// Returns if `p` is a valid handle to a pair
    pub fn contains(&self, p: P) -> bool {
        self.a.contains(p)
    }

    /// Returns references to the pair pointed to by `p`
    pub fn get(&self, p: P) -> Option<(&L, &R)> {
        self.a.get(p).map(|entry| (&entry.l, &entry.r))
    }

    /// Returns `Ok(None)` for the end position and `Ok(Some(p))` for a live
    /// position
    fn validate<S: Side>(&self, pos: Pos<P, S>) -> Result<Option<P>, Error> {
        match pos.ptr() {
            Some(p) => {
                if self.a.contains(p) {
                    Ok(Some(p))
                } else {
                    Err(Error::InvalidPos)
                }
            }
            None => Ok(None),
        }
    }

    #[inline]
    pub(crate) fn pos_of<S: Side>(&self, inx: Option<P::Inx>) -> Pos<P, S> {
        Pos::from_option(inx.map(|inx| self.a.ptr_of(inx)))
    }

    /// Returns references to both values of the pair at `pos`, which can be a
    /// position on either side
    pub fn get_pair<S: Side>(&self, pos: Pos<P, S>) -> Result<(&L, &R), Error> {
        let p = self.validate(pos)?.ok_or(Error::OutOfRange)?;
        let entry = self.a.get_inx_unwrap(p.inx());
        Ok((&entry.l, &entry.r))
    }

    /// Returns the left value of the pair at `pos`
    pub fn get_left<S: Side>(&self, pos: Pos<P, S>) -> Result<&L, Error> {
        self.get_pair(pos).map(|(l, _)| l)
    }

    /// Returns the right value of the pair at `pos`
    pub fn get_right<S: Side>(&self, pos: Pos<P, S>) -> Result<&R, Error> {
        self.get_pair(pos).map(|(_, r)| r)
    }

    /// Returns the first position in `S` order, which is the end position if
    /// `self` is empty
    pub fn begin<S: Side>(&self) -> Pos<P, S>
    where
        Entry<P, L, R>: TreeNode<P, S>,
    {
        self.pos_of(S::tree(self).min(&self.a))
    }

    pub fn begin_left(&self) -> Pos<P, Left> {
        self.begin()
    }

    pub fn begin_right(&self) -> Pos<P, Right> {
        self.begin()
    }

    pub fn end_left(&self) -> Pos<P, Left> {
        Pos::end()
    }

    pub fn end_right(&self) -> Pos<P, Right> {
        Pos::end()
    }

    /// Returns the handle of the pair with the least left value
    pub fn first_left(&self) -> Option<P> {
        self.begin_left().ptr()
    }

    /// Returns the handle of the pair with the greatest left value
    pub fn last_left(&self) -> Option<P> {
        self.left.max(&self.a).map(|inx| self.a.ptr_of(inx))
    }

    /// Returns the handle of the pair with the least right value
    pub fn first_right(&self) -> Option<P> {
        self.begin_right().ptr()
    }

    /// Returns the handle of the pair with the greatest right value
    pub fn last_right(&self) -> Option<P> {
        self.right.max(&self.a).map(|inx| self.a.ptr_of(inx))
    }

    /// Advances `pos` to the next greater entry in `S` order, returning the end
    /// position if `pos` was at the greatest entry. Advancing the end position
    /// returns `Error::OutOfRange`.
    pub fn next<S: Side>(&self, pos: Pos<P, S>) -> Result<Pos<P, S>, Error>
    where
        Entry<P, L, R>: TreeNode<P, S>,
    {
        let p = self.validate(pos)?.ok_or(Error::OutOfRange)?;
        Ok(self.pos_of(Tree::<P, S>::next(&self.a, p.inx())))
    }

    /// Moves `pos` to the next lesser entry in `S` order. The end position
    /// moves to the greatest entry. Moving back from the least entry (or from
    /// the end of an empty map) returns `Error::OutOfRange`.
    pub fn prev<S: Side>(&self, pos: Pos<P, S>) -> Result<Pos<P, S>, Error>
    where
        Entry<P, L, R>: TreeNode<P, S>,
    {
        let inx = match self.validate(pos)? {
            Some(p) => Tree::<P, S>::prev(&self.a, p.inx()),
            None => S::tree(self).max(&self.a),
        };
        match inx {
            Some(inx) => Ok(Pos::at(self.a.ptr_of(inx))),
            None => Err(Error::OutOfRange),
        }
    }

    /// Unlinks the entry from both trees and removes it from the arena
    fn remove_entry(&mut self, p: P) -> Option<(L, R)> {
        if !self.a.contains(p) {
            return None
        }
        self.left.remove(&mut self.a, p.inx());
        self.right.remove(&mut self.a, p.inx());
        self.a.remove(p).map(Entry::into_pair)
    }

    /// Removes the pair pointed to by `p` and returns it. Returns `None` if
    /// `p` is invalid.
    pub fn remove(&mut self, p: P) -> Option<(L, R)> {
        self.remove_entry(p)
    }

    /// Erases the pair at `pos` (from both sides) and returns the position of
    /// the next greater entry in `S` order.
    ///
    /// # Errors
    ///
    /// `Error::OutOfRange` if `pos` is the end position, `Error::InvalidPos` if
    /// the pair at `pos` was already erased
    pub fn erase<S: Side>(&mut self, pos: Pos<P, S>) -> Result<Pos<P, S>, Error>
    where
        Entry<P, L, R>: TreeNode<P, S>,
    {
        let p = self.validate(pos)?.ok_or(Error::OutOfRange)?;
        let next = Tree::<P, S>::next(&self.a, p.inx());
        // `next` is a different entry, its index stays valid
        self.remove_entry(p);
        Ok(self.pos_of(next))
    }

    /// Erases every pair in `[first, last)` in `S` order and returns `last`.
    /// Nothing is erased if `first == last`.
    ///
    /// # Errors
    ///
    /// `Error::InvalidPos` if either position is stale, `Error::OutOfRange` if
    /// `last` is not reachable by advancing from `first`. The range is
    /// validated before anything is erased.
    pub fn erase_range<S: Side>(
        &mut self,
        first: Pos<P, S>,
        last: Pos<P, S>,
    ) -> Result<Pos<P, S>, Error>
    where
        Entry<P, L, R>: TreeNode<P, S>,
    {
        let mut inx = self.validate(first)?.map(|p| p.inx());
        let end = self.validate(last)?.map(|p| p.inx());
        while inx != end {
            inx = match inx {
                Some(inx) => Tree::<P, S>::next(&self.a, inx),
                None => return Err(Error::OutOfRange),
            };
        }
        let mut pos = first;
        while pos != last {
            pos = self.erase(pos)?;
        }
        Ok(last)
    }

    /// Erases all pairs and invalidates all handles and positions. Capacity
    /// is kept.
    pub fn clear(&mut self) {
        self.left.clear();
        self.right.clear();
        self.a.clear();
    }

    /// Exchanges the contents of two maps in `O(1)`. Handles and positions
    /// follow their pairs.
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(&mut self.a, &mut other.a);
        self.left.swap(&mut other.left);
        self.right.swap(&mut other.right);
        mem::swap(&mut self.cmp_l, &mut other.cmp_l);
        mem::swap(&mut self.cmp_r, &mut other.cmp_r);
    }

    /// Compresses the underlying arena so that all pairs are at the lowest
    /// indexes, and shrinks the capacity to the length. All handles and
    /// positions are invalidated, the tree shapes are kept.
    pub fn compress_and_shrink(&mut self) {
        let _ = self.compress_and_shrink_recaster();
    }

    /// Performs [BiMap::compress_and_shrink] and returns an `Arena<P, P>`
    /// mapping the old handles to the new handles, which can be used for
    /// [Recast](crate::Recast)ing handles stored elsewhere.
    pub fn compress_and_shrink_recaster(&mut self) -> Arena<P, P> {
        let mut res = Arena::<P, P>::new();
        res.clone_from_with(&self.a, |_, _| P::invalid());
        self.a
            .compress_and_shrink_with(|p, _, q| *res.get_mut(p).unwrap() = q);
        // the links still use the old indexes
        let remap = |inx: Option<P::Inx>| inx.map(|inx| res.get_no_gen(inx).unwrap().1.inx());
        for (_, entry) in self.a.iter_mut() {
            for links in [&mut entry.links_l, &mut entry.links_r] {
                links.p_back = remap(links.p_back);
                links.p_tree0 = remap(links.p_tree0);
                links.p_tree1 = remap(links.p_tree1);
            }
        }
        self.left.root = remap(self.left.root);
        self.right.root = remap(self.right.root);
        res
    }
}

#[cfg(feature = "expose_internal_utils")]
#[allow(clippy::type_complexity)]
impl<P: Ptr, L: Clone, R: Clone, CL, CR> BiMap<P, L, R, CL, CR> {
    /// Returns a copy of the arena with the raw tree structure of every pair,
    /// as `(l, r, left_links, right_links)` with the links in
    /// `[p_back, p_tree0, p_tree1]` order
    pub fn debug_arena(&self) -> Arena<P, (L, R, [Option<P>; 3], [Option<P>; 3])> {
        let mut res = Arena::new();
        let ptr = |inx: Option<P::Inx>| inx.map(|inx| self.a.ptr_of(inx));
        res.clone_from_with(&self.a, |_, entry| {
            let links = |l: &crate::utils::Links<P>| {
                [ptr(l.p_back), ptr(l.p_tree0), ptr(l.p_tree1)]
            };
            (
                entry.l.clone(),
                entry.r.clone(),
                links(&entry.links_l),
                links(&entry.links_r),
            )
        });
        res
    }
}

impl<P: Ptr, L, R, CL: Compare<L>, CR: Compare<R>> BiMap<P, L, R, CL, CR> {
    /// Inserts the pair `(l, r)` and returns its left position. If `l` is
    /// already a left value or `r` is already a right value, nothing is
    /// changed and the end position is returned.
    pub fn insert(&mut self, l: L, r: R) -> Pos<P, Left> {
        if self.left.find(&self.a, &self.cmp_l, &l).is_some()
            || self.right.find(&self.a, &self.cmp_r, &r).is_some()
        {
            return Pos::end()
        }
        let p = self.a.insert(Entry::new(l, r));
        self.left.insert(&mut self.a, &self.cmp_l, p.inx());
        self.right.insert(&mut self.a, &self.cmp_r, p.inx());
        Pos::at(p)
    }

    /// Erases the pair with left value `l`, returns if a pair was erased
    pub fn erase_left(&mut self, l: &L) -> bool {
        match self.left.find(&self.a, &self.cmp_l, l) {
            Some(inx) => {
                let p = self.a.ptr_of(inx);
                self.remove_entry(p).is_some()
            }
            None => false,
        }
    }

    /// Erases the pair with right value `r`, returns if a pair was erased
    pub fn erase_right(&mut self, r: &R) -> bool {
        match self.right.find(&self.a, &self.cmp_r, r) {
            Some(inx) => {
                let p = self.a.ptr_of(inx);
                self.remove_entry(p).is_some()
            }
            None => false,
        }
    }

    /// Clones `self` by reinserting `f(l, r)` for every pair in left order.
    /// Pairs returned by `f` that collide with earlier ones are skipped like
    /// with `insert`. On the first `Err`, every pair inserted so far is erased
    /// before the error is returned.
    pub fn try_clone_with<E, F: FnMut(&L, &R) -> Result<(L, R), E>>(
        &self,
        mut f: F,
    ) -> Result<Self, E>
    where
        CL: Clone,
        CR: Clone,
    {
        let mut res = Self::with_comparators(self.cmp_l.clone(), self.cmp_r.clone());
        res.reserve(self.len());
        for (_, l, r) in self.iter_left() {
            match f(l, r) {
                Ok((l, r)) => {
                    res.insert(l, r);
                }
                Err(e) => {
                    res.clear();
                    return Err(e)
                }
            }
        }
        Ok(res)
    }
}

/// Implemented if `L: Clone` and `R: Clone`. Pairs are reinserted in left
/// order, so handles are not preserved. If cloning a value panics, the
/// partially built map is dropped during unwinding.
impl<P: Ptr, L: Clone, R: Clone, CL: Compare<L> + Clone, CR: Compare<R> + Clone> Clone
    for BiMap<P, L, R, CL, CR>
{
    fn clone(&self) -> Self {
        let mut res = Self::with_comparators(self.cmp_l.clone(), self.cmp_r.clone());
        res.reserve(self.len());
        for (_, l, r) in self.iter_left() {
            res.insert(l.clone(), r.clone());
        }
        res
    }
}

impl<P: Ptr, L, R, CL: Default, CR: Default> Default for BiMap<P, L, R, CL, CR> {
    fn default() -> Self {
        Self::with_comparators(CL::default(), CR::default())
    }
}

impl<P: Ptr, L: fmt::Debug, R: fmt::Debug, CL, CR> fmt::Debug for BiMap<P, L, R, CL, CR> {
    /// Formats as a map from handles to pairs, in left order
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.iter_left().map(|(p, l, r)| (p, (l, r))))
            .finish()
    }
}

impl<P: Ptr, L, R, CL: Compare<L>, CR: Compare<R>> PartialEq for BiMap<P, L, R, CL, CR> {
    /// Two maps are equal if they have the same length and, walking both in
    /// left order, every pair of left values and every pair of right values
    /// is equivalent under the comparators of `self` (neither is less than
    /// the other). Handles and capacities are not compared.
    fn eq(&self, other: &Self) -> bool {
        fn equiv<T, C: Compare<T>>(cmp: &C, lhs: &T, rhs: &T) -> bool {
            !cmp.less(lhs, rhs) && !cmp.less(rhs, lhs)
        }
        if self.len() != other.len() {
            return false
        }
        self.iter_left()
            .zip(other.iter_left())
            .all(|((_, l0, r0), (_, l1, r1))| {
                equiv(&self.cmp_l, l0, l1) && equiv(&self.cmp_r, r0, r1)
            })
    }
}

impl<P: Ptr, L, R, CL: Compare<L>, CR: Compare<R>> Eq for BiMap<P, L, R, CL, CR> {}
