use alloc::vec::Vec;
use core::{fmt, mem, num::NonZeroUsize};

use recasting::Recaster;

use crate::{
    utils::{PtrGen, PtrInx},
    Ptr,
};

/// Internal entry for an `Arena`
#[derive(Clone)]
pub(crate) enum InternalEntry<P: Ptr, T> {
    /// A free entry pointing to the next free entry, or to itself if it is the
    /// last one in the freelist
    Free(P::Inx),
    Allocated(P::Gen, T),
}

use InternalEntry::*;

/// A generational arena. `BiMap` stores all of its pair entries in one of
/// these, and the `Ptr`s it hands out are stable across insertions and
/// removals of other entries.
///
/// This is also returned as a [Recaster] by
/// [BiMap::compress_and_shrink_recaster](crate::BiMap::compress_and_shrink_recaster),
/// in which case it maps old `Ptr`s to new `Ptr`s.
///
/// # Invariants
///
/// - The generation starts at `PtrGen::two()` so that `Ptr::invalid` is never
///   valid
/// - Every `Free` entry is in a single freelist starting at `freelist_root`
///   with the last node pointing to itself, and `freelist_root` is `None` iff
///   there are no `Free` entries
/// - Every invalidation increments the arena generation
pub struct Arena<P: Ptr, T> {
    // index `i` of `m` is `P::Inx` `i + 1`
    m: Vec<InternalEntry<P, T>>,
    len: usize,
    freelist_root: Option<P::Inx>,
    gen: P::Gen,
}

#[inline]
fn vec_inx<I: PtrInx>(inx: I) -> usize {
    PtrInx::get(inx).get().wrapping_sub(1)
}

#[inline]
fn ptr_inx<I: PtrInx>(i: usize) -> I {
    match NonZeroUsize::new(i.wrapping_add(1)) {
        Some(inx) => PtrInx::new(inx),
        None => panic!("arena index overflow"),
    }
}

impl<P: Ptr, T> Arena<P, T> {
    /// Used by tests
    #[doc(hidden)]
    pub fn _check_invariants(this: &Self) -> Result<(), &'static str> {
        if this.gen < P::Gen::two() {
            return Err("bad generation")
        }
        let n_allocated = this
            .m
            .iter()
            .filter(|entry| matches!(entry, Allocated(..)))
            .count();
        if this.len != n_allocated {
            return Err("len != n_allocated")
        }
        let mut freelist_len = 0usize;
        let mut next = this.freelist_root;
        while let Some(inx) = next {
            match this.m.get(vec_inx(inx)) {
                Some(Free(free)) => {
                    freelist_len += 1;
                    next = if *free == inx { None } else { Some(*free) };
                }
                _ => return Err("bad freelist node"),
            }
            if freelist_len > this.m.len() {
                return Err("endless freelist")
            }
        }
        if freelist_len != this.m.len().wrapping_sub(n_allocated) {
            return Err("freelist discontinuous")
        }
        Ok(())
    }

    pub fn new() -> Self {
        Self {
            m: Vec::new(),
            len: 0,
            freelist_root: None,
            gen: PtrGen::two(),
        }
    }

    /// Returns the number of `T` in the arena
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of entries, allocated or free
    pub fn capacity(&self) -> usize {
        self.m.len()
    }

    /// Returns the generation counter, which is the number of invalidation
    /// operations done on the arena plus 2 (unless `P::Gen` is `()`)
    pub fn gen(&self) -> P::Gen {
        self.gen
    }

    fn inc_gen(&mut self) {
        self.gen = PtrGen::increment(self.gen);
    }

    /// Reserves free entries so that `self.capacity()` is at least
    /// `self.len() + additional`
    ///
    /// # Panics
    ///
    /// If the new capacity would exceed `P::Inx::max()`
    pub fn reserve(&mut self, additional: usize) {
        let free = self.m.len().wrapping_sub(self.len);
        if free >= additional {
            return
        }
        let remaining = additional.wrapping_sub(free);
        let old_cap = self.m.len();
        let target = match old_cap.checked_add(remaining) {
            Some(target) if target <= <P::Inx as PtrInx>::max().get() => target,
            _ => panic!("wanted arena capacity exceeds `P::Inx::max()`"),
        };
        self.m.reserve_exact(remaining);
        // chain the new entries together and put them in front of the old freelist
        for i in old_cap..target.wrapping_sub(1) {
            self.m.push(Free(ptr_inx(i.wrapping_add(1))));
        }
        let last = ptr_inx(target.wrapping_sub(1));
        self.m.push(Free(self.freelist_root.unwrap_or(last)));
        self.freelist_root = Some(ptr_inx(old_cap));
    }

    /// Inserts `t` into the arena and returns a `Ptr` to it, allocating if
    /// there are no free entries
    pub fn insert(&mut self, t: T) -> P {
        let inx = match self.freelist_root {
            Some(inx) => inx,
            None => {
                // doubling, clamped so that small index types can be filled
                let room = <P::Inx as PtrInx>::max().get().wrapping_sub(self.m.len());
                self.reserve(self.m.len().clamp(1, room.max(1)));
                match self.freelist_root {
                    Some(inx) => inx,
                    None => unreachable!(),
                }
            }
        };
        let entry = &mut self.m[vec_inx(inx)];
        match mem::replace(entry, Allocated(self.gen, t)) {
            Free(next) => {
                self.freelist_root = if next == inx { None } else { Some(next) };
            }
            Allocated(..) => unreachable!(),
        }
        self.len = self.len.wrapping_add(1);
        Ptr::_from_raw(inx, self.gen)
    }

    /// Returns if `p` is a valid `Ptr`
    pub fn contains(&self, p: P) -> bool {
        matches!(self.m.get(vec_inx(p.inx())), Some(Allocated(gen, _)) if *gen == p.gen())
    }

    /// Returns a reference to the `T` pointed to by `p`, or `None` if `p` is
    /// invalid
    #[must_use]
    pub fn get(&self, p: P) -> Option<&T> {
        match self.m.get(vec_inx(p.inx())) {
            Some(Allocated(gen, t)) if *gen == p.gen() => Some(t),
            _ => None,
        }
    }

    #[must_use]
    pub fn get_mut(&mut self, p: P) -> Option<&mut T> {
        match self.m.get_mut(vec_inx(p.inx())) {
            Some(Allocated(gen, t)) if *gen == p.gen() => Some(t),
            _ => None,
        }
    }

    /// Ignores the generation and returns the generation of the entry along
    /// with the `T`
    #[must_use]
    pub(crate) fn get_no_gen(&self, inx: P::Inx) -> Option<(P::Gen, &T)> {
        match self.m.get(vec_inx(inx)) {
            Some(Allocated(gen, t)) => Some((*gen, t)),
            _ => None,
        }
    }

    /// Panics if `inx` does not point to an allocated entry
    #[inline]
    pub(crate) fn get_inx_unwrap(&self, inx: P::Inx) -> &T {
        match self.m.get(vec_inx(inx)) {
            Some(Allocated(_, t)) => t,
            _ => panic!("`get_inx_unwrap` on an unallocated entry"),
        }
    }

    #[inline]
    pub(crate) fn get_inx_mut_unwrap(&mut self, inx: P::Inx) -> &mut T {
        match self.m.get_mut(vec_inx(inx)) {
            Some(Allocated(_, t)) => t,
            _ => panic!("`get_inx_mut_unwrap` on an unallocated entry"),
        }
    }

    /// Reconstructs the full `Ptr` of an allocated entry
    #[inline]
    pub(crate) fn ptr_of(&self, inx: P::Inx) -> P {
        match self.m.get(vec_inx(inx)) {
            Some(Allocated(gen, _)) => Ptr::_from_raw(inx, *gen),
            _ => panic!("`ptr_of` on an unallocated entry"),
        }
    }

    /// Removes the `T` pointed to by `p` and invalidates all `Ptr`s to it.
    /// Returns `None` and does nothing if `p` is invalid.
    #[must_use]
    pub fn remove(&mut self, p: P) -> Option<T> {
        if !self.contains(p) {
            return None
        }
        let inx = p.inx();
        let next = self.freelist_root.unwrap_or(inx);
        let old = mem::replace(&mut self.m[vec_inx(inx)], Free(next));
        self.freelist_root = Some(inx);
        self.len = self.len.wrapping_sub(1);
        self.inc_gen();
        match old {
            Allocated(_, t) => Some(t),
            Free(_) => unreachable!(),
        }
    }

    /// Drops every `T` and invalidates all `Ptr`s, keeping the capacity
    pub fn clear(&mut self) {
        let cap = self.m.len();
        self.m.clear();
        self.len = 0;
        self.freelist_root = None;
        self.inc_gen();
        self.reserve(cap);
    }

    /// Iterates over `(P, &T)` in index order
    pub fn iter(&self) -> impl Iterator<Item = (P, &T)> {
        self.m.iter().enumerate().filter_map(|(i, entry)| match entry {
            Allocated(gen, t) => Some((Ptr::_from_raw(ptr_inx(i), *gen), t)),
            Free(_) => None,
        })
    }

    /// Mutable iteration over `(P, &mut T)` in index order
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (P, &mut T)> {
        self.m
            .iter_mut()
            .enumerate()
            .filter_map(|(i, entry)| match entry {
                Allocated(gen, t) => Some((Ptr::_from_raw(ptr_inx(i), *gen), t)),
                Free(_) => None,
            })
    }

    /// Overwrites `self` with the entry layout of `source`: every valid `Ptr`
    /// of `source` becomes valid in `self`, pointing to `map(p, t)`
    pub fn clone_from_with<U, F: FnMut(P, &U) -> T>(&mut self, source: &Arena<P, U>, mut map: F) {
        self.m.clear();
        self.m.reserve_exact(source.m.len());
        for (i, entry) in source.m.iter().enumerate() {
            self.m.push(match entry {
                Free(next) => Free(*next),
                Allocated(gen, u) => Allocated(*gen, map(Ptr::_from_raw(ptr_inx(i), *gen), u)),
            });
        }
        self.len = source.len;
        self.freelist_root = source.freelist_root;
        self.gen = source.gen;
    }

    /// Moves all entries to the lowest indexes in their current relative
    /// order and shrinks the capacity to the length. All `Ptr`s are
    /// invalidated, `map` is called on `(old_p, &mut t, new_p)` for every
    /// entry.
    pub fn compress_and_shrink_with<F: FnMut(P, &mut T, P)>(&mut self, mut map: F) {
        self.inc_gen();
        let gen = self.gen;
        let old = mem::take(&mut self.m);
        self.m.reserve_exact(self.len);
        for (i, entry) in old.into_iter().enumerate() {
            if let Allocated(old_gen, mut t) = entry {
                let new_p = Ptr::_from_raw(ptr_inx(self.m.len()), gen);
                map(Ptr::_from_raw(ptr_inx(i), old_gen), &mut t, new_p);
                self.m.push(Allocated(gen, t));
            }
        }
        self.freelist_root = None;
    }
}

impl<P: Ptr, T> Default for Arena<P, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Ptr, T: fmt::Debug> fmt::Debug for Arena<P, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<P: Ptr> Recaster for Arena<P, P> {
    type Item = P;

    fn recast_item(&self, item: &mut Self::Item) -> Result<(), Self::Item> {
        if let Some(res) = self.get(*item) {
            *item = *res;
            Ok(())
        } else {
            Err(*item)
        }
    }
}
