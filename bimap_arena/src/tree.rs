use core::{fmt, marker::PhantomData, mem};

use crate::{utils::TreeNode, Arena, Compare, Ptr, Side};

// An intrusive binary search tree over nodes living in an `Arena`. The tree
// itself only stores the root, every node stores its own `Links` for side `S`
// (a `BiMap` entry has one `Links` per side, so one entry is a node of two
// trees at once). Keys are compared with a comparator supplied at each call,
// the tree keeps no comparator state.
//
// The tree is not self balancing. Insertion orders that are sorted or nearly
// sorted degrade the tree into a list, and then every `O(height)` operation
// here becomes `O(n)`.

/// The tree of one side of a `BiMap`
pub struct Tree<P: Ptr, S: Side> {
    pub(crate) root: Option<P::Inx>,
    _side: PhantomData<fn() -> S>,
}

impl<P: Ptr, S: Side> Tree<P, S> {
    pub const fn new() -> Self {
        Self {
            root: None,
            _side: PhantomData,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Forgets all nodes, the arena is expected to be cleared by the caller
    pub fn clear(&mut self) {
        self.root = None;
    }

    /// Exchanges the nodes of two trees in `O(1)`. Only the roots move, there
    /// are no parent links pointing at a tree.
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(&mut self.root, &mut other.root);
    }

    /// Used by tests. Checks the link structure and the strict ordering of
    /// keys under `cmp`, and returns the number of nodes in the tree.
    #[doc(hidden)]
    pub fn _check_invariants<E: TreeNode<P, S>, C: Compare<E::Key>>(
        this: &Self,
        a: &Arena<P, E>,
        cmp: &C,
    ) -> Result<usize, &'static str> {
        let root = if let Some(root) = this.root {
            root
        } else {
            return Ok(0)
        };
        match a.get_no_gen(root) {
            Some((_, node)) => {
                if node.links().p_back.is_some() {
                    return Err("root node has a back pointer")
                }
            }
            None => return Err("root is not allocated"),
        }
        let mut count = 0usize;
        let mut prev: Option<P::Inx> = None;
        let mut p = Self::min_from(a, root);
        loop {
            count += 1;
            if count > a.len() {
                return Err("cycle")
            }
            let node = a.get_no_gen(p).ok_or("link to unallocated entry")?.1;
            let links = node.links();
            if let Some(p_back) = links.p_back {
                let parent = a.get_no_gen(p_back).ok_or("broken tree")?.1.links();
                if (parent.p_tree0 != Some(p)) && (parent.p_tree1 != Some(p)) {
                    return Err("parent does not point back to child")
                }
            } else if Some(p) != this.root {
                return Err("more than one root node")
            }
            if links.p_tree0.is_some() && (links.p_tree0 == links.p_tree1) {
                return Err("`p_tree0` and `p_tree1` are the same")
            }
            for child in [links.p_tree0, links.p_tree1].into_iter().flatten() {
                let child = a.get_no_gen(child).ok_or("broken tree")?.1.links();
                if child.p_back != Some(p) {
                    return Err("child does not point back to parent")
                }
            }
            if let Some(prev) = prev {
                if !cmp.less(a.get_inx_unwrap(prev).key(), node.key()) {
                    return Err("incorrect ordering")
                }
            }
            prev = Some(p);
            p = if let Some(next) = Self::next(a, p) {
                next
            } else {
                break
            };
        }
        Ok(count)
    }

    #[inline]
    fn links<E: TreeNode<P, S>>(a: &Arena<P, E>, p: P::Inx) -> &crate::utils::Links<P> {
        a.get_inx_unwrap(p).links()
    }

    #[inline]
    fn links_mut<E: TreeNode<P, S>>(a: &mut Arena<P, E>, p: P::Inx) -> &mut crate::utils::Links<P> {
        a.get_inx_mut_unwrap(p).links_mut()
    }

    /// Links the node at `p` into the tree. The node must currently be
    /// unlinked on this side, and its key must not be equivalent to any key
    /// already in the tree.
    pub fn insert<E: TreeNode<P, S>, C: Compare<E::Key>>(
        &mut self,
        a: &mut Arena<P, E>,
        cmp: &C,
        p: P::Inx,
    ) {
        *Self::links_mut(a, p) = Default::default();
        let mut cur = if let Some(root) = self.root {
            root
        } else {
            self.root = Some(p);
            return
        };
        loop {
            let lesser = cmp.less(a.get_inx_unwrap(p).key(), a.get_inx_unwrap(cur).key());
            let links = Self::links(a, cur);
            let child = if lesser {
                links.p_tree0
            } else {
                links.p_tree1
            };
            if let Some(child) = child {
                cur = child;
            } else {
                let links = Self::links_mut(a, cur);
                if lesser {
                    links.p_tree0 = Some(p);
                } else {
                    links.p_tree1 = Some(p);
                }
                Self::links_mut(a, p).p_back = Some(cur);
                break
            }
        }
    }

    /// Unlinks the node at `p` from the tree and resets its links. The node
    /// stays allocated in the arena.
    pub fn remove<E: TreeNode<P, S>>(&mut self, a: &mut Arena<P, E>, p: P::Inx) {
        let d = *Self::links(a, p);
        let replacement = match (d.p_tree0, d.p_tree1) {
            (None, None) => None,
            (Some(child), None) | (None, Some(child)) => {
                Self::links_mut(a, child).p_back = d.p_back;
                Some(child)
            }
            (Some(d_tree0), Some(d_tree1)) => {
                // the successor is the leftmost node of the right subtree, it has no
                // `p_tree0`
                let r = Self::min_from(a, d_tree1);
                if r != d_tree1 {
                    let r_links = *Self::links(a, r);
                    let r_back = r_links.p_back.unwrap();
                    // splice the right subtree of `r` into its old place
                    Self::links_mut(a, r_back).p_tree0 = r_links.p_tree1;
                    if let Some(r_tree1) = r_links.p_tree1 {
                        Self::links_mut(a, r_tree1).p_back = Some(r_back);
                    }
                    Self::links_mut(a, r).p_tree1 = Some(d_tree1);
                    Self::links_mut(a, d_tree1).p_back = Some(r);
                }
                // else `r` keeps its own right subtree
                let r_links = Self::links_mut(a, r);
                r_links.p_tree0 = Some(d_tree0);
                r_links.p_back = d.p_back;
                Self::links_mut(a, d_tree0).p_back = Some(r);
                Some(r)
            }
        };
        if let Some(d_back) = d.p_back {
            let parent = Self::links_mut(a, d_back);
            if parent.p_tree0 == Some(p) {
                parent.p_tree0 = replacement;
            } else {
                parent.p_tree1 = replacement;
            }
        } else {
            self.root = replacement;
        }
        *Self::links_mut(a, p) = Default::default();
    }

    /// Returns the first node with a key that is not less than `k`
    pub fn lower_bound<E: TreeNode<P, S>, C: Compare<E::Key>>(
        &self,
        a: &Arena<P, E>,
        cmp: &C,
        k: &E::Key,
    ) -> Option<P::Inx> {
        let mut res = None;
        let mut cur = self.root;
        while let Some(p) = cur {
            let node = a.get_inx_unwrap(p);
            if cmp.less(node.key(), k) {
                cur = node.links().p_tree1;
            } else {
                res = Some(p);
                cur = node.links().p_tree0;
            }
        }
        res
    }

    /// Returns the first node with a key that is greater than `k`
    pub fn upper_bound<E: TreeNode<P, S>, C: Compare<E::Key>>(
        &self,
        a: &Arena<P, E>,
        cmp: &C,
        k: &E::Key,
    ) -> Option<P::Inx> {
        let mut res = None;
        let mut cur = self.root;
        while let Some(p) = cur {
            let node = a.get_inx_unwrap(p);
            if cmp.less(k, node.key()) {
                res = Some(p);
                cur = node.links().p_tree0;
            } else {
                cur = node.links().p_tree1;
            }
        }
        res
    }

    /// Returns the node with a key equivalent to `k`
    pub fn find<E: TreeNode<P, S>, C: Compare<E::Key>>(
        &self,
        a: &Arena<P, E>,
        cmp: &C,
        k: &E::Key,
    ) -> Option<P::Inx> {
        // `lower_bound` already guarantees `!less(node, k)`
        let p = self.lower_bound(a, cmp, k)?;
        if cmp.less(k, a.get_inx_unwrap(p).key()) {
            None
        } else {
            Some(p)
        }
    }

    fn min_from<E: TreeNode<P, S>>(a: &Arena<P, E>, mut p: P::Inx) -> P::Inx {
        while let Some(p_tree0) = Self::links(a, p).p_tree0 {
            p = p_tree0;
        }
        p
    }

    fn max_from<E: TreeNode<P, S>>(a: &Arena<P, E>, mut p: P::Inx) -> P::Inx {
        while let Some(p_tree1) = Self::links(a, p).p_tree1 {
            p = p_tree1;
        }
        p
    }

    pub fn min<E: TreeNode<P, S>>(&self, a: &Arena<P, E>) -> Option<P::Inx> {
        self.root.map(|root| Self::min_from(a, root))
    }

    pub fn max<E: TreeNode<P, S>>(&self, a: &Arena<P, E>) -> Option<P::Inx> {
        self.root.map(|root| Self::max_from(a, root))
    }

    /// In-order successor, `None` if `p` is the maximum
    pub fn next<E: TreeNode<P, S>>(a: &Arena<P, E>, mut p: P::Inx) -> Option<P::Inx> {
        if let Some(p_tree1) = Self::links(a, p).p_tree1 {
            return Some(Self::min_from(a, p_tree1))
        }
        // go up until we arrive from a `p_tree0` side
        while let Some(p_back) = Self::links(a, p).p_back {
            if Self::links(a, p_back).p_tree0 == Some(p) {
                return Some(p_back)
            }
            p = p_back;
        }
        None
    }

    /// In-order predecessor, `None` if `p` is the minimum
    pub fn prev<E: TreeNode<P, S>>(a: &Arena<P, E>, mut p: P::Inx) -> Option<P::Inx> {
        if let Some(p_tree0) = Self::links(a, p).p_tree0 {
            return Some(Self::max_from(a, p_tree0))
        }
        while let Some(p_back) = Self::links(a, p).p_back {
            if Self::links(a, p_back).p_tree1 == Some(p) {
                return Some(p_back)
            }
            p = p_back;
        }
        None
    }
}

impl<P: Ptr, S: Side> Default for Tree<P, S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Ptr, S: Side> fmt::Debug for Tree<P, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tree")
            .field("side", &S::NAME)
            .field("root", &self.root)
            .finish()
    }
}
