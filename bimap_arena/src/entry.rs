use crate::{Left, Ptr, Right, Side};

/// The structural part of a tree node: a parent link and two child links.
/// It knows nothing about ordering, that is supplied by the comparator of the
/// tree at call time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Links<P: Ptr> {
    /// Pointer back to the parent, `None` for the root
    pub p_back: Option<P::Inx>,
    /// Subtree with lesser keys
    pub p_tree0: Option<P::Inx>,
    /// Subtree with greater keys
    pub p_tree1: Option<P::Inx>,
}

impl<P: Ptr> Links<P> {
    pub const fn new() -> Self {
        Self {
            p_back: None,
            p_tree0: None,
            p_tree1: None,
        }
    }
}

impl<P: Ptr> Default for Links<P> {
    fn default() -> Self {
        Self::new()
    }
}

/// One pair entry of a `BiMap`. A single arena allocation is a node of the
/// left tree and a node of the right tree at the same time, so given the
/// index of either node, the sibling node and both values are one lookup
/// away.
pub struct Entry<P: Ptr, L, R> {
    pub(crate) l: L,
    pub(crate) r: R,
    pub(crate) links_l: Links<P>,
    pub(crate) links_r: Links<P>,
}

impl<P: Ptr, L, R> Entry<P, L, R> {
    pub(crate) fn new(l: L, r: R) -> Self {
        Self {
            l,
            r,
            links_l: Links::new(),
            links_r: Links::new(),
        }
    }

    pub fn left(&self) -> &L {
        &self.l
    }

    pub fn right(&self) -> &R {
        &self.r
    }

    pub(crate) fn into_pair(self) -> (L, R) {
        (self.l, self.r)
    }
}

/// Access to the key and the links of side `S` of a node. This is the seam
/// between the tree engine and the entries stored in the arena.
pub trait TreeNode<P: Ptr, S: Side> {
    type Key;

    fn key(&self) -> &Self::Key;

    fn links(&self) -> &Links<P>;

    fn links_mut(&mut self) -> &mut Links<P>;
}

impl<P: Ptr, L, R> TreeNode<P, Left> for Entry<P, L, R> {
    type Key = L;

    #[inline]
    fn key(&self) -> &L {
        &self.l
    }

    #[inline]
    fn links(&self) -> &Links<P> {
        &self.links_l
    }

    #[inline]
    fn links_mut(&mut self) -> &mut Links<P> {
        &mut self.links_l
    }
}

impl<P: Ptr, L, R> TreeNode<P, Right> for Entry<P, L, R> {
    type Key = R;

    #[inline]
    fn key(&self) -> &R {
        &self.r
    }

    #[inline]
    fn links(&self) -> &Links<P> {
        &self.links_r
    }

    #[inline]
    fn links_mut(&mut self) -> &mut Links<P> {
        &mut self.links_r
    }
}
