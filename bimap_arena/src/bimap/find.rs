use crate::{utils::Entry, BiMap, Compare, Error, Left, Pos, Ptr, Right};

/// Lookups. The `_left` functions search the left tree with a left value and
/// the `_right` functions search the right tree with a right value. A
/// resulting position can be flipped to the other side in `O(1)`.
impl<P: Ptr, L, R, CL: Compare<L>, CR: Compare<R>> BiMap<P, L, R, CL, CR> {
    /// Returns the left position of the pair with left value `l`, or the end
    /// position if there is none
    pub fn find_left(&self, l: &L) -> Pos<P, Left> {
        self.pos_of(self.left.find(&self.a, &self.cmp_l, l))
    }

    /// Returns the right position of the pair with right value `r`, or the
    /// end position if there is none
    pub fn find_right(&self, r: &R) -> Pos<P, Right> {
        self.pos_of(self.right.find(&self.a, &self.cmp_r, r))
    }

    pub fn contains_left(&self, l: &L) -> bool {
        self.left.find(&self.a, &self.cmp_l, l).is_some()
    }

    pub fn contains_right(&self, r: &R) -> bool {
        self.right.find(&self.a, &self.cmp_r, r).is_some()
    }

    /// Returns the right value paired with `l`
    ///
    /// # Errors
    ///
    /// `Error::NotFound` if `l` is not a left value
    pub fn at_left(&self, l: &L) -> Result<&R, Error> {
        match self.left.find(&self.a, &self.cmp_l, l) {
            Some(inx) => Ok(&self.a.get_inx_unwrap(inx).r),
            None => Err(Error::NotFound),
        }
    }

    /// Returns the left value paired with `r`
    ///
    /// # Errors
    ///
    /// `Error::NotFound` if `r` is not a right value
    pub fn at_right(&self, r: &R) -> Result<&L, Error> {
        match self.right.find(&self.a, &self.cmp_r, r) {
            Some(inx) => Ok(&self.a.get_inx_unwrap(inx).l),
            None => Err(Error::NotFound),
        }
    }

    /// Returns the right value paired with `l`. If `l` is not a left value,
    /// it is paired with `R::default()`. If `R::default()` is itself already
    /// paired with some other left value, no new pair is created: that pair
    /// has its left value replaced by `l` instead, so that right values stay
    /// unique and the length does not change.
    ///
    /// ```
    /// use bimap_arena::{ptr_struct, BiMap};
    ///
    /// ptr_struct!(P0);
    ///
    /// let mut m: BiMap<P0, i32, String> = BiMap::new();
    /// m.insert(1, "a".to_owned());
    /// m.insert(2, String::new());
    ///
    /// assert_eq!(m.at_left_or_default(1), "a");
    /// // `(2, "")` becomes `(3, "")`
    /// assert_eq!(m.at_left_or_default(3), "");
    /// assert_eq!(m.len(), 2);
    /// assert!(!m.contains_left(&2));
    /// assert_eq!(m.at_right(&String::new()), Ok(&3));
    /// ```
    pub fn at_left_or_default(&mut self, l: L) -> &R
    where
        R: Default,
    {
        let inx = if let Some(inx) = self.left.find(&self.a, &self.cmp_l, &l) {
            inx
        } else {
            let r = R::default();
            if let Some(inx) = self.right.find(&self.a, &self.cmp_r, &r) {
                // the new left value can belong anywhere in the left order, so the
                // node is always taken out of the left tree before it changes
                self.left.remove(&mut self.a, inx);
                self.a.get_inx_mut_unwrap(inx).l = l;
                self.left.insert(&mut self.a, &self.cmp_l, inx);
                inx
            } else {
                let p = self.a.insert(Entry::new(l, r));
                self.left.insert(&mut self.a, &self.cmp_l, p.inx());
                self.right.insert(&mut self.a, &self.cmp_r, p.inx());
                p.inx()
            }
        };
        &self.a.get_inx_unwrap(inx).r
    }

    /// Returns the left value paired with `r`. This is the mirror of
    /// [BiMap::at_left_or_default]: if `L::default()` is already paired, that
    /// pair has its right value replaced by `r`.
    pub fn at_right_or_default(&mut self, r: R) -> &L
    where
        L: Default,
    {
        let inx = if let Some(inx) = self.right.find(&self.a, &self.cmp_r, &r) {
            inx
        } else {
            let l = L::default();
            if let Some(inx) = self.left.find(&self.a, &self.cmp_l, &l) {
                self.right.remove(&mut self.a, inx);
                self.a.get_inx_mut_unwrap(inx).r = r;
                self.right.insert(&mut self.a, &self.cmp_r, inx);
                inx
            } else {
                let p = self.a.insert(Entry::new(l, r));
                self.left.insert(&mut self.a, &self.cmp_l, p.inx());
                self.right.insert(&mut self.a, &self.cmp_r, p.inx());
                p.inx()
            }
        };
        &self.a.get_inx_unwrap(inx).l
    }

    /// Returns the left position of the first pair with a left value not less
    /// than `l`
    pub fn lower_bound_left(&self, l: &L) -> Pos<P, Left> {
        self.pos_of(self.left.lower_bound(&self.a, &self.cmp_l, l))
    }

    /// Returns the left position of the first pair with a left value greater
    /// than `l`
    pub fn upper_bound_left(&self, l: &L) -> Pos<P, Left> {
        self.pos_of(self.left.upper_bound(&self.a, &self.cmp_l, l))
    }

    /// Returns the right position of the first pair with a right value not
    /// less than `r`
    pub fn lower_bound_right(&self, r: &R) -> Pos<P, Right> {
        self.pos_of(self.right.lower_bound(&self.a, &self.cmp_r, r))
    }

    /// Returns the right position of the first pair with a right value
    /// greater than `r`
    pub fn upper_bound_right(&self, r: &R) -> Pos<P, Right> {
        self.pos_of(self.right.upper_bound(&self.a, &self.cmp_r, r))
    }
}
