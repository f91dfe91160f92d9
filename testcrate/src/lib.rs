use std::{cell::Cell, cmp::Ordering, rc::Rc};

use bimap_arena::{ptr_struct, BiMap};
use rand_xoshiro::{rand_core::RngCore, Xoshiro128StarStar};

ptr_struct!(P0);
ptr_struct!(P1());

/// A small map used by several tests, with some holes in the arena
pub fn std_bimap() -> BiMap<P0, u64, String> {
    let mut m = BiMap::new();
    for i in 0..16u64 {
        // scrambled so the trees are not degenerate
        let l = (i * 7) % 16;
        m.insert(l, format!("r{}", (i * 11) % 16));
    }
    for l in [3u64, 8, 12] {
        assert!(m.erase_left(&l));
    }
    BiMap::_check_invariants(&m).unwrap();
    m
}

/// Creates instructions for benchmarks: `Ok(pair)` is an insertion of a pair
/// that is not in `sim` yet, and `Err(l)` removes the pair with left value
/// `l`. Starting from the pairs in `sim`, `fill` insertions are interleaved
/// with `drain` removals at random, and the new state is returned.
pub fn fuzz_fill_inst_bench(
    rng: &mut Xoshiro128StarStar,
    sim: &[(u64, u64)],
    fill: u64,
    drain: u64,
) -> (Vec<Result<(u64, u64), u64>>, Vec<(u64, u64)>) {
    let mut insts = vec![];
    let mut sim = sim.to_vec();
    let mut fill = fill;
    let mut drain = drain;
    while (fill != 0) || (drain != 0) {
        let insert = if fill == 0 {
            false
        } else if (drain == 0) || sim.is_empty() {
            true
        } else {
            (rng.next_u32() & 1) == 0
        };
        if insert {
            // 64 random bits make collisions vanishingly unlikely, but they are
            // still checked for so the instructions are exact
            let pair = (rng.next_u64(), rng.next_u64());
            if sim.iter().any(|(l, r)| (*l == pair.0) || (*r == pair.1)) {
                continue
            }
            insts.push(Ok(pair));
            sim.push(pair);
            fill -= 1;
        } else if sim.is_empty() {
            // nothing left to drain
            drain = 0;
        } else {
            let i = (rng.next_u32() as usize) % sim.len();
            insts.push(Err(sim.swap_remove(i).0));
            drain -= 1;
        }
    }
    (insts, sim)
}

/// A value that counts how many instances of it are alive through a shared
/// counter, and that panics when it is cloned for the `panic_on`th time
#[derive(Debug)]
pub struct Tracked {
    pub v: u64,
    pub live: Rc<Cell<usize>>,
    pub clones: Rc<Cell<usize>>,
    pub panic_on: usize,
}

impl Tracked {
    pub fn new(v: u64, live: &Rc<Cell<usize>>, clones: &Rc<Cell<usize>>, panic_on: usize) -> Self {
        live.set(live.get() + 1);
        Self {
            v,
            live: Rc::clone(live),
            clones: Rc::clone(clones),
            panic_on,
        }
    }

    /// A fallible clone that fails where `clone` would panic
    pub fn try_clone(&self) -> Result<Self, u64> {
        let clones = self.clones.get() + 1;
        self.clones.set(clones);
        if clones == self.panic_on {
            return Err(self.v)
        }
        self.live.set(self.live.get() + 1);
        Ok(Self {
            v: self.v,
            live: Rc::clone(&self.live),
            clones: Rc::clone(&self.clones),
            panic_on: self.panic_on,
        })
    }
}

impl Clone for Tracked {
    fn clone(&self) -> Self {
        match self.try_clone() {
            Ok(t) => t,
            Err(v) => panic!("clone of {v} panicked"),
        }
    }
}

impl Drop for Tracked {
    fn drop(&mut self) {
        self.live.set(self.live.get() - 1);
    }
}

impl PartialEq for Tracked {
    fn eq(&self, other: &Self) -> bool {
        self.v == other.v
    }
}

impl Eq for Tracked {}

impl PartialOrd for Tracked {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Tracked {
    fn cmp(&self, other: &Self) -> Ordering {
        self.v.cmp(&other.v)
    }
}
