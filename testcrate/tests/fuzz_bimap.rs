use std::{collections::BTreeMap, ops::Bound};

use bimap_arena::{Advancer, BiMap, Error, LeftPos, Recast};
use rand_xoshiro::{
    rand_core::{RngCore, SeedableRng},
    Xoshiro128StarStar,
};
use testcrate::P0;

macro_rules! next_inx {
    ($rng:ident, $len:ident) => {
        $rng.next_u32() as usize % $len
    };
}

// avoid getting mixups
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
struct Lhs {
    pub l: u64,
}
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
struct Rhs {
    pub r: u64,
}

// make sure we have collisions on both sides
const MAX_L: u64 = 96;
const MAX_R: u64 = 128;

/// Checks `m` against the reference maps in both orders
fn check(m: &BiMap<P0, Lhs, Rhs>, l_to_r: &BTreeMap<Lhs, Rhs>, r_to_l: &BTreeMap<Rhs, Lhs>) {
    if let Err(e) = BiMap::_check_invariants(m) {
        panic!("{e}");
    }
    assert_eq!(m.len(), l_to_r.len());
    assert_eq!(m.len(), r_to_l.len());
    assert_eq!(m.is_empty(), l_to_r.is_empty());
    assert!(m
        .iter_left()
        .map(|(_, l, r)| (*l, *r))
        .eq(l_to_r.iter().map(|(l, r)| (*l, *r))));
    assert!(m
        .iter_right()
        .map(|(_, l, r)| (*r, *l))
        .eq(r_to_l.iter().map(|(r, l)| (*r, *l))));
}

#[test]
fn fuzz_bimap() {
    let mut rng = Xoshiro128StarStar::seed_from_u64(0);
    let new_l = |rng: &mut Xoshiro128StarStar| Lhs {
        l: rng.next_u64() % MAX_L,
    };
    let new_r = |rng: &mut Xoshiro128StarStar| Rhs {
        r: rng.next_u64() % MAX_R,
    };

    let mut m: BiMap<P0, Lhs, Rhs> = BiMap::new();
    let mut l_to_r: BTreeMap<Lhs, Rhs> = BTreeMap::new();
    let mut r_to_l: BTreeMap<Rhs, Lhs> = BTreeMap::new();
    // makes sure that the test harness is not degenerate
    let mut max_len = 0;
    let mut n_inserted = 0u64;
    let mut n_rejected = 0u64;
    let mut n_repurposed = 0u64;
    for _ in 0..100_000 {
        check(&m, &l_to_r, &r_to_l);
        let len = m.len();
        match rng.next_u32() % 1000 {
            0..=199 => {
                // insert
                let l = new_l(&mut rng);
                let r = new_r(&mut rng);
                let pos = m.insert(l, r);
                if l_to_r.contains_key(&l) || r_to_l.contains_key(&r) {
                    assert!(pos.is_end());
                    n_rejected += 1;
                } else {
                    assert_eq!(m.get_pair(pos), Ok((&l, &r)));
                    assert_eq!(m.get_pair(pos.flip()), Ok((&l, &r)));
                    l_to_r.insert(l, r);
                    r_to_l.insert(r, l);
                    n_inserted += 1;
                }
            }
            200..=299 => {
                // erase_left, erase_right
                if (rng.next_u32() & 1) == 0 {
                    let l = new_l(&mut rng);
                    if let Some(r) = l_to_r.remove(&l) {
                        r_to_l.remove(&r).unwrap();
                        assert!(m.erase_left(&l));
                    } else {
                        assert!(!m.erase_left(&l));
                    }
                } else {
                    let r = new_r(&mut rng);
                    if let Some(l) = r_to_l.remove(&r) {
                        l_to_r.remove(&l).unwrap();
                        assert!(m.erase_right(&r));
                    } else {
                        assert!(!m.erase_right(&r));
                    }
                }
            }
            300..=349 => {
                // erase by position, the next position must follow
                if len != 0 {
                    let (l, r) = l_to_r
                        .iter()
                        .nth(next_inx!(rng, len))
                        .map(|(l, r)| (*l, *r))
                        .unwrap();
                    if (rng.next_u32() & 1) == 0 {
                        let next = m.erase(m.find_left(&l)).unwrap();
                        l_to_r.remove(&l).unwrap();
                        r_to_l.remove(&r).unwrap();
                        let expected = l_to_r.range(l..).next().map(|(l, _)| l);
                        assert_eq!(m.get_left(next).ok(), expected);
                    } else {
                        let next = m.erase(m.find_right(&r)).unwrap();
                        l_to_r.remove(&l).unwrap();
                        r_to_l.remove(&r).unwrap();
                        let expected = r_to_l.range(r..).next().map(|(r, _)| r);
                        assert_eq!(m.get_right(next).ok(), expected);
                    }
                } else {
                    assert_eq!(m.erase(m.begin_left()), Err(Error::OutOfRange));
                }
            }
            350..=369 => {
                // remove by handle
                if len != 0 {
                    let (l, r) = r_to_l
                        .iter()
                        .nth(next_inx!(rng, len))
                        .map(|(r, l)| (*l, *r))
                        .unwrap();
                    let p = m.find_right(&r).ptr().unwrap();
                    assert_eq!(m.remove(p), Some((l, r)));
                    assert!(m.remove(p).is_none());
                    assert_eq!(m.get_pair(LeftPos::at(p)), Err(Error::InvalidPos));
                    l_to_r.remove(&l).unwrap();
                    r_to_l.remove(&r).unwrap();
                }
            }
            370..=389 => {
                // erase_range over a random range of the left order
                let l0 = new_l(&mut rng);
                let l1 = new_l(&mut rng);
                let (l0, l1) = if l0 <= l1 { (l0, l1) } else { (l1, l0) };
                let first = m.lower_bound_left(&l0);
                let last = m.lower_bound_left(&l1);
                assert_eq!(m.erase_range(first, last), Ok(last));
                let erased: Vec<Lhs> = l_to_r.range(l0..l1).map(|(l, _)| *l).collect();
                for l in erased {
                    let r = l_to_r.remove(&l).unwrap();
                    r_to_l.remove(&r).unwrap();
                }
                if first != last {
                    assert_eq!(m.erase_range(last, first), Err(Error::InvalidPos));
                }
            }
            390..=439 => {
                // at_left_or_default, which may repurpose the pair with the default right
                let l = new_l(&mut rng);
                let r_default = Rhs::default();
                let expected = if let Some(r) = l_to_r.get(&l) {
                    *r
                } else {
                    if let Some(old_l) = r_to_l.remove(&r_default) {
                        l_to_r.remove(&old_l).unwrap();
                        n_repurposed += 1;
                    }
                    l_to_r.insert(l, r_default);
                    r_to_l.insert(r_default, l);
                    r_default
                };
                assert_eq!(*m.at_left_or_default(l), expected);
            }
            440..=489 => {
                // at_right_or_default
                let r = new_r(&mut rng);
                let l_default = Lhs::default();
                let expected = if let Some(l) = r_to_l.get(&r) {
                    *l
                } else {
                    if let Some(old_r) = l_to_r.remove(&l_default) {
                        r_to_l.remove(&old_r).unwrap();
                        n_repurposed += 1;
                    }
                    r_to_l.insert(r, l_default);
                    l_to_r.insert(l_default, r);
                    l_default
                };
                assert_eq!(*m.at_right_or_default(r), expected);
            }
            490..=739 => {
                // find, at, flip
                let l = new_l(&mut rng);
                let pos = m.find_left(&l);
                match l_to_r.get(&l) {
                    Some(r) => {
                        assert_eq!(m.at_left(&l), Ok(r));
                        assert_eq!(m.get_right(pos.flip()), Ok(r));
                        assert_eq!(m.find_right(r), pos.flip());
                        assert_eq!(m.at_right(r), Ok(&l));
                        assert!(m.contains_left(&l));
                    }
                    None => {
                        assert!(pos.is_end());
                        assert_eq!(m.at_left(&l), Err(Error::NotFound));
                        assert!(!m.contains_left(&l));
                    }
                }
                let r = new_r(&mut rng);
                if !r_to_l.contains_key(&r) {
                    assert!(m.find_right(&r).is_end());
                    assert_eq!(m.at_right(&r), Err(Error::NotFound));
                }
            }
            740..=889 => {
                // lower_bound, upper_bound, next, prev
                let l = new_l(&mut rng);
                let lb = m.lower_bound_left(&l);
                let ub = m.upper_bound_left(&l);
                assert_eq!(m.get_left(lb).ok(), l_to_r.range(l..).next().map(|(l, _)| l));
                assert_eq!(
                    m.get_left(ub).ok(),
                    l_to_r
                        .range((Bound::Excluded(l), Bound::Unbounded))
                        .next()
                        .map(|(l, _)| l)
                );
                match m.prev(lb) {
                    Ok(prev) => {
                        let expected = l_to_r.range(..l).next_back().map(|(l, _)| l);
                        assert_eq!(m.get_left(prev).ok(), expected);
                        assert_eq!(m.next(prev), Ok(lb));
                    }
                    Err(e) => {
                        assert_eq!(e, Error::OutOfRange);
                        assert!(l_to_r.range(..l).next().is_none());
                    }
                }
                let r = new_r(&mut rng);
                let lb = m.lower_bound_right(&r);
                let ub = m.upper_bound_right(&r);
                assert_eq!(m.get_right(lb).ok(), r_to_l.range(r..).next().map(|(r, _)| r));
                assert_eq!(
                    m.get_right(ub).ok(),
                    r_to_l
                        .range((Bound::Excluded(r), Bound::Unbounded))
                        .next()
                        .map(|(r, _)| r)
                );
            }
            890..=949 => {
                // advancer with removal of the current entry
                let mut adv = m.advancer_right();
                let mut n = 0;
                while let Some(p) = adv.advance(&m) {
                    n += 1;
                    let (l, r) = m.get(p).map(|(l, r)| (*l, *r)).unwrap();
                    if (rng.next_u32() % 16) == 0 {
                        assert_eq!(m.remove(p), Some((l, r)));
                        l_to_r.remove(&l).unwrap();
                        r_to_l.remove(&r).unwrap();
                    }
                }
                assert_eq!(n, len);
            }
            950..=979 => {
                // clone, equality
                let m2 = m.clone();
                BiMap::_check_invariants(&m2).unwrap();
                assert_eq!(m, m2);
                check(&m2, &l_to_r, &r_to_l);
            }
            980..=989 => {
                // compress_and_shrink_recaster
                let old: Vec<_> = m.iter_left().map(|(p, l, r)| (p, *l, *r)).collect();
                let recaster = m.compress_and_shrink_recaster();
                assert_eq!(m.capacity(), m.len());
                for (p, l, r) in old {
                    let mut q = p;
                    q.recast(&recaster).unwrap();
                    // the generation always changes
                    assert!(!m.contains(p));
                    assert_eq!(m.get(q), Some((&l, &r)));
                }
            }
            990..=994 => {
                // double ended iteration
                let mut iter = m.iter_left();
                assert_eq!(iter.len(), len);
                let mut lefts = vec![];
                let mut rev = vec![];
                loop {
                    if (rng.next_u32() & 1) == 0 {
                        match iter.next() {
                            Some((_, l, _)) => lefts.push(*l),
                            None => break,
                        }
                    } else {
                        match iter.next_back() {
                            Some((_, l, _)) => rev.push(*l),
                            None => break,
                        }
                    }
                }
                assert!(iter.next().is_none() && iter.next_back().is_none());
                lefts.extend(rev.into_iter().rev());
                assert!(lefts.iter().eq(l_to_r.keys()));
            }
            995..=999 => {
                // clear
                m.clear();
                l_to_r.clear();
                r_to_l.clear();
            }
            _ => unreachable!(),
        }
        max_len = std::cmp::max(max_len, m.len());
    }
    check(&m, &l_to_r, &r_to_l);
    assert!(max_len > 16);
    assert!(n_inserted > 1000);
    assert!(n_rejected > 1000);
    assert!(n_repurposed > 100);
}
