#![feature(test)]

extern crate test;
use std::collections::BTreeMap;

use bimap_arena::BiMap;
use rand_xoshiro::{rand_core::SeedableRng, Xoshiro128StarStar};
use test::Bencher;
use testcrate::{fuzz_fill_inst_bench, P0, P1};

const A: u64 = B << 1;
const B: u64 = 1 << 11;

fn get_std_insts() -> Vec<Result<(u64, u64), u64>> {
    let mut rng = Xoshiro128StarStar::seed_from_u64(0);
    // we fill the map up to `A` pairs, then randomly insert and remove the
    // same number of `B` pairs, then empty it in the same random way
    let (mut insts, sim) = fuzz_fill_inst_bench(&mut rng, &[], A, B);
    let tmp = fuzz_fill_inst_bench(&mut rng, &sim, B, B);
    insts.extend_from_slice(&tmp.0);
    let tmp = fuzz_fill_inst_bench(&mut rng, &tmp.1, B, A);
    insts.extend_from_slice(&tmp.0);
    assert!(tmp.1.is_empty());
    insts
}

// what a pair of ordered maps kept in sync by hand achieves
#[bench]
fn std_btree_pair(bencher: &mut Bencher) {
    let mut l_to_r = BTreeMap::<u64, u64>::new();
    let mut r_to_l = BTreeMap::<u64, u64>::new();

    bencher.iter(|| {
        let insts = get_std_insts();
        for inst in insts {
            match inst {
                Ok((l, r)) => {
                    if !(l_to_r.contains_key(&l) || r_to_l.contains_key(&r)) {
                        l_to_r.insert(l, r);
                        r_to_l.insert(r, l);
                    }
                }
                Err(l) => {
                    let r = l_to_r.remove(&l).unwrap();
                    r_to_l.remove(&r).unwrap();
                }
            }
        }
    })
}

#[bench]
fn bimap(bencher: &mut Bencher) {
    let mut m = BiMap::<P1, u64, u64>::new();

    bencher.iter(|| {
        let insts = get_std_insts();
        for inst in insts {
            match inst {
                Ok((l, r)) => {
                    m.insert(l, r);
                }
                Err(l) => {
                    assert!(m.erase_left(&l));
                }
            }
        }
    })
}

#[bench]
fn bimap_gen(bencher: &mut Bencher) {
    let mut m = BiMap::<P0, u64, u64>::new();

    bencher.iter(|| {
        let insts = get_std_insts();
        for inst in insts {
            match inst {
                Ok((l, r)) => {
                    m.insert(l, r);
                }
                Err(l) => {
                    assert!(m.erase_left(&l));
                }
            }
        }
    })
}

#[bench]
fn bimap_find(bencher: &mut Bencher) {
    let mut m = BiMap::<P1, u64, u64>::new();
    let (insts, _) = fuzz_fill_inst_bench(&mut Xoshiro128StarStar::seed_from_u64(0), &[], A, 0);
    let mut keys = vec![];
    for (l, r) in insts.into_iter().flatten() {
        m.insert(l, r);
        keys.push((l, r));
    }

    bencher.iter(|| {
        for (l, r) in &keys {
            let pos = m.find_left(l);
            assert_eq!(m.get_right(pos.flip()), Ok(r));
            assert_eq!(m.at_right(r), Ok(l));
        }
    })
}
