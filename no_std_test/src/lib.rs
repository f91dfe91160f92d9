//! insures that the crate is `no_std` and also has some `cargo-show-asm`
//! targets to check
//!
//! `cargo asm --target=riscv32i-unknown-none-elf -p no_std_test`

#![no_std]
#![allow(clippy::all)]

use bimap_arena::{ptr_struct, BiMap, LeftPos};

ptr_struct!(P0());
ptr_struct!(P1);

pub fn asm_find_left(m: &BiMap<P0, u64, u64>, l: u64) -> LeftPos<P0> {
    m.find_left(&l)
}

pub fn asm_at_left(m: &BiMap<P1, u64, u64>, l: u64) -> u64 {
    *m.at_left(&l).unwrap()
}

// make sure this especially is minimal
pub fn asm_flip_get(m: &BiMap<P1, u64, u64>, pos: LeftPos<P1>) -> u64 {
    *m.get_right(pos.flip()).unwrap()
}

pub fn asm_insert(m: &mut BiMap<P1, u64, u64>, l: u64, r: u64) -> bool {
    !m.insert(l, r).is_end()
}

pub fn asm_erase_left(m: &mut BiMap<P1, u64, u64>, l: u64) -> bool {
    m.erase_left(&l)
}
