//! makes sure all variations of the macro compile and do not require imports
//! other than the macro itself

use std::num::{NonZeroU128, NonZeroU16, NonZeroU8};

use bimap_arena::ptr_struct;

ptr_struct!(P0[NonZeroU128](NonZeroU128));
ptr_struct!(P1[NonZeroU128]());
ptr_struct!(P2[NonZeroU128]);
ptr_struct!(P3(NonZeroU128));
ptr_struct!(P4());
ptr_struct!(P5);
ptr_struct!(P6; Q0; Q1);
ptr_struct!(R0[NonZeroU8](NonZeroU128); R1[NonZeroU8](NonZeroU128));
ptr_struct!(S0[NonZeroU16](NonZeroU16) doc = "with an attribute");

#[test]
fn small_handles() {
    use bimap_arena::BiMap;

    // a `NonZeroU8` index can address 255 pairs
    let mut m: BiMap<R0, u8, u8> = BiMap::new();
    for i in 0..255u8 {
        assert!(!m.insert(i, 254 - i).is_end());
    }
    assert_eq!(m.len(), 255);
    assert_eq!(m.capacity(), 255);
    BiMap::_check_invariants(&m).unwrap();
    assert_eq!(format!("{:?}", m.find_left(&0).ptr().unwrap()), "R0[1](2)");
    assert_eq!(m.at_right(&0), Ok(&254));

    let mut m: BiMap<P4, u8, u8> = BiMap::new();
    m.insert(1, 2);
    assert_eq!(format!("{:?}", m.find_left(&1).ptr().unwrap()), "P4[1]");
}
