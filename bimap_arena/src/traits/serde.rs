//! Documentation on the serialization of `BiMap`s
//!
//! A `BiMap` serializes as a sequence of `(L, R)` tuples in left order.
//! Handles are not part of the serialized form, deserialization reinserts the
//! pairs into a fresh map with `Default` comparators. The serialized form
//! does not depend on the comparators, so a map can be deserialized with
//! different comparators than it was serialized with, as long as the pairs
//! stay unique under the new comparators. Duplicate left or right values are
//! a deserialization error.
//!
//! ```
//! // Example using the `ron` crate
//! use bimap_arena::{ptr_struct, BiMap, Natural, Reverse};
//! use ron::{from_str, to_string};
//!
//! ptr_struct!(P0);
//!
//! let mut m: BiMap<P0, u32, String> = BiMap::new();
//! m.insert(7, "seven".to_owned());
//! m.insert(2, "two".to_owned());
//! m.insert(40, "forty".to_owned());
//!
//! let serialized = to_string(&m).unwrap();
//! assert_eq!(serialized, "[(2,\"two\"),(7,\"seven\"),(40,\"forty\")]");
//!
//! let m2: BiMap<P0, u32, String> = from_str(&serialized).unwrap();
//! assert_eq!(m, m2);
//!
//! // different comparators, same pairs
//! let m3: BiMap<P0, u32, String, Reverse<Natural>, Natural> = from_str(&serialized).unwrap();
//! let lefts: Vec<u32> = m3.iter_left().map(|(_, l, _)| *l).collect();
//! assert_eq!(lefts, [40, 7, 2]);
//!
//! // the right value "two" appears twice
//! let res: Result<BiMap<P0, u32, String>, _> = from_str("[(1,\"two\"),(2,\"two\")]");
//! assert!(res.is_err());
//! ```

use alloc::fmt;
use core::marker::PhantomData;

use serde::{
    de::{Error, SeqAccess, Visitor},
    ser::SerializeSeq,
    Deserialize, Deserializer, Serialize, Serializer,
};

use crate::{utils::PtrInx, BiMap, Compare, Ptr};

impl<P: Ptr, L: Serialize, R: Serialize, CL, CR> Serialize for BiMap<P, L, R, CL, CR> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut s = serializer.serialize_seq(Some(self.len()))?;
        for (_, l, r) in self {
            s.serialize_element(&(l, r))?;
        }
        s.end()
    }
}

struct BiMapVisitor<P: Ptr, L, R, CL, CR>(PhantomData<fn() -> (P, L, R, CL, CR)>);

impl<'de, P: Ptr, L, R, CL, CR> Visitor<'de> for BiMapVisitor<P, L, R, CL, CR>
where
    L: Deserialize<'de>,
    R: Deserialize<'de>,
    CL: Compare<L> + Default,
    CR: Compare<R> + Default,
{
    type Value = BiMap<P, L, R, CL, CR>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a sequence of `BiMap` pairs")
    }

    fn visit_seq<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let max = <P::Inx as PtrInx>::max().get();
        let mut m = BiMap::default();
        if let Some(hint) = access.size_hint() {
            // the hint is untrusted
            m.reserve(hint.min(1 << 12).min(max));
        }
        while let Some((l, r)) = access.next_element::<(L, R)>()? {
            if m.len() >= max {
                return Err(Error::custom(
                    "when deserializing a `BiMap`, the number of pairs exceeded `P::Inx::max()`",
                ))
            }
            if m.insert(l, r).is_end() {
                return Err(Error::custom(
                    "when deserializing a `BiMap`, encountered a duplicate left or right value",
                ))
            }
        }
        Ok(m)
    }
}

impl<'de, P: Ptr, L, R, CL, CR> Deserialize<'de> for BiMap<P, L, R, CL, CR>
where
    L: Deserialize<'de>,
    R: Deserialize<'de>,
    CL: Compare<L> + Default,
    CR: Compare<R> + Default,
{
    /// This function returns an error in case of duplicate left or right
    /// values
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_seq(BiMapVisitor(PhantomData))
    }
}
