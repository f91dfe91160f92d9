//! A bidirectional ordered map where every `(left, right)` pair is one arena
//! entry that is a node of two binary search trees at once. The left values
//! are ordered and unique by one comparator, the right values by another, and
//! a position found through one side can be flipped to the other side in
//! `O(1)`.
//!
//! ```
//! use bimap_arena::{ptr_struct, BiMap, Reverse};
//!
//! // handle type for the pairs, see `ptr_struct` for the options
//! ptr_struct!(P0);
//!
//! // cities ordered by id on the left and by reverse name on the right
//! let mut m: BiMap<P0, u32, &str, _, _> =
//!     BiMap::with_comparators(bimap_arena::Natural, Reverse(bimap_arena::Natural));
//! m.insert(3, "Lisbon");
//! m.insert(1, "Oslo");
//! m.insert(2, "Bern");
//!
//! let names: Vec<&str> = m.iter_right().map(|(_, _, r)| *r).collect();
//! assert_eq!(names, ["Oslo", "Lisbon", "Bern"]);
//!
//! // walk forward on the left, then jump over to the right order
//! let pos = m.next(m.find_left(&1)).unwrap();
//! assert_eq!(m.get_right(pos), Ok(&"Bern"));
//! let pos = m.prev(pos.flip()).unwrap();
//! assert_eq!(m.get_pair(pos), Ok((&3, &"Lisbon")));
//! ```

#![no_std]
// because `Ptr` is based on user-controlled code we will not use unsafe code
#![deny(unsafe_code)]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod arena;
mod bimap;
mod entry;
mod error;
mod ptr;
mod side;
mod traits;
mod tree;

pub use arena::Arena;
pub use bimap::{bimap_iterators, BiMap};
pub use error::Error;
pub use ptr::Ptr;
pub use recasting::{Recast, Recaster};
pub use side::{Left, LeftPos, Pos, Right, RightPos, Side};
#[cfg(feature = "serde_support")]
pub use traits::serde;
pub use traits::{Advancer, Compare, Natural, Reverse};

/// Internals that are needed by the `ptr_struct` macro or that are exposed for
/// testing and for manual tree management. Users should not normally need
/// these.
pub mod utils {
    pub use crate::{
        entry::{Entry, Links, TreeNode},
        ptr::{PtrGen, PtrInx},
        tree::Tree,
    };
}
