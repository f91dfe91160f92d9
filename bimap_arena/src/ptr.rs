use core::{
    fmt::Debug,
    hash::Hash,
    num::{NonZeroU128, NonZeroU16, NonZeroU32, NonZeroU64, NonZeroU8, NonZeroUsize},
};

/// Generation counter type of a `Ptr`.
///
/// Implemented only for the `NonZeroU...` types and for `()`, users should
/// never have to implement this.
pub trait PtrGen: Debug + Hash + Copy + Eq + Ord + Send + Sync {
    /// The generation that is always invalid, arenas start counting at
    /// `two()` so that `Ptr::invalid` can use this
    fn one() -> Self;

    /// The starting generation of every arena
    fn two() -> Self;

    /// Returns `this + 1`, panics on overflow
    fn increment(this: Self) -> Self;
}

macro_rules! impl_ptr_gen {
    ($($nz:ident)*) => {
        $(
            impl PtrGen for $nz {
                #[inline]
                fn one() -> Self {
                    $nz::MIN
                }

                #[inline]
                fn two() -> Self {
                    $nz::MIN.saturating_add(1)
                }

                #[inline]
                fn increment(this: Self) -> Self {
                    match this.checked_add(1) {
                        Some(gen) => gen,
                        None => panic!("generation overflow"),
                    }
                }
            }
        )*
    };
}

impl_ptr_gen!(NonZeroU8 NonZeroU16 NonZeroU32 NonZeroU64 NonZeroU128);

impl PtrGen for () {
    #[inline]
    fn one() -> Self {}

    #[inline]
    fn two() -> Self {}

    #[inline]
    fn increment(_this: Self) -> Self {}
}

/// Index type of a `Ptr`. Indexes start at 1 so that `Option<P::Inx>` has a
/// niche, which keeps the tree links of every entry small.
///
/// Implemented only for the `NonZeroU...` types.
pub trait PtrInx: Debug + Hash + Copy + Eq + Ord + Send + Sync {
    /// Truncating conversion, callers handle the fallible cases
    fn new(inx: NonZeroUsize) -> Self;

    fn get(this: Self) -> NonZeroUsize;

    /// The largest index representable, truncated to `usize::MAX`
    fn max() -> NonZeroUsize;
}

macro_rules! impl_ptr_inx {
    ($($nz:ident $x:ident);*;) => {
        $(
            impl PtrInx for $nz {
                #[inline]
                fn new(inx: NonZeroUsize) -> Self {
                    match $nz::new(inx.get() as $x) {
                        Some(inx) => inx,
                        None => panic!("`PtrInx` truncated to zero"),
                    }
                }

                #[inline]
                fn get(this: Self) -> NonZeroUsize {
                    match NonZeroUsize::new(this.get() as usize) {
                        Some(inx) => inx,
                        None => unreachable!(),
                    }
                }

                #[inline]
                fn max() -> NonZeroUsize {
                    if ($x::MAX as u128) > (usize::MAX as u128) {
                        NonZeroUsize::MAX
                    } else {
                        match NonZeroUsize::new($x::MAX as usize) {
                            Some(max) => max,
                            None => unreachable!(),
                        }
                    }
                }
            }
        )*
    };
}

impl_ptr_inx!(
    NonZeroUsize usize;
    NonZeroU8 u8;
    NonZeroU16 u16;
    NonZeroU32 u32;
    NonZeroU64 u64;
    NonZeroU128 u128;
);

/// A handle to one pair entry of a `BiMap`. The same handle is used on both
/// sides of the map, which is what makes flipping a position `O(1)`.
///
/// Use the `ptr_struct` macro to declare types implementing this. `PartialEq`
/// must differentiate handles with the same index but different generations,
/// and `Default` must be `Ptr::invalid`.
pub trait Ptr: Debug + Hash + Copy + Eq + Ord + Send + Sync {
    /// `NonZeroUsize` is the general purpose choice
    type Inx: PtrInx;

    /// `NonZeroU64` if stale handles should be detected, otherwise `()`
    type Gen: PtrGen;

    /// A handle with generation `PtrGen::one()` and the maximum index, which
    /// is never valid if generation counters are used
    fn invalid() -> Self;

    /// The raw index of the entry
    fn inx(self) -> Self::Inx;

    fn gen(self) -> Self::Gen;

    /// Do not use this unless you are manually managing internal details
    fn _from_raw(inx: Self::Inx, gen: Self::Gen) -> Self;
}

/// Declares new structs implementing `Ptr`.
///
/// By default the index type is `NonZeroUsize` and the generation type is
/// `NonZeroU64`. The struct name can be followed by square brackets with a
/// different `NonZero` index type, and then by parenthesis with a different
/// `NonZero` generation type. Empty parenthesis remove the generation counter
/// entirely (stale handles are then only detected on a best effort basis).
/// Attributes can follow as a comma separated list, and multiple structs of
/// the same kind can be declared with semicolon separators.
///
/// ```
/// use core::num::{NonZeroU16, NonZeroU32};
///
/// use bimap_arena::{ptr_struct, BiMap};
///
/// // default index and generation types, with a doc attribute
/// ptr_struct!(P0 doc="Handles to city entries");
/// let _: BiMap<P0, u32, String>;
///
/// // smaller index type
/// ptr_struct!(P1[NonZeroU32]);
///
/// // smaller generation type
/// ptr_struct!(P2(NonZeroU16));
///
/// // both custom
/// ptr_struct!(P3[NonZeroU32](NonZeroU16));
///
/// // no generation counter
/// ptr_struct!(P4());
///
/// // several at once
/// ptr_struct!(Q0(); Q1(); R0());
/// ```
#[macro_export]
macro_rules! ptr_struct {
    (@common $struct_name:ident) => {
        impl core::default::Default for $struct_name {
            #[inline]
            fn default() -> Self {
                $crate::Ptr::invalid()
            }
        }

        impl core::fmt::Display for $struct_name {
            fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
                core::fmt::Debug::fmt(self, f)
            }
        }

        impl $crate::Recast<Self> for $struct_name {
            fn recast<R: $crate::Recaster<Item = Self>>(
                &mut self,
                recaster: &R,
            ) -> Result<(), <R as $crate::Recaster>::Item> {
                $crate::Recaster::recast_item(recaster, self)
            }
        }
    };
    (@def $struct_name:ident, $inx_type:path, $gen_type:ty, $($attributes:meta),*) => {
        $(#[$attributes])*
        #[derive(
            core::hash::Hash,
            core::clone::Clone,
            core::marker::Copy,
            core::cmp::PartialEq,
            core::cmp::Eq,
            core::cmp::PartialOrd,
            core::cmp::Ord
        )]
        pub struct $struct_name {
            // the index goes first so that the derived ordering is by index
            #[doc(hidden)]
            _internal_inx: $inx_type,
            #[doc(hidden)]
            _internal_gen: $gen_type,
        }

        impl $crate::Ptr for $struct_name {
            type Gen = $gen_type;
            type Inx = $inx_type;

            #[inline]
            fn invalid() -> Self {
                Self {
                    _internal_inx: $crate::utils::PtrInx::new(
                        <Self::Inx as $crate::utils::PtrInx>::max()
                    ),
                    _internal_gen: $crate::utils::PtrGen::one(),
                }
            }

            #[inline]
            fn inx(self) -> Self::Inx {
                self._internal_inx
            }

            #[inline]
            fn gen(self) -> Self::Gen {
                self._internal_gen
            }

            #[inline]
            #[doc(hidden)]
            fn _from_raw(_internal_inx: Self::Inx, _internal_gen: Self::Gen) -> Self {
                Self {
                    _internal_inx,
                    _internal_gen,
                }
            }
        }

        $crate::ptr_struct!(@common $struct_name);
    };
    ($($struct_name:ident[$inx_type:path]($gen_type:path) $($attributes:meta),*);*) => {
        $(
            $crate::ptr_struct!(@def $struct_name, $inx_type, $gen_type, $($attributes),*);

            // inline and without newlines so that `BiMap` debug output stays
            // readable
            impl core::fmt::Debug for $struct_name {
                fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
                    f.write_fmt(format_args!(
                        "{}[{:?}]({:?})",
                        stringify!($struct_name),
                        $crate::Ptr::inx(*self),
                        $crate::Ptr::gen(*self),
                    ))
                }
            }
        )*
    };
    ($($struct_name:ident[$inx_type:path]() $($attributes:meta),*);*) => {
        $(
            $crate::ptr_struct!(@def $struct_name, $inx_type, (), $($attributes),*);

            impl core::fmt::Debug for $struct_name {
                fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
                    f.write_fmt(format_args!(
                        "{}[{:?}]",
                        stringify!($struct_name),
                        $crate::Ptr::inx(*self),
                    ))
                }
            }
        )*
    };
    ($($struct_name:ident[$inx_type:path] $($attributes:meta),*);*) => {
        $(
            $crate::ptr_struct!(
                $struct_name[$inx_type](core::num::NonZeroU64) $($attributes),*
            );
        )*
    };
    ($($struct_name:ident($gen_type:path) $($attributes:meta),*);*) => {
        $(
            $crate::ptr_struct!(
                $struct_name[core::num::NonZeroUsize]($gen_type) $($attributes),*
            );
        )*
    };
    ($($struct_name:ident() $($attributes:meta),*);*) => {
        $(
            $crate::ptr_struct!(
                $struct_name[core::num::NonZeroUsize]() $($attributes),*
            );
        )*
    };
    ($($struct_name:ident $($attributes:meta),*);*) => {
        $(
            $crate::ptr_struct!(
                $struct_name[core::num::NonZeroUsize](core::num::NonZeroU64) $($attributes),*
            );
        )*
    };
}
