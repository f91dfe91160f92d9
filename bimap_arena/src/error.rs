use core::fmt;

/// The error type of the fallible `BiMap` operations.
///
/// Absence is not an error for `find_*` and `erase_*` by key, those return an
/// end position or `false` instead. Inserting a pair that collides on either
/// side is not an error either, `insert` returns an end position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Error {
    /// A strict lookup found no entry for the key
    NotFound,
    /// The position or `Ptr` refers to an entry that has been erased
    InvalidPos,
    /// Advancing past the end, retreating before the beginning, or
    /// dereferencing or erasing an end position
    OutOfRange,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::NotFound => f.write_str("key not found in `BiMap`"),
            Error::InvalidPos => f.write_str("position refers to an erased entry"),
            Error::OutOfRange => f.write_str("position is out of range"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}
