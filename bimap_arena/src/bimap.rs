mod base_bimap;
pub mod bimap_iterators;
mod find;

pub use base_bimap::BiMap;
